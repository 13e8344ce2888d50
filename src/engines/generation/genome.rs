use rand::Rng;

/// Genome representation for tree generation
///
/// A genome is a sequence of integers that deterministically maps to a
/// well-typed rule tree. The `SemanticMapper` consumes genes in order to pick
/// node specs, variadic widths and literal values. Any genome maps to a valid
/// tree, so genomes can be mutated and recombined freely.
pub type Genome = Vec<u32>;

/// Draw a genome of `len` uniformly random genes
pub fn random_genome<R: Rng>(rng: &mut R, len: usize) -> Genome {
    (0..len).map(|_| rng.gen()).collect()
}
