/// Deterministically consumes genes from a genome
pub struct GeneConsumer<'a> {
    genome: &'a [u32],
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(genome: &'a [u32]) -> Self {
        Self { genome, position: 0 }
    }

    /// Next gene, wrapping around when the genome is exhausted.
    /// An empty genome always yields 0.
    pub fn consume(&mut self) -> u32 {
        if self.genome.is_empty() {
            return 0;
        }
        if self.position >= self.genome.len() {
            self.position = 0;
        }
        let gene = self.genome[self.position];
        self.position += 1;
        gene
    }

    /// Map the next gene to an index in `0..num_choices`
    pub fn choose(&mut self, num_choices: usize) -> usize {
        if num_choices == 0 {
            return 0;
        }
        (self.consume() as usize) % num_choices
    }

    /// Map the next gene into `[min, max]`
    pub fn float_range(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        let normalized = (self.consume() as f64) / (u32::MAX as f64);
        min + normalized * (max - min)
    }
}
