mod common;

use common::{full_snapshot, same_score};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stgp_rules::engines::generation::{random_genome, SemanticMapper, TreeValidator};
use stgp_rules::engines::persistence::{serialize, NodeRecord, Parser};
use stgp_rules::functions::registry::NodeRegistry;

const TREES: usize = 100;
const MAX_DEPTH: usize = 5;
const GENOME_LEN: usize = 64;

#[test]
fn test_random_trees_survive_serialize_and_parse() {
    let registry = NodeRegistry::with_builtins();
    let mapper = SemanticMapper::new(&registry, MAX_DEPTH);
    let parser = Parser::new(&registry);
    let validator = TreeValidator::new(MAX_DEPTH, 16);
    let snapshot = full_snapshot(&registry, 50.0);
    let mut rng = StdRng::seed_from_u64(0x5747_5052);

    for i in 0..TREES {
        let genome = random_genome(&mut rng, GENOME_LEN);
        let tree = mapper.create_tree(&genome).unwrap();
        assert!(tree.is_sealed(), "tree {} not sealed", i);
        validator.validate(&tree).unwrap();

        let record = serialize(&tree);
        let parsed = parser.parse(&record).unwrap();
        assert_eq!(serialize(&parsed), record, "tree {} changed shape", i);
        assert_eq!(parsed.result_type(), tree.result_type());

        let before = tree.evaluate(&snapshot).unwrap();
        let after = parsed.evaluate(&snapshot).unwrap();
        assert!(same_score(before, after), "tree {}: {} vs {}", i, before, after);
    }
}

#[test]
fn test_random_trees_survive_json_text() {
    let registry = NodeRegistry::with_builtins();
    let mapper = SemanticMapper::new(&registry, MAX_DEPTH);
    let parser = Parser::new(&registry);
    let snapshot = full_snapshot(&registry, 0.25);
    let mut rng = StdRng::seed_from_u64(17);

    for i in 0..TREES {
        let tree = mapper.create_tree(&random_genome(&mut rng, GENOME_LEN)).unwrap();
        let json = serde_json::to_string(&serialize(&tree)).unwrap();
        let record: NodeRecord = serde_json::from_str(&json).unwrap();
        let parsed = parser.parse(&record).unwrap();

        assert_eq!(serialize(&parsed), serialize(&tree), "tree {} changed in JSON", i);
        let before = tree.evaluate(&snapshot).unwrap();
        let after = parsed.evaluate(&snapshot).unwrap();
        assert!(same_score(before, after), "tree {}: {} vs {}", i, before, after);
    }
}

#[test]
fn test_same_genome_same_tree() {
    let registry = NodeRegistry::with_builtins();
    let mapper = SemanticMapper::new(&registry, MAX_DEPTH);
    let mut rng = StdRng::seed_from_u64(99);
    let genome = random_genome(&mut rng, GENOME_LEN);

    let a = serialize(&mapper.create_tree(&genome).unwrap());
    let b = serialize(&mapper.create_tree(&genome).unwrap());
    assert_eq!(a, b);
}
