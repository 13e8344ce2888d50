use proptest::prelude::*;
use stgp_rules::engines::generation::SemanticMapper;
use stgp_rules::engines::persistence::{serialize, Parser};
use stgp_rules::types::{is_acceptable, SemanticType};
use stgp_rules::NodeRegistry;

fn any_type() -> impl Strategy<Value = SemanticType> {
    proptest::sample::select(SemanticType::ALL.to_vec())
}

proptest! {
    #[test]
    fn any_accepts_everything(supplied in any_type()) {
        prop_assert!(is_acceptable(supplied, SemanticType::Any));
    }

    #[test]
    fn every_type_accepts_itself(t in any_type()) {
        prop_assert!(is_acceptable(t, t));
    }

    #[test]
    fn widening_is_one_way(supplied in any_type(), expected in any_type()) {
        if supplied != expected && is_acceptable(supplied, expected) {
            prop_assert!(!is_acceptable(expected, supplied));
        }
    }

    #[test]
    fn boolean_and_numerical_never_mix(t in any_type()) {
        if t.is_numerical_domain() || t == SemanticType::Numerical {
            prop_assert!(!is_acceptable(t, SemanticType::Boolean));
            prop_assert!(!is_acceptable(SemanticType::Boolean, t));
        }
    }

    #[test]
    fn purpose_tags_are_not_operands(purpose in any_type(), expected in any_type()) {
        if purpose.is_purpose() && expected != SemanticType::Any && expected != purpose {
            prop_assert!(!is_acceptable(purpose, expected));
        }
    }

    #[test]
    fn any_genome_maps_to_a_parseable_tree(
        genome in proptest::collection::vec(any::<u32>(), 0..48)
    ) {
        let registry = NodeRegistry::with_builtins();
        let tree = SemanticMapper::new(&registry, 4).create_tree(&genome).unwrap();
        prop_assert!(tree.is_sealed());
        prop_assert!(tree.as_operator().is_some());
        let record = serialize(&tree);
        let parsed = Parser::new(&registry).parse(&record).unwrap();
        prop_assert_eq!(serialize(&parsed), record);
    }
}
