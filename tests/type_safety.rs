use stgp_rules::functions::registry::NodeSpec;
use stgp_rules::types::is_acceptable;
use stgp_rules::{Arity, Node, NodeParams, NodeRegistry, RuleEngineError};

fn instantiate(registry: &NodeRegistry, spec: &NodeSpec) -> Node {
    if spec.is_parametric() {
        registry
            .create_node_with(spec.identifier(), NodeParams::value(1.0))
            .unwrap()
    } else {
        registry.create_node(spec.identifier()).unwrap()
    }
}

fn terminals(registry: &NodeRegistry) -> Vec<&NodeSpec> {
    registry.specs().into_iter().filter(|s| s.is_terminal()).collect()
}

fn operators(registry: &NodeRegistry) -> Vec<&NodeSpec> {
    registry.specs().into_iter().filter(|s| s.is_operator()).collect()
}

#[test]
fn test_attach_accepts_exactly_the_acceptable_types() {
    let registry = NodeRegistry::with_builtins();
    let mut attempts = 0;

    for op_spec in operators(&registry) {
        let probe = registry.create_node(op_spec.identifier()).unwrap();
        let op = probe.as_operator().unwrap();
        let expected_types = op.expected_types().to_vec();
        assert_eq!(Some(expected_types.clone()), op_spec.input_types());

        let slots: Vec<usize> = match op.arity() {
            Arity::Fixed(n) => (0..n).collect(),
            Arity::Variadic { .. } => vec![0],
        };

        for slot in slots {
            let expected = match op.arity() {
                Arity::Fixed(_) => expected_types[slot],
                Arity::Variadic { .. } => expected_types[0],
            };
            for child_spec in terminals(&registry) {
                let mut node = registry.create_node(op_spec.identifier()).unwrap();
                let op = node.as_operator_mut().unwrap();
                let child = instantiate(&registry, child_spec);
                let supplied = child.result_type();
                let result = op.attach(slot, child);
                attempts += 1;

                if is_acceptable(supplied, expected) {
                    assert!(
                        result.is_ok(),
                        "{} rejected {} at {}: {:?}",
                        op_spec.identifier(),
                        child_spec.identifier(),
                        slot,
                        result
                    );
                    assert_eq!(op.child_count(), 1);
                } else {
                    match result {
                        Err(RuleEngineError::TypeMismatch {
                            position,
                            expected: e,
                            supplied: s,
                            ..
                        }) => {
                            assert_eq!(position, slot);
                            assert_eq!(e, expected);
                            assert_eq!(s, supplied);
                        }
                        other => panic!(
                            "{} at {} with {}: expected TypeMismatch, got {:?}",
                            op_spec.identifier(),
                            slot,
                            child_spec.identifier(),
                            other
                        ),
                    }
                    assert_eq!(op.child_count(), 0);
                }
            }
        }
    }

    assert!(attempts > 0);
}

#[test]
fn test_fixed_arity_rejects_one_more_child() {
    let registry = NodeRegistry::with_builtins();

    for op_spec in operators(&registry) {
        let Some(Arity::Fixed(n)) = op_spec.arity() else { continue };
        let mut node = registry.create_node(op_spec.identifier()).unwrap();
        let op = node.as_operator_mut().unwrap();

        for slot in 0..n {
            let expected = op.expected_types()[slot];
            let filler = registry
                .specs_producing(expected)
                .into_iter()
                .find(|s| s.is_terminal())
                .unwrap_or_else(|| panic!("no terminal produces {}", expected));
            op.attach(slot, instantiate(&registry, filler)).unwrap();
        }
        assert!(op.is_complete());

        let extra = registry.create_node("ONE").unwrap();
        let err = op.attach(n, extra).unwrap_err();
        assert!(
            matches!(err, RuleEngineError::ArityExceeded { position, .. } if position == n),
            "{}: {:?}",
            op_spec.identifier(),
            err
        );
        let err = op.push(registry.create_node("TRUE").unwrap()).unwrap_err();
        assert!(matches!(err, RuleEngineError::ArityExceeded { .. }));
        assert_eq!(op.child_count(), n);
        op.seal().unwrap();
    }
}
