use serde_json::json;
use stgp_rules::functions::registry;
use stgp_rules::{
    Node, NodeRegistry, Rule, RuleEngineError, RuleIdentity, SemanticType, Snapshot, TreeBuilder,
};

fn overbought_tree(registry: &NodeRegistry) -> Node {
    let mut gt = registry.create_node("GREATER_THAN").unwrap();
    {
        let op = gt.as_operator_mut().unwrap();
        op.attach(0, registry.create_node("RSI_14").unwrap()).unwrap();
        op.attach(1, registry.create_constant(70.0).unwrap()).unwrap();
    }
    let mut branch = registry.create_node("IF_THEN_ELSE").unwrap();
    {
        let op = branch.as_operator_mut().unwrap();
        op.attach(0, gt).unwrap();
        op.attach(1, registry.create_constant(-1.0).unwrap()).unwrap();
        op.attach(2, registry.create_constant(0.0).unwrap()).unwrap();
    }
    branch
}

fn rsi_snapshot(value: f64) -> Snapshot {
    Snapshot::new(json!({ "technical": { "daily": { "RSI_14": value } } }))
}

fn overbought_rule(registry: &NodeRegistry) -> Rule {
    Rule::new(
        RuleIdentity::new("rsi-overbought", "RSI overbought"),
        SemanticType::DecisionSignal,
        overbought_tree(registry),
    )
    .unwrap()
}

#[test]
fn test_overbought_rsi_sells() {
    let registry = NodeRegistry::with_builtins();
    let rule = overbought_rule(&registry);
    assert_eq!(rule.execute(&rsi_snapshot(75.0)).unwrap(), -1.0);

    let condition = rule.root().children()[0];
    assert_eq!(condition.evaluate(&rsi_snapshot(75.0)).unwrap(), 1.0);
}

#[test]
fn test_neutral_rsi_holds() {
    let registry = NodeRegistry::with_builtins();
    let rule = overbought_rule(&registry);
    assert_eq!(rule.execute(&rsi_snapshot(60.0)).unwrap(), 0.0);
}

#[test]
fn test_strict_slot_rejects_sentiment() {
    let registry = NodeRegistry::with_builtins();
    let mut node = registry.create_node("PRICE_ABOVE").unwrap();
    let op = node.as_operator_mut().unwrap();

    let err = op
        .attach(1, registry.create_node("NEWS_SENTIMENT").unwrap())
        .unwrap_err();
    match err {
        RuleEngineError::TypeMismatch {
            position,
            expected,
            supplied,
            ..
        } => {
            assert_eq!(position, 1);
            assert_eq!(expected, SemanticType::Price);
            assert_eq!(supplied, SemanticType::Sentiment);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(op.child_count(), 0);
}

#[test]
fn test_arithmetic_rejects_boolean() {
    let registry = NodeRegistry::with_builtins();
    let mut node = registry.create_node("ADD").unwrap();
    let op = node.as_operator_mut().unwrap();
    let err = op.attach(0, registry.create_node("ABOVE_SMA_200").unwrap()).unwrap_err();
    assert!(matches!(err, RuleEngineError::TypeMismatch { position: 0, .. }));
    assert_eq!(op.child_count(), 0);

    // Domain tags are numerical
    op.attach(0, registry.create_node("NEWS_SENTIMENT").unwrap()).unwrap();
    assert_eq!(op.child_count(), 1);
}

#[test]
fn test_unknown_identifier() {
    let err = registry::create_node("NOT_A_REAL_NODE").unwrap_err();
    assert!(matches!(
        err,
        RuleEngineError::UnknownNode { ref identifier } if identifier == "NOT_A_REAL_NODE"
    ));
}

#[test]
fn test_branch_skips_untaken_side() {
    let registry = NodeRegistry::with_builtins();
    let b = TreeBuilder::new(&registry);
    let root = b
        .op(
            "IF_THEN_ELSE",
            vec![b.node("TRUE").unwrap(), b.node("ONE").unwrap(), b.node("SMA_200").unwrap()],
        )
        .unwrap();
    let rule = Rule::new(RuleIdentity::new("lazy", "lazy"), SemanticType::RiskLevel, root).unwrap();
    assert_eq!(rule.execute(&Snapshot::default()).unwrap(), 1.0);
}

#[test]
fn test_missing_path_fails_hard() {
    let registry = NodeRegistry::with_builtins();
    let rule = overbought_rule(&registry);
    let err = rule.execute(&Snapshot::default()).unwrap_err();
    assert!(matches!(
        err,
        RuleEngineError::MissingData { ref path } if path == "technical.daily.RSI_14"
    ));
}

#[test]
fn test_unsealed_operator_does_not_evaluate() {
    let registry = NodeRegistry::with_builtins();
    let mut add = registry.create_node("ADD").unwrap();
    add.as_operator_mut()
        .unwrap()
        .attach(0, registry.create_constant(1.0).unwrap())
        .unwrap();
    let err = add.evaluate(&Snapshot::default()).unwrap_err();
    assert!(matches!(err, RuleEngineError::RuleStructure(_)));
}

#[test]
fn test_rule_file_round_trip() {
    let registry = NodeRegistry::with_builtins();
    let rule = overbought_rule(&registry);
    let path = std::env::temp_dir().join(format!("stgp-rule-{}.json", std::process::id()));
    std::fs::write(&path, rule.to_json().unwrap()).unwrap();

    let loaded = Rule::from_file(&path, &Default::default()).unwrap();
    assert_eq!(loaded.to_persisted_form(), rule.to_persisted_form());
    assert_eq!(loaded.execute(&rsi_snapshot(75.0)).unwrap(), -1.0);

    let _ = std::fs::remove_file(&path);
}
