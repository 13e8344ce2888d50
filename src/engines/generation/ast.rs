use crate::data::Snapshot;
use crate::error::{Result, RuleEngineError};
use crate::functions::traits::Primitive;
use crate::types::{is_acceptable, Arity, OperatorKind, SemanticType};
use crate::utils::normalization::Normalization;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Construction arguments carried by a node and persisted with it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl NodeParams {
    pub fn value(value: f64) -> Self {
        Self { value: Some(value) }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// A node of a typed rule tree.
///
/// Nodes are only created by the node registry, so every live node can be
/// traced back to a registered, type-declared spec.
#[derive(Debug, Clone)]
pub enum Node {
    Constant(ConstantNode),
    Variable(VariableNode),
    Operator(OperatorNode),
}

impl Node {
    pub fn identifier(&self) -> &str {
        match self {
            Node::Constant(c) => &c.identifier,
            Node::Variable(v) => &v.identifier,
            Node::Operator(o) => &o.identifier,
        }
    }

    pub fn result_type(&self) -> SemanticType {
        match self {
            Node::Constant(c) => c.result_type,
            Node::Variable(v) => v.result_type,
            Node::Operator(o) => o.result_type,
        }
    }

    pub fn params(&self) -> NodeParams {
        match self {
            Node::Constant(c) => c.params,
            Node::Variable(_) | Node::Operator(_) => NodeParams::default(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Constant(_) => "constant",
            Node::Variable(_) => "variable",
            Node::Operator(_) => "operator",
        }
    }

    pub fn as_operator(&self) -> Option<&OperatorNode> {
        match self {
            Node::Operator(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_operator_mut(&mut self) -> Option<&mut OperatorNode> {
        match self {
            Node::Operator(o) => Some(o),
            _ => None,
        }
    }

    /// Leaves are always sealed; operators once `seal` succeeded
    pub fn is_sealed(&self) -> bool {
        match self {
            Node::Operator(o) => o.sealed,
            _ => true,
        }
    }

    pub fn seal(&mut self) -> Result<()> {
        match self {
            Node::Operator(o) => o.seal(),
            _ => Ok(()),
        }
    }

    /// Children in order; empty for leaves
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Operator(o) => o.children().collect(),
            _ => Vec::new(),
        }
    }

    pub fn evaluate(&self, snapshot: &Snapshot) -> Result<f64> {
        crate::engines::evaluation::evaluate(self, snapshot)
    }
}

/// Immutable literal
#[derive(Debug, Clone)]
pub struct ConstantNode {
    identifier: String,
    value: f64,
    result_type: SemanticType,
    label: Option<String>,
    params: NodeParams,
}

impl ConstantNode {
    pub(crate) fn new(
        identifier: &str,
        value: f64,
        result_type: SemanticType,
        label: Option<String>,
        params: NodeParams,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            value,
            result_type,
            label,
            params,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Named-threshold label used when explaining the tree
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Reference into the external data snapshot
#[derive(Debug, Clone)]
pub struct VariableNode {
    identifier: String,
    path: String,
    result_type: SemanticType,
    description: String,
    normalization: Normalization,
}

impl VariableNode {
    pub(crate) fn new(
        identifier: &str,
        path: &str,
        result_type: SemanticType,
        description: &str,
        normalization: Normalization,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            path: path.to_string(),
            result_type,
            description: description.to_string(),
            normalization,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }
}

/// Operator with typed, ordered child slots.
///
/// Starts under construction and becomes immutable once sealed.
#[derive(Clone)]
pub struct OperatorNode {
    identifier: String,
    primitive: Arc<dyn Primitive>,
    result_type: SemanticType,
    input_types: Vec<SemanticType>,
    arity: Arity,
    slots: Vec<Option<Node>>,
    sealed: bool,
}

impl OperatorNode {
    pub(crate) fn new(identifier: &str, primitive: Arc<dyn Primitive>) -> Self {
        let arity = primitive.arity();
        // Fresh slot vector per instance
        let slots = match arity {
            Arity::Fixed(n) => (0..n).map(|_| None).collect(),
            Arity::Variadic { min } => Vec::with_capacity(min),
        };
        Self {
            identifier: identifier.to_string(),
            result_type: primitive.output_type(),
            input_types: primitive.input_types(),
            arity,
            primitive,
            slots,
            sealed: false,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn result_type(&self) -> SemanticType {
        self.result_type
    }

    pub fn expected_types(&self) -> &[SemanticType] {
        &self.input_types
    }

    /// Expected type of the child at `position`
    pub fn expected_type(&self, position: usize) -> Option<SemanticType> {
        match self.arity {
            Arity::Fixed(_) => self.input_types.get(position).copied(),
            Arity::Variadic { .. } => self.input_types.first().copied(),
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn kind(&self) -> OperatorKind {
        self.primitive.kind()
    }

    pub fn primitive(&self) -> &dyn Primitive {
        self.primitive.as_ref()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn child_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn child(&self, position: usize) -> Option<&Node> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    /// Attached children in slot order
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Every slot is filled and the arity is met
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some) && self.arity.is_satisfied_by(self.slots.len())
    }

    /// Index `push` would attach at next
    pub fn next_position(&self) -> usize {
        match self.arity {
            Arity::Fixed(n) => self.slots.iter().position(Option::is_none).unwrap_or(n),
            Arity::Variadic { .. } => self.slots.len(),
        }
    }

    /// Attach `child` at `position`.
    ///
    /// Arity is checked before type. On failure the operator is left exactly as
    /// it was.
    pub fn attach(&mut self, position: usize, child: Node) -> Result<()> {
        if self.sealed {
            return Err(RuleEngineError::Sealed {
                operator: self.identifier.clone(),
            });
        }

        match self.arity {
            Arity::Fixed(n) => {
                if position >= n || self.slots.iter().all(Option::is_some) {
                    return Err(RuleEngineError::ArityExceeded {
                        operator: self.identifier.clone(),
                        arity: self.arity,
                        position,
                    });
                }
                if self.slots[position].is_some() {
                    return Err(RuleEngineError::SlotOccupied {
                        operator: self.identifier.clone(),
                        position,
                    });
                }
            }
            Arity::Variadic { .. } => {
                let next = self.slots.len();
                if position < next {
                    return Err(RuleEngineError::SlotOccupied {
                        operator: self.identifier.clone(),
                        position,
                    });
                }
                if position > next {
                    return Err(RuleEngineError::InvalidPosition {
                        operator: self.identifier.clone(),
                        position,
                        next,
                    });
                }
            }
        }

        let expected = self.expected_type(position).ok_or_else(|| {
            RuleEngineError::InvalidSpec(format!(
                "{} declares no input type for position {}",
                self.identifier, position
            ))
        })?;
        let supplied = child.result_type();
        if !is_acceptable(supplied, expected) {
            return Err(RuleEngineError::TypeMismatch {
                operator: self.identifier.clone(),
                position,
                expected,
                supplied,
            });
        }

        match self.arity {
            Arity::Fixed(_) => self.slots[position] = Some(child),
            Arity::Variadic { .. } => self.slots.push(Some(child)),
        }
        Ok(())
    }

    /// Attach at the next free position
    pub fn push(&mut self, child: Node) -> Result<()> {
        let position = self.next_position();
        self.attach(position, child)
    }

    /// Seal this operator and every operator below it. Irreversible.
    pub fn seal(&mut self) -> Result<()> {
        if self.sealed {
            return Ok(());
        }
        if !self.is_complete() {
            return Err(RuleEngineError::ArityUnmet {
                operator: self.identifier.clone(),
                arity: self.arity,
                found: self.child_count(),
            });
        }
        for child in self.slots.iter_mut().flatten() {
            child.seal()?;
        }
        self.sealed = true;
        Ok(())
    }
}

impl fmt::Debug for OperatorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorNode")
            .field("identifier", &self.identifier)
            .field("result_type", &self.result_type)
            .field("input_types", &self.input_types)
            .field("arity", &self.arity)
            .field("children", &self.slots)
            .field("sealed", &self.sealed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::registry::NodeRegistry;

    fn registry() -> NodeRegistry {
        NodeRegistry::with_builtins()
    }

    fn operator(registry: &NodeRegistry, id: &str) -> OperatorNode {
        match registry.create_node(id).unwrap() {
            Node::Operator(o) => o,
            other => panic!("{} is not an operator: {:?}", id, other),
        }
    }

    #[test]
    fn test_attach_then_seal() {
        let r = registry();
        let mut gt = operator(&r, "GREATER_THAN");
        gt.attach(1, r.create_constant(70.0).unwrap()).unwrap();
        assert!(!gt.is_complete());
        gt.attach(0, r.create_node("RSI_14").unwrap()).unwrap();
        assert!(gt.is_complete());
        gt.seal().unwrap();
        assert!(gt.is_sealed());
        assert_eq!(gt.child(0).unwrap().identifier(), "RSI_14");
    }

    #[test]
    fn test_type_mismatch_leaves_operator_unchanged() {
        let r = registry();
        let mut add = operator(&r, "ADD");
        let err = add.attach(1, r.create_node("TRUE").unwrap()).unwrap_err();
        match err {
            RuleEngineError::TypeMismatch {
                position,
                expected,
                supplied,
                ..
            } => {
                assert_eq!(position, 1);
                assert_eq!(expected, SemanticType::Numerical);
                assert_eq!(supplied, SemanticType::Boolean);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(add.child_count(), 0);
    }

    #[test]
    fn test_fixed_arity_exceeded() {
        let r = registry();
        let mut not = operator(&r, "NOT");
        not.push(r.create_node("TRUE").unwrap()).unwrap();
        let err = not.push(r.create_node("FALSE").unwrap()).unwrap_err();
        assert!(matches!(err, RuleEngineError::ArityExceeded { .. }));
        let err = not.attach(4, r.create_node("FALSE").unwrap()).unwrap_err();
        assert!(matches!(err, RuleEngineError::ArityExceeded { .. }));
        assert_eq!(not.child_count(), 1);
    }

    #[test]
    fn test_occupied_slot() {
        let r = registry();
        let mut add = operator(&r, "ADD");
        add.attach(0, r.create_constant(1.0).unwrap()).unwrap();
        let err = add.attach(0, r.create_constant(2.0).unwrap()).unwrap_err();
        assert!(matches!(err, RuleEngineError::SlotOccupied { position: 0, .. }));
    }

    #[test]
    fn test_variadic_appends_in_order() {
        let r = registry();
        let mut and = operator(&r, "AND");
        and.push(r.create_node("TRUE").unwrap()).unwrap();
        assert!(matches!(
            and.seal(),
            Err(RuleEngineError::ArityUnmet { found: 1, .. })
        ));
        let err = and.attach(3, r.create_node("TRUE").unwrap()).unwrap_err();
        assert!(matches!(err, RuleEngineError::InvalidPosition { next: 1, .. }));
        for _ in 0..4 {
            and.push(r.create_node("FALSE").unwrap()).unwrap();
        }
        assert_eq!(and.child_count(), 5);
        and.seal().unwrap();
    }

    #[test]
    fn test_sealed_operator_rejects_children() {
        let r = registry();
        let mut not = operator(&r, "NOT");
        not.push(r.create_node("TRUE").unwrap()).unwrap();
        not.seal().unwrap();
        let err = not.attach(0, r.create_node("FALSE").unwrap()).unwrap_err();
        assert!(matches!(err, RuleEngineError::Sealed { .. }));
    }

    #[test]
    fn test_seal_recurses_into_incomplete_children() {
        let r = registry();
        let mut outer = operator(&r, "NOT");
        let inner = r.create_node("AND").unwrap();
        outer.push(inner).unwrap();
        let err = outer.seal().unwrap_err();
        assert!(matches!(err, RuleEngineError::ArityUnmet { .. }));
        assert!(!outer.is_sealed());
    }

    #[test]
    fn test_instances_do_not_share_children() {
        let r = registry();
        let mut a = operator(&r, "NOT");
        let b = operator(&r, "NOT");
        a.push(r.create_node("TRUE").unwrap()).unwrap();
        assert_eq!(a.child_count(), 1);
        assert_eq!(b.child_count(), 0);
    }
}
