use crate::data::Snapshot;
use crate::engines::generation::ast::{Node, OperatorNode};
use crate::error::{Result, RuleEngineError};
use crate::types::OperatorKind;

/// Evaluate a sealed tree against a snapshot.
///
/// Pure: the tree and the snapshot are only read, so the same call always
/// returns the same value. The result is not clamped.
pub fn evaluate(node: &Node, snapshot: &Snapshot) -> Result<f64> {
    match node {
        Node::Constant(c) => Ok(c.value()),
        Node::Variable(v) => {
            let raw = snapshot.resolve_number(v.path())?;
            Ok(v.normalization().apply(raw))
        }
        Node::Operator(op) => evaluate_operator(op, snapshot),
    }
}

fn evaluate_operator(op: &OperatorNode, snapshot: &Snapshot) -> Result<f64> {
    if !op.is_sealed() {
        return Err(RuleEngineError::RuleStructure(format!(
            "operator {} is not sealed ({} of {} children)",
            op.identifier(),
            op.child_count(),
            op.arity()
        )));
    }

    match op.kind() {
        OperatorKind::Branch => {
            let condition = evaluate(required_child(op, 0)?, snapshot)?;
            // Only the taken branch is evaluated
            let taken = if condition > 0.0 { 1 } else { 2 };
            evaluate(required_child(op, taken)?, snapshot)
        }
        OperatorKind::Eager => {
            let args = op
                .children()
                .map(|child| evaluate(child, snapshot))
                .collect::<Result<Vec<f64>>>()?;
            Ok(op.primitive().execute(&args))
        }
    }
}

fn required_child(op: &OperatorNode, position: usize) -> Result<&Node> {
    op.child(position).ok_or_else(|| {
        RuleEngineError::RuleStructure(format!(
            "operator {} has no child at position {}",
            op.identifier(),
            position
        ))
    })
}
