use crate::engines::generation::ast::Node;
use crate::error::{Result, RuleEngineError};
use crate::types::{is_acceptable, Arity};
use std::collections::BTreeSet;

/// Shape summary of a validated tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    /// Levels below the root; a lone leaf has depth 0
    pub depth: usize,
    pub node_count: usize,
    /// Snapshot paths the tree reads, sorted
    pub variable_paths: BTreeSet<String>,
}

/// Structural checks for trees received from outside the process
pub struct TreeValidator {
    max_depth: usize,
    max_children: usize,
}

impl TreeValidator {
    pub fn new(max_depth: usize, max_children: usize) -> Self {
        Self {
            max_depth,
            max_children,
        }
    }

    /// Validate depth, width, sealing, arity and types of the whole tree
    pub fn validate(&self, root: &Node) -> Result<TreeStats> {
        let mut stats = TreeStats {
            depth: 0,
            node_count: 0,
            variable_paths: BTreeSet::new(),
        };
        self.validate_node(root, 0, &mut stats)?;
        Ok(stats)
    }

    fn validate_node(&self, node: &Node, depth: usize, stats: &mut TreeStats) -> Result<()> {
        if depth > self.max_depth {
            return Err(RuleEngineError::DepthExceeded {
                depth,
                max: self.max_depth,
            });
        }
        stats.depth = stats.depth.max(depth);
        stats.node_count += 1;

        match node {
            Node::Constant(_) => Ok(()),
            Node::Variable(v) => {
                stats.variable_paths.insert(v.path().to_string());
                Ok(())
            }
            Node::Operator(op) => {
                if !op.is_sealed() {
                    return Err(RuleEngineError::RuleStructure(format!(
                        "operator {} is not sealed",
                        op.identifier()
                    )));
                }
                let count = op.child_count();
                if !op.arity().is_satisfied_by(count) {
                    return Err(RuleEngineError::ArityUnmet {
                        operator: op.identifier().to_string(),
                        arity: op.arity(),
                        found: count,
                    });
                }
                if matches!(op.arity(), Arity::Variadic { .. }) && count > self.max_children {
                    return Err(RuleEngineError::TooManyChildren {
                        operator: op.identifier().to_string(),
                        count,
                        max: self.max_children,
                    });
                }
                for (position, child) in op.children().enumerate() {
                    let expected = op.expected_type(position).unwrap_or(child.result_type());
                    if !is_acceptable(child.result_type(), expected) {
                        return Err(RuleEngineError::TypeMismatch {
                            operator: op.identifier().to_string(),
                            position,
                            expected,
                            supplied: child.result_type(),
                        });
                    }
                    self.validate_node(child, depth + 1, stats)?;
                }
                Ok(())
            }
        }
    }
}
