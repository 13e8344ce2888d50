use crate::engines::generation::ast::{Node, NodeParams};
use crate::error::{Result, RuleEngineError};
use crate::functions::registry::NodeRegistry;

/// Bottom-up tree construction through a registry.
///
/// ```ignore
/// let registry = stgp_rules::functions::registry::read();
/// let b = TreeBuilder::new(&registry);
/// let overbought = b.op("GREATER_THAN", vec![b.node("RSI_14")?, b.constant(70.0)?])?;
/// let root = b.op("IF_THEN_ELSE", vec![overbought, b.node("SELL_SIGNAL")?, b.node("HOLD_SIGNAL")?])?;
/// ```
pub struct TreeBuilder<'r> {
    registry: &'r NodeRegistry,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(registry: &'r NodeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &NodeRegistry {
        self.registry
    }

    /// Any parameterless node: named constant, variable, or an empty operator
    pub fn node(&self, identifier: &str) -> Result<Node> {
        self.registry.create_node(identifier)
    }

    pub fn node_with(&self, identifier: &str, params: NodeParams) -> Result<Node> {
        self.registry.create_node_with(identifier, params)
    }

    pub fn constant(&self, value: f64) -> Result<Node> {
        self.registry.create_constant(value)
    }

    /// Create an operator, attach `children` in order and seal it
    pub fn op(&self, identifier: &str, children: Vec<Node>) -> Result<Node> {
        let mut node = self.registry.create_node(identifier)?;
        let operator = node.as_operator_mut().ok_or_else(|| {
            RuleEngineError::RuleStructure(format!("{} is not an operator", identifier))
        })?;
        for (position, child) in children.into_iter().enumerate() {
            operator.attach(position, child)?;
        }
        operator.seal()?;
        Ok(node)
    }
}
