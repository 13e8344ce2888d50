use crate::engines::generation::{
    ast::{Node, NodeParams},
    gene_consumer::GeneConsumer,
};
use crate::error::{Result, RuleEngineError};
use crate::functions::registry::{NodeRegistry, NodeSpec};
use crate::types::{Arity, SemanticType};

/// Widest variadic operator the mapper will generate, above its minimum
const EXTRA_VARIADIC_CHILDREN: usize = 3;

/// Maps genomes onto well-typed, sealed trees.
///
/// Every node comes from the registry and every child goes through `attach`,
/// so generated trees obey the same type and arity rules as hand-built ones.
pub struct SemanticMapper<'r> {
    registry: &'r NodeRegistry,
    max_depth: usize,
}

impl<'r> SemanticMapper<'r> {
    pub fn new(registry: &'r NodeRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            max_depth,
        }
    }

    /// Main entry point: a sealed tree whose root is an operator
    pub fn create_tree(&self, genome: &[u32]) -> Result<Node> {
        let mut consumer = GeneConsumer::new(genome);
        let mut root = self.build_operator(SemanticType::Any, &mut consumer, 0)?;
        root.seal()?;
        Ok(root)
    }

    /// Build a subtree whose result is acceptable where `expected` is declared
    pub fn build_expression(
        &self,
        expected: SemanticType,
        consumer: &mut GeneConsumer,
        depth: usize,
    ) -> Result<Node> {
        // Depth limit to prevent unbounded growth
        if depth >= self.max_depth {
            return self.build_terminal(expected, consumer);
        }

        let has_operator = self
            .registry
            .specs_producing(expected)
            .iter()
            .any(|s| s.is_operator());

        // Two thirds operators while depth allows, one third terminals
        if has_operator && consumer.choose(3) != 0 {
            self.build_operator(expected, consumer, depth)
        } else {
            self.build_terminal(expected, consumer)
        }
    }

    fn build_operator(
        &self,
        expected: SemanticType,
        consumer: &mut GeneConsumer,
        depth: usize,
    ) -> Result<Node> {
        let operators: Vec<&NodeSpec> = self
            .registry
            .specs_producing(expected)
            .into_iter()
            .filter(|s| s.is_operator())
            .collect();

        if operators.is_empty() {
            return Err(RuleEngineError::Generation(format!(
                "No operator produces {}",
                expected
            )));
        }

        let spec = operators[consumer.choose(operators.len())];
        let mut node = self.registry.create_node(spec.identifier())?;
        let operator = node.as_operator_mut().ok_or_else(|| {
            RuleEngineError::Generation(format!("{} is not an operator", spec.identifier()))
        })?;

        let count = match operator.arity() {
            Arity::Fixed(n) => n,
            Arity::Variadic { min } => min + consumer.choose(EXTRA_VARIADIC_CHILDREN + 1),
        };

        for position in 0..count {
            let slot_type = operator.expected_type(position).ok_or_else(|| {
                RuleEngineError::Generation(format!(
                    "{} declares no type for position {}",
                    spec.identifier(),
                    position
                ))
            })?;
            let child = self.build_expression(slot_type, consumer, depth + 1)?;
            operator.attach(position, child)?;
        }

        operator.seal()?;
        Ok(node)
    }

    fn build_terminal(&self, expected: SemanticType, consumer: &mut GeneConsumer) -> Result<Node> {
        let terminals: Vec<&NodeSpec> = self
            .registry
            .specs_producing(expected)
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();

        if terminals.is_empty() {
            return Err(RuleEngineError::Generation(format!(
                "No terminal produces {}",
                expected
            )));
        }

        let spec = terminals[consumer.choose(terminals.len())];
        if spec.is_parametric() {
            let value = self.build_literal(spec.output_type(), consumer);
            self.registry
                .create_node_with(spec.identifier(), NodeParams::value(value))
        } else {
            self.registry.create_node(spec.identifier())
        }
    }

    fn build_literal(&self, output_type: SemanticType, consumer: &mut GeneConsumer) -> f64 {
        match output_type {
            SemanticType::Boolean => consumer.choose(2) as f64,
            SemanticType::Price => consumer.float_range(1.0, 500.0),
            _ => consumer.float_range(-1.0, 1.0),
        }
    }
}
