use crate::config::engine::{DEFAULT_MAX_TREE_DEPTH, DEFAULT_MAX_VARIADIC_CHILDREN};
use crate::engines::generation::ast::Node;
use crate::engines::persistence::record::NodeRecord;
use crate::error::{Result, RuleEngineError};
use crate::functions::registry::{self, NodeRegistry};

/// Rebuilds trees from records through the registry, re-running every
/// construction check. A record that would produce an ill-typed or incomplete
/// tree fails with a `Parse` error naming the offending node.
pub struct Parser<'r> {
    registry: &'r NodeRegistry,
    max_depth: usize,
    max_children: usize,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r NodeRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_TREE_DEPTH,
            max_children: DEFAULT_MAX_VARIADIC_CHILDREN,
        }
    }

    /// Bound tree depth and variadic width for untrusted input
    pub fn with_limits(mut self, max_depth: usize, max_children: usize) -> Self {
        self.max_depth = max_depth;
        self.max_children = max_children;
        self
    }

    pub fn registry(&self) -> &NodeRegistry {
        self.registry
    }

    /// Parse and seal
    pub fn parse(&self, record: &NodeRecord) -> Result<Node> {
        let node = self.parse_node(record, "root", 0)?;
        log::trace!("Parsed tree rooted at {}", node.identifier());
        Ok(node)
    }

    fn parse_node(&self, record: &NodeRecord, location: &str, depth: usize) -> Result<Node> {
        if depth > self.max_depth {
            return Err(located(
                location,
                RuleEngineError::DepthExceeded {
                    depth,
                    max: self.max_depth,
                },
            ));
        }

        let mut node = self
            .registry
            .create_node_with(&record.identifier, record.params)
            .map_err(|e| located(location, e))?;

        if node.as_operator().is_none() {
            if !record.children.is_empty() {
                return Err(located(
                    location,
                    RuleEngineError::RuleStructure(format!(
                        "{} is a leaf but the record lists {} children",
                        record.identifier,
                        record.children.len()
                    )),
                ));
            }
            return Ok(node);
        }

        let operator = node.as_operator_mut().ok_or_else(|| {
            located(
                location,
                RuleEngineError::RuleStructure(format!("{} is not an operator", record.identifier)),
            )
        })?;

        if operator.arity().is_variadic() && record.children.len() > self.max_children {
            return Err(located(
                location,
                RuleEngineError::TooManyChildren {
                    operator: record.identifier.clone(),
                    count: record.children.len(),
                    max: self.max_children,
                },
            ));
        }

        for (position, child_record) in record.children.iter().enumerate() {
            let child_location = format!("{}/{}", location, position);
            let child = self.parse_node(child_record, &child_location, depth + 1)?;
            operator
                .attach(position, child)
                .map_err(|e| located(location, e))?;
        }

        operator.seal().map_err(|e| located(location, e))?;
        Ok(node)
    }
}

fn located(location: &str, source: RuleEngineError) -> RuleEngineError {
    RuleEngineError::Parse {
        location: location.to_string(),
        source: Box::new(source),
    }
}

/// Parse against the process-wide registry with default limits
pub fn parse(record: &NodeRecord) -> Result<Node> {
    let registry = registry::read();
    Parser::new(&registry).parse(record)
}
