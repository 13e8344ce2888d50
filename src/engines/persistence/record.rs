use crate::engines::generation::ast::{Node, NodeParams};
use serde::{Deserialize, Serialize};

/// Persisted shape of one node and, recursively, its children.
///
/// ```json
/// { "identifier": "GREATER_THAN", "children": [
///     { "identifier": "RSI_14", "children": [] },
///     { "identifier": "CONSTANT", "params": { "value": 70.0 }, "children": [] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "NodeParams::is_empty")]
    pub params: NodeParams,

    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            params: NodeParams::default(),
            children: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: NodeParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_child(mut self, child: NodeRecord) -> Self {
        self.children.push(child);
        self
    }
}

pub fn serialize(node: &Node) -> NodeRecord {
    NodeRecord {
        identifier: node.identifier().to_string(),
        params: node.params(),
        children: node.children().into_iter().map(serialize).collect(),
    }
}
