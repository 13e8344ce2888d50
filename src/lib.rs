//! Strongly-typed symbolic rule engine.
//!
//! Rules are typed expression trees over a read-only data snapshot. Every node
//! is created through the [`functions::registry`], every edge is checked against
//! the semantic type lattice, and a sealed tree always evaluates to one number.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod rules;
pub mod types;
pub mod utils;

pub use data::Snapshot;
pub use engines::generation::{Node, NodeParams, TreeBuilder};
pub use engines::persistence::{parse, serialize, NodeRecord, Parser};
pub use error::{Result, RuleEngineError};
pub use functions::{NodeRegistry, NodeSpec};
pub use rules::{explain, Rule, RuleIdentity, RuleRecord};
pub use types::{is_acceptable, Arity, OperatorKind, SemanticType};
