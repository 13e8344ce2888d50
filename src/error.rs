use crate::types::{Arity, SemanticType};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleEngineError {
    #[error("Unknown node identifier: {identifier}")]
    UnknownNode { identifier: String },

    #[error("Operator {operator} takes {arity} children, cannot attach at position {position}")]
    ArityExceeded {
        operator: String,
        arity: Arity,
        position: usize,
    },

    #[error("Operator {operator} requires {arity} children, has {found}")]
    ArityUnmet {
        operator: String,
        arity: Arity,
        found: usize,
    },

    #[error("Type mismatch at position {position} of {operator}: expected {expected}, got {supplied}")]
    TypeMismatch {
        operator: String,
        position: usize,
        expected: SemanticType,
        supplied: SemanticType,
    },

    #[error("Operator {operator} already has a child at position {position}")]
    SlotOccupied { operator: String, position: usize },

    #[error("Variadic operator {operator} expects its next child at position {next}, got {position}")]
    InvalidPosition {
        operator: String,
        position: usize,
        next: usize,
    },

    #[error("Operator {operator} is sealed")]
    Sealed { operator: String },

    #[error("Rule root must be an operator, got {kind} node {identifier}")]
    InvalidRoot { identifier: String, kind: String },

    #[error("{purpose} is not a rule purpose")]
    InvalidPurpose { purpose: SemanticType },

    #[error("Invalid parameters for {identifier}: {reason}")]
    InvalidParameters { identifier: String, reason: String },

    #[error("Missing data at path {path}")]
    MissingData { path: String },

    #[error("Invalid data at path {path}: {reason}")]
    InvalidData { path: String, reason: String },

    #[error("Rule structure error: {0}")]
    RuleStructure(String),

    #[error("Node identifier {identifier} is already registered")]
    DuplicateNode { identifier: String },

    #[error("Invalid node spec: {0}")]
    InvalidSpec(String),

    #[error("Tree depth {depth} exceeds maximum {max}")]
    DepthExceeded { depth: usize, max: usize },

    #[error("Operator {operator} has {count} children, maximum is {max}")]
    TooManyChildren {
        operator: String,
        count: usize,
        max: usize,
    },

    #[error("Failed to load node at {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: Box<RuleEngineError>,
    },

    #[error("Score {score} outside bounds [{min}, {max}]")]
    ScoreOutOfBounds { score: f64, min: f64, max: f64 },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl RuleEngineError {
    /// Strips `Parse` wrappers down to the error that caused them
    pub fn root_cause(&self) -> &RuleEngineError {
        match self {
            RuleEngineError::Parse { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleEngineError>;
