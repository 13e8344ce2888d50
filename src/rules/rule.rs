use crate::config::engine::{EngineConfig, ScoreBounds};
use crate::data::Snapshot;
use crate::engines::evaluation::evaluate;
use crate::engines::generation::ast::Node;
use crate::engines::persistence::{serialize, NodeRecord, Parser};
use crate::error::{Result, RuleEngineError};
use crate::functions::registry;
use crate::types::SemanticType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who a rule is and which revision it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleIdentity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub version: u32,
    pub created_at: DateTime<Utc>,
}

impl RuleIdentity {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            version: 1,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

/// Persisted form of a rule: identity, purpose and the tree record,
/// stored as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(flatten)]
    pub identity: RuleIdentity,
    pub purpose: SemanticType,
    pub tree: NodeRecord,
}

/// A named, versioned, sealed rule tree with a declared purpose.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Rule {
    identity: RuleIdentity,
    purpose: SemanticType,
    root: Node,
}

impl Rule {
    /// Seals `root`. Fails if the root is not an operator, the purpose is not a
    /// purpose tag, or the tree is incomplete.
    pub fn new(identity: RuleIdentity, purpose: SemanticType, mut root: Node) -> Result<Self> {
        if !purpose.is_purpose() {
            return Err(RuleEngineError::InvalidPurpose { purpose });
        }
        if root.as_operator().is_none() {
            return Err(RuleEngineError::InvalidRoot {
                identifier: root.identifier().to_string(),
                kind: root.kind_name().to_string(),
            });
        }
        root.seal()?;
        Ok(Self {
            identity,
            purpose,
            root,
        })
    }

    pub fn identity(&self) -> &RuleIdentity {
        &self.identity
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn description(&self) -> &str {
        &self.identity.description
    }

    pub fn version(&self) -> u32 {
        self.identity.version
    }

    pub fn purpose(&self) -> SemanticType {
        self.purpose
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate the tree. Scores outside [-1, 1] are returned unchanged and logged.
    pub fn execute(&self, snapshot: &Snapshot) -> Result<f64> {
        let score = evaluate(&self.root, snapshot)?;
        self.warn_if_outside(score, ScoreBounds::default());
        Ok(score)
    }

    /// Evaluate and fail with `ScoreOutOfBounds` instead of logging
    pub fn execute_checked(&self, snapshot: &Snapshot, bounds: ScoreBounds) -> Result<f64> {
        let score = evaluate(&self.root, snapshot)?;
        if !bounds.contains(score) {
            return Err(RuleEngineError::ScoreOutOfBounds {
                score,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(score)
    }

    /// Evaluate under an engine configuration's bound policy
    pub fn execute_with(&self, snapshot: &Snapshot, config: &EngineConfig) -> Result<f64> {
        if config.strict_bounds {
            self.execute_checked(snapshot, config.score_bounds)
        } else {
            let score = evaluate(&self.root, snapshot)?;
            self.warn_if_outside(score, config.score_bounds);
            Ok(score)
        }
    }

    /// Log a warning when `score` leaves `bounds`; returns whether it did
    fn warn_if_outside(&self, score: f64, bounds: ScoreBounds) -> bool {
        if bounds.contains(score) {
            return false;
        }
        log::warn!(
            "Rule {} (v{}) scored {} outside [{}, {}]",
            self.identity.id,
            self.identity.version,
            score,
            bounds.min,
            bounds.max
        );
        true
    }

    pub fn to_persisted_form(&self) -> RuleRecord {
        RuleRecord {
            identity: self.identity.clone(),
            purpose: self.purpose,
            tree: serialize(&self.root),
        }
    }

    /// Rebuild against the process-wide registry with default limits
    pub fn from_persisted_form(record: &RuleRecord) -> Result<Self> {
        let registry = registry::read();
        Self::from_persisted_form_with(record, &Parser::new(&registry))
    }

    pub fn from_persisted_form_with(record: &RuleRecord, parser: &Parser) -> Result<Self> {
        let root = parser.parse(&record.tree)?;
        Self::new(record.identity.clone(), record.purpose, root)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_persisted_form())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let record: RuleRecord = serde_json::from_str(json)?;
        Self::from_persisted_form(&record)
    }

    pub fn from_file<P: AsRef<Path>>(path: P, config: &EngineConfig) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let record: RuleRecord = serde_json::from_str(&contents)?;
        let registry = registry::read();
        let parser = Parser::new(&registry)
            .with_limits(config.max_tree_depth, config.max_variadic_children);
        Self::from_persisted_form_with(&record, &parser)
    }
}
