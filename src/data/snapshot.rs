use crate::error::{Result, RuleEngineError};
use serde_json::Value;
use std::path::Path;

/// Read-only market data snapshot addressed by dotted paths,
/// e.g. `technical.daily.RSI_14`.
///
/// Lookups never mutate the snapshot, so one snapshot can be shared by any
/// number of concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    root: Value,
}

impl Snapshot {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Walk a dotted path through nested objects. Numeric segments index arrays.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        path.split('.').try_fold(&self.root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn contains(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some(v) if !v.is_null())
    }

    /// Resolve a path to an f64. Booleans encode as 1.0 / 0.0; null counts as missing.
    pub fn resolve_number(&self, path: &str) -> Result<f64> {
        let value = match self.lookup(path) {
            None | Some(Value::Null) => {
                return Err(RuleEngineError::MissingData {
                    path: path.to_string(),
                })
            }
            Some(v) => v,
        };

        match value {
            Value::Number(n) => n.as_f64().ok_or_else(|| RuleEngineError::InvalidData {
                path: path.to_string(),
                reason: format!("{} is not representable as f64", n),
            }),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            other => Err(RuleEngineError::InvalidData {
                path: path.to_string(),
                reason: format!("expected a number, found {}", kind_of(other)),
            }),
        }
    }
}

impl From<Value> for Snapshot {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
