#![allow(dead_code)]

use serde_json::{json, Map, Value};
use stgp_rules::functions::registry::NodeRegistry;
use stgp_rules::{SemanticType, Snapshot};

/// Snapshot holding a value for every variable the registry knows about.
/// Boolean variables read `true`, numeric ones `fill`.
pub fn full_snapshot(registry: &NodeRegistry, fill: f64) -> Snapshot {
    let mut root = Value::Object(Map::new());
    for spec in registry.variables() {
        let Some(path) = spec.path() else { continue };
        let value = if spec.output_type() == SemanticType::Boolean {
            json!(true)
        } else {
            json!(fill)
        };
        insert_path(&mut root, path, value);
    }
    Snapshot::new(root)
}

pub fn insert_path(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    let segments: Vec<&str> = path.split('.').collect();
    for (i, segment) in segments.iter().enumerate() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let map = current.as_object_mut().unwrap();
        if i + 1 == segments.len() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// Equal values, or both NaN
pub fn same_score(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
