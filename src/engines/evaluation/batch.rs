use crate::data::Snapshot;
use crate::error::Result;
use crate::rules::Rule;
use crate::types::SemanticType;
use rayon::prelude::*;

/// Outcome of one rule against one snapshot
#[derive(Debug)]
pub struct RuleScore {
    pub rule_id: String,
    pub purpose: SemanticType,
    pub result: Result<f64>,
}

/// Score every rule against the same snapshot in parallel.
///
/// Results keep the order of `rules`; one failing rule does not stop the rest.
pub fn evaluate_rules(rules: &[Rule], snapshot: &Snapshot) -> Vec<RuleScore> {
    log::debug!("Scoring {} rules", rules.len());
    rules
        .par_iter()
        .map(|rule| RuleScore {
            rule_id: rule.id().to_string(),
            purpose: rule.purpose(),
            result: rule.execute(snapshot),
        })
        .collect()
}

/// Score one rule against many snapshots in parallel, in snapshot order
pub fn evaluate_snapshots(rule: &Rule, snapshots: &[Snapshot]) -> Vec<Result<f64>> {
    snapshots
        .par_iter()
        .map(|snapshot| rule.execute(snapshot))
        .collect()
}
