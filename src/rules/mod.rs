pub mod builtin;
pub mod explainer;
pub mod rule;

pub use builtin::builtin_rules;
pub use explainer::{explain, explain_rule};
pub use rule::{Rule, RuleIdentity, RuleRecord};
