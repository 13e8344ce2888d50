pub mod batch;
pub mod expression;

pub use batch::{evaluate_rules, evaluate_snapshots, RuleScore};
pub use expression::evaluate;
