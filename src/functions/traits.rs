use crate::types::{Arity, OperatorKind, SemanticType};

/// Primitive operator trait
///
/// A primitive is the behaviour behind an operator node: its declared types,
/// its arity, how it combines child values, and how it reads in plain language.
pub trait Primitive: Send + Sync {
    fn ui_name(&self) -> &'static str;

    /// Stable uppercase identifier under which the operator is registered
    fn alias(&self) -> &'static str;

    fn arity(&self) -> Arity;

    /// One type per child, or a single repeated type for variadic operators
    fn input_types(&self) -> Vec<SemanticType>;

    fn output_type(&self) -> SemanticType;

    fn kind(&self) -> OperatorKind {
        OperatorKind::Eager
    }

    /// Combine already-evaluated child values
    fn execute(&self, args: &[f64]) -> f64;

    /// Render already-explained children as natural language
    fn explain(&self, args: &[String]) -> String;
}
