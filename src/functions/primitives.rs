use crate::functions::traits::Primitive;
use crate::types::{Arity, OperatorKind, SemanticType};

const EPSILON: f64 = 1e-9;

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

fn numeric_pair() -> Vec<SemanticType> {
    vec![SemanticType::Numerical, SemanticType::Numerical]
}

// --- Comparison operators ---
pub struct GreaterThan;
impl Primitive for GreaterThan {
    fn ui_name(&self) -> &'static str { "Greater Than" }
    fn alias(&self) -> &'static str { "GREATER_THAN" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] > args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} > {}", args[0], args[1])
    }
}

pub struct LessThan;
impl Primitive for LessThan {
    fn ui_name(&self) -> &'static str { "Less Than" }
    fn alias(&self) -> &'static str { "LESS_THAN" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] < args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} < {}", args[0], args[1])
    }
}

pub struct GreaterOrEqual;
impl Primitive for GreaterOrEqual {
    fn ui_name(&self) -> &'static str { "Greater Than or Equal" }
    fn alias(&self) -> &'static str { "GREATER_OR_EQUAL" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] >= args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} >= {}", args[0], args[1])
    }
}

pub struct LessOrEqual;
impl Primitive for LessOrEqual {
    fn ui_name(&self) -> &'static str { "Less Than or Equal" }
    fn alias(&self) -> &'static str { "LESS_OR_EQUAL" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] <= args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} <= {}", args[0], args[1])
    }
}

/// Equality within a small epsilon
pub struct Equal;
impl Primitive for Equal {
    fn ui_name(&self) -> &'static str { "Equal" }
    fn alias(&self) -> &'static str { "EQUAL" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag((args[0] - args[1]).abs() < EPSILON)
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} equals {}", args[0], args[1])
    }
}

/// Inclusive range check: value, lower, upper
pub struct Between;
impl Primitive for Between {
    fn ui_name(&self) -> &'static str { "Between" }
    fn alias(&self) -> &'static str { "BETWEEN" }
    fn arity(&self) -> Arity { Arity::Fixed(3) }
    fn input_types(&self) -> Vec<SemanticType> {
        vec![SemanticType::Numerical, SemanticType::Numerical, SemanticType::Numerical]
    }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] >= args[1] && args[0] <= args[2])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} is between {} and {}", args[0], args[1], args[2])
    }
}

/// Strict comparison that only accepts two prices
pub struct PriceAbove;
impl Primitive for PriceAbove {
    fn ui_name(&self) -> &'static str { "Price Above" }
    fn alias(&self) -> &'static str { "PRICE_ABOVE" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> {
        vec![SemanticType::Price, SemanticType::Price]
    }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] > args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} is above {}", args[0], args[1])
    }
}

// --- Logical operators ---
pub struct And;
impl Primitive for And {
    fn ui_name(&self) -> &'static str { "Logical AND" }
    fn alias(&self) -> &'static str { "AND" }
    fn arity(&self) -> Arity { Arity::Variadic { min: 2 } }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Boolean] }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args.iter().all(|v| *v > 0.0))
    }
    fn explain(&self, args: &[String]) -> String {
        format!("({})", args.join(" AND "))
    }
}

pub struct Or;
impl Primitive for Or {
    fn ui_name(&self) -> &'static str { "Logical OR" }
    fn alias(&self) -> &'static str { "OR" }
    fn arity(&self) -> Arity { Arity::Variadic { min: 2 } }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Boolean] }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args.iter().any(|v| *v > 0.0))
    }
    fn explain(&self, args: &[String]) -> String {
        format!("({})", args.join(" OR "))
    }
}

pub struct Not;
impl Primitive for Not {
    fn ui_name(&self) -> &'static str { "Logical NOT" }
    fn alias(&self) -> &'static str { "NOT" }
    fn arity(&self) -> Arity { Arity::Fixed(1) }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Boolean] }
    fn output_type(&self) -> SemanticType { SemanticType::Boolean }
    fn execute(&self, args: &[f64]) -> f64 {
        flag(args[0] <= 0.0)
    }
    fn explain(&self, args: &[String]) -> String {
        format!("NOT {}", args[0])
    }
}

// --- Branching ---
/// Lazy ternary. The evaluator only runs the condition and the taken branch;
/// `execute` is the same selection over values that are already known.
pub struct IfThenElse;
impl Primitive for IfThenElse {
    fn ui_name(&self) -> &'static str { "If Then Else" }
    fn alias(&self) -> &'static str { "IF_THEN_ELSE" }
    fn arity(&self) -> Arity { Arity::Fixed(3) }
    fn input_types(&self) -> Vec<SemanticType> {
        vec![SemanticType::Boolean, SemanticType::Numerical, SemanticType::Numerical]
    }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn kind(&self) -> OperatorKind { OperatorKind::Branch }
    fn execute(&self, args: &[f64]) -> f64 {
        if args[0] > 0.0 { args[1] } else { args[2] }
    }
    fn explain(&self, args: &[String]) -> String {
        format!("IF {} THEN {} ELSE {}", args[0], args[1], args[2])
    }
}

// --- Arithmetic ---
pub struct Add;
impl Primitive for Add {
    fn ui_name(&self) -> &'static str { "Add" }
    fn alias(&self) -> &'static str { "ADD" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0] + args[1]
    }
    fn explain(&self, args: &[String]) -> String {
        format!("({} + {})", args[0], args[1])
    }
}

pub struct Subtract;
impl Primitive for Subtract {
    fn ui_name(&self) -> &'static str { "Subtract" }
    fn alias(&self) -> &'static str { "SUBTRACT" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0] - args[1]
    }
    fn explain(&self, args: &[String]) -> String {
        format!("({} - {})", args[0], args[1])
    }
}

pub struct Multiply;
impl Primitive for Multiply {
    fn ui_name(&self) -> &'static str { "Multiply" }
    fn alias(&self) -> &'static str { "MULTIPLY" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0] * args[1]
    }
    fn explain(&self, args: &[String]) -> String {
        format!("({} * {})", args[0], args[1])
    }
}

/// Protected division: a zero denominator yields 0.0
pub struct Divide;
impl Primitive for Divide {
    fn ui_name(&self) -> &'static str { "Divide" }
    fn alias(&self) -> &'static str { "DIVIDE" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        if args[1].abs() < EPSILON {
            0.0
        } else {
            args[0] / args[1]
        }
    }
    fn explain(&self, args: &[String]) -> String {
        format!("({} / {})", args[0], args[1])
    }
}

pub struct Negate;
impl Primitive for Negate {
    fn ui_name(&self) -> &'static str { "Negate" }
    fn alias(&self) -> &'static str { "NEGATE" }
    fn arity(&self) -> Arity { Arity::Fixed(1) }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Numerical] }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        -args[0]
    }
    fn explain(&self, args: &[String]) -> String {
        format!("the inverse of {}", args[0])
    }
}

pub struct Abs;
impl Primitive for Abs {
    fn ui_name(&self) -> &'static str { "Absolute Value" }
    fn alias(&self) -> &'static str { "ABS" }
    fn arity(&self) -> Arity { Arity::Fixed(1) }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Numerical] }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0].abs()
    }
    fn explain(&self, args: &[String]) -> String {
        format!("the magnitude of {}", args[0])
    }
}

pub struct Min;
impl Primitive for Min {
    fn ui_name(&self) -> &'static str { "Minimum" }
    fn alias(&self) -> &'static str { "MIN" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0].min(args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("the lower of {} and {}", args[0], args[1])
    }
}

pub struct Max;
impl Primitive for Max {
    fn ui_name(&self) -> &'static str { "Maximum" }
    fn alias(&self) -> &'static str { "MAX" }
    fn arity(&self) -> Arity { Arity::Fixed(2) }
    fn input_types(&self) -> Vec<SemanticType> { numeric_pair() }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0].max(args[1])
    }
    fn explain(&self, args: &[String]) -> String {
        format!("the higher of {} and {}", args[0], args[1])
    }
}

pub struct Average;
impl Primitive for Average {
    fn ui_name(&self) -> &'static str { "Average" }
    fn alias(&self) -> &'static str { "AVERAGE" }
    fn arity(&self) -> Arity { Arity::Variadic { min: 1 } }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Numerical] }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        if args.is_empty() {
            return 0.0;
        }
        args.iter().sum::<f64>() / args.len() as f64
    }
    fn explain(&self, args: &[String]) -> String {
        format!("the average of {}", args.join(", "))
    }
}

/// Clamp into the signed unit range
pub struct Bound;
impl Primitive for Bound {
    fn ui_name(&self) -> &'static str { "Bound to Unit Range" }
    fn alias(&self) -> &'static str { "BOUND" }
    fn arity(&self) -> Arity { Arity::Fixed(1) }
    fn input_types(&self) -> Vec<SemanticType> { vec![SemanticType::Numerical] }
    fn output_type(&self) -> SemanticType { SemanticType::Numerical }
    fn execute(&self, args: &[f64]) -> f64 {
        args[0].clamp(-1.0, 1.0)
    }
    fn explain(&self, args: &[String]) -> String {
        format!("{} limited to [-1, 1]", args[0])
    }
}
