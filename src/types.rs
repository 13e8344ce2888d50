use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic meaning of a value, independent of its f64 storage.
///
/// Tags form a two-level lattice: `Any` accepts everything, `Numerical` is the
/// supertype of the quantity-like domain tags, `Boolean` stands alone, and the
/// purpose tags only ever describe what a whole rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    Any,
    Numerical,
    Boolean,

    // Numerical domain tags
    Price,
    Momentum,
    Trend,
    Volatility,
    Volume,
    Sentiment,
    Forecast,

    // Rule purposes
    DecisionSignal,
    RiskLevel,
    OpportunityRating,
}

/// Closed set of tags that may stand in for `Numerical`.
pub const NUMERICAL_DOMAIN: &[SemanticType] = &[
    SemanticType::Price,
    SemanticType::Momentum,
    SemanticType::Trend,
    SemanticType::Volatility,
    SemanticType::Volume,
    SemanticType::Sentiment,
    SemanticType::Forecast,
];

pub const PURPOSE_TAGS: &[SemanticType] = &[
    SemanticType::DecisionSignal,
    SemanticType::RiskLevel,
    SemanticType::OpportunityRating,
];

impl SemanticType {
    pub const ALL: [SemanticType; 13] = [
        SemanticType::Any,
        SemanticType::Numerical,
        SemanticType::Boolean,
        SemanticType::Price,
        SemanticType::Momentum,
        SemanticType::Trend,
        SemanticType::Volatility,
        SemanticType::Volume,
        SemanticType::Sentiment,
        SemanticType::Forecast,
        SemanticType::DecisionSignal,
        SemanticType::RiskLevel,
        SemanticType::OpportunityRating,
    ];

    pub fn is_numerical_domain(self) -> bool {
        NUMERICAL_DOMAIN.contains(&self)
    }

    pub fn is_purpose(self) -> bool {
        PURPOSE_TAGS.contains(&self)
    }

    /// Can a value tagged `self` be supplied where `expected` is declared?
    pub fn is_acceptable_as(self, expected: SemanticType) -> bool {
        is_acceptable(self, expected)
    }

    pub fn name(self) -> &'static str {
        match self {
            SemanticType::Any => "ANY",
            SemanticType::Numerical => "NUMERICAL",
            SemanticType::Boolean => "BOOLEAN",
            SemanticType::Price => "PRICE",
            SemanticType::Momentum => "MOMENTUM",
            SemanticType::Trend => "TREND",
            SemanticType::Volatility => "VOLATILITY",
            SemanticType::Volume => "VOLUME",
            SemanticType::Sentiment => "SENTIMENT",
            SemanticType::Forecast => "FORECAST",
            SemanticType::DecisionSignal => "DECISION_SIGNAL",
            SemanticType::RiskLevel => "RISK_LEVEL",
            SemanticType::OpportunityRating => "OPPORTUNITY_RATING",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type compatibility relation. Not symmetric: `PRICE` is acceptable as
/// `NUMERICAL`, never the other way round. `BOOLEAN` and `NUMERICAL` never mix.
pub fn is_acceptable(supplied: SemanticType, expected: SemanticType) -> bool {
    if expected == SemanticType::Any {
        return true;
    }
    if supplied == expected {
        return true;
    }
    expected == SemanticType::Numerical && supplied.is_numerical_domain()
}

/// Number of operand children an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// Unbounded, with a lower limit that must be met before sealing
    Variadic { min: usize },
}

impl Arity {
    pub fn is_variadic(&self) -> bool {
        matches!(self, Arity::Variadic { .. })
    }

    /// Minimum number of children required for the operator to be complete
    pub fn required(&self) -> usize {
        match self {
            Arity::Fixed(n) => *n,
            Arity::Variadic { min } => *min,
        }
    }

    pub fn is_satisfied_by(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => count == *n,
            Arity::Variadic { min } => count >= *min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic { min } => write!(f, "at least {}", min),
        }
    }
}

/// How an operator consumes its children during evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Every child is evaluated, left to right, before the operator runs
    Eager,
    /// Ternary condition/then/else; only the condition and the taken branch run
    Branch,
}

/// Value scale of a snapshot field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleType {
    Price,              // Follows price (close, SMA, EMA)
    Oscillator0_100,    // 0-100 bounded (RSI, Stochastic, ADX)
    OscillatorCentered, // Zero-centered, unbounded (MACD histogram)
    Volatility,         // Small positive decimals (ATR, realised vol)
    Volume,             // Large positive values
    Unit,               // Already in [-1, 1] (sentiment, trend score)
    Probability,        // [0, 1]
    Flag,               // 0/1 boolean encoding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_is_asymmetric() {
        assert!(is_acceptable(SemanticType::Price, SemanticType::Numerical));
        assert!(!is_acceptable(SemanticType::Numerical, SemanticType::Price));
    }

    #[test]
    fn test_boolean_and_numerical_never_mix() {
        assert!(!is_acceptable(SemanticType::Boolean, SemanticType::Numerical));
        assert!(!is_acceptable(SemanticType::Numerical, SemanticType::Boolean));
    }

    #[test]
    fn test_any_accepts_every_tag() {
        for tag in SemanticType::ALL {
            assert!(is_acceptable(tag, SemanticType::Any), "{} rejected by ANY", tag);
        }
    }

    #[test]
    fn test_domain_tags_do_not_cross() {
        assert!(!is_acceptable(SemanticType::Price, SemanticType::Sentiment));
        assert!(!is_acceptable(SemanticType::Sentiment, SemanticType::Momentum));
        assert!(is_acceptable(SemanticType::Sentiment, SemanticType::Sentiment));
    }

    #[test]
    fn test_purpose_tags_are_not_numerical() {
        for tag in PURPOSE_TAGS {
            assert!(tag.is_purpose());
            assert!(!is_acceptable(*tag, SemanticType::Numerical));
        }
    }

    #[test]
    fn test_arity_satisfaction() {
        assert!(Arity::Fixed(2).is_satisfied_by(2));
        assert!(!Arity::Fixed(2).is_satisfied_by(1));
        assert!(Arity::Variadic { min: 2 }.is_satisfied_by(5));
        assert!(!Arity::Variadic { min: 2 }.is_satisfied_by(1));
        assert_eq!(Arity::Variadic { min: 2 }.to_string(), "at least 2");
    }

    #[test]
    fn test_serde_names_are_uppercase() {
        let json = serde_json::to_string(&SemanticType::DecisionSignal).unwrap();
        assert_eq!(json, "\"DECISION_SIGNAL\"");
        let back: SemanticType = serde_json::from_str("\"PRICE\"").unwrap();
        assert_eq!(back, SemanticType::Price);
    }
}
