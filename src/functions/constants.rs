use crate::functions::registry::NodeSpec;
use crate::types::SemanticType;

/// Parametric constants take their literal from the node's construction params.
pub const CONSTANT: &str = "CONSTANT";
pub const BOOLEAN_CONSTANT: &str = "BOOLEAN_CONSTANT";
pub const PRICE_CONSTANT: &str = "PRICE_CONSTANT";

pub fn builtin_constants() -> Vec<NodeSpec> {
    vec![
        NodeSpec::parametric_constant(CONSTANT, "Numeric literal", SemanticType::Numerical),
        NodeSpec::parametric_constant(
            BOOLEAN_CONSTANT,
            "Boolean literal (0 or 1)",
            SemanticType::Boolean,
        ),
        NodeSpec::parametric_constant(PRICE_CONSTANT, "Price level", SemanticType::Price),
        // Booleans
        NodeSpec::constant("TRUE", "Always true", SemanticType::Boolean, 1.0, None),
        NodeSpec::constant("FALSE", "Always false", SemanticType::Boolean, 0.0, None),
        // Neutral values
        NodeSpec::constant("ZERO", "Zero", SemanticType::Numerical, 0.0, None),
        NodeSpec::constant("ONE", "One", SemanticType::Numerical, 1.0, None),
        NodeSpec::constant("MINUS_ONE", "Minus one", SemanticType::Numerical, -1.0, None),
        // Decision outputs
        NodeSpec::constant(
            "BUY_SIGNAL",
            "Full buy signal",
            SemanticType::Numerical,
            1.0,
            Some("BUY"),
        ),
        NodeSpec::constant(
            "SELL_SIGNAL",
            "Full sell signal",
            SemanticType::Numerical,
            -1.0,
            Some("SELL"),
        ),
        NodeSpec::constant(
            "HOLD_SIGNAL",
            "Neutral signal",
            SemanticType::Numerical,
            0.0,
            Some("HOLD"),
        ),
        NodeSpec::constant(
            "WEAK_BUY_SIGNAL",
            "Half buy signal",
            SemanticType::Numerical,
            0.5,
            Some("WEAK BUY"),
        ),
        NodeSpec::constant(
            "WEAK_SELL_SIGNAL",
            "Half sell signal",
            SemanticType::Numerical,
            -0.5,
            Some("WEAK SELL"),
        ),
        // Named thresholds
        NodeSpec::constant(
            "RSI_OVERBOUGHT",
            "RSI overbought threshold",
            SemanticType::Numerical,
            70.0,
            Some("the overbought level (70)"),
        ),
        NodeSpec::constant(
            "RSI_OVERSOLD",
            "RSI oversold threshold",
            SemanticType::Numerical,
            30.0,
            Some("the oversold level (30)"),
        ),
        NodeSpec::constant(
            "STRONG_TREND",
            "ADX strong trend threshold",
            SemanticType::Numerical,
            25.0,
            Some("the strong-trend level (25)"),
        ),
        NodeSpec::constant(
            "SENTIMENT_POSITIVE",
            "Positive sentiment threshold",
            SemanticType::Sentiment,
            0.3,
            Some("the positive-sentiment level (0.3)"),
        ),
        NodeSpec::constant(
            "SENTIMENT_NEGATIVE",
            "Negative sentiment threshold",
            SemanticType::Sentiment,
            -0.3,
            Some("the negative-sentiment level (-0.3)"),
        ),
        NodeSpec::constant(
            "HIGH_VOLATILITY",
            "Annualised volatility considered high",
            SemanticType::Volatility,
            0.4,
            Some("the high-volatility level (40%)"),
        ),
    ]
}
