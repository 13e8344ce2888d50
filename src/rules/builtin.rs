use crate::engines::generation::builder::TreeBuilder;
use crate::error::Result;
use crate::functions::registry::NodeRegistry;
use crate::rules::rule::{Rule, RuleIdentity};
use crate::types::SemanticType;

/// Built-in rule catalog, built programmatically through the factory
pub fn builtin_rules(registry: &NodeRegistry) -> Result<Vec<Rule>> {
    Ok(vec![
        rsi_overbought(registry)?,
        rsi_oversold(registry)?,
        golden_cross(registry)?,
        sentiment_tilt(registry)?,
        volatility_risk(registry)?,
        forecast_opportunity(registry)?,
    ])
}

/// Sell when the 14-day RSI is above 70
pub fn rsi_overbought(registry: &NodeRegistry) -> Result<Rule> {
    let b = TreeBuilder::new(registry);
    let overbought = b.op("GREATER_THAN", vec![b.node("RSI_14")?, b.node("RSI_OVERBOUGHT")?])?;
    let root = b.op(
        "IF_THEN_ELSE",
        vec![overbought, b.node("SELL_SIGNAL")?, b.node("HOLD_SIGNAL")?],
    )?;
    Rule::new(
        RuleIdentity::new("rsi_overbought", "RSI Overbought")
            .with_description("Sell signal when the 14-day RSI exceeds 70"),
        SemanticType::DecisionSignal,
        root,
    )
}

/// Buy when the 14-day RSI is below 30
pub fn rsi_oversold(registry: &NodeRegistry) -> Result<Rule> {
    let b = TreeBuilder::new(registry);
    let oversold = b.op("LESS_THAN", vec![b.node("RSI_14")?, b.node("RSI_OVERSOLD")?])?;
    let root = b.op(
        "IF_THEN_ELSE",
        vec![oversold, b.node("BUY_SIGNAL")?, b.node("HOLD_SIGNAL")?],
    )?;
    Rule::new(
        RuleIdentity::new("rsi_oversold", "RSI Oversold")
            .with_description("Buy signal when the 14-day RSI drops below 30"),
        SemanticType::DecisionSignal,
        root,
    )
}

/// Buy while the 50-day average is above the 200-day average and the trend is strong
pub fn golden_cross(registry: &NodeRegistry) -> Result<Rule> {
    let b = TreeBuilder::new(registry);
    let crossed = b.op("PRICE_ABOVE", vec![b.node("SMA_50")?, b.node("SMA_200")?])?;
    let trending = b.op("GREATER_THAN", vec![b.node("ADX_14")?, b.node("STRONG_TREND")?])?;
    let both = b.op("AND", vec![crossed, trending])?;
    let root = b.op(
        "IF_THEN_ELSE",
        vec![both, b.node("BUY_SIGNAL")?, b.node("HOLD_SIGNAL")?],
    )?;
    Rule::new(
        RuleIdentity::new("golden_cross", "Golden Cross")
            .with_description("Buy when the 50-day average is above the 200-day average in a strong trend"),
        SemanticType::DecisionSignal,
        root,
    )
}

/// Lean with news sentiment once it clears either threshold
pub fn sentiment_tilt(registry: &NodeRegistry) -> Result<Rule> {
    let b = TreeBuilder::new(registry);
    let positive = b.op(
        "GREATER_THAN",
        vec![b.node("NEWS_SENTIMENT")?, b.node("SENTIMENT_POSITIVE")?],
    )?;
    let negative = b.op(
        "LESS_THAN",
        vec![b.node("NEWS_SENTIMENT")?, b.node("SENTIMENT_NEGATIVE")?],
    )?;
    let bearish = b.op(
        "IF_THEN_ELSE",
        vec![negative, b.node("WEAK_SELL_SIGNAL")?, b.node("HOLD_SIGNAL")?],
    )?;
    let root = b.op(
        "IF_THEN_ELSE",
        vec![positive, b.node("WEAK_BUY_SIGNAL")?, bearish],
    )?;
    Rule::new(
        RuleIdentity::new("sentiment_tilt", "Sentiment Tilt")
            .with_description("Weak buy on positive news sentiment, weak sell on negative"),
        SemanticType::DecisionSignal,
        root,
    )
}

/// Risk rises with volatility; full risk above the high-volatility level
pub fn volatility_risk(registry: &NodeRegistry) -> Result<Rule> {
    let b = TreeBuilder::new(registry);
    let high = b.op(
        "GREATER_THAN",
        vec![b.node("VOLATILITY_30D")?, b.node("HIGH_VOLATILITY")?],
    )?;
    let scaled = b.op(
        "DIVIDE",
        vec![b.node("VOLATILITY_30D")?, b.node("HIGH_VOLATILITY")?],
    )?;
    let bounded = b.op("BOUND", vec![scaled])?;
    let root = b.op("IF_THEN_ELSE", vec![high, b.node("ONE")?, bounded])?;
    Rule::new(
        RuleIdentity::new("volatility_risk", "Volatility Risk")
            .with_description("Risk proportional to 30-day volatility, capped at the high-volatility level"),
        SemanticType::RiskLevel,
        root,
    )
}

/// Average of the forecast signals, kept in the unit range
pub fn forecast_opportunity(registry: &NodeRegistry) -> Result<Rule> {
    let b = TreeBuilder::new(registry);
    let centered_probability = b.op(
        "SUBTRACT",
        vec![
            b.op("MULTIPLY", vec![b.node("FORECAST_UP_PROBABILITY")?, b.constant(2.0)?])?,
            b.node("ONE")?,
        ],
    )?;
    let average = b.op(
        "AVERAGE",
        vec![b.node("FORECAST_RETURN_5D")?, centered_probability],
    )?;
    let root = b.op("BOUND", vec![average])?;
    Rule::new(
        RuleIdentity::new("forecast_opportunity", "Forecast Opportunity")
            .with_description("Blend of the 5-day return forecast and the probability of a rise"),
        SemanticType::OpportunityRating,
        root,
    )
}
