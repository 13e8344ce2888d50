use crate::functions::registry::NodeSpec;
use crate::types::{ScaleType, SemanticType};
use crate::utils::normalization::Normalization;

/// Built-in snapshot references.
///
/// Oscillators and prices keep their domain units so thresholds read naturally;
/// the `_SIGNAL` variants rescale onto the signed unit range.
pub fn builtin_variables() -> Vec<NodeSpec> {
    vec![
        // Momentum
        NodeSpec::variable(
            "RSI_14",
            "technical.daily.RSI_14",
            SemanticType::Momentum,
            ScaleType::Oscillator0_100,
            "the 14-day RSI",
        ),
        NodeSpec::variable(
            "RSI_14_SIGNAL",
            "technical.daily.RSI_14",
            SemanticType::Momentum,
            ScaleType::Oscillator0_100,
            "the 14-day RSI on a -1 to 1 scale",
        )
        .with_normalization(Normalization::UnitRescale { min: 0.0, max: 100.0 }),
        NodeSpec::variable(
            "STOCH_K",
            "technical.daily.STOCH_K",
            SemanticType::Momentum,
            ScaleType::Oscillator0_100,
            "the stochastic %K",
        ),
        NodeSpec::variable(
            "MACD_HISTOGRAM",
            "technical.daily.MACD_HIST",
            SemanticType::Momentum,
            ScaleType::OscillatorCentered,
            "the MACD histogram",
        ),
        // Price
        NodeSpec::variable(
            "CLOSE_PRICE",
            "market.price.close",
            SemanticType::Price,
            ScaleType::Price,
            "the closing price",
        ),
        NodeSpec::variable(
            "SMA_50",
            "technical.daily.SMA_50",
            SemanticType::Price,
            ScaleType::Price,
            "the 50-day moving average",
        ),
        NodeSpec::variable(
            "SMA_200",
            "technical.daily.SMA_200",
            SemanticType::Price,
            ScaleType::Price,
            "the 200-day moving average",
        ),
        NodeSpec::variable(
            "EMA_20",
            "technical.daily.EMA_20",
            SemanticType::Price,
            ScaleType::Price,
            "the 20-day exponential moving average",
        ),
        // Trend
        NodeSpec::variable(
            "ADX_14",
            "technical.daily.ADX_14",
            SemanticType::Trend,
            ScaleType::Oscillator0_100,
            "the 14-day ADX",
        ),
        NodeSpec::variable(
            "TREND_SCORE",
            "technical.daily.TREND_SCORE",
            SemanticType::Trend,
            ScaleType::Unit,
            "the composite trend score",
        ),
        NodeSpec::variable(
            "ABOVE_SMA_200",
            "technical.daily.above_sma_200",
            SemanticType::Boolean,
            ScaleType::Flag,
            "the price is above its 200-day average",
        ),
        // Volatility
        NodeSpec::variable(
            "ATR_14",
            "technical.daily.ATR_14",
            SemanticType::Volatility,
            ScaleType::Volatility,
            "the 14-day average true range",
        ),
        NodeSpec::variable(
            "VOLATILITY_30D",
            "technical.daily.VOLATILITY_30D",
            SemanticType::Volatility,
            ScaleType::Volatility,
            "the 30-day annualised volatility",
        ),
        // Volume
        NodeSpec::variable(
            "VOLUME",
            "market.volume.daily",
            SemanticType::Volume,
            ScaleType::Volume,
            "the daily volume",
        ),
        NodeSpec::variable(
            "VOLUME_RATIO",
            "market.volume.ratio_20d",
            SemanticType::Volume,
            ScaleType::Volume,
            "volume relative to its 20-day average",
        ),
        // Sentiment
        NodeSpec::variable(
            "NEWS_SENTIMENT",
            "sentiment.news.score",
            SemanticType::Sentiment,
            ScaleType::Unit,
            "the news sentiment score",
        ),
        NodeSpec::variable(
            "SOCIAL_SENTIMENT",
            "sentiment.social.score",
            SemanticType::Sentiment,
            ScaleType::Unit,
            "the social media sentiment score",
        ),
        // Forecasts
        NodeSpec::variable(
            "FORECAST_RETURN_5D",
            "forecast.return_5d",
            SemanticType::Forecast,
            ScaleType::OscillatorCentered,
            "the 5-day return forecast",
        )
        .with_normalization(Normalization::Tanh { scale: 0.05 }),
        NodeSpec::variable(
            "FORECAST_UP_PROBABILITY",
            "forecast.direction.up_probability",
            SemanticType::Forecast,
            ScaleType::Probability,
            "the forecast probability of a rise",
        ),
    ]
}
