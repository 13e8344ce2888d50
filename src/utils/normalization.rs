use crate::types::ScaleType;
use serde::{Deserialize, Serialize};

/// Mapping from a raw snapshot value into the representation operators expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Normalization {
    /// Keep domain units so thresholds can be written as e.g. RSI 70
    Identity,
    /// Clip into the declared range
    Clamp { min: f64, max: f64 },
    /// Linearly map [min, max] onto [-1, 1], clipping outside values
    UnitRescale { min: f64, max: f64 },
    /// Squash an unbounded centered value into (-1, 1)
    Tanh { scale: f64 },
    /// Any positive value is true (1.0), everything else false (0.0)
    Flag,
}

impl Normalization {
    /// Default mapping for a scale
    pub fn for_scale(scale: ScaleType) -> Self {
        match scale {
            ScaleType::Price
            | ScaleType::Oscillator0_100
            | ScaleType::Volatility
            | ScaleType::Volume => Normalization::Identity,
            ScaleType::OscillatorCentered => Normalization::Tanh { scale: 1.0 },
            ScaleType::Unit => Normalization::Clamp { min: -1.0, max: 1.0 },
            ScaleType::Probability => Normalization::Clamp { min: 0.0, max: 1.0 },
            ScaleType::Flag => Normalization::Flag,
        }
    }

    pub fn apply(&self, raw: f64) -> f64 {
        match *self {
            Normalization::Identity => raw,
            Normalization::Clamp { min, max } => raw.clamp(min, max),
            Normalization::UnitRescale { min, max } => {
                let span = max - min;
                if span <= 0.0 {
                    return 0.0;
                }
                (2.0 * (raw - min) / span - 1.0).clamp(-1.0, 1.0)
            }
            Normalization::Tanh { scale } => {
                if scale <= 0.0 {
                    raw.tanh()
                } else {
                    (raw / scale).tanh()
                }
            }
            Normalization::Flag => {
                if raw > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
