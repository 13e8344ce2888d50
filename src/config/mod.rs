pub mod engine;
pub mod logging;
pub mod manager;
pub mod traits;

pub use engine::{EngineConfig, ScoreBounds};
pub use logging::LoggingConfig;
pub use manager::{AppConfig, ConfigManager};
