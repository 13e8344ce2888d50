use super::traits::ConfigSection;
use crate::error::RuleEngineError;
use serde::{Deserialize, Serialize};

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default env_logger filter; `RUST_LOG` still takes precedence.
    ///
    /// Comma-separated `level` or `module=level` directives, e.g.
    /// `warn,stgp_rules=debug`. Every directive must name a level.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ConfigSection for LoggingConfig {
    fn section_name() -> &'static str {
        "logging"
    }

    fn validate(&self) -> Result<(), RuleEngineError> {
        let directives: Vec<&str> = self
            .level
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();
        if directives.is_empty() {
            return Err(RuleEngineError::Configuration(
                "Log filter is empty".to_string(),
            ));
        }
        for directive in directives {
            check_directive(directive)?;
        }
        Ok(())
    }
}

fn check_directive(directive: &str) -> Result<(), RuleEngineError> {
    let (module, level) = match directive.split_once('=') {
        Some((module, level)) => (Some(module.trim()), level.trim()),
        None => (None, directive),
    };

    if let Some(module) = module {
        let valid_module = !module.is_empty()
            && module.split("::").all(|part| {
                !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !valid_module {
            return Err(RuleEngineError::Configuration(format!(
                "Invalid module {:?} in log directive {:?}",
                module, directive
            )));
        }
    }

    if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(RuleEngineError::Configuration(format!(
            "Unknown log level {:?} in directive {:?}, expected one of {}",
            level,
            directive,
            LEVELS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
        }
    }

    #[test]
    fn test_bare_levels() {
        for level in ["info", "WARN", "off", "trace"] {
            with_level(level).validate().unwrap();
        }
    }

    #[test]
    fn test_module_directives() {
        with_level("info,stgp_rules=debug").validate().unwrap();
        with_level("warn, stgp_rules::engines::persistence=trace").validate().unwrap();
    }

    #[test]
    fn test_rejected_filters() {
        let rejected = [
            "",
            "loud",
            "stgp_rules=loud",
            "=debug",
            "stgp rules=debug",
            "info,stgp_rules",
        ];
        for level in rejected {
            assert!(with_level(level).validate().is_err(), "{:?} accepted", level);
        }
    }
}
