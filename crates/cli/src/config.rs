//! Process configuration, read once from the environment at startup.
//!
//! Only logging is configurable; ledger and inventory behaviour is fixed.

use warehouse_observability::{LogConfig, LogFormat};

pub const LOG_LEVEL_VAR: &str = "WAREHOUSE_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "WAREHOUSE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub log: LogConfig,
    /// Problems found while reading the environment, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(level) = lookup(LOG_LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.log.default_filter = level.trim().to_string();
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            match LogFormat::parse(&raw) {
                Some(format) => config.log.format = format,
                None => config.warnings.push(format!(
                    "{LOG_FORMAT_VAR}={raw:?} is not one of text, json; using text"
                )),
            }
        }

        config
    }
}
