use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub log_file: bool,
    pub log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Wall-clock interval between playback ticks.
    pub tick_interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl PlaybackConfig {
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Expansion budget for the bounded CFG membership test.
    pub derivation_budget: u64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            derivation_budget: 10_000,
        }
    }
}

impl GrammarConfig {
    pub fn with_derivation_budget(mut self, derivation_budget: u64) -> Self {
        self.derivation_budget = derivation_budget;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub logger: LoggerConfig,
    pub playback: PlaybackConfig,
    pub grammar: GrammarConfig,
}

impl ValidatorConfig {
    pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
        let canonic_path = std::fs::canonicalize(file_path)?;
        let content = std::fs::read_to_string(canonic_path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_optional_file<P: AsRef<std::path::Path>>(
        file_path: Option<P>,
    ) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    pub fn with_grammar(mut self, grammar: GrammarConfig) -> Self {
        self.grammar = grammar;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert!(!config.logger.enabled);
        assert_eq!(config.logger.log_level, LogLevel::Warn);
        assert_eq!(config.playback.tick_interval, Duration::from_secs(1));
        assert_eq!(config.grammar.derivation_budget, 10_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ValidatorConfig = toml::from_str(
            r#"
            [logger]
            enabled = true
            log_level = "Debug"

            [grammar]
            derivation_budget = 500
            "#,
        )
        .unwrap();

        assert!(config.logger.enabled);
        assert!(!config.logger.log_file);
        assert_eq!(config.logger.log_level, LogLevel::Debug);
        assert_eq!(config.playback.tick_interval, Duration::from_secs(1));
        assert_eq!(config.grammar.derivation_budget, 500);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: ValidatorConfig = toml::from_str("").unwrap();
        assert_eq!(config.grammar.derivation_budget, 10_000);
    }
}
