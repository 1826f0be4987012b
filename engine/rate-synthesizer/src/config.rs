use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, SynthError};

/// Configuration for the rate synthesizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// Synthesis inputs
    pub synthesis: SynthesisParameters,

    /// Competitor roster source
    pub roster: RosterConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Reference rate of the subject property (currency units, e.g. 10000)
    pub base_rate: f64,

    /// Number of nights in a range synthesis
    pub range_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Path to the competitor roster JSON
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            synthesis: SynthesisParameters {
                base_rate: 10_000.0,
                range_days: 14,
            },
            roster: RosterConfig {
                path: PathBuf::from("data/competitors.json"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
        }
    }
}

impl SynthesizerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_rate) = lookup("RATE_SYNTH_BASE_RATE") {
            config.synthesis.base_rate = parse_var("RATE_SYNTH_BASE_RATE", &base_rate)?;
        }

        if let Some(days) = lookup("RATE_SYNTH_RANGE_DAYS") {
            config.synthesis.range_days = parse_var("RATE_SYNTH_RANGE_DAYS", &days)?;
        }

        if let Some(path) = lookup("RATE_SYNTH_ROSTER") {
            config.roster.path = PathBuf::from(path);
        }

        if let Some(level) = lookup("RATE_SYNTH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("RATE_SYNTH_LOG_FORMAT") {
            config.logging.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.synthesis.base_rate.is_finite() {
            return Err(SynthError::Config(format!(
                "base rate must be finite, got {}",
                self.synthesis.base_rate
            )));
        }
        if self.synthesis.range_days == 0 {
            return Err(SynthError::Config("range_days must be at least 1".to_string()));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json" | "compact") {
            return Err(SynthError::Config(format!(
                "unknown log format '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| SynthError::Config(format!("{key}='{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SynthesizerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SynthesizerConfig::default());
        assert_eq!(config.synthesis.base_rate, 10_000.0);
        assert_eq!(config.synthesis.range_days, 14);
        assert_eq!(config.roster.path, PathBuf::from("data/competitors.json"));
    }

    #[test]
    fn test_overrides() {
        let config = SynthesizerConfig::from_lookup(lookup_from(&[
            ("RATE_SYNTH_BASE_RATE", "12500.5"),
            ("RATE_SYNTH_RANGE_DAYS", " 30 "),
            ("RATE_SYNTH_ROSTER", "/tmp/roster.json"),
            ("RATE_SYNTH_LOG_LEVEL", "debug"),
            ("RATE_SYNTH_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.synthesis.base_rate, 12500.5);
        assert_eq!(config.synthesis.range_days, 30);
        assert_eq!(config.roster.path, PathBuf::from("/tmp/roster.json"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_overrides() {
        let result =
            SynthesizerConfig::from_lookup(lookup_from(&[("RATE_SYNTH_BASE_RATE", "lots")]));
        assert!(matches!(result, Err(SynthError::Config(_))));

        let result = SynthesizerConfig::from_lookup(lookup_from(&[("RATE_SYNTH_RANGE_DAYS", "0")]));
        assert!(matches!(result, Err(SynthError::Config(_))));

        let result =
            SynthesizerConfig::from_lookup(lookup_from(&[("RATE_SYNTH_BASE_RATE", "NaN")]));
        assert!(matches!(result, Err(SynthError::Config(_))));

        let result =
            SynthesizerConfig::from_lookup(lookup_from(&[("RATE_SYNTH_LOG_FORMAT", "xml")]));
        assert!(matches!(result, Err(SynthError::Config(_))));
    }
}
