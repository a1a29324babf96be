use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Ranges the chart endpoint accepts.
const VALID_RANGES: [&str; 11] = [
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Intervals the chart endpoint accepts for historical queries.
const VALID_INTERVALS: [&str; 6] = ["1h", "1d", "5d", "1wk", "1mo", "3mo"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: AnalysisDefaults,
    pub data: DataSettings,
    pub insight: InsightSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: AnalysisDefaults::default(),
            data: DataSettings::default(),
            insight: InsightSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    pub range: String,
    pub interval: String,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            range: "1y".to_string(),
            interval: "1d".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 15,
            user_agent: format!("market-analyzer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            debug!(path, "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !VALID_RANGES.contains(&self.defaults.range.as_str()) {
            errors.push(format!(
                "defaults.range '{}' is not one of {:?}",
                self.defaults.range, VALID_RANGES
            ));
        }
        if !VALID_INTERVALS.contains(&self.defaults.interval.as_str()) {
            errors.push(format!(
                "defaults.interval '{}' is not one of {:?}",
                self.defaults.interval, VALID_INTERVALS
            ));
        }
        if self.data.base_url.is_empty() {
            errors.push("data.base_url must not be empty".to_string());
        }
        if self.data.timeout_secs == 0 {
            errors.push("data.timeout_secs must be > 0".to_string());
        }
        if self.insight.base_url.is_empty() {
            errors.push("insight.base_url must not be empty".to_string());
        }
        if self.insight.model.is_empty() {
            errors.push("insight.model must not be empty".to_string());
        }
        if self.insight.timeout_secs == 0 {
            errors.push("insight.timeout_secs must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
