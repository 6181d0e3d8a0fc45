//! Reasoning configuration
//!
//! Classification bands, rule thresholds and recommendation tiers.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (e.g. `pulse --config my.toml`)
//! 2. `PULSE_CONFIG` environment variable
//! 3. Override in data dir (~/.local/share/pulse/config/pulse.toml)
//! 4. Embedded defaults (compiled into binary)
//!
//! Every section and key is optional in an override file; missing ones keep
//! their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pulse.toml");

/// Environment variable naming a config file
pub const CONFIG_PATH_ENV: &str = "PULSE_CONFIG";

/// Band boundaries, as percentages of target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Ratio at or above which a metric is Normal
    pub normal_at: f64,
    /// Ratio at or above which (and below `normal_at`) a metric is Warning
    pub warning_at: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            normal_at: 100.0,
            warning_at: 95.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityCrisisConfig {
    pub enabled: bool,
    pub wait_time_metric: String,
    /// Triggers when the wait time is strictly above this many minutes
    pub wait_time_above: f64,
    pub lwbs_metric: String,
    /// Triggers when the left-without-being-seen rate is strictly above this
    pub lwbs_above: f64,
}

impl Default for CapacityCrisisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wait_time_metric: "ED_Wait_Time".to_string(),
            wait_time_above: 40.0,
            lwbs_metric: "ED_LWBS".to_string(),
            lwbs_above: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialStressConfig {
    pub enabled: bool,
    pub margin_metric: String,
    /// Triggers when the operating margin is strictly below this
    pub margin_below: f64,
}

impl Default for FinancialStressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            margin_metric: "Hospital_Operating_Margin".to_string(),
            margin_below: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub capacity_crisis: CapacityCrisisConfig,
    pub financial_stress: FinancialStressConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Critical metrics needed for the executive review (P0) recommendation
    pub executive_review_critical: usize,
    /// Warning metrics needed for the warning review (P2) recommendation
    pub warning_review: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            executive_review_critical: 3,
            warning_review: 3,
        }
    }
}

/// Full reasoning configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub classifier: ClassifierConfig,
    pub rules: RulesConfig,
    pub recommendations: RecommendationConfig,
}

impl PulseConfig {
    /// Load configuration following the resolution order above
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            if !env_path.trim().is_empty() {
                return Self::from_file(Path::new(&env_path));
            }
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Self::embedded()
    }

    /// The defaults compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse and validate TOML config content
    pub fn parse(content: &str) -> Result<Self> {
        let config: PulseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        if !c.normal_at.is_finite() || !c.warning_at.is_finite() {
            return Err(Error::Config(
                "classifier bands must be finite numbers".to_string(),
            ));
        }
        if c.warning_at > c.normal_at {
            return Err(Error::Config(format!(
                "classifier.warning_at ({}) must not exceed classifier.normal_at ({})",
                c.warning_at, c.normal_at
            )));
        }
        if self.recommendations.executive_review_critical == 0 {
            return Err(Error::Config(
                "recommendations.executive_review_critical must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("config").join("pulse.toml"))
}
