//! Alert types produced by composite rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AlertLevel, MetricId};

/// A cross-metric condition that fired during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    /// Rule identifier, e.g. "ED_Capacity_Crisis"
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    /// Metrics the condition was evaluated over
    pub metrics: Vec<MetricId>,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(level: AlertLevel, alert_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            alert_type: alert_type.into(),
            message: message.into(),
            metrics: vec![],
            timestamp: Utc::now(),
        }
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricId>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    pub fn is_critical(&self) -> bool {
        self.level == AlertLevel::Critical
    }
}
