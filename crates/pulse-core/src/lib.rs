//! Pulse Core Library
//!
//! Reasoning core for the Pulse operational KPI knowledge graph:
//! - Typed entity store with copy-on-write snapshots
//! - Per-metric classification into Normal / Warning / Critical
//! - Cycle-tolerant influence graph queries
//! - Composite rule engine producing alerts
//! - Department health scores and the executive summary
//! - Prioritized recommendations and insights
//! - TOML datasets and configuration

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod insights;
pub mod models;
pub mod reasoner;
pub mod recommend;
pub mod rules;
pub mod store;

/// Graph builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{DepartmentSummary, ExecutiveSummary};
pub use classify::{AlertCounts, ClassifiedMetric, Classification, Classifier, SkippedMetric};
pub use config::{ClassifierConfig, PulseConfig, RecommendationConfig, RulesConfig};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use graph::{DependencyGraph, Reached};
pub use models::{
    AlertLevel, Category, Department, DepartmentId, EdgeKind, Metric, MetricDetail, MetricId,
    MetricRecord, NewMetric, TimePeriod, Trend, Unit,
};
pub use reasoner::{KpiService, Phase, Reasoner, ReasoningReport};
pub use recommend::{Priority, Recommendation};
pub use rules::{Alert, Rule, RuleEngine};
pub use store::{KpiGraph, KpiStore};
