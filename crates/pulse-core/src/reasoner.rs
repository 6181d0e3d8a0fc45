//! Reasoning runs and the read operations built on them
//!
//! A run is a single synchronous pass over one graph snapshot:
//!
//! ```text
//! Classifier → Rule Engine → Aggregator → Recommendations → Insights
//! ```
//!
//! The run never writes to the store. `KpiService::run_reasoning` publishes the
//! run's classification afterwards, all at once, and only if nothing changed
//! in between.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{self, DepartmentSummary, ExecutiveSummary};
use crate::classify::{AlertCounts, Classification, Classifier};
use crate::config::{PulseConfig, RecommendationConfig};
use crate::error::{Error, Result};
use crate::graph::Reached;
use crate::insights;
use crate::models::{EdgeKind, MetricDetail, MetricRecord};
use crate::recommend::{self, Recommendation};
use crate::rules::{Alert, RuleEngine};
use crate::store::{KpiGraph, KpiStore};

/// Stage of a reasoning run, reported with failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Rules,
    Insights,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Insights => "insights",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable result bundle of one run
#[derive(Debug, Clone, Serialize)]
pub struct ReasoningReport {
    pub alerts: Vec<Alert>,
    pub insights: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub counts: AlertCounts,
    /// Graph revision the run read
    pub revision: u64,
    pub generated_at: DateTime<Utc>,
    /// Whether the classification was written onto the metrics
    pub published: bool,
    #[serde(skip)]
    pub classification: Classification,
}

/// Runs the reasoning pipeline over graph snapshots
pub struct Reasoner {
    classifier: Classifier,
    rules: RuleEngine,
    recommendations: RecommendationConfig,
}

impl Default for Reasoner {
    fn default() -> Self {
        Self::new(&PulseConfig::default())
    }
}

impl Reasoner {
    pub fn new(config: &PulseConfig) -> Self {
        Self {
            classifier: Classifier::new(config.classifier.clone()),
            rules: RuleEngine::from_config(&config.rules),
            recommendations: config.recommendations.clone(),
        }
    }

    /// Classify a snapshot without running rules
    pub fn classify(&self, graph: &KpiGraph) -> Classification {
        self.classifier.classify(graph)
    }

    /// Execute one full run over `graph`
    pub fn run(&self, graph: &KpiGraph) -> Result<ReasoningReport> {
        let classification = self.classifier.classify(graph);
        let counts = classification.counts();

        let alerts = self
            .rules
            .evaluate(graph, &classification)
            .map_err(|e| e.in_phase(Phase::Rules))?;

        let recommendations = recommend::generate(&counts, &alerts, &self.recommendations);

        let insights =
            insights::generate(graph, &classification).map_err(|e| e.in_phase(Phase::Insights))?;

        info!(
            revision = graph.revision(),
            alerts = alerts.len(),
            recommendations = recommendations.len(),
            insights = insights.len(),
            critical = counts.critical,
            "Reasoning run complete"
        );

        Ok(ReasoningReport {
            alerts,
            insights,
            recommendations,
            counts,
            revision: classification.revision,
            generated_at: Utc::now(),
            published: false,
            classification,
        })
    }
}

/// The read and telemetry operations exposed to a presentation layer
#[derive(Clone)]
pub struct KpiService {
    store: KpiStore,
    reasoner: Arc<Reasoner>,
}

impl KpiService {
    pub fn new(store: KpiStore, reasoner: Reasoner) -> Self {
        Self {
            store,
            reasoner: Arc::new(reasoner),
        }
    }

    pub fn store(&self) -> &KpiStore {
        &self.store
    }

    /// Metrics in creation order, with their last published alert level
    pub fn list_metrics(&self) -> Vec<MetricRecord> {
        self.store.snapshot().metric_records()
    }

    /// One metric record
    pub fn metric(&self, id: &str) -> Result<MetricRecord> {
        let graph = self.store.snapshot();
        let metric = graph.get_metric(id)?;
        Ok(graph.metric_record(metric))
    }

    /// Full view of one metric, classified against its current values
    pub fn metric_detail(&self, id: &str) -> Result<MetricDetail> {
        let graph = self.store.snapshot();
        let mut detail = graph.metric_detail(id)?;

        if let Ok(classified) = self.reasoner.classifier.classify_metric(graph.get_metric(id)?) {
            detail.status = Some(classified.level);
            detail.performance_ratio = Some(classified.ratio);
        }
        Ok(detail)
    }

    /// Classify the current snapshot without publishing
    pub fn classification(&self) -> Classification {
        self.reasoner.classify(&self.store.snapshot())
    }

    /// Run reasoning on the current snapshot and publish its classification
    ///
    /// `published` is false when a write landed between the snapshot and the publish.
    pub fn run_reasoning(&self) -> Result<ReasoningReport> {
        let graph = self.store.snapshot();
        let mut report = self.reasoner.run(&graph)?;
        report.published = self.store.publish_classification(&report.classification);
        Ok(report)
    }

    /// Department health keyed by department name
    pub fn department_summary(&self) -> BTreeMap<String, DepartmentSummary> {
        let graph = self.store.snapshot();
        let classification = self.reasoner.classify(&graph);
        aggregate::department_summary(&graph, &classification)
    }

    /// Organization-wide summary, or `NoData`
    pub fn executive_summary(&self) -> Result<ExecutiveSummary> {
        let graph = self.store.snapshot();
        let classification = self.reasoner.classify(&graph);
        aggregate::executive_summary(&classification)
    }

    /// Metrics transitively reachable from `id` in `direction`
    pub fn impact(&self, id: &str, direction: EdgeKind) -> Result<Vec<Reached>> {
        self.store.snapshot().dependencies().reachable(id, direction)
    }

    /// Telemetry update of a metric's actual value
    pub fn update_actual(&self, id: &str, value: f64) -> Result<MetricRecord> {
        if !value.is_finite() {
            return Err(Error::InvalidData(format!(
                "actual value for {} must be a finite number",
                id
            )));
        }
        self.store.set_actual_value(id, Some(value))?;
        self.metric(id)
    }

    /// Number of metrics currently in the graph
    pub fn metric_count(&self) -> usize {
        self.store.snapshot().get_all_metrics().len()
    }
}
