//! Per-metric performance classification
//!
//! `ratio = actual / target * 100`, then:
//! - `ratio >= 100` → Normal
//! - `95 <= ratio < 100` → Warning
//! - `ratio < 95` → Critical
//!
//! The formula treats a higher actual value as better for every metric, including
//! wait times and infection rates where lower is better in practice.
//!
//! Classification never mutates the graph. It produces an immutable
//! `Classification` tied to the graph revision it was computed from, which the
//! rule engine, aggregator and recommendation generator read for the same run.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use crate::models::{AlertLevel, Metric, MetricId};
use crate::store::KpiGraph;

/// One classified metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedMetric {
    pub id: MetricId,
    /// actual / target * 100
    pub ratio: f64,
    pub level: AlertLevel,
}

/// A metric exempt from classification, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMetric {
    pub id: MetricId,
    pub reason: String,
}

/// Number of metrics at each alert level in a classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl AlertCounts {
    pub fn total(&self) -> usize {
        self.normal + self.warning + self.critical
    }
}

/// Immutable per-run classification map
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    /// Graph revision this was computed from
    pub revision: u64,
    metrics: Vec<ClassifiedMetric>,
    pub skipped: Vec<SkippedMetric>,
    #[serde(skip)]
    index: HashMap<MetricId, usize>,
}

impl Classification {
    pub fn level(&self, id: &str) -> Option<AlertLevel> {
        self.get(id).map(|c| c.level)
    }

    pub fn ratio(&self, id: &str) -> Option<f64> {
        self.get(id).map(|c| c.ratio)
    }

    pub fn get(&self, id: &str) -> Option<&ClassifiedMetric> {
        self.index.get(id).map(|&idx| &self.metrics[idx])
    }

    /// Classified metrics in graph order
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedMetric> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn count(&self, level: AlertLevel) -> usize {
        self.metrics.iter().filter(|c| c.level == level).count()
    }

    pub fn counts(&self) -> AlertCounts {
        let mut counts = AlertCounts::default();
        for c in &self.metrics {
            match c.level {
                AlertLevel::Normal => counts.normal += 1,
                AlertLevel::Warning => counts.warning += 1,
                AlertLevel::Critical => counts.critical += 1,
            }
        }
        counts
    }

    fn push(&mut self, classified: ClassifiedMetric) {
        self.index.insert(classified.id.clone(), self.metrics.len());
        self.metrics.push(classified);
    }
}

/// Performance ratio of a metric as a percentage of its target
///
/// Fails with `MissingData` when either value is absent, the target is zero,
/// or the result is not finite.
pub fn performance_ratio(metric: &Metric) -> Result<f64> {
    let missing = |reason: &str| Error::MissingData {
        metric: metric.id.to_string(),
        reason: reason.to_string(),
    };

    let actual = metric.actual_value.ok_or_else(|| missing("no actual value"))?;
    let target = metric.target_value.ok_or_else(|| missing("no target value"))?;
    if target == 0.0 {
        return Err(missing("target value is zero"));
    }

    let ratio = actual / target * 100.0;
    if !ratio.is_finite() {
        return Err(missing("ratio is not a finite number"));
    }
    Ok(ratio)
}

/// Maps performance ratios to alert levels
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Alert level for a ratio (percentage of target)
    pub fn level_for(&self, ratio: f64) -> AlertLevel {
        if ratio >= self.config.normal_at {
            AlertLevel::Normal
        } else if ratio >= self.config.warning_at {
            AlertLevel::Warning
        } else {
            AlertLevel::Critical
        }
    }

    /// Classify a single metric
    pub fn classify_metric(&self, metric: &Metric) -> Result<ClassifiedMetric> {
        let ratio = performance_ratio(metric)?;
        Ok(ClassifiedMetric {
            id: metric.id.clone(),
            ratio,
            level: self.level_for(ratio),
        })
    }

    /// Classify every metric of a graph snapshot
    ///
    /// Exempt metrics are recorded as skips; they never fail the whole pass.
    pub fn classify(&self, graph: &KpiGraph) -> Classification {
        let mut classification = Classification {
            revision: graph.revision(),
            ..Default::default()
        };

        for metric in graph.get_all_metrics() {
            match self.classify_metric(metric) {
                Ok(classified) => classification.push(classified),
                Err(Error::MissingData { reason, .. }) => {
                    debug!(metric = %metric.id, reason = %reason, "Metric exempt from classification");
                    classification.skipped.push(SkippedMetric {
                        id: metric.id.clone(),
                        reason,
                    });
                }
                Err(e) => {
                    // performance_ratio only yields MissingData
                    debug!(metric = %metric.id, error = %e, "Metric exempt from classification");
                    classification.skipped.push(SkippedMetric {
                        id: metric.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let counts = classification.counts();
        info!(
            revision = classification.revision,
            normal = counts.normal,
            warning = counts.warning,
            critical = counts.critical,
            skipped = classification.skipped.len(),
            "Classification complete"
        );
        classification
    }
}
