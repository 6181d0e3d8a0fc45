//! Human-readable insights for a reasoning run
//!
//! Walked in metric creation order. Per metric, at most one of each:
//! - threshold tier crossed (critical before warning)
//! - downstream impact of a Critical metric
//! - classification skip with its reason

use std::collections::HashMap;

use crate::classify::Classification;
use crate::error::Result;
use crate::models::{AlertLevel, EdgeKind, Metric};
use crate::store::KpiGraph;

/// Generate the run's insight strings
pub fn generate(graph: &KpiGraph, classification: &Classification) -> Result<Vec<String>> {
    let skipped: HashMap<&str, &str> = classification
        .skipped
        .iter()
        .map(|s| (s.id.as_str(), s.reason.as_str()))
        .collect();

    let mut insights = vec![];
    for metric in graph.get_all_metrics() {
        if let Some(line) = threshold_insight(metric) {
            insights.push(line);
        }

        if classification.level(metric.id.as_str()) == Some(AlertLevel::Critical)
            && !metric.affects.is_empty()
        {
            let reached = graph
                .dependencies()
                .reachable(metric.id.as_str(), EdgeKind::Affects)?;
            let names: Vec<String> = reached
                .iter()
                .map(|r| match graph.get_metric(r.id.as_str()) {
                    Ok(m) => m.name.clone(),
                    Err(_) => r.id.to_string(),
                })
                .collect();
            insights.push(format!(
                "{} is critical and influences: {}",
                metric.name,
                names.join(", ")
            ));
        }

        if let Some(reason) = skipped.get(metric.id.as_str()) {
            insights.push(format!("{}: skipped ({})", metric.id, reason));
        }
    }

    tracing::debug!(count = insights.len(), "Insights generated");
    Ok(insights)
}

fn threshold_insight(metric: &Metric) -> Option<String> {
    let actual = metric.actual_value?;

    let (tier, threshold) = match (metric.critical_threshold, metric.warning_threshold) {
        (Some(critical), _) if actual >= critical => ("critical", critical),
        (_, Some(warning)) if actual >= warning => ("warning", warning),
        _ => return None,
    };

    Some(format!(
        "{}: value {} ≥ {} threshold {} (trend: {})",
        metric.name, actual, tier, threshold, metric.trend
    ))
}
