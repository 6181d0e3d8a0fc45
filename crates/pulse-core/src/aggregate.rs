//! Department health scores and the executive summary
//!
//! Both roll up a run's `Classification`; neither reads `alert_level` off the
//! metrics, so they always agree with the rules and recommendations of the
//! same run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::error::{Error, Result};
use crate::models::AlertLevel;
use crate::store::KpiGraph;

/// Health of one department in a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub total_kpis: usize,
    pub critical_count: usize,
    /// Weight-normalized, capped average performance ratio in [0, 100]
    pub health_score: f64,
}

/// Organization-wide roll-up over classifiable metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_kpis: usize,
    pub on_target: usize,
    pub below_target: usize,
    /// Mean of actual / target, rounded to 2 decimal places
    pub avg_performance_ratio: f64,
}

/// Summaries for every department, keyed by department name
pub fn department_summary(
    graph: &KpiGraph,
    classification: &Classification,
) -> BTreeMap<String, DepartmentSummary> {
    let mut summaries = BTreeMap::new();

    for department in graph.departments() {
        let owned: Vec<_> = graph
            .get_all_metrics()
            .iter()
            .filter(|m| m.department == department.id)
            .collect();

        let classified: Vec<_> = owned
            .iter()
            .filter_map(|m| classification.get(m.id.as_str()).map(|c| (m.weight, c)))
            .collect();

        let summary = if classified.is_empty() {
            DepartmentSummary::default()
        } else {
            let weight_sum: f64 = classified.iter().map(|(w, _)| w).sum();
            let health_score = if weight_sum > 0.0 {
                let weighted: f64 = classified
                    .iter()
                    .map(|(w, c)| w * c.ratio.min(100.0))
                    .sum();
                (weighted / weight_sum).clamp(0.0, 100.0)
            } else {
                0.0
            };

            DepartmentSummary {
                total_kpis: owned.len(),
                critical_count: classified
                    .iter()
                    .filter(|(_, c)| c.level == AlertLevel::Critical)
                    .count(),
                health_score,
            }
        };

        tracing::debug!(
            department = %department.id,
            total = summary.total_kpis,
            critical = summary.critical_count,
            health = summary.health_score,
            "Department summarized"
        );
        summaries.insert(department.name.clone(), summary);
    }

    summaries
}

/// Global summary; `NoData` when nothing is classifiable
pub fn executive_summary(classification: &Classification) -> Result<ExecutiveSummary> {
    if classification.is_empty() {
        return Err(Error::NoData);
    }

    let total = classification.len();
    let on_target = classification.iter().filter(|c| c.ratio >= 100.0).count();
    let mean = classification.iter().map(|c| c.ratio / 100.0).sum::<f64>() / total as f64;

    Ok(ExecutiveSummary {
        total_kpis: total,
        on_target,
        // Underperforming by the classifier's ratio, not the literal `actual > target` count
        below_target: total - on_target,
        avg_performance_ratio: round2(mean),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::models::{Department, NewMetric};
    use crate::test_utils::{add_metric, graph_with_department};

    fn summarize(graph: &KpiGraph) -> BTreeMap<String, DepartmentSummary> {
        let classification = Classifier::default().classify(graph);
        department_summary(graph, &classification)
    }

    #[test]
    fn test_health_caps_ratios_at_100() {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "A", 32.5, 30.0, 0.85);
        add_metric(&mut graph, "B", 3.2, 2.0, 0.95);

        let summary = summarize(&graph)["Dept"];
        assert_eq!(summary.total_kpis, 2);
        assert_eq!(summary.critical_count, 0);
        assert_eq!(summary.health_score, 100.0);
    }

    #[test]
    fn test_health_is_weighted() {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "A", 100.0, 100.0, 0.5);
        add_metric(&mut graph, "B", 50.0, 100.0, 1.0);

        let summary = summarize(&graph)["Dept"];
        let expected = (0.5 * 100.0 + 1.0 * 50.0) / 1.5;
        assert!((summary.health_score - expected).abs() < 1e-9);
        assert_eq!(summary.critical_count, 1);
    }

    #[test]
    fn test_empty_department_is_zeroed() {
        let mut graph = graph_with_department();
        graph
            .add_department(Department::new("Empty", "Empty Dept"))
            .unwrap();
        graph
            .add_metric(NewMetric::new("NoValues", "No values", "Empty"))
            .unwrap();

        let summary = summarize(&graph)["Empty Dept"];
        assert_eq!(summary, DepartmentSummary::default());
    }

    #[test]
    fn test_zero_weight_department_scores_zero() {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "A", 100.0, 100.0, 0.0);

        let summary = summarize(&graph)["Dept"];
        assert_eq!(summary.total_kpis, 1);
        assert_eq!(summary.health_score, 0.0);
    }

    #[test]
    fn test_negative_ratio_clamped() {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "Loss", -4.0, 5.0, 1.0);

        let summary = summarize(&graph)["Dept"];
        assert_eq!(summary.health_score, 0.0);
    }

    #[test]
    fn test_executive_summary() {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "A", 110.0, 100.0, 1.0);
        add_metric(&mut graph, "B", 100.0, 100.0, 1.0);
        add_metric(&mut graph, "C", 60.0, 100.0, 1.0);

        let classification = Classifier::default().classify(&graph);
        let summary = executive_summary(&classification).unwrap();
        assert_eq!(summary.total_kpis, 3);
        assert_eq!(summary.on_target, 2);
        assert_eq!(summary.below_target, 1);
        assert_eq!(summary.avg_performance_ratio, 0.9);
    }

    #[test]
    fn test_executive_summary_without_data() {
        let graph = graph_with_department();
        let classification = Classifier::default().classify(&graph);
        assert!(matches!(
            executive_summary(&classification),
            Err(Error::NoData)
        ));
    }
}
