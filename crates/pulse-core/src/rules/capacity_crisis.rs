//! Capacity Crisis Rule
//!
//! Fires when patients wait too long for a physician and, at the same time,
//! too many leave without being seen.

use crate::classify::Classification;
use crate::config::CapacityCrisisConfig;
use crate::error::Result;
use crate::models::AlertLevel;
use crate::store::KpiGraph;

use super::{rule_metric, Alert, Rule};

pub const ID: &str = "ED_Capacity_Crisis";

/// ED wait time and LWBS rate both over their limits
pub struct CapacityCrisisRule {
    config: CapacityCrisisConfig,
}

impl CapacityCrisisRule {
    pub fn new(config: CapacityCrisisConfig) -> Self {
        Self { config }
    }
}

impl Default for CapacityCrisisRule {
    fn default() -> Self {
        Self::new(CapacityCrisisConfig::default())
    }
}

impl Rule for CapacityCrisisRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Capacity Crisis"
    }

    fn evaluate(&self, graph: &KpiGraph, _classification: &Classification) -> Result<Vec<Alert>> {
        let wait = rule_metric(graph, ID, &self.config.wait_time_metric)?;
        let lwbs = rule_metric(graph, ID, &self.config.lwbs_metric)?;

        let (Some(wait_value), Some(lwbs_value)) = (wait.actual_value, lwbs.actual_value) else {
            return Ok(vec![]);
        };

        if wait_value > self.config.wait_time_above && lwbs_value > self.config.lwbs_above {
            let message = format!(
                "ED wait time >{}min + LWBS >{}% indicates capacity issues",
                self.config.wait_time_above, self.config.lwbs_above
            );
            return Ok(vec![Alert::new(AlertLevel::Critical, ID, message)
                .with_metrics([wait.id.clone(), lwbs.id.clone()])]);
        }

        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::models::{Department, NewMetric};
    use crate::test_utils::{add_metric, graph_with_department};

    fn alerts(wait: f64, lwbs: f64) -> Vec<Alert> {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "ED_Wait_Time", wait, 30.0, 0.85);
        add_metric(&mut graph, "ED_LWBS", lwbs, 2.0, 0.95);
        let classification = Classifier::default().classify(&graph);
        CapacityCrisisRule::default()
            .evaluate(&graph, &classification)
            .unwrap()
    }

    #[test]
    fn test_fires_when_both_conditions_hold() {
        let fired = alerts(45.0, 4.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].alert_type, "ED_Capacity_Crisis");
        assert!(fired[0].is_critical());
        assert_eq!(
            fired[0].message,
            "ED wait time >40min + LWBS >3% indicates capacity issues"
        );
        assert_eq!(fired[0].metrics.len(), 2);
    }

    #[test]
    fn test_quiet_when_wait_time_ok() {
        assert!(alerts(35.0, 4.0).is_empty());
    }

    #[test]
    fn test_limits_are_exclusive() {
        assert!(alerts(40.0, 4.0).is_empty());
        assert!(alerts(45.0, 3.0).is_empty());
    }

    #[test]
    fn test_missing_actual_value_does_not_fire() {
        let mut graph = KpiGraph::new();
        graph.add_department(Department::new("D", "Dept")).unwrap();
        graph
            .add_metric(NewMetric::new("ED_Wait_Time", "Wait", "D"))
            .unwrap();
        graph
            .add_metric(NewMetric::new("ED_LWBS", "LWBS", "D").values(4.0, 2.0))
            .unwrap();

        let classification = Classifier::default().classify(&graph);
        let fired = CapacityCrisisRule::default()
            .evaluate(&graph, &classification)
            .unwrap();
        assert!(fired.is_empty());
    }

    #[test]
    fn test_configured_metric_ids() {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "Wait", 60.0, 30.0, 1.0);
        add_metric(&mut graph, "Left", 9.0, 2.0, 1.0);

        let rule = CapacityCrisisRule::new(CapacityCrisisConfig {
            wait_time_metric: "Wait".to_string(),
            lwbs_metric: "Left".to_string(),
            ..Default::default()
        });
        let classification = Classifier::default().classify(&graph);
        assert_eq!(rule.evaluate(&graph, &classification).unwrap().len(), 1);
    }
}
