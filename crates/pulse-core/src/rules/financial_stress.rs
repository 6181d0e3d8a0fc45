//! Financial Stress Rule
//!
//! Fires when the operating margin drops below its floor.

use crate::classify::Classification;
use crate::config::FinancialStressConfig;
use crate::error::Result;
use crate::models::AlertLevel;
use crate::store::KpiGraph;

use super::{rule_metric, Alert, Rule};

pub const ID: &str = "Financial_Stress";

/// Operating margin below the configured floor
pub struct FinancialStressRule {
    config: FinancialStressConfig,
}

impl FinancialStressRule {
    pub fn new(config: FinancialStressConfig) -> Self {
        Self { config }
    }
}

impl Default for FinancialStressRule {
    fn default() -> Self {
        Self::new(FinancialStressConfig::default())
    }
}

impl Rule for FinancialStressRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Financial Stress"
    }

    fn evaluate(&self, graph: &KpiGraph, _classification: &Classification) -> Result<Vec<Alert>> {
        let margin = rule_metric(graph, ID, &self.config.margin_metric)?;

        match margin.actual_value {
            Some(value) if value < self.config.margin_below => {
                let message = format!(
                    "Operating margin below {}% - review cost structure",
                    self.config.margin_below
                );
                Ok(vec![Alert::new(AlertLevel::Warning, ID, message)
                    .with_metrics([margin.id.clone()])])
            }
            _ => Ok(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::test_utils::{add_metric, graph_with_department};

    fn alerts(margin: f64) -> Vec<Alert> {
        let mut graph = graph_with_department();
        add_metric(&mut graph, "Hospital_Operating_Margin", margin, 5.0, 1.0);
        let classification = Classifier::default().classify(&graph);
        FinancialStressRule::default()
            .evaluate(&graph, &classification)
            .unwrap()
    }

    #[test]
    fn test_fires_below_floor() {
        let fired = alerts(2.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].level, AlertLevel::Warning);
        assert_eq!(fired[0].alert_type, "Financial_Stress");
        assert_eq!(
            fired[0].message,
            "Operating margin below 3% - review cost structure"
        );
    }

    #[test]
    fn test_quiet_at_or_above_floor() {
        assert!(alerts(5.0).is_empty());
        assert!(alerts(3.0).is_empty());
    }

    #[test]
    fn test_unknown_metric_is_config_error() {
        let graph = graph_with_department();
        let classification = Classifier::default().classify(&graph);
        let err = FinancialStressRule::default()
            .evaluate(&graph, &classification)
            .unwrap_err();
        assert!(matches!(err, crate::Error::RuleConfig { .. }));
    }
}
