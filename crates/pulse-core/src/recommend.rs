//! Prioritized actions from a run's aggregate alert state
//!
//! Tiers, in output order:
//! - P0: enough metrics at Critical to warrant executive review
//! - P1: one per Critical rule alert
//! - P2: a build-up of Warning metrics

use serde::{Deserialize, Serialize};

use crate::classify::AlertCounts;
use crate::config::RecommendationConfig;
use crate::rules::Alert;

/// Urgency tier of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "P0-CRITICAL")]
    Critical,
    #[serde(rename = "P1-HIGH")]
    High,
    #[serde(rename = "P2-MEDIUM")]
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "P0-CRITICAL",
            Self::High => "P1-HIGH",
            Self::Medium => "P2-MEDIUM",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An owned, timed action item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub owner: String,
    pub timeline: String,
}

impl Recommendation {
    fn new(priority: Priority, action: impl Into<String>, owner: &str, timeline: &str) -> Self {
        Self {
            priority,
            action: action.into(),
            owner: owner.to_string(),
            timeline: timeline.to_string(),
        }
    }
}

/// Generate recommendations from alert counts and the run's rule alerts
pub fn generate(
    counts: &AlertCounts,
    alerts: &[Alert],
    config: &RecommendationConfig,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if counts.critical >= config.executive_review_critical {
        recs.push(Recommendation::new(
            Priority::Critical,
            "Executive review required — multiple critical KPIs detected",
            "CEO/COO",
            "24 hours",
        ));
    }

    for alert in alerts.iter().filter(|a| a.is_critical()) {
        recs.push(Recommendation::new(
            Priority::High,
            format!("Activate response plan: {}", alert.alert_type),
            "Department Leadership",
            "72 hours",
        ));
    }

    if config.warning_review > 0 && counts.warning >= config.warning_review {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Review warning-level KPIs before they become critical",
            "Department Heads",
            "1 week",
        ));
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertLevel;

    fn counts(critical: usize, warning: usize) -> AlertCounts {
        AlertCounts {
            normal: 0,
            warning,
            critical,
        }
    }

    #[test]
    fn test_executive_review_at_three_critical() {
        let recs = generate(&counts(3, 0), &[], &RecommendationConfig::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(
            recs[0],
            Recommendation {
                priority: Priority::Critical,
                action: "Executive review required — multiple critical KPIs detected"
                    .to_string(),
                owner: "CEO/COO".to_string(),
                timeline: "24 hours".to_string(),
            }
        );
    }

    #[test]
    fn test_no_executive_review_at_two_critical() {
        let recs = generate(&counts(2, 0), &[], &RecommendationConfig::default());
        assert!(recs.iter().all(|r| r.priority != Priority::Critical));
    }

    #[test]
    fn test_critical_alerts_get_response_plans() {
        let alerts = vec![
            Alert::new(AlertLevel::Critical, "ED_Capacity_Crisis", "capacity"),
            Alert::new(AlertLevel::Warning, "Financial_Stress", "margin"),
        ];
        let recs = generate(&counts(0, 0), &alerts, &RecommendationConfig::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].action, "Activate response plan: ED_Capacity_Crisis");
    }

    #[test]
    fn test_tiers_in_priority_order() {
        let alerts = vec![Alert::new(
            AlertLevel::Critical,
            "ED_Capacity_Crisis",
            "capacity",
        )];
        let recs = generate(&counts(4, 3), &alerts, &RecommendationConfig::default());
        let priorities: Vec<_> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::Critical, Priority::High, Priority::Medium]
        );
    }

    #[test]
    fn test_priority_serializes_as_label() {
        let json = serde_json::to_string(&Priority::Critical).unwrap();
        assert_eq!(json, "\"P0-CRITICAL\"");
    }
}
