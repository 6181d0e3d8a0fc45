//! Composite rule engine
//!
//! A rule is a named predicate spanning several metrics. Rules read the graph
//! snapshot and the run's classification, never each other's output, and
//! return zero or more alerts.
//!
//! ## Built-in Rules
//!
//! - **Capacity Crisis** - ED wait time and LWBS rate both above their limits
//! - **Financial Stress** - operating margin below its floor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_core::rules::RuleEngine;
//!
//! let engine = RuleEngine::from_config(&config.rules);
//! let alerts = engine.evaluate(&graph, &classification)?;
//! ```

pub mod capacity_crisis;
pub mod financial_stress;
pub mod types;

pub use capacity_crisis::CapacityCrisisRule;
pub use financial_stress::FinancialStressRule;
pub use types::Alert;

use crate::classify::Classification;
use crate::config::RulesConfig;
use crate::error::{Error, Result};
use crate::models::Metric;
use crate::store::KpiGraph;

/// A named composite predicate
pub trait Rule: Send + Sync {
    /// Identifier, also used as the alert type
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate against one snapshot and its classification
    fn evaluate(&self, graph: &KpiGraph, classification: &Classification) -> Result<Vec<Alert>>;
}

/// Fixed, ordered registry of rules
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::from_config(&RulesConfig::default())
    }
}

impl RuleEngine {
    /// Engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Engine with the built-in rules enabled by `config`, in registry order
    pub fn from_config(config: &RulesConfig) -> Self {
        let mut engine = Self::empty();

        if config.capacity_crisis.enabled {
            engine.register(Box::new(CapacityCrisisRule::new(
                config.capacity_crisis.clone(),
            )));
        }
        if config.financial_stress.enabled {
            engine.register(Box::new(FinancialStressRule::new(
                config.financial_stress.clone(),
            )));
        }

        engine
    }

    /// Append a rule to the end of the registry
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule once, concatenating alerts in registry order
    ///
    /// The first rule error aborts the pass.
    pub fn evaluate(&self, graph: &KpiGraph, classification: &Classification) -> Result<Vec<Alert>> {
        let mut alerts = vec![];

        for rule in &self.rules {
            let fired = rule.evaluate(graph, classification)?;
            tracing::debug!(rule = rule.id(), name = rule.name(), count = fired.len(), "Rule evaluated");
            alerts.extend(fired);
        }

        Ok(alerts)
    }

    /// Ids of registered rules, in order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

/// Look up a metric a rule is configured against
///
/// An unknown id is a configuration error, not an absent condition.
pub(crate) fn rule_metric<'g>(graph: &'g KpiGraph, rule: &str, id: &str) -> Result<&'g Metric> {
    graph.get_metric(id).map_err(|_| Error::RuleConfig {
        rule: rule.to_string(),
        metric: id.to_string(),
    })
}
