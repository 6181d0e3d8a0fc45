//! In-memory entity store with copy-on-write snapshots
//!
//! This module is organized by domain:
//! - `departments` - Department registration and lookups
//! - `metrics` - Metric registration, telemetry updates, single-valued relations
//! - `edges` - `depends_on` / `affects` edge maintenance
//!
//! `KpiGraph` is the graph of record. `KpiStore` is a cloneable handle that
//! serializes writers behind a lock and hands readers an immutable
//! `Arc<KpiGraph>` snapshot, so a reasoning run never observes a write that
//! happens while it is running.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::classify::Classification;
use crate::error::Result;
use crate::models::{Department, DepartmentId, EdgeKind, Metric, MetricId, NewMetric, Trend};

mod departments;
mod edges;
mod metrics;


/// The typed KPI graph: departments, metrics and their relationships
#[derive(Debug, Clone, Default)]
pub struct KpiGraph {
    departments: Vec<Department>,
    department_index: HashMap<DepartmentId, usize>,
    metrics: Vec<Metric>,
    metric_index: HashMap<MetricId, usize>,
    /// Bumped on every change to source data (not on published classifications)
    revision: u64,
}

impl KpiGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Revision of the source data this graph holds
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Write published alert levels onto every metric
    ///
    /// Metrics absent from the classification (exempt ones) go back to unclassified.
    pub(crate) fn apply_classification(&mut self, classification: &Classification) {
        for metric in &mut self.metrics {
            metric.alert_level = classification.level(metric.id.as_str());
        }
    }
}

/// Shared handle to the graph of record
#[derive(Debug, Clone, Default)]
pub struct KpiStore {
    inner: Arc<RwLock<Arc<KpiGraph>>>,
}

impl KpiStore {
    /// Create a store holding an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already populated graph
    pub fn from_graph(graph: KpiGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    /// Immutable view of the current graph state
    pub fn snapshot(&self) -> Arc<KpiGraph> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Apply a mutation atomically
    ///
    /// The closure runs against a private copy; the copy replaces the current
    /// graph only if the closure succeeds, so a failed mutation leaves no trace.
    pub fn update<T>(&self, f: impl FnOnce(&mut KpiGraph) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let mut next = KpiGraph::clone(&guard);
        let out = f(&mut next)?;
        *guard = Arc::new(next);
        Ok(out)
    }

    pub fn add_department(&self, department: Department) -> Result<DepartmentId> {
        self.update(|g| g.add_department(department))
    }

    pub fn add_metric(&self, metric: NewMetric) -> Result<MetricId> {
        self.update(|g| g.add_metric(metric))
    }

    pub fn add_edge(&self, kind: EdgeKind, from: &str, to: &str) -> Result<bool> {
        self.update(|g| g.add_edge(kind, from, to))
    }

    pub fn remove_edge(&self, kind: EdgeKind, from: &str, to: &str) -> Result<bool> {
        self.update(|g| g.remove_edge(kind, from, to))
    }

    /// Telemetry update of a metric's actual value
    pub fn set_actual_value(&self, id: &str, value: Option<f64>) -> Result<()> {
        self.update(|g| g.set_actual_value(id, value))
    }

    /// Telemetry update of a metric's trend
    pub fn set_trend(&self, id: &str, trend: Trend) -> Result<()> {
        self.update(|g| g.set_trend(id, trend))
    }

    /// Publish a run's classification onto the metrics, all or nothing
    ///
    /// Returns `false` (and writes nothing) when the graph changed since the
    /// snapshot the classification was computed from.
    pub fn publish_classification(&self, classification: &Classification) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if guard.revision() != classification.revision {
            warn!(
                snapshot = classification.revision,
                current = guard.revision(),
                "Skipping stale classification publish"
            );
            return false;
        }

        let mut next = KpiGraph::clone(&guard);
        next.apply_classification(classification);
        *guard = Arc::new(next);

        debug!(
            revision = classification.revision,
            classified = classification.len(),
            "Published classification"
        );
        true
    }
}

impl From<KpiGraph> for KpiStore {
    fn from(graph: KpiGraph) -> Self {
        Self::from_graph(graph)
    }
}
