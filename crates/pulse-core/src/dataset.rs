//! Declarative graph population from TOML
//!
//! A dataset lists departments and metrics; influence edges are declared on
//! the metrics themselves (`affects` / `depends_on`). Loading registers every
//! department, then every metric, then every edge, so edges may reference
//! metrics declared later in the file.
//!
//! ```toml
//! [[departments]]
//! id = "ED_Department"
//! name = "Emergency Department"
//!
//! [[metrics]]
//! id = "ED_Wait_Time"
//! name = "Door-to-Doctor Time"
//! department = "ED_Department"
//! actual = 32.5
//! target = 30.0
//! affects = ["ED_LWBS"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Category, Department, EdgeKind, NewMetric, TimePeriod, Trend, Unit};
use crate::store::{KpiGraph, KpiStore};

/// Reference hospital dataset (compiled into binary)
const HOSPITAL_DATASET: &str = include_str!("../../../data/hospital.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub departments: Vec<DepartmentEntry>,
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentEntry {
    pub id: String,
    pub name: String,
    pub bed_capacity: Option<u32>,
    pub staff_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub department: String,
    pub actual: Option<f64>,
    pub target: Option<f64>,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_unit")]
    pub unit: Unit,
    #[serde(default = "default_period")]
    pub period: TimePeriod,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub affects: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

fn default_weight() -> f64 {
    1.0
}

fn default_unit() -> Unit {
    Unit::Percentage
}

fn default_period() -> TimePeriod {
    TimePeriod::Monthly
}

impl Dataset {
    /// The reference hospital dataset
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(HOSPITAL_DATASET)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::InvalidData(format!("Invalid dataset TOML: {}", e)))
    }

    /// Read a dataset file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build a graph, validating every entry through the store
    pub fn into_graph(self) -> Result<KpiGraph> {
        let mut graph = KpiGraph::new();

        for entry in self.departments {
            let mut department = Department::new(entry.id, entry.name);
            department.bed_capacity = entry.bed_capacity;
            department.staff_count = entry.staff_count;
            graph.add_department(department)?;
        }

        let mut edges = vec![];
        for entry in self.metrics {
            for target in &entry.affects {
                edges.push((EdgeKind::Affects, entry.id.clone(), target.clone()));
            }
            for source in &entry.depends_on {
                edges.push((EdgeKind::DependsOn, entry.id.clone(), source.clone()));
            }

            let mut metric = NewMetric::new(entry.id, entry.name, entry.department)
                .description(entry.description)
                .thresholds(entry.warning, entry.critical)
                .weight(entry.weight)
                .trend(entry.trend)
                .unit(entry.unit)
                .period(entry.period)
                .categories(entry.categories);
            metric.actual_value = entry.actual;
            metric.target_value = entry.target;
            graph.add_metric(metric)?;
        }

        for (kind, from, to) in &edges {
            graph.add_edge(*kind, from, to)?;
        }

        info!(
            departments = graph.departments().len(),
            metrics = graph.get_all_metrics().len(),
            edges = edges.len(),
            "Dataset loaded"
        );
        Ok(graph)
    }

    pub fn into_store(self) -> Result<KpiStore> {
        Ok(KpiStore::from_graph(self.into_graph()?))
    }
}
