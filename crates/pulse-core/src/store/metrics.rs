//! Metric operations: registration, telemetry, single-valued relations

use std::collections::BTreeSet;

use tracing::debug;

use super::KpiGraph;
use crate::error::{Error, Result};
use crate::models::{
    DepartmentId, Metric, MetricDetail, MetricId, MetricRecord, NewMetric, TimePeriod, Trend, Unit,
};

impl KpiGraph {
    /// Register a metric
    ///
    /// The owning department must already exist and the weight must lie in [0, 1].
    pub fn add_metric(&mut self, new: NewMetric) -> Result<MetricId> {
        if new.id.trim().is_empty() {
            return Err(Error::InvalidData("Metric id cannot be empty".to_string()));
        }
        if self.metric_index.contains_key(new.id.as_str()) {
            return Err(Error::InvalidData(format!("Metric {} already exists", new.id)));
        }
        // NaN fails both comparisons, so it is rejected here as well
        if !(0.0..=1.0).contains(&new.weight) {
            return Err(Error::InvalidData(format!(
                "Metric {} weight {} outside [0, 1]",
                new.id, new.weight
            )));
        }
        let department = self.get_department(&new.department)?.id.clone();

        let id = MetricId::new(new.id);
        debug!(metric = %id, department = %department, "Adding metric");

        let metric = Metric {
            id: id.clone(),
            name: new.name,
            description: new.description,
            actual_value: new.actual_value,
            target_value: new.target_value,
            warning_threshold: new.warning_threshold,
            critical_threshold: new.critical_threshold,
            weight: new.weight,
            trend: new.trend,
            unit: new.unit,
            time_period: new.time_period,
            department,
            categories: new.categories.into_iter().collect(),
            depends_on: BTreeSet::new(),
            affects: BTreeSet::new(),
            alert_level: None,
        };

        self.metric_index.insert(id.clone(), self.metrics.len());
        self.metrics.push(metric);
        self.bump();
        Ok(id)
    }

    /// Get a metric by id
    pub fn get_metric(&self, id: &str) -> Result<&Metric> {
        self.metric_index
            .get(id)
            .map(|&idx| &self.metrics[idx])
            .ok_or_else(|| Error::NotFound(format!("metric {}", id)))
    }

    pub fn contains_metric(&self, id: &str) -> bool {
        self.metric_index.contains_key(id)
    }

    /// All metrics in creation order
    pub fn get_all_metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub(super) fn metric_mut(&mut self, id: &str) -> Result<&mut Metric> {
        match self.metric_index.get(id) {
            Some(&idx) => Ok(&mut self.metrics[idx]),
            None => Err(Error::NotFound(format!("metric {}", id))),
        }
    }

    /// Telemetry update of the actual value
    pub fn set_actual_value(&mut self, id: &str, value: Option<f64>) -> Result<()> {
        let metric = self.metric_mut(id)?;
        metric.actual_value = value;
        self.bump();
        Ok(())
    }

    /// Telemetry update of the trend direction
    pub fn set_trend(&mut self, id: &str, trend: Trend) -> Result<()> {
        let metric = self.metric_mut(id)?;
        metric.trend = trend;
        self.bump();
        Ok(())
    }

    /// Re-assert the owning department
    ///
    /// A metric belongs to exactly one department; naming a different one is
    /// rejected rather than silently moving the metric.
    pub fn assign_department(&mut self, id: &str, department: &str) -> Result<()> {
        let department = self.get_department(department)?.id.clone();
        let metric = self.get_metric(id)?;
        check_single_valued(id, "department", &metric.department, &department)
    }

    /// Re-assert the unit of measure (single-valued)
    pub fn assign_unit(&mut self, id: &str, unit: Unit) -> Result<()> {
        let metric = self.get_metric(id)?;
        check_single_valued(id, "unit", &metric.unit, &unit)
    }

    /// Re-assert the reporting period (single-valued)
    pub fn assign_time_period(&mut self, id: &str, period: TimePeriod) -> Result<()> {
        let metric = self.get_metric(id)?;
        check_single_valued(id, "time period", &metric.time_period, &period)
    }

    /// Flat records for a listing view, in creation order
    pub fn metric_records(&self) -> Vec<MetricRecord> {
        self.metrics.iter().map(|m| self.metric_record(m)).collect()
    }

    pub fn metric_record(&self, metric: &Metric) -> MetricRecord {
        MetricRecord {
            id: metric.id.clone(),
            name: metric.name.clone(),
            department_name: self.department_name(&metric.department),
            actual: metric.actual_value,
            target: metric.target_value,
            trend: metric.trend,
            alert_level: metric.alert_level,
        }
    }

    /// Detail view of a metric, without classification fields
    pub fn metric_detail(&self, id: &str) -> Result<MetricDetail> {
        let metric = self.get_metric(id)?;
        let department = self.get_department(metric.department.as_str())?.clone();

        Ok(MetricDetail {
            id: metric.id.clone(),
            name: metric.name.clone(),
            description: metric.description.clone(),
            department,
            categories: metric.categories.clone(),
            unit: metric.unit,
            time_period: metric.time_period,
            weight: metric.weight,
            actual: metric.actual_value,
            target: metric.target_value,
            warning_threshold: metric.warning_threshold,
            critical_threshold: metric.critical_threshold,
            trend: metric.trend,
            depends_on: metric.depends_on.clone(),
            affects: metric.affects.clone(),
            alert_level: metric.alert_level,
            status: None,
            performance_ratio: None,
        })
    }

    /// Display name of a department, falling back to its id
    pub fn department_name(&self, id: &DepartmentId) -> String {
        self.get_department(id.as_str())
            .map(|d| d.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }
}

fn check_single_valued<T: PartialEq + std::fmt::Debug>(
    id: &str,
    relation: &str,
    current: &T,
    requested: &T,
) -> Result<()> {
    if current == requested {
        Ok(())
    } else {
        Err(Error::InvalidRelation(format!(
            "metric {} already has {} {:?}; cannot also assign {:?}",
            id, relation, current, requested
        )))
    }
}
