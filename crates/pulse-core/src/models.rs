//! Domain models for Pulse
//!
//! Departments, metrics (KPIs) and the tag-like variants that classify them.
//! Relationship edges between metrics are kept consistent by the store; the
//! types here only carry the data.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Stable identifier of a metric (e.g. "ED_Wait_Time")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricId(String);

impl MetricId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MetricId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetricId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier of a department (e.g. "ED_Department")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(String);

impl DepartmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DepartmentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DepartmentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// KPI category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Efficiency,
    QualityOfCare,
    Safety,
    Financial,
    PatientSatisfaction,
    Operational,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Efficiency => "Efficiency",
            Self::QualityOfCare => "QualityOfCare",
            Self::Safety => "Safety",
            Self::Financial => "Financial",
            Self::PatientSatisfaction => "PatientSatisfaction",
            Self::Operational => "Operational",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "").as_str() {
            "efficiency" => Ok(Self::Efficiency),
            "qualityofcare" => Ok(Self::QualityOfCare),
            "safety" => Ok(Self::Safety),
            "financial" => Ok(Self::Financial),
            "patientsatisfaction" => Ok(Self::PatientSatisfaction),
            "operational" => Ok(Self::Operational),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit a metric is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Percentage,
    Minutes,
    Ratio,
    Count,
    Currency,
    Score,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Minutes => "Minutes",
            Self::Ratio => "Ratio",
            Self::Count => "Count",
            Self::Currency => "Currency",
            Self::Score => "Score",
        }
    }

    /// Short suffix for display next to a value
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Percentage => "%",
            Self::Minutes => "min",
            Self::Ratio => "",
            Self::Count => "",
            Self::Currency => "$",
            Self::Score => "pts",
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" | "percent" => Ok(Self::Percentage),
            "minutes" => Ok(Self::Minutes),
            "ratio" => Ok(Self::Ratio),
            "count" => Ok(Self::Count),
            "currency" => Ok(Self::Currency),
            "score" => Ok(Self::Score),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reporting period of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    Weekly,
    Monthly,
    Quarterly,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
        }
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            _ => Err(format!("Unknown time period: {}", s)),
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction a metric has been moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl std::str::FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "stable" => Ok(Self::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived performance classification of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Warning => 2,
            Self::Critical => 3,
        }
    }
}

impl std::str::FromStr for AlertLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown alert level: {}", s)),
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of an influence edge between two metrics
///
/// `A affects B` and `B depends_on A` describe the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    DependsOn,
    Affects,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DependsOn => "depends_on",
            Self::Affects => "affects",
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Self::DependsOn => Self::Affects,
            Self::Affects => Self::DependsOn,
        }
    }
}

impl std::str::FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "depends_on" | "dependson" | "upstream" => Ok(Self::DependsOn),
            "affects" | "downstream" => Ok(Self::Affects),
            _ => Err(format!("Unknown edge kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An organizational department that owns metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub bed_capacity: Option<u32>,
    pub staff_count: Option<u32>,
}

impl Department {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(id),
            name: name.into(),
            bed_capacity: None,
            staff_count: None,
        }
    }

    pub fn with_beds(mut self, beds: u32) -> Self {
        self.bed_capacity = Some(beds);
        self
    }

    pub fn with_staff(mut self, staff: u32) -> Self {
        self.staff_count = Some(staff);
        self
    }
}

/// A tracked operational indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: MetricId,
    pub name: String,
    pub description: String,
    pub actual_value: Option<f64>,
    pub target_value: Option<f64>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
    /// Relative importance within its department, in [0.0, 1.0]
    pub weight: f64,
    pub trend: Trend,
    pub unit: Unit,
    pub time_period: TimePeriod,
    pub department: DepartmentId,
    pub categories: BTreeSet<Category>,
    /// Metrics this one is influenced by
    pub depends_on: BTreeSet<MetricId>,
    /// Metrics this one influences (inverse of `depends_on`)
    pub affects: BTreeSet<MetricId>,
    /// Last published classification; `None` until a reasoning run publishes
    pub alert_level: Option<AlertLevel>,
}

/// A metric to be added to the store (before validation)
#[derive(Debug, Clone)]
pub struct NewMetric {
    pub id: String,
    pub name: String,
    pub description: String,
    pub actual_value: Option<f64>,
    pub target_value: Option<f64>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
    pub weight: f64,
    pub trend: Trend,
    pub unit: Unit,
    pub time_period: TimePeriod,
    pub department: String,
    pub categories: Vec<Category>,
}

impl NewMetric {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            actual_value: None,
            target_value: None,
            warning_threshold: None,
            critical_threshold: None,
            weight: 1.0,
            trend: Trend::Stable,
            unit: Unit::Percentage,
            time_period: TimePeriod::Monthly,
            department: department.into(),
            categories: vec![],
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn values(mut self, actual: f64, target: f64) -> Self {
        self.actual_value = Some(actual);
        self.target_value = Some(target);
        self
    }

    pub fn thresholds(mut self, warning: Option<f64>, critical: Option<f64>) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn period(mut self, period: TimePeriod) -> Self {
        self.time_period = period;
        self
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }
}

/// Flat view of a metric for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub id: MetricId,
    pub name: String,
    pub department_name: String,
    pub actual: Option<f64>,
    pub target: Option<f64>,
    pub trend: Trend,
    pub alert_level: Option<AlertLevel>,
}

/// Full view of one metric
///
/// `alert_level` is the last published level; `status` and
/// `performance_ratio` come from classifying the current values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDetail {
    pub id: MetricId,
    pub name: String,
    pub description: String,
    pub department: Department,
    pub categories: BTreeSet<Category>,
    pub unit: Unit,
    pub time_period: TimePeriod,
    pub weight: f64,
    pub actual: Option<f64>,
    pub target: Option<f64>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
    pub trend: Trend,
    pub depends_on: BTreeSet<MetricId>,
    pub affects: BTreeSet<MetricId>,
    pub alert_level: Option<AlertLevel>,
    pub status: Option<AlertLevel>,
    pub performance_ratio: Option<f64>,
}
