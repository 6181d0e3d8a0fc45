//! Department operations

use tracing::debug;

use super::KpiGraph;
use crate::error::{Error, Result};
use crate::models::{Department, DepartmentId, Metric};

impl KpiGraph {
    /// Register a department
    ///
    /// Ids and display names are both unique; summaries are keyed by name.
    pub fn add_department(&mut self, department: Department) -> Result<DepartmentId> {
        if department.id.as_str().trim().is_empty() {
            return Err(Error::InvalidData("Department id cannot be empty".to_string()));
        }
        if self.department_index.contains_key(&department.id) {
            return Err(Error::InvalidData(format!(
                "Department {} already exists",
                department.id
            )));
        }
        if let Some(existing) = self.departments.iter().find(|d| d.name == department.name) {
            return Err(Error::InvalidData(format!(
                "Department name {:?} already used by {}",
                department.name, existing.id
            )));
        }

        let id = department.id.clone();
        debug!(department = %id, name = %department.name, "Adding department");

        self.department_index
            .insert(id.clone(), self.departments.len());
        self.departments.push(department);
        self.bump();
        Ok(id)
    }

    /// Get a department by id
    pub fn get_department(&self, id: &str) -> Result<&Department> {
        self.department_index
            .get(id)
            .map(|&idx| &self.departments[idx])
            .ok_or_else(|| Error::NotFound(format!("department {}", id)))
    }

    /// All departments in creation order
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Metrics owned by a department, in creation order
    pub fn metrics_in_department(&self, id: &str) -> Result<Vec<&Metric>> {
        let department = self.get_department(id)?;
        Ok(self
            .metrics
            .iter()
            .filter(|m| m.department == department.id)
            .collect())
    }
}
