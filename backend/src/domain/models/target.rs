//! Target tables compared against aggregated KPI values.
//!
//! Targets are reference data: scoring reads them, aggregation never
//! mutates them.

use serde::{Deserialize, Serialize};

/// Monthly targets for one division's scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiTarget {
    pub division_id: String,
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    pub productivity_rate: u32,
    pub prebook_rate: u32,
    pub retail_percentage: u32,
    pub new_clients: u32,
    pub average_ticket: f64,
}

impl KpiTarget {
    pub fn upsert_key(&self) -> Option<String> {
        if self.division_id.is_empty() || self.month.is_empty() {
            return None;
        }
        Some(format!("{}-{}-{}", self.division_id, self.month, self.year))
    }
}

/// Monthly targets for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTarget {
    pub employee_id: String,
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    pub hours_sold: f64,
    pub new_clients: u32,
    pub productivity_rate: u32,
}

impl EmployeeTarget {
    pub fn upsert_key(&self) -> Option<String> {
        if self.employee_id.is_empty() || self.month.is_empty() {
            return None;
        }
        Some(format!("{}-{}-{}", self.employee_id, self.month, self.year))
    }
}
