//! Domain models for employees and divisions.

use serde::{Deserialize, Serialize};

/// A staff member belonging to one division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub division_id: String,
    pub role: String,
    /// Inactive employees stay in the directory but their entries are
    /// skipped during aggregation.
    pub is_active: bool,
}

impl Employee {
    pub fn upsert_key(&self) -> Option<String> {
        if self.id.is_empty() {
            return None;
        }
        Some(self.id.clone())
    }
}

/// An organizational business unit (e.g. "laser", "hormone") that owns a
/// monthly KPI scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: String,
    pub name: String,
}

impl Division {
    pub fn upsert_key(&self) -> Option<String> {
        if self.id.is_empty() {
            return None;
        }
        Some(self.id.clone())
    }
}
