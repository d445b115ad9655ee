//! Hormone pellet unit counts tracked per division per month.

use serde::{Deserialize, Serialize};

/// Units dispensed by a division in one month. Composite identity is
/// (division, month, year), same replace-on-conflict semantics as every
/// other keyed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HormoneUnit {
    pub division_id: String,
    /// Two-digit month string, "01".."12"
    pub month: String,
    pub year: i32,
    pub units: f64,
}

impl HormoneUnit {
    pub fn upsert_key(&self) -> Option<String> {
        if self.division_id.is_empty() || self.month.is_empty() {
            return None;
        }
        Some(format!("{}-{}-{}", self.division_id, self.month, self.year))
    }
}
