//! Domain models for daily activity entries and their submission bundles.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ratio_percent;

/// Where an employee was on a given day. Only `Active` entries count
/// toward any aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryStatus {
    Active,
    Away,
    Sick,
    NotBooked,
}

/// One employee's raw activity record for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub employee_id: String,
    pub date: DateTime<Utc>,
    pub status: EntryStatus,
    pub hours_worked: f64,
    pub hours_booked: f64,
    pub service_revenue: f64,
    pub retail_sales: f64,
    pub new_clients: u32,
    pub consults: u32,
    pub consult_converted: u32,
    pub total_clients: u32,
    pub prebooks: u32,
    /// Derived, always recomputed from the raw fields before aggregation;
    /// the stored value is never trusted as input.
    pub productivity_percentage: u32,
    pub consult_conversion_percentage: u32,
    pub prebook_percentage: u32,
    /// Unsubmitted entries are present but inert.
    pub is_submitted: bool,
}

impl DailyEntry {
    /// Whether this entry contributes to any aggregation.
    pub fn counts_toward_totals(&self) -> bool {
        self.status == EntryStatus::Active && self.is_submitted
    }

    /// Recompute the derived percentage fields from the raw fields.
    /// Each ratio guards its zero denominator and resolves to 0.
    pub fn recompute_percentages(&mut self) {
        self.productivity_percentage = ratio_percent(self.hours_booked, self.hours_worked);
        self.consult_conversion_percentage =
            ratio_percent(self.consult_converted as f64, self.consults as f64);
        self.prebook_percentage = ratio_percent(self.prebooks as f64, self.total_clients as f64);
    }
}

/// A bundle of daily entries for one division on one date.
///
/// Composite identity is (division, calendar day); re-submitting for the
/// same day replaces the whole bundle, it never merges per-employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySubmission {
    pub id: String,
    pub division_id: String,
    pub date: DateTime<Utc>,
    pub entries: Vec<DailyEntry>,
    pub is_complete: bool,
}

impl DailySubmission {
    /// Create a submission with a fresh id, recomputing every entry's
    /// derived percentages on the way in.
    pub fn new(
        division_id: String,
        date: DateTime<Utc>,
        mut entries: Vec<DailyEntry>,
        is_complete: bool,
    ) -> Self {
        for entry in &mut entries {
            entry.recompute_percentages();
        }
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            division_id,
            date,
            entries,
            is_complete,
        }
    }

    /// Composite key: division + calendar day.
    pub fn upsert_key(&self) -> Option<String> {
        if self.division_id.is_empty() {
            return None;
        }
        Some(format!(
            "{}-{}",
            self.division_id,
            self.date.format("%Y-%m-%d")
        ))
    }

    /// Whether this submission's date falls in the given calendar month.
    pub fn is_in_month(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }
}
