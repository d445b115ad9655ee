//! Domain models for the clinic KPI tracker.

pub mod daily_entry;
pub mod employee;
pub mod hormone_unit;
pub mod kpi;
pub mod target;

pub use daily_entry::{DailyEntry, DailySubmission, EntryStatus};
pub use employee::{Division, Employee};
pub use hormone_unit::HormoneUnit;
pub use kpi::{EmployeeKpiData, KpiData};
pub use target::{EmployeeTarget, KpiTarget};

/// Two-digit month key used in every composite identity, "01".."12".
pub fn month_key(month: u32) -> String {
    format!("{:02}", month)
}
