//! # JSON Storage Module
//!
//! JSON-file implementation of the storage traits. Mirrors the persisted
//! browser-storage layout: one JSON array (or map) per collection key.
//! Every keyed write funnels through [`crate::storage::upsert::upsert`].

pub mod connection;
pub mod employee_repository;
pub mod hormone_unit_repository;
pub mod kpi_repository;
pub mod scheduled_hours_repository;
pub mod submission_repository;
pub mod target_repository;

pub use connection::JsonConnection;
pub use employee_repository::EmployeeRepository;
pub use hormone_unit_repository::HormoneUnitRepository;
pub use kpi_repository::KpiRepository;
pub use scheduled_hours_repository::ScheduledHoursRepository;
pub use submission_repository::SubmissionRepository;
pub use target_repository::TargetRepository;

/// Collection keys of the persisted state layout. Collections owned by
/// out-of-scope collaborators (alerts, payroll, revenue projections) share
/// the same layout and can be read with the generic connection methods.
pub mod keys {
    pub const EMPLOYEES: &str = "employees";
    pub const DIVISIONS: &str = "divisions";
    pub const DAILY_SUBMISSIONS: &str = "dailySubmissions";
    pub const KPI_DATA: &str = "kpiData";
    pub const EMPLOYEE_KPI_DATA: &str = "employeeKPIData";
    pub const KPI_TARGETS: &str = "kpiTargets";
    pub const EMPLOYEE_TARGETS: &str = "employeeTargets";
    pub const HORMONE_UNITS: &str = "hormoneUnits";
    pub const SCHEDULED_HOURS: &str = "scheduledHours";
}
