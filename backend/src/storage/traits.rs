//! # Storage Traits
//!
//! Storage abstraction for the clinic KPI tracker. The domain layer works
//! against these traits so the persisted key-value layout (JSON files,
//! browser storage, an in-memory double for tests) can change without
//! touching aggregation logic.
//!
//! Every write is an upsert: the record's composite key decides what it
//! replaces. All operations are synchronous.

use anyhow::Result;

use crate::domain::models::{
    DailySubmission, Division, Employee, EmployeeKpiData, EmployeeTarget, HormoneUnit, KpiData,
    KpiTarget,
};

/// Employee and division directory operations.
pub trait EmployeeStorage: Send + Sync {
    /// Insert or replace an employee by id
    fn upsert_employee(&self, employee: &Employee) -> Result<()>;

    /// Retrieve a specific employee by id
    fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>>;

    /// List all employees, active and inactive
    fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Insert or replace a division by id
    fn upsert_division(&self, division: &Division) -> Result<()>;

    /// List all divisions
    fn list_divisions(&self) -> Result<Vec<Division>>;
}

/// Daily submission bundle operations.
pub trait SubmissionStorage: Send + Sync {
    /// Insert or replace a submission by (division, day). Replacement is
    /// whole-bundle, never a per-employee merge.
    fn upsert_submission(&self, submission: &DailySubmission) -> Result<()>;

    /// List every stored submission in insertion order
    fn list_submissions(&self) -> Result<Vec<DailySubmission>>;

    /// List submissions whose date falls in the given calendar month
    fn list_submissions_for_month(&self, month: u32, year: i32) -> Result<Vec<DailySubmission>>;
}

/// Monthly KPI scorecard operations, divisional and per-employee.
pub trait KpiStorage: Send + Sync {
    /// Insert or replace a division scorecard by (division, month, year)
    fn upsert_kpi(&self, kpi: &KpiData) -> Result<()>;

    /// Retrieve a division scorecard for a specific month
    fn get_kpi(&self, division_id: &str, month: u32, year: i32) -> Result<Option<KpiData>>;

    /// List all division scorecards
    fn list_kpis(&self) -> Result<Vec<KpiData>>;

    /// Insert or replace an employee scorecard by (employee, month, year)
    fn upsert_employee_kpi(&self, kpi: &EmployeeKpiData) -> Result<()>;

    /// Retrieve an employee scorecard for a specific month
    fn get_employee_kpi(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<EmployeeKpiData>>;

    /// List all employee scorecards
    fn list_employee_kpis(&self) -> Result<Vec<EmployeeKpiData>>;
}

/// Target table operations. Targets are read for comparison only;
/// aggregation never mutates them.
pub trait TargetStorage: Send + Sync {
    fn upsert_kpi_target(&self, target: &KpiTarget) -> Result<()>;

    fn get_kpi_target(&self, division_id: &str, month: u32, year: i32)
        -> Result<Option<KpiTarget>>;

    fn upsert_employee_target(&self, target: &EmployeeTarget) -> Result<()>;

    fn get_employee_target(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<EmployeeTarget>>;
}

/// Hormone unit count operations.
pub trait HormoneUnitStorage: Send + Sync {
    fn upsert_hormone_unit(&self, unit: &HormoneUnit) -> Result<()>;

    fn list_hormone_units(&self) -> Result<Vec<HormoneUnit>>;
}

/// Scheduled hours, stored as a map keyed `"<employeeId>-<month>-<year>"`.
pub trait ScheduledHoursStorage: Send + Sync {
    fn set_scheduled_hours(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
        hours: f64,
    ) -> Result<()>;

    fn get_scheduled_hours(&self, employee_id: &str, month: u32, year: i32)
        -> Result<Option<f64>>;
}

/// Factory trait abstracting the concrete store. The domain layer is
/// generic over this, so a service only ever sees repository interfaces.
pub trait Connection: Send + Sync + Clone {
    type EmployeeRepository: EmployeeStorage + Clone;
    type SubmissionRepository: SubmissionStorage + Clone;
    type KpiRepository: KpiStorage + Clone;
    type TargetRepository: TargetStorage + Clone;
    type HormoneUnitRepository: HormoneUnitStorage + Clone;
    type ScheduledHoursRepository: ScheduledHoursStorage + Clone;

    fn create_employee_repository(&self) -> Self::EmployeeRepository;
    fn create_submission_repository(&self) -> Self::SubmissionRepository;
    fn create_kpi_repository(&self) -> Self::KpiRepository;
    fn create_target_repository(&self) -> Self::TargetRepository;
    fn create_hormone_unit_repository(&self) -> Self::HormoneUnitRepository;
    fn create_scheduled_hours_repository(&self) -> Self::ScheduledHoursRepository;
}
