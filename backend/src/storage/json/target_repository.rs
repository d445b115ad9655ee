//! JSON-backed storage for division and employee target tables.

use anyhow::Result;

use super::{keys, JsonConnection};
use crate::domain::models::{month_key, EmployeeTarget, KpiTarget};
use crate::storage::traits::TargetStorage;
use crate::storage::upsert::upsert;

#[derive(Debug, Clone)]
pub struct TargetRepository {
    connection: JsonConnection,
}

impl TargetRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl TargetStorage for TargetRepository {
    fn upsert_kpi_target(&self, target: &KpiTarget) -> Result<()> {
        let targets = self.connection.load_collection(keys::KPI_TARGETS)?;
        let updated = upsert(
            targets,
            target.clone(),
            KpiTarget::upsert_key,
            keys::KPI_TARGETS,
        )?;
        self.connection.save_collection(keys::KPI_TARGETS, &updated)
    }

    fn get_kpi_target(
        &self,
        division_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<KpiTarget>> {
        let month = month_key(month);
        let targets: Vec<KpiTarget> = self.connection.load_collection(keys::KPI_TARGETS)?;
        Ok(targets
            .into_iter()
            .find(|t| t.division_id == division_id && t.month == month && t.year == year))
    }

    fn upsert_employee_target(&self, target: &EmployeeTarget) -> Result<()> {
        let targets = self.connection.load_collection(keys::EMPLOYEE_TARGETS)?;
        let updated = upsert(
            targets,
            target.clone(),
            EmployeeTarget::upsert_key,
            keys::EMPLOYEE_TARGETS,
        )?;
        self.connection
            .save_collection(keys::EMPLOYEE_TARGETS, &updated)
    }

    fn get_employee_target(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<EmployeeTarget>> {
        let month = month_key(month);
        let targets: Vec<EmployeeTarget> =
            self.connection.load_collection(keys::EMPLOYEE_TARGETS)?;
        Ok(targets
            .into_iter()
            .find(|t| t.employee_id == employee_id && t.month == month && t.year == year))
    }
}
