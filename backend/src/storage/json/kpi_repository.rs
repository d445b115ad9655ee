//! JSON-backed storage for divisional and employee monthly scorecards.

use anyhow::Result;

use super::{keys, JsonConnection};
use crate::domain::models::{month_key, EmployeeKpiData, KpiData};
use crate::storage::traits::KpiStorage;
use crate::storage::upsert::upsert;

#[derive(Debug, Clone)]
pub struct KpiRepository {
    connection: JsonConnection,
}

impl KpiRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl KpiStorage for KpiRepository {
    fn upsert_kpi(&self, kpi: &KpiData) -> Result<()> {
        let kpis = self.connection.load_collection(keys::KPI_DATA)?;
        let updated = upsert(kpis, kpi.clone(), KpiData::upsert_key, keys::KPI_DATA)?;
        self.connection.save_collection(keys::KPI_DATA, &updated)
    }

    fn get_kpi(&self, division_id: &str, month: u32, year: i32) -> Result<Option<KpiData>> {
        let month = month_key(month);
        let kpis: Vec<KpiData> = self.connection.load_collection(keys::KPI_DATA)?;
        Ok(kpis
            .into_iter()
            .find(|k| k.division_id == division_id && k.month == month && k.year == year))
    }

    fn list_kpis(&self) -> Result<Vec<KpiData>> {
        self.connection.load_collection(keys::KPI_DATA)
    }

    fn upsert_employee_kpi(&self, kpi: &EmployeeKpiData) -> Result<()> {
        let kpis = self.connection.load_collection(keys::EMPLOYEE_KPI_DATA)?;
        let updated = upsert(
            kpis,
            kpi.clone(),
            EmployeeKpiData::upsert_key,
            keys::EMPLOYEE_KPI_DATA,
        )?;
        self.connection
            .save_collection(keys::EMPLOYEE_KPI_DATA, &updated)
    }

    fn get_employee_kpi(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<EmployeeKpiData>> {
        let month = month_key(month);
        let kpis: Vec<EmployeeKpiData> = self.connection.load_collection(keys::EMPLOYEE_KPI_DATA)?;
        Ok(kpis
            .into_iter()
            .find(|k| k.employee_id == employee_id && k.month == month && k.year == year))
    }

    fn list_employee_kpis(&self) -> Result<Vec<EmployeeKpiData>> {
        self.connection.load_collection(keys::EMPLOYEE_KPI_DATA)
    }
}
