//! JSON-backed employee and division directory.

use anyhow::Result;

use super::{keys, JsonConnection};
use crate::domain::models::{Division, Employee};
use crate::storage::traits::EmployeeStorage;
use crate::storage::upsert::upsert;

#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    connection: JsonConnection,
}

impl EmployeeRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl EmployeeStorage for EmployeeRepository {
    fn upsert_employee(&self, employee: &Employee) -> Result<()> {
        let employees = self.connection.load_collection(keys::EMPLOYEES)?;
        let updated = upsert(
            employees,
            employee.clone(),
            Employee::upsert_key,
            keys::EMPLOYEES,
        )?;
        self.connection.save_collection(keys::EMPLOYEES, &updated)
    }

    fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>> {
        let employees: Vec<Employee> = self.connection.load_collection(keys::EMPLOYEES)?;
        Ok(employees.into_iter().find(|e| e.id == employee_id))
    }

    fn list_employees(&self) -> Result<Vec<Employee>> {
        self.connection.load_collection(keys::EMPLOYEES)
    }

    fn upsert_division(&self, division: &Division) -> Result<()> {
        let divisions = self.connection.load_collection(keys::DIVISIONS)?;
        let updated = upsert(
            divisions,
            division.clone(),
            Division::upsert_key,
            keys::DIVISIONS,
        )?;
        self.connection.save_collection(keys::DIVISIONS, &updated)
    }

    fn list_divisions(&self) -> Result<Vec<Division>> {
        self.connection.load_collection(keys::DIVISIONS)
    }
}
