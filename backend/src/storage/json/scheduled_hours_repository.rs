//! JSON-backed scheduled hours, stored as a map rather than an array.
//!
//! Keys follow the `"<employeeId>-<month>-<year>"` convention of the
//! persisted layout; setting a key overwrites its previous value.

use anyhow::Result;

use super::{keys, JsonConnection};
use crate::domain::models::month_key;
use crate::storage::traits::ScheduledHoursStorage;

#[derive(Debug, Clone)]
pub struct ScheduledHoursRepository {
    connection: JsonConnection,
}

impl ScheduledHoursRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn map_key(employee_id: &str, month: u32, year: i32) -> String {
        format!("{}-{}-{}", employee_id, month_key(month), year)
    }
}

impl ScheduledHoursStorage for ScheduledHoursRepository {
    fn set_scheduled_hours(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
        hours: f64,
    ) -> Result<()> {
        let mut map = self.connection.load_map(keys::SCHEDULED_HOURS)?;
        map.insert(Self::map_key(employee_id, month, year), hours);
        self.connection.save_map(keys::SCHEDULED_HOURS, &map)
    }

    fn get_scheduled_hours(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<f64>> {
        let map = self.connection.load_map(keys::SCHEDULED_HOURS)?;
        Ok(map.get(&Self::map_key(employee_id, month, year)).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_are_keyed_by_employee_month_year() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ScheduledHoursRepository::new(JsonConnection::new(dir.path()).unwrap());

        repo.set_scheduled_hours("emp-1", 1, 2025, 120.0).unwrap();
        repo.set_scheduled_hours("emp-1", 2, 2025, 96.0).unwrap();
        repo.set_scheduled_hours("emp-1", 1, 2025, 130.0).unwrap();

        assert_eq!(repo.get_scheduled_hours("emp-1", 1, 2025).unwrap(), Some(130.0));
        assert_eq!(repo.get_scheduled_hours("emp-1", 2, 2025).unwrap(), Some(96.0));
        assert_eq!(repo.get_scheduled_hours("emp-2", 1, 2025).unwrap(), None);
    }
}
