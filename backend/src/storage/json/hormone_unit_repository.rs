//! JSON-backed storage for monthly hormone unit counts.

use anyhow::Result;

use super::{keys, JsonConnection};
use crate::domain::models::HormoneUnit;
use crate::storage::traits::HormoneUnitStorage;
use crate::storage::upsert::upsert;

#[derive(Debug, Clone)]
pub struct HormoneUnitRepository {
    connection: JsonConnection,
}

impl HormoneUnitRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl HormoneUnitStorage for HormoneUnitRepository {
    fn upsert_hormone_unit(&self, unit: &HormoneUnit) -> Result<()> {
        let units = self.connection.load_collection(keys::HORMONE_UNITS)?;
        let updated = upsert(
            units,
            unit.clone(),
            HormoneUnit::upsert_key,
            keys::HORMONE_UNITS,
        )?;
        self.connection.save_collection(keys::HORMONE_UNITS, &updated)
    }

    fn list_hormone_units(&self) -> Result<Vec<HormoneUnit>> {
        self.connection.load_collection(keys::HORMONE_UNITS)
    }
}
