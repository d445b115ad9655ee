//! # JSON Store Connection
//!
//! File-backed implementation of the persisted key-value contract: each
//! collection lives under a distinct string key as a JSON-serialized array
//! (`scheduledHours` is a JSON map). One file per key:
//!
//! ```text
//! data/
//! ├── employees.json
//! ├── divisions.json
//! ├── dailySubmissions.json
//! ├── kpiData.json
//! ├── employeeKPIData.json
//! ├── kpiTargets.json
//! ├── employeeTargets.json
//! ├── hormoneUnits.json
//! └── scheduledHours.json
//! ```
//!
//! Date fields serialize as ISO-8601 strings and revive to `DateTime<Utc>`
//! on read. A missing or malformed file is a valid, silently-tolerated
//! state and loads as an empty collection. Writes go through a temp file
//! and rename. The store is best-effort: concurrent writers are not
//! coordinated and the last writer wins, consistent with the upsert
//! replace semantics.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    EmployeeRepository, HormoneUnitRepository, KpiRepository, ScheduledHoursRepository,
    SubmissionRepository, TargetRepository,
};
use crate::storage::traits::Connection;

/// Handle on the store's data directory. Cheap to clone; repositories
/// each hold their own copy.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    data_dir: PathBuf,
}

impl JsonConnection {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Load the collection stored under `key`. Absence and parse failures
    /// both yield an empty collection; only I/O errors on an existing file
    /// propagate.
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read collection '{}'", key))?;
        match serde_json::from_str(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    "🗄️ STORE: collection '{}' is malformed ({}), loading as empty",
                    key, e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the collection stored under `key`.
    pub fn save_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let contents = serde_json::to_string_pretty(records)
            .with_context(|| format!("failed to serialize collection '{}'", key))?;
        self.write_atomic(key, &contents)
    }

    /// Load a map-shaped collection (string key to number).
    pub fn load_map(&self, key: &str) -> Result<HashMap<String, f64>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read map '{}'", key))?;
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!("🗄️ STORE: map '{}' is malformed ({}), loading as empty", key, e);
                Ok(HashMap::new())
            }
        }
    }

    pub fn save_map(&self, key: &str, map: &HashMap<String, f64>) -> Result<()> {
        let contents = serde_json::to_string_pretty(map)
            .with_context(|| format!("failed to serialize map '{}'", key))?;
        self.write_atomic(key, &contents)
    }

    fn write_atomic(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.data_dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, contents)
            .with_context(|| format!("failed to write temp file for '{}'", key))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace collection '{}'", key))?;
        Ok(())
    }
}

impl Connection for JsonConnection {
    type EmployeeRepository = EmployeeRepository;
    type SubmissionRepository = SubmissionRepository;
    type KpiRepository = KpiRepository;
    type TargetRepository = TargetRepository;
    type HormoneUnitRepository = HormoneUnitRepository;
    type ScheduledHoursRepository = ScheduledHoursRepository;

    fn create_employee_repository(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.clone())
    }

    fn create_submission_repository(&self) -> SubmissionRepository {
        SubmissionRepository::new(self.clone())
    }

    fn create_kpi_repository(&self) -> KpiRepository {
        KpiRepository::new(self.clone())
    }

    fn create_target_repository(&self) -> TargetRepository {
        TargetRepository::new(self.clone())
    }

    fn create_hormone_unit_repository(&self) -> HormoneUnitRepository {
        HormoneUnitRepository::new(self.clone())
    }

    fn create_scheduled_hours_repository(&self) -> ScheduledHoursRepository {
        ScheduledHoursRepository::new(self.clone())
    }
}
