//! # Clinic KPI Tracker Backend
//!
//! Aggregation core for the clinic KPI dashboard: daily submissions go in,
//! monthly scorecards and the company-wide dashboard snapshot come out.
//! All operations are synchronous; persistence is a JSON key-value store
//! behind the storage traits, and derived-data consumers subscribe to the
//! [`storage::ChangeNotifier`] instead of watching the store itself.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

pub mod domain;
pub mod storage;

pub use storage::JsonConnection;

/// Main backend struct that wires the services to a JSON store rooted at
/// a data directory.
pub struct Backend {
    pub kpi_service: domain::KpiService<JsonConnection>,
    pub dashboard_service: domain::DashboardService<JsonConnection>,
    pub notifier: storage::ChangeNotifier,
    pub connection: Arc<JsonConnection>,
}

impl Backend {
    /// Create a backend instance with all services against the given data
    /// directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_dir.as_ref())?);
        let notifier = storage::ChangeNotifier::new();

        let kpi_service = domain::KpiService::new(connection.clone(), notifier.clone());
        let dashboard_service = domain::DashboardService::new(connection.clone());

        Ok(Backend {
            kpi_service,
            dashboard_service,
            notifier,
            connection,
        })
    }
}
