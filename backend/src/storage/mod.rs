//! Storage layer: traits, the upsert primitive, the JSON store, and
//! change notification.

pub mod json;
pub mod notifier;
pub mod traits;
pub mod upsert;

pub use json::JsonConnection;
pub use notifier::{ChangeNotifier, StoreEvent};
pub use traits::{
    Connection, EmployeeStorage, HormoneUnitStorage, KpiStorage, ScheduledHoursStorage,
    SubmissionStorage, TargetStorage,
};
pub use upsert::{upsert, StorageError};
