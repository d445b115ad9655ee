//! Change notification for derived-data consumers.
//!
//! Replaces ad hoc cross-component invalidation events with an explicit
//! subscription interface: services publish after a successful upsert, and
//! view-layer collaborators re-invoke the pure aggregation functions in
//! response. The notifier never runs aggregation itself.

use std::sync::{Arc, Mutex};

use log::debug;

/// What changed and, where it applies, the (month, year) scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    SubmissionsChanged {
        division_id: String,
        month: String,
        year: i32,
    },
    KpiDataChanged {
        division_id: String,
        month: String,
        year: i32,
    },
    EmployeeKpiChanged {
        month: String,
        year: i32,
    },
    EmployeesChanged,
    TargetsChanged,
    HormoneUnitsChanged,
}

type Subscriber = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Fan-out of store change events to registered subscribers.
///
/// Cloning shares the subscriber list; callbacks run synchronously on the
/// publishing thread, in subscription order.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Box::new(callback));
        }
    }

    pub fn publish(&self, event: StoreEvent) {
        debug!("🔔 STORE: publishing {:?}", event);
        if let Ok(subscribers) = self.subscribers.lock() {
            for subscriber in subscribers.iter() {
                subscriber(&event);
            }
        }
    }
}
