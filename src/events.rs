//! Post-commit domain events.
//!
//! The dispensary announces successful commits (never failures, never
//! anything mid-transaction) through an `EventEmitter`. Payloads are the
//! committed record serialized to JSON, so listeners decode exactly what
//! the store now holds. Emission is fire-and-forget: a listener cannot
//! fail or delay a commit.
//!
//! ## Example
//!
//! ```ignore
//! dispensary.events().on(topics::PRESCRIPTION_DISPENSED, |payload: String| {
//!     println!("dispensed: {}", payload);
//! });
//! ```

use std::sync::Mutex;

use event_emitter_rs::EventEmitter;
use serde::Serialize;
use tracing::warn;

/// Topic names for the events the dispensary emits.
pub mod topics {
    pub const PATIENT_REGISTERED: &str = "patient.registered";
    pub const PRESCRIPTION_CREATED: &str = "prescription.created";
    pub const PRESCRIPTION_DISPENSED: &str = "prescription.dispensed";
    pub const STOCK_ADJUSTED: &str = "stock.adjusted";
}

/// Shared wrapper around an `EventEmitter` so services can emit from
/// `&self` across threads.
pub struct DomainEvents {
    emitter: Mutex<EventEmitter>,
}

impl DomainEvents {
    pub fn new() -> Self {
        Self {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener for a topic. The listener receives the
    /// committed record as a JSON string.
    pub fn on<F>(&self, topic: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(topic, listener);
        }
    }

    /// Emit a committed record to a topic.
    pub(crate) fn emit<T: Serialize>(&self, topic: &str, payload: &T) {
        let json = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(err) => {
                warn!("failed to serialize {} event: {}", topic, err);
                return;
            }
        };
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.emit(topic, json);
        }
    }
}

impl Default for DomainEvents {
    fn default() -> Self {
        Self::new()
    }
}
