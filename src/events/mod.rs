//! Gameplay event recording
//!
//! The EventBus keeps a timestamped record of what happened each frame
//! (charges, shots, possession changes, goals) for logs and the scenario harness.

mod bus;
mod types;

pub use bus::{BusEvent, EventBus, log_bus_events, update_event_bus_time};
pub use types::GameEvent;
