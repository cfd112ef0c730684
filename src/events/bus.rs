//! Event Bus - timestamped record of gameplay events
//!
//! Gameplay systems emit events here instead of talking to each other:
//! - The controller emits charge and shot events
//! - The scoring handler emits Goal and PossessionGranted
//! - The scenario harness and debug overlay read them back

use bevy::prelude::*;

use super::types::GameEvent;

/// Timestamped event for the event bus
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Time in milliseconds since the app started
    pub time_ms: u32,
    pub event: GameEvent,
}

/// Central event bus
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted and not yet drained
    pending: Vec<BusEvent>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Pending events (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Take all pending events
    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.pending)
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

/// Write drained events to the log. Only used by the windowed game; the
/// scenario harness drains the bus itself.
pub fn log_bus_events(mut bus: ResMut<EventBus>) {
    for BusEvent { time_ms, event } in bus.drain() {
        debug!("[{:>7}ms] {:?}", time_ms, event);
    }
}
