//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::FoldEvent;

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &FoldEvent);

    /// Called when the session ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A sink that collects events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    /// Collected events.
    pub events: Vec<FoldEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &FoldEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A collecting sink whose buffer stays readable after the sink is boxed
/// into a bus.
#[derive(Clone, Default)]
pub struct SharedVecSink {
    events: Arc<Mutex<Vec<FoldEvent>>>,
}

impl SharedVecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything collected so far.
    pub fn events(&self) -> Vec<FoldEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for SharedVecSink {
    fn handle(&mut self, event: &FoldEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "shared_vec_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &FoldEvent) {
        match self.level {
            tracing::Level::TRACE => {
                tracing::trace!(frame = event.frame, event = ?event.kind, "curtain_event")
            }
            tracing::Level::DEBUG => {
                tracing::debug!(frame = event.frame, event = ?event.kind, "curtain_event")
            }
            _ => tracing::info!(frame = event.frame, event = ?event.kind, "curtain_event"),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
