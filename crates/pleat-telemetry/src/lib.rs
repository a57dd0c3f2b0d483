//! # pleat-telemetry
//!
//! Event bus for curtain telemetry. Emits structured events
//! (fold transitions, normal refreshes, physics steps) that can be
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, FoldEvent};
pub use sinks::{EventSink, SharedVecSink, TracingSink, VecSink};
