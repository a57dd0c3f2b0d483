//! Curtain event types.
//!
//! Structured events emitted by the curtain drivers at various points
//! in each frame. Events are lightweight value types that carry just
//! enough data to be useful for monitoring and debugging.

use pleat_types::MeshId;
use serde::{Deserialize, Serialize};

/// An event emitted by a curtain.
///
/// Events are tagged with the frame index that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A mesh had its rest pose captured.
    MeshPrepared {
        mesh: MeshId,
        vertex_count: usize,
    },

    /// A mesh record was released.
    MeshDisposed { mesh: MeshId },

    /// Fold intent flipped.
    FoldToggled {
        /// True when the new target is the folded state.
        folded: bool,
        /// Progress at the moment of the flip.
        progress: f32,
    },

    /// The fold animation reached its target.
    FoldCompleted { folded: bool },

    /// Vertex normals were rebuilt for a mesh.
    NormalsRecomputed { mesh: MeshId },

    /// The physics world finished loading and the soft body was attached.
    PhysicsAttached {
        mesh: MeshId,
        /// Segments along each patch edge.
        segments: usize,
    },

    /// The physics world advanced.
    PhysicsStep {
        /// Fixed substeps executed this frame.
        substeps: u32,
        /// Simulation clock after the step (seconds).
        sim_time: f64,
    },

    /// The physics world was torn down.
    PhysicsTornDown,

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl FoldEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
