//! Error types for the Pleat engine.
//!
//! All crates return `PleatResult<T>` from fallible operations.

use thiserror::Error;

use crate::ids::MeshId;

/// Unified error type for the Pleat engine.
#[derive(Debug, Error)]
pub enum PleatError {
    /// Mesh has no position data or zero vertices.
    #[error("Empty geometry: {0}")]
    EmptyGeometry(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Vertex layout does not form the square grid the soft body needs.
    #[error("Topology mismatch ({vertex_count} vertices): {reason}")]
    TopologyMismatch {
        vertex_count: usize,
        reason: String,
    },

    /// The physics world has not finished loading.
    #[error("Physics world is not ready")]
    PhysicsNotReady,

    /// No mesh record lives in this arena slot.
    #[error("Unknown mesh {0:?}")]
    UnknownMesh(MeshId),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PleatError {
    /// Returns true for conditions the frame loop skips over
    /// instead of surfacing to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PleatError::EmptyGeometry(_) | PleatError::PhysicsNotReady)
    }
}

/// Convenience alias for `Result<T, PleatError>`.
pub type PleatResult<T> = Result<T, PleatError>;
