//! # pleat-types
//!
//! Shared types, identifiers, error types, and constants
//! for the Pleat curtain folding engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Pleat crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{PleatError, PleatResult};
pub use ids::{BodyId, MeshId, NodeId};
