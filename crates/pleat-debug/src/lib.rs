//! # pleat-debug
//!
//! Curtain state snapshots for debugging fold and drape runs.
//! Snapshots serialize the vertex buffer and fold state to a compact
//! binary format that the `pleat inspect` command reads back.

pub mod snapshot;

pub use snapshot::CurtainSnapshot;
