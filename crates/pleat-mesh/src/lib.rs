//! # pleat-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — Positions, normals, and triangle indices in
//!   contiguous per-channel buffers. The position channels are the
//!   vertex buffer every driver mutates in place.
//! - [`Aabb`] — Axis-aligned bounding box.
//! - [`Topology`] — Edge adjacency used to validate grid layouts.
//! - [`GridLayout`] — Explicit node→vertex map for square grid meshes.
//! - Procedural generators for curtain grids.

pub mod bounds;
pub mod generators;
pub mod grid;
pub mod mesh;
pub mod normals;
pub mod topology;

pub use bounds::Aabb;
pub use grid::GridLayout;
pub use mesh::TriangleMesh;
pub use topology::Topology;
