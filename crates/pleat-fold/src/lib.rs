//! # pleat-fold
//!
//! Procedural fold animation for curtain meshes.
//!
//! ## Key Types
//!
//! - [`MeshArena`] — Mesh records with cached rest pose and height table
//! - [`FoldAnimator`] — Fold/unfold state machine driving a progress value
//! - [`FoldParams`] — Layer count, amplitude, and speed of the fold
//! - [`Curtain`] — A group of meshes driven by the kernel or by physics
//!
//! ## Per-frame flow
//!
//! ```text
//! toggle ──► FoldAnimator::tick ──► FoldTick
//!                                      │
//!               Idle ◄─────────────────┤ (kernel skipped)
//!                                      ▼
//!          kernel::deform_mesh(rest, progress) ──► normals refresh
//! ```

pub mod animator;
pub mod cache;
pub mod curtain;
pub mod kernel;
pub mod normals;
pub mod params;

pub use animator::{FoldAnimator, FoldPhase, FoldTarget, FoldTick};
pub use cache::{MeshArena, MeshRecord, PrepareOutcome, RestPose, ShadingHints};
pub use curtain::{Curtain, DriveMode, FrameDriver, FrameReport, PhysicsSetup};
pub use normals::{NormalRefresh, PhysicsNormalSchedule};
pub use params::FoldParams;
