//! # pleat-solver
//!
//! Soft-body physics for curtains: a position-based cloth solver, a
//! physics world with a fixed-step clock, an asynchronous world loader,
//! and the bridge that copies simulated nodes back into a mesh.
//!
//! ## Key Types
//!
//! - [`SimulationState`] — SoA buffers for positions, velocities, masses
//! - [`SolverStrategy`] — Pluggable solver trait
//! - [`PositionBasedSolver`] — Distance-constraint projection solver
//! - [`SoftBody`] — A cloth patch plus its solver
//! - [`PhysicsWorld`] — Owns bodies and the simulation clock
//! - [`WorldLoader`] — Builds a world off the frame thread
//! - [`PhysicsBridge`] — Drives a mesh vertex buffer from a soft body

pub mod bridge;
pub mod config;
pub mod constraint;
pub mod loader;
pub mod patch;
pub mod pbd;
pub mod softbody;
pub mod state;
pub mod strategy;
pub mod world;

pub use bridge::{BridgeStep, PhysicsBridge};
pub use config::{Anchoring, SolverConfig};
pub use loader::{WorldHandoff, WorldLoader};
pub use patch::{lattice_constraints, PatchCorners};
pub use pbd::PositionBasedSolver;
pub use softbody::SoftBody;
pub use state::SimulationState;
pub use strategy::{SolverStrategy, StepResult};
pub use world::{PhysicsWorld, WorldStep};
