//! # pleat-math
//!
//! Math primitives for the Pleat curtain engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Quat`, `Mat4`)
//! - [`Transform`] — position / rotation / scale of a curtain in the world
//! - Easing curves used by the fold animation

pub mod easing;
pub mod transform;

pub use easing::smoothstep;
pub use transform::Transform;

// Re-export glam types as the canonical math types for Pleat.
pub use glam::{EulerRot, Mat4, Quat, Vec3};
