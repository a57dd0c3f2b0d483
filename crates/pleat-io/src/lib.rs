//! # pleat-io
//!
//! Curtain configuration contract and input validation.
//!
//! Defines the boundary types that external systems (CLI, scene
//! loaders) use to configure a curtain, and the checks run before the
//! fold or physics drivers see any data.

pub mod config;
pub mod validator;

pub use config::{load_mesh_json, CurtainConfig, DriveModeKind, TransformConfig};
pub use validator::{validate_config, validate_mesh, validate_physics_mesh};
