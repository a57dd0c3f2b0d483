//! Configuration and mesh validation.
//!
//! Catches data-level errors before the drivers receive them.

use pleat_mesh::{GridLayout, TriangleMesh};
use pleat_types::{PleatError, PleatResult};

use crate::config::{CurtainConfig, TransformConfig};

/// Validates a complete curtain configuration.
///
/// Checks:
/// - Fold parameters (layers >= 1, non-negative amount, positive speed and rate)
/// - Solver parameters (mass, iterations, margin, clock)
/// - Transform (finite values, non-zero scale)
pub fn validate_config(config: &CurtainConfig) -> PleatResult<()> {
    config.fold.validate()?;
    config.physics.validate()?;
    validate_transform(&config.transform)?;
    Ok(())
}

fn validate_transform(transform: &TransformConfig) -> PleatResult<()> {
    let finite = transform
        .position
        .iter()
        .chain(&transform.rotation)
        .all(|v| v.is_finite());
    if !finite {
        return Err(PleatError::InvalidConfig(
            "Transform position and rotation must be finite".into(),
        ));
    }
    if !(transform.scale.is_finite() && transform.scale > 0.0) {
        return Err(PleatError::InvalidConfig(format!(
            "Transform scale must be positive, got {}",
            transform.scale
        )));
    }
    Ok(())
}

/// Validates a mesh for the fold kernel.
pub fn validate_mesh(mesh: &TriangleMesh) -> PleatResult<()> {
    mesh.validate()?;
    if mesh.is_empty() {
        return Err(PleatError::EmptyGeometry("mesh has no vertices".into()));
    }
    Ok(())
}

/// Validates a mesh for the physics bridge and returns its grid layout.
pub fn validate_physics_mesh(mesh: &TriangleMesh) -> PleatResult<GridLayout> {
    validate_mesh(mesh)?;
    GridLayout::detect(mesh)
}
