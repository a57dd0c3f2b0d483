//! Curtain configuration contract.
//!
//! ```toml
//! mode = "analytic"
//!
//! [fold]
//! layers = 3
//! amount = 0.5
//!
//! [physics]
//! total_mass = 0.9
//!
//! [transform]
//! position = [0.0, -4.0, 0.0]
//! scale = 0.005
//! ```
//!
//! Every table and field is optional; missing values take the defaults.

use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;

use pleat_fold::FoldParams;
use pleat_math::{Transform, Vec3};
use pleat_mesh::TriangleMesh;
use pleat_solver::SolverConfig;
use pleat_types::{PleatError, PleatResult};
use serde::{Deserialize, Serialize};

/// Which driver moves the curtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveModeKind {
    #[default]
    Analytic,
    Physics,
}

/// Placement of the curtain group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// World position.
    pub position: [f32; 3],
    /// XYZ Euler angles (radians).
    pub rotation: [f32; 3],
    /// Uniform scale.
    pub scale: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            position: [0.0, -4.0, 0.0],
            rotation: [FRAC_PI_2, PI, FRAC_PI_2],
            scale: 0.005,
        }
    }
}

impl TransformConfig {
    pub fn to_transform(&self) -> Transform {
        Transform::from_euler(Vec3::from(self.position), self.rotation, self.scale)
    }
}

/// Complete configuration of one curtain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainConfig {
    pub mode: DriveModeKind,
    pub fold: FoldParams,
    pub physics: SolverConfig,
    pub transform: TransformConfig,
}

impl CurtainConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> PleatResult<Self> {
        toml::from_str(content).map_err(|e| PleatError::Serialization(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> PleatResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), mode = ?config.mode, "curtain config loaded");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> PleatResult<String> {
        toml::to_string(self).map_err(|e| PleatError::Serialization(e.to_string()))
    }
}

/// Reads a JSON-encoded [`TriangleMesh`] and checks its integrity.
pub fn load_mesh_json(path: impl AsRef<Path>) -> PleatResult<TriangleMesh> {
    let content = std::fs::read_to_string(path)?;
    let mesh: TriangleMesh =
        serde_json::from_str(&content).map_err(|e| PleatError::Serialization(e.to_string()))?;
    mesh.validate()?;
    Ok(mesh)
}
