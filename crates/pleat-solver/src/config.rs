//! Solver configuration.
//!
//! Creation-time parameters of a soft body and its world: mass,
//! iteration counts, collision margin, gravity, and the fixed-step
//! clock. Changing any of them means rebuilding the body.

use pleat_types::constants;
use pleat_types::{PleatError, PleatResult};
use serde::{Deserialize, Serialize};

/// Which patch nodes are pinned in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchoring {
    /// Nothing pinned — the patch free-falls.
    None,
    /// Only the two top corners.
    TopCorners,
    /// The whole top edge, like a curtain rod.
    #[default]
    TopEdge,
}

impl Anchoring {
    /// True if node `(row, col)` of a `side × side` patch is pinned.
    pub fn is_pinned(self, row: usize, col: usize, side: usize) -> bool {
        match self {
            Anchoring::None => false,
            Anchoring::TopCorners => row == 0 && (col == 0 || col + 1 == side),
            Anchoring::TopEdge => row == 0,
        }
    }
}

/// Configuration for the soft-body solver and physics world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Total mass of the soft body (kg), spread over all nodes.
    pub total_mass: f32,

    /// Constraint projection passes per substep.
    pub position_iterations: u32,

    /// Velocity correction passes per substep.
    pub velocity_iterations: u32,

    /// Minimum clearance kept between nodes and the ground plane (m).
    pub collision_margin: f32,

    /// Optional ground plane height (Y). `None` disables ground contact.
    pub ground_height: Option<f32>,

    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f32; 3],

    /// Velocity damping factor (0.0 = no damping, 1.0 = full damping).
    pub damping: f32,

    /// Stiffness of structural (edge) constraints, 0–1.
    pub structural_stiffness: f32,

    /// Stiffness of shear (diagonal) constraints, 0–1.
    pub shear_stiffness: f32,

    /// Stiffness of bend (skip-one) constraints, 0–1.
    pub bend_stiffness: f32,

    /// Fraction of relative edge velocity removed per velocity pass, 0–1.
    pub edge_damping: f32,

    /// Which nodes are pinned.
    pub anchoring: Anchoring,

    /// Fixed simulation substep (seconds).
    pub fixed_dt: f32,

    /// Largest number of substeps per frame.
    pub max_substeps: u32,

    /// Frame deltas above this are clamped (seconds).
    pub max_frame_dt: f32,

    /// Minimum simulated time between normal refreshes (seconds).
    /// `None` refreshes after every step.
    pub normal_interval: Option<f32>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            total_mass: constants::DEFAULT_TOTAL_MASS,
            position_iterations: constants::DEFAULT_POSITION_ITERATIONS,
            velocity_iterations: constants::DEFAULT_VELOCITY_ITERATIONS,
            collision_margin: constants::DEFAULT_COLLISION_MARGIN,
            ground_height: None,
            gravity: [0.0, -constants::GRAVITY, 0.0],
            damping: 0.01,
            structural_stiffness: 1.0,
            shear_stiffness: 0.6,
            bend_stiffness: 0.2,
            edge_damping: 0.1,
            anchoring: Anchoring::TopEdge,
            fixed_dt: constants::DEFAULT_FIXED_DT,
            max_substeps: constants::DEFAULT_MAX_SUBSTEPS,
            max_frame_dt: constants::DEFAULT_MAX_FRAME_DT,
            normal_interval: None,
        }
    }
}

impl SolverConfig {
    /// Creates a config for debugging (fewer iterations).
    pub fn debug() -> Self {
        Self {
            position_iterations: 2,
            velocity_iterations: 1,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (more iterations, stiffer bending).
    pub fn high_quality() -> Self {
        Self {
            position_iterations: 30,
            velocity_iterations: 20,
            bend_stiffness: 0.5,
            ..Default::default()
        }
    }

    /// Checks that every parameter is physically meaningful.
    pub fn validate(&self) -> PleatResult<()> {
        if !(self.total_mass.is_finite() && self.total_mass > 0.0) {
            return Err(PleatError::InvalidConfig(
                "Total mass must be positive and finite".into(),
            ));
        }
        if self.position_iterations == 0 {
            return Err(PleatError::InvalidConfig(
                "Position iterations must be >= 1".into(),
            ));
        }
        if !(self.collision_margin.is_finite() && self.collision_margin >= 0.0) {
            return Err(PleatError::InvalidConfig(
                "Collision margin must be non-negative".into(),
            ));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(PleatError::InvalidConfig(
                "Gravity components must be finite".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(PleatError::InvalidConfig(
                "Damping must be in [0, 1]".into(),
            ));
        }
        for (name, k) in [
            ("structural", self.structural_stiffness),
            ("shear", self.shear_stiffness),
            ("bend", self.bend_stiffness),
            ("edge damping", self.edge_damping),
        ] {
            if !(0.0..=1.0).contains(&k) {
                return Err(PleatError::InvalidConfig(format!(
                    "{name} stiffness must be in [0, 1], got {k}"
                )));
            }
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(PleatError::InvalidConfig(
                "Fixed timestep must be positive".into(),
            ));
        }
        if self.max_substeps == 0 {
            return Err(PleatError::InvalidConfig(
                "Max substeps must be >= 1".into(),
            ));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt >= self.fixed_dt) {
            return Err(PleatError::InvalidConfig(
                "Max frame dt must be at least the fixed timestep".into(),
            ));
        }
        if let Some(interval) = self.normal_interval {
            if !(interval.is_finite() && interval > 0.0) {
                return Err(PleatError::InvalidConfig(
                    "Normal interval must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}
