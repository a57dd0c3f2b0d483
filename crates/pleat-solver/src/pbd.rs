//! Position-based cloth solver.
//!
//! Each substep:
//! 1. **Predict** — explicit step under gravity
//! 2. **Project** — satisfy distance constraints, `position_iterations` passes
//! 3. **Collide** — keep nodes `collision_margin` above the ground
//! 4. **Velocities** — derive from the position change
//! 5. **Correct** — damp relative edge velocity, `velocity_iterations` passes
//! 6. **Damp** — global velocity damping

use std::time::Instant;

use pleat_types::{PleatError, PleatResult};

use crate::config::SolverConfig;
use crate::constraint::{ConstraintKind, DistanceConstraint};
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepResult};

/// Gauss-Seidel distance-constraint solver.
pub struct PositionBasedSolver {
    constraints: Vec<DistanceConstraint>,
    config: SolverConfig,
    initialized: bool,
}

impl PositionBasedSolver {
    /// Creates a new solver (uninitialized).
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            config: SolverConfig::default(),
            initialized: false,
        }
    }

    /// Constraints currently held by the solver.
    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }
}

impl Default for PositionBasedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStrategy for PositionBasedSolver {
    fn init(
        &mut self,
        constraints: Vec<DistanceConstraint>,
        config: &SolverConfig,
    ) -> PleatResult<()> {
        config.validate()?;
        self.constraints = constraints;
        self.config = config.clone();
        self.initialized = true;
        Ok(())
    }

    fn step(&mut self, state: &mut SimulationState, dt: f32) -> PleatResult<StepResult> {
        if !self.initialized {
            return Err(PleatError::InvalidConfig(
                "Solver not initialized. Call init() first.".into(),
            ));
        }
        let start = Instant::now();
        let cfg = &self.config;

        state.save_previous();
        state.predict(dt, cfg.gravity);

        for _ in 0..cfg.position_iterations {
            for c in &self.constraints {
                c.project_positions(state);
            }
        }

        let ground_contacts = match cfg.ground_height {
            Some(ground_y) => state.enforce_ground(ground_y, cfg.collision_margin),
            None => 0,
        };

        state.update_velocities(dt);

        for _ in 0..cfg.velocity_iterations {
            for c in &self.constraints {
                c.correct_velocity(state, cfg.edge_damping);
            }
        }

        state.damp_velocities(cfg.damping);

        let max_violation = self
            .constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::Structural)
            .map(|c| c.violation(state))
            .fold(0.0f32, f32::max);

        Ok(StepResult {
            iterations: cfg.position_iterations,
            max_violation,
            ground_contacts,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    fn name(&self) -> &str {
        "position_based"
    }
}
