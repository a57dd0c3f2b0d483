//! Solver strategy trait — the core abstraction for cloth time integration.
//!
//! A soft body owns its solver through this trait, so alternative
//! integrators can be swapped in without touching the world or bridge.

use pleat_types::PleatResult;

use crate::config::SolverConfig;
use crate::constraint::DistanceConstraint;
use crate::state::SimulationState;

/// Result of a solver substep.
#[derive(Debug, Clone, Default)]
pub struct StepResult {
    /// Constraint projection passes performed.
    pub iterations: u32,
    /// Largest structural constraint deviation after the step (meters).
    pub max_violation: f32,
    /// Nodes pushed out of the ground this step.
    pub ground_contacts: u32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for soft-body solvers.
///
/// ```text
/// solver.init(constraints, config)?;
/// loop {
///     solver.step(state, dt)?;
/// }
/// ```
pub trait SolverStrategy: Send {
    /// Hand the solver its constraint set and configuration.
    ///
    /// Called once per body; rebuilding the body calls it again.
    fn init(
        &mut self,
        constraints: Vec<DistanceConstraint>,
        config: &SolverConfig,
    ) -> PleatResult<()>;

    /// Advance `state` by one fixed substep.
    fn step(&mut self, state: &mut SimulationState, dt: f32) -> PleatResult<StepResult>;

    /// Number of constraints the solver holds.
    fn constraint_count(&self) -> usize;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}
