//! Soft bodies — a cloth patch paired with its solver.

use pleat_math::Vec3;
use pleat_types::{NodeId, PleatError, PleatResult};

use crate::config::SolverConfig;
use crate::patch::{lattice_constraints, PatchCorners};
use crate::pbd::PositionBasedSolver;
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepResult};

/// A deformable cloth patch.
///
/// Mass, iteration counts and margin are fixed when the body is built.
pub struct SoftBody {
    state: SimulationState,
    solver: Box<dyn SolverStrategy>,
    side: usize,
    config: SolverConfig,
}

impl SoftBody {
    /// Builds a `side × side` patch between `corners` with the default solver.
    pub fn patch(corners: &PatchCorners, side: usize, config: &SolverConfig) -> PleatResult<Self> {
        Self::patch_with_solver(corners, side, config, Box::new(PositionBasedSolver::new()))
    }

    /// Builds a patch driven by a caller-supplied solver.
    pub fn patch_with_solver(
        corners: &PatchCorners,
        side: usize,
        config: &SolverConfig,
        mut solver: Box<dyn SolverStrategy>,
    ) -> PleatResult<Self> {
        config.validate()?;
        if side < 2 {
            return Err(PleatError::InvalidConfig(format!(
                "A patch needs at least 2 nodes per side, got {side}"
            )));
        }

        let n = side * side;
        let positions = corners.node_positions(side);
        let pinned: Vec<bool> = (0..n)
            .map(|i| config.anchoring.is_pinned(i / side, i % side, side))
            .collect();

        let state = SimulationState::from_positions(&positions, config.total_mass / n as f32, &pinned)?;
        let constraints = lattice_constraints(side, &state, config);
        solver.init(constraints, config)?;

        tracing::debug!(
            nodes = n,
            constraints = solver.constraint_count(),
            solver = solver.name(),
            "soft body patch built"
        );

        Ok(Self {
            state,
            solver,
            side,
            config: config.clone(),
        })
    }

    /// Advance by one fixed substep.
    pub fn step(&mut self, dt: f32) -> PleatResult<StepResult> {
        self.solver.step(&mut self.state, dt)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.state.node_count
    }

    /// Nodes along each patch edge.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// World position of a node.
    #[inline]
    pub fn node_position(&self, node: NodeId) -> Vec3 {
        self.state.position(node.index())
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    pub fn constraint_count(&self) -> usize {
        self.solver.constraint_count()
    }
}
