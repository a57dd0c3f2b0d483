//! Physics world — owns soft bodies and the fixed-step simulation clock.
//!
//! Frame deltas feed an accumulator that is drained in `fixed_dt`
//! substeps, at most `max_substeps` per frame. Time the world cannot
//! catch up on is dropped rather than carried into later frames.

use pleat_types::{BodyId, PleatError, PleatResult};

use crate::config::SolverConfig;
use crate::softbody::SoftBody;

/// Outcome of one `step_simulation` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldStep {
    /// Fixed substeps taken this frame.
    pub substeps: u32,
    /// Simulation clock after the step (seconds).
    pub sim_time: f64,
    /// True if the frame delta exceeded `max_frame_dt`.
    pub clamped: bool,
}

/// A soft-body physics world.
pub struct PhysicsWorld {
    config: SolverConfig,
    bodies: Vec<Option<SoftBody>>,
    accumulator: f32,
    sim_time: f64,
    torn_down: bool,
}

impl PhysicsWorld {
    /// Creates an empty world.
    pub fn new(config: SolverConfig) -> PleatResult<Self> {
        config.validate()?;
        tracing::debug!(
            fixed_dt = config.fixed_dt,
            max_substeps = config.max_substeps,
            "physics world created"
        );
        Ok(Self {
            config,
            bodies: Vec::new(),
            accumulator: 0.0,
            sim_time: 0.0,
            torn_down: false,
        })
    }

    /// Registers a body and returns its handle.
    pub fn add_soft_body(&mut self, body: SoftBody) -> PleatResult<BodyId> {
        if self.torn_down {
            return Err(PleatError::PhysicsNotReady);
        }
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Some(body));
        Ok(id)
    }

    /// Removes a body. Handles are never reused.
    pub fn remove_soft_body(&mut self, id: BodyId) -> Option<SoftBody> {
        self.bodies.get_mut(id.index()).and_then(Option::take)
    }

    pub fn body(&self, id: BodyId) -> Option<&SoftBody> {
        self.bodies.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    /// Simulation clock (seconds).
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Advances the world by a frame delta.
    ///
    /// Non-finite or negative deltas count as zero.
    pub fn step_simulation(&mut self, dt: f32) -> PleatResult<WorldStep> {
        if self.torn_down {
            return Err(PleatError::PhysicsNotReady);
        }

        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let clamped = dt > self.config.max_frame_dt;
        self.accumulator += dt.min(self.config.max_frame_dt);

        let fixed_dt = self.config.fixed_dt;
        let mut substeps = 0;
        while self.accumulator >= fixed_dt && substeps < self.config.max_substeps {
            for body in self.bodies.iter_mut().flatten() {
                body.step(fixed_dt)?;
            }
            self.accumulator -= fixed_dt;
            self.sim_time += fixed_dt as f64;
            substeps += 1;
        }
        if self.accumulator >= fixed_dt {
            tracing::debug!(
                dropped = self.accumulator,
                "physics fell behind, dropping simulation time"
            );
            self.accumulator %= fixed_dt;
        }

        Ok(WorldStep {
            substeps,
            sim_time: self.sim_time,
            clamped,
        })
    }

    /// Releases every body. Further steps fail with `PhysicsNotReady`.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let released = self.body_count();
        self.bodies.clear();
        self.torn_down = true;
        tracing::debug!(released, "physics world torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl Drop for PhysicsWorld {
    fn drop(&mut self) {
        self.teardown();
    }
}
