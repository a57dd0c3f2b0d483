//! When to rebuild vertex normals.
//!
//! The analytic path refreshes normals on every frame the kernel ran.
//! The physics path can throttle refreshes to the simulation clock.

use pleat_mesh::normals::compute_vertex_normals;
use pleat_mesh::TriangleMesh;

use crate::animator::FoldTick;

/// Normal refresh policy for the analytic driver.
pub struct NormalRefresh;

impl NormalRefresh {
    /// True whenever the kernel moved vertices on this tick.
    #[inline]
    pub fn after_fold_tick(tick: &FoldTick) -> bool {
        !matches!(tick, FoldTick::Idle)
    }

    /// Rebuilds area-weighted vertex normals.
    pub fn recompute(mesh: &mut TriangleMesh) {
        compute_vertex_normals(mesh);
    }
}

/// Throttle for normal refreshes in the physics path.
#[derive(Debug, Clone, Default)]
pub struct PhysicsNormalSchedule {
    interval: Option<f32>,
    last_bucket: Option<u64>,
}

impl PhysicsNormalSchedule {
    /// `None` refreshes after every step; `Some(s)` on the first step
    /// and whenever the clock crosses a multiple of `s` seconds.
    pub fn new(interval: Option<f32>) -> Self {
        Self {
            interval: interval.filter(|s| s.is_finite() && *s > 0.0),
            last_bucket: None,
        }
    }

    pub fn interval(&self) -> Option<f32> {
        self.interval
    }

    /// Decides whether a step that ended at `sim_time` refreshes normals.
    pub fn should_recompute(&mut self, sim_time: f64) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        let bucket = (sim_time.max(0.0) / interval as f64).floor() as u64;
        match self.last_bucket {
            Some(last) if bucket <= last => false,
            _ => {
                self.last_bucket = Some(bucket);
                true
            }
        }
    }

    /// Forgets the last refresh, so the next step refreshes.
    pub fn reset(&mut self) {
        self.last_bucket = None;
    }
}
