//! Simulation state — SoA buffers for all per-node data.
//!
//! This is the primary mutable data structure of a soft body.
//! The solver reads and writes these buffers each substep.

use pleat_math::Vec3;
use pleat_types::{PleatError, PleatResult};

/// SoA simulation state buffers.
///
/// All arrays have length `node_count`. Channels are stored contiguously:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Number of nodes.
    pub node_count: usize,

    // ─── Position (current) ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    // ─── Previous position (start of the substep) ───
    pub prev_x: Vec<f32>,
    pub prev_y: Vec<f32>,
    pub prev_z: Vec<f32>,

    // ─── Per-node mass (inverse mass 0 = pinned) ───
    pub mass: Vec<f32>,
    pub inv_mass: Vec<f32>,
}

impl SimulationState {
    /// Initialize state from node positions and a per-node mass.
    ///
    /// Velocities start at zero. Pinned nodes get `inv_mass = 0.0`.
    pub fn from_positions(
        positions: &[Vec3],
        node_mass: f32,
        pinned: &[bool],
    ) -> PleatResult<Self> {
        let n = positions.len();

        if pinned.len() != n {
            return Err(PleatError::InvalidConfig(format!(
                "Pinned array length ({}) != node count ({})",
                pinned.len(),
                n
            )));
        }
        if !(node_mass.is_finite() && node_mass > 0.0) {
            return Err(PleatError::InvalidConfig(format!(
                "Node mass must be positive, got {node_mass}"
            )));
        }

        let mut mass = vec![node_mass; n];
        let mut inv_mass = vec![1.0 / node_mass; n];
        for ((m, w), &is_pinned) in mass.iter_mut().zip(inv_mass.iter_mut()).zip(pinned) {
            if is_pinned {
                *m = f32::MAX;
                *w = 0.0;
            }
        }

        let pos_x: Vec<f32> = positions.iter().map(|p| p.x).collect();
        let pos_y: Vec<f32> = positions.iter().map(|p| p.y).collect();
        let pos_z: Vec<f32> = positions.iter().map(|p| p.z).collect();

        Ok(Self {
            node_count: n,
            prev_x: pos_x.clone(),
            prev_y: pos_y.clone(),
            prev_z: pos_z.clone(),
            pos_x,
            pos_y,
            pos_z,
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
            mass,
            inv_mass,
        })
    }

    /// Position of node `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Velocity of node `i`.
    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.vel_x[i] = v.x;
        self.vel_y[i] = v.y;
        self.vel_z[i] = v.z;
    }

    /// True if node `i` is pinned.
    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.inv_mass[i] == 0.0
    }

    /// Explicit prediction: `v += dt * g`, `p += dt * v`.
    ///
    /// Pinned nodes stay where they are.
    pub fn predict(&mut self, dt: f32, gravity: [f32; 3]) {
        for i in 0..self.node_count {
            if self.inv_mass[i] == 0.0 {
                continue;
            }

            self.vel_x[i] += dt * gravity[0];
            self.vel_y[i] += dt * gravity[1];
            self.vel_z[i] += dt * gravity[2];

            self.pos_x[i] += dt * self.vel_x[i];
            self.pos_y[i] += dt * self.vel_y[i];
            self.pos_z[i] += dt * self.vel_z[i];
        }
    }

    /// Keep free nodes at least `margin` above `ground_y`.
    ///
    /// Returns the number of nodes that were pushed up.
    pub fn enforce_ground(&mut self, ground_y: f32, margin: f32) -> u32 {
        let surface = ground_y + margin;
        let mut resolved = 0;
        for i in 0..self.node_count {
            if self.inv_mass[i] > 0.0 && self.pos_y[i] < surface {
                self.pos_y[i] = surface;
                // Keep the velocity update from reading the push as motion.
                self.prev_y[i] = self.prev_y[i].max(surface);
                resolved += 1;
            }
        }
        resolved
    }

    /// Update velocities from position change: v = (p_new - p_old) / dt.
    pub fn update_velocities(&mut self, dt: f32) {
        let inv_dt = 1.0 / dt;
        for i in 0..self.node_count {
            self.vel_x[i] = (self.pos_x[i] - self.prev_x[i]) * inv_dt;
            self.vel_y[i] = (self.pos_y[i] - self.prev_y[i]) * inv_dt;
            self.vel_z[i] = (self.pos_z[i] - self.prev_z[i]) * inv_dt;
        }
    }

    /// Save current positions as "previous" for the next substep.
    pub fn save_previous(&mut self) {
        self.prev_x.copy_from_slice(&self.pos_x);
        self.prev_y.copy_from_slice(&self.pos_y);
        self.prev_z.copy_from_slice(&self.pos_z);
    }

    /// Apply velocity damping: v *= (1 - damping).
    pub fn damp_velocities(&mut self, damping: f32) {
        let factor = 1.0 - damping;
        for i in 0..self.node_count {
            self.vel_x[i] *= factor;
            self.vel_y[i] *= factor;
            self.vel_z[i] *= factor;
        }
    }

    /// Compute total kinetic energy: 0.5 * Σ m_i * ||v_i||² over free nodes.
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.node_count {
            if self.inv_mass[i] == 0.0 {
                continue;
            }
            let v = self.velocity(i).as_dvec3();
            energy += 0.5 * self.mass[i] as f64 * v.length_squared();
        }
        energy
    }
}
