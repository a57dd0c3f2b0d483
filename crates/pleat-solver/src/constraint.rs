//! Distance constraints between pairs of nodes.

use pleat_math::Vec3;

use crate::state::SimulationState;

/// Role of a constraint in the cloth lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Horizontal or vertical neighbours.
    Structural,
    /// Diagonal neighbours.
    Shear,
    /// Skip-one neighbours; resists folding.
    Bend,
}

/// Keeps two nodes at their rest distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
    pub rest_length: f32,
    pub stiffness: f32,
    pub kind: ConstraintKind,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize, rest_length: f32, stiffness: f32, kind: ConstraintKind) -> Self {
        Self {
            a,
            b,
            rest_length,
            stiffness,
            kind,
        }
    }

    /// Builds a constraint whose rest length is the current distance.
    pub fn from_state(
        a: usize,
        b: usize,
        state: &SimulationState,
        stiffness: f32,
        kind: ConstraintKind,
    ) -> Self {
        let rest_length = state.position(a).distance(state.position(b));
        Self::new(a, b, rest_length, stiffness, kind)
    }

    /// Moves both nodes toward the rest distance, weighted by inverse mass.
    pub fn project_positions(&self, state: &mut SimulationState) {
        let wa = state.inv_mass[self.a];
        let wb = state.inv_mass[self.b];
        let w = wa + wb;
        if w < 1e-10 {
            return; // both pinned
        }

        let pa = state.position(self.a);
        let pb = state.position(self.b);
        let delta = pb - pa;
        let dist = delta.length();
        if dist < 1e-10 {
            return;
        }

        let correction = delta * ((dist - self.rest_length) / dist * self.stiffness / w);
        state.set_position(self.a, pa + correction * wa);
        state.set_position(self.b, pb - correction * wb);
    }

    /// Removes part of the relative velocity along the constraint axis.
    pub fn correct_velocity(&self, state: &mut SimulationState, factor: f32) {
        let wa = state.inv_mass[self.a];
        let wb = state.inv_mass[self.b];
        let w = wa + wb;
        if w < 1e-10 {
            return;
        }

        let delta = state.position(self.b) - state.position(self.a);
        let dist = delta.length();
        if dist < 1e-10 {
            return;
        }
        let axis: Vec3 = delta / dist;

        let va = state.velocity(self.a);
        let vb = state.velocity(self.b);
        let rel = (vb - va).dot(axis);
        let impulse = axis * (rel * factor * self.stiffness / w);

        state.set_velocity(self.a, va + impulse * wa);
        state.set_velocity(self.b, vb - impulse * wb);
    }

    /// Absolute deviation from the rest length.
    pub fn violation(&self, state: &SimulationState) -> f32 {
        (state.position(self.a).distance(state.position(self.b)) - self.rest_length).abs()
    }
}
