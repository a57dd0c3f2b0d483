//! Rectangular cloth patch geometry.
//!
//! A patch is a `side × side` lattice spanned by four corners. Node
//! `(row, col)` sits at the bilinear blend of the corners, row 0 along
//! `c00 → c01` and the last row along `c10 → c11`.

use pleat_math::{Transform, Vec3};

use crate::config::SolverConfig;
use crate::constraint::{ConstraintKind, DistanceConstraint};
use crate::state::SimulationState;

/// The four corners of a cloth patch in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchCorners {
    /// Top, first column.
    pub c00: Vec3,
    /// Top, last column.
    pub c01: Vec3,
    /// Bottom, first column.
    pub c10: Vec3,
    /// Bottom, last column.
    pub c11: Vec3,
}

impl PatchCorners {
    /// Derives the corners from a curtain transform.
    ///
    /// The patch hangs from `position.y + scale.y` down to `position.y`
    /// and extends `scale.x` along −Z from `position.z`.
    pub fn from_transform(transform: &Transform) -> Self {
        let p = transform.translation;
        let height = transform.scale.y;
        let width = transform.scale.x;
        Self {
            c00: Vec3::new(p.x, p.y + height, p.z),
            c01: Vec3::new(p.x, p.y + height, p.z - width),
            c10: Vec3::new(p.x, p.y, p.z),
            c11: Vec3::new(p.x, p.y, p.z - width),
        }
    }

    /// World position of node `(row, col)` in a `side × side` patch.
    pub fn node_position(&self, row: usize, col: usize, side: usize) -> Vec3 {
        let last = (side.max(2) - 1) as f32;
        let ty = row as f32 / last;
        let tx = col as f32 / last;
        let first_col = self.c00.lerp(self.c10, ty);
        let last_col = self.c01.lerp(self.c11, ty);
        first_col.lerp(last_col, tx)
    }

    /// Positions of every node in row-major order.
    pub fn node_positions(&self, side: usize) -> Vec<Vec3> {
        (0..side * side)
            .map(|i| self.node_position(i / side, i % side, side))
            .collect()
    }
}

/// Builds structural, shear, and bend constraints for a lattice.
///
/// Rest lengths are taken from the current node positions.
pub fn lattice_constraints(
    side: usize,
    state: &SimulationState,
    config: &SolverConfig,
) -> Vec<DistanceConstraint> {
    let idx = |row: usize, col: usize| row * side + col;
    let mut out = Vec::new();
    let mut link = |a: usize, b: usize, stiffness: f32, kind: ConstraintKind| {
        out.push(DistanceConstraint::from_state(a, b, state, stiffness, kind));
    };

    for row in 0..side {
        for col in 0..side {
            // Structural
            if col + 1 < side {
                link(idx(row, col), idx(row, col + 1), config.structural_stiffness, ConstraintKind::Structural);
            }
            if row + 1 < side {
                link(idx(row, col), idx(row + 1, col), config.structural_stiffness, ConstraintKind::Structural);
            }

            // Shear
            if row + 1 < side && col + 1 < side {
                link(idx(row, col), idx(row + 1, col + 1), config.shear_stiffness, ConstraintKind::Shear);
                link(idx(row, col + 1), idx(row + 1, col), config.shear_stiffness, ConstraintKind::Shear);
            }

            // Bend
            if col + 2 < side {
                link(idx(row, col), idx(row, col + 2), config.bend_stiffness, ConstraintKind::Bend);
            }
            if row + 2 < side {
                link(idx(row, col), idx(row + 2, col), config.bend_stiffness, ConstraintKind::Bend);
            }
        }
    }

    out
}
