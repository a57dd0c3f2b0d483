//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in mesh-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    /// Computes the bounds of SoA position channels.
    ///
    /// Returns `None` if the channels are empty.
    pub fn from_soa(xs: &[f32], ys: &[f32], zs: &[f32]) -> Option<Self> {
        if xs.is_empty() {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for ((&x, &y), &z) in xs.iter().zip(ys).zip(zs) {
            for (axis, v) in [x, y, z].into_iter().enumerate() {
                min[axis] = min[axis].min(v);
                max[axis] = max[axis].max(v);
            }
        }
        Some(Self { min, max })
    }

    /// Extent along each axis.
    #[inline]
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Vertical extent (`max.y - min.y`).
    #[inline]
    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }
}
