//! Easing curves.

/// Cubic Hermite easing `t² (3 − 2t)`.
///
/// Input is clamped to `[0, 1]`. The derivative `6t(1 − t)` vanishes at
/// both ends, so an animation driven through it starts and stops with zero
/// velocity.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Derivative of [`smoothstep`] with respect to `t`.
#[inline]
pub fn smoothstep_derivative(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    6.0 * t * (1.0 - t)
}
