//! Integration tests for pleat-math.

use pleat_math::easing::{smoothstep, smoothstep_derivative};
use pleat_math::{Transform, Vec3};

// ─── Easing Tests ─────────────────────────────────────────────

#[test]
fn smoothstep_endpoints() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn smoothstep_clamps_input() {
    assert_eq!(smoothstep(-2.0), 0.0);
    assert_eq!(smoothstep(3.0), 1.0);
}

#[test]
fn smoothstep_zero_velocity_at_ends() {
    assert_eq!(smoothstep_derivative(0.0), 0.0);
    assert_eq!(smoothstep_derivative(1.0), 0.0);
    assert!((smoothstep_derivative(0.5) - 1.5).abs() < 1e-6);
}

#[test]
fn smoothstep_is_monotonic() {
    let mut prev = smoothstep(0.0);
    for i in 1..=100 {
        let v = smoothstep(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

// ─── Transform Tests ──────────────────────────────────────────

#[test]
fn identity_is_noop() {
    let p = Vec3::new(1.0, -2.0, 3.0);
    let t = Transform::IDENTITY;
    assert_eq!(t.transform_point(p), p);
    assert_eq!(t.inverse_transform_point(p), Some(p));
}

#[test]
fn inverse_round_trip() {
    let t = Transform::from_euler(
        Vec3::new(0.0, -4.0, 2.0),
        [std::f32::consts::FRAC_PI_2, std::f32::consts::PI, 0.3],
        0.5,
    );
    let p = Vec3::new(0.25, 1.5, -0.75);
    let back = t.inverse_transform_point(t.transform_point(p)).unwrap();
    assert!((back - p).length() < 1e-4, "back = {back:?}");
}

#[test]
fn zero_scale_is_not_invertible() {
    let mut t = Transform::IDENTITY;
    t.scale = Vec3::new(1.0, 0.0, 1.0);
    assert!(!t.is_invertible());
    assert!(t.inverse_transform_point(Vec3::ONE).is_none());
}

#[test]
fn matrix_matches_point_transform() {
    let t = Transform::from_euler(Vec3::new(1.0, 2.0, 3.0), [0.1, 0.2, 0.3], 2.0);
    let p = Vec3::new(-1.0, 0.5, 4.0);
    let via_matrix = t.to_matrix().transform_point3(p);
    assert!((via_matrix - t.transform_point(p)).length() < 1e-4);
}
