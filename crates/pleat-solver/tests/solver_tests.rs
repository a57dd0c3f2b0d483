//! Integration tests for pleat-solver.

use std::time::Duration;

use pleat_math::{Transform, Vec3};
use pleat_mesh::generators::curtain_panel;
use pleat_mesh::TriangleMesh;
use pleat_solver::config::{Anchoring, SolverConfig};
use pleat_solver::constraint::{ConstraintKind, DistanceConstraint};
use pleat_solver::patch::{lattice_constraints, PatchCorners};
use pleat_solver::pbd::PositionBasedSolver;
use pleat_solver::state::SimulationState;
use pleat_solver::strategy::SolverStrategy;
use pleat_solver::{BridgeStep, PhysicsBridge, PhysicsWorld, SoftBody, WorldLoader};
use pleat_types::constants::DEFAULT_FIXED_DT;
use pleat_types::{NodeId, PleatError};

fn unit_corners() -> PatchCorners {
    PatchCorners::from_transform(&Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)))
}

fn free_config() -> SolverConfig {
    SolverConfig {
        anchoring: Anchoring::None,
        ..Default::default()
    }
}

fn curtain_transform() -> Transform {
    Transform {
        translation: Vec3::new(0.0, 1.0, 0.0),
        rotation: pleat_math::Quat::IDENTITY,
        scale: Vec3::splat(2.0),
    }
}

// ─── SimulationState Tests ────────────────────────────────────

#[test]
fn state_from_positions() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    let state = SimulationState::from_positions(&positions, 0.1, &[false; 3]).unwrap();

    assert_eq!(state.node_count, 3);
    assert_eq!(state.position(1), Vec3::X);
    assert!(state.vel_x.iter().all(|&v| v == 0.0));
    assert!((state.inv_mass[0] - 10.0).abs() < 1e-5);
}

#[test]
fn state_pinning() {
    let positions = vec![Vec3::ZERO, Vec3::X];
    let state = SimulationState::from_positions(&positions, 0.1, &[true, false]).unwrap();
    assert!(state.is_pinned(0));
    assert!(!state.is_pinned(1));
}

#[test]
fn state_rejects_mismatched_pins() {
    let positions = vec![Vec3::ZERO, Vec3::X];
    let result = SimulationState::from_positions(&positions, 0.1, &[false]);
    assert!(matches!(result, Err(PleatError::InvalidConfig(_))));
}

#[test]
fn state_predict_applies_gravity() {
    let mut state = SimulationState::from_positions(&[Vec3::ZERO, Vec3::X], 1.0, &[true, false]).unwrap();
    let dt = 0.1;
    state.predict(dt, [0.0, -10.0, 0.0]);

    // v = -1, p = -0.1
    assert!((state.vel_y[1] + 1.0).abs() < 1e-5);
    assert!((state.pos_y[1] + 0.1).abs() < 1e-5);
    assert_eq!(state.position(0), Vec3::ZERO, "Pinned node must not move");
}

#[test]
fn state_ground_keeps_margin() {
    let mut state = SimulationState::from_positions(&[Vec3::new(0.0, -1.0, 0.0)], 1.0, &[false]).unwrap();
    let pushed = state.enforce_ground(0.0, 0.05);
    assert_eq!(pushed, 1);
    assert!((state.pos_y[0] - 0.05).abs() < 1e-6);
}

// ─── Constraint Tests ─────────────────────────────────────────

#[test]
fn distance_constraint_restores_rest_length() {
    let mut state = SimulationState::from_positions(&[Vec3::ZERO, Vec3::X], 1.0, &[false, false]).unwrap();
    let c = DistanceConstraint::from_state(0, 1, &state, 1.0, ConstraintKind::Structural);
    assert!((c.rest_length - 1.0).abs() < 1e-6);

    state.set_position(1, Vec3::new(2.0, 0.0, 0.0));
    assert!((c.violation(&state) - 1.0).abs() < 1e-6);

    c.project_positions(&mut state);
    assert!(c.violation(&state) < 1e-5);
    // Equal masses share the correction.
    assert!((state.pos_x[0] - 0.5).abs() < 1e-5);
}

#[test]
fn distance_constraint_respects_pins() {
    let mut state = SimulationState::from_positions(&[Vec3::ZERO, Vec3::X], 1.0, &[true, false]).unwrap();
    let c = DistanceConstraint::from_state(0, 1, &state, 1.0, ConstraintKind::Structural);
    state.set_position(1, Vec3::new(3.0, 0.0, 0.0));
    c.project_positions(&mut state);

    assert_eq!(state.position(0), Vec3::ZERO);
    assert!((state.pos_x[1] - 1.0).abs() < 1e-5);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_matches_curtain_defaults() {
    let config = SolverConfig::default();
    assert!((config.total_mass - 0.9).abs() < 1e-6);
    assert_eq!(config.position_iterations, 10);
    assert_eq!(config.velocity_iterations, 10);
    assert_eq!(config.max_substeps, 10);
    assert_eq!(config.gravity, [0.0, -9.8, 0.0]);
    assert_eq!(config.anchoring, Anchoring::TopEdge);
    assert!(config.validate().is_ok());
}

#[test]
fn config_presets_validate() {
    assert!(SolverConfig::debug().validate().is_ok());
    assert!(SolverConfig::high_quality().validate().is_ok());
}

#[test]
fn config_rejects_bad_values() {
    let bad_mass = SolverConfig { total_mass: 0.0, ..Default::default() };
    assert!(bad_mass.validate().is_err());

    let bad_iters = SolverConfig { position_iterations: 0, ..Default::default() };
    assert!(bad_iters.validate().is_err());

    let bad_margin = SolverConfig { collision_margin: -1.0, ..Default::default() };
    assert!(bad_margin.validate().is_err());

    let bad_interval = SolverConfig { normal_interval: Some(0.0), ..Default::default() };
    assert!(bad_interval.validate().is_err());
}

#[test]
fn config_from_partial_toml() {
    let config: SolverConfig = toml::from_str(
        r#"
        total_mass = 2.0
        anchoring = "top_corners"
        ground_height = -1.0
        "#,
    )
    .unwrap();

    assert!((config.total_mass - 2.0).abs() < 1e-6);
    assert_eq!(config.anchoring, Anchoring::TopCorners);
    assert_eq!(config.ground_height, Some(-1.0));
    assert_eq!(config.position_iterations, 10);
}

#[test]
fn anchoring_modes() {
    assert!(!Anchoring::None.is_pinned(0, 0, 3));
    assert!(Anchoring::TopCorners.is_pinned(0, 2, 3));
    assert!(!Anchoring::TopCorners.is_pinned(0, 1, 3));
    assert!(Anchoring::TopEdge.is_pinned(0, 1, 3));
    assert!(!Anchoring::TopEdge.is_pinned(1, 0, 3));
}

// ─── Patch Tests ──────────────────────────────────────────────

#[test]
fn corners_from_transform() {
    let transform = Transform {
        translation: Vec3::new(1.0, 2.0, 3.0),
        rotation: pleat_math::Quat::IDENTITY,
        scale: Vec3::new(2.0, 4.0, 1.0),
    };
    let c = PatchCorners::from_transform(&transform);

    assert_eq!(c.c00, Vec3::new(1.0, 6.0, 3.0));
    assert_eq!(c.c01, Vec3::new(1.0, 6.0, 1.0));
    assert_eq!(c.c10, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(c.c11, Vec3::new(1.0, 2.0, 1.0));
}

#[test]
fn patch_nodes_are_bilinear() {
    let c = unit_corners();
    let side = 3;

    assert!(c.node_position(0, 0, side).distance(c.c00) < 1e-6);
    assert!(c.node_position(0, 2, side).distance(c.c01) < 1e-6);
    assert!(c.node_position(2, 0, side).distance(c.c10) < 1e-6);
    assert!(c.node_position(2, 2, side).distance(c.c11) < 1e-6);

    let center = c.node_position(1, 1, side);
    let expected = (c.c00 + c.c01 + c.c10 + c.c11) * 0.25;
    assert!(center.distance(expected) < 1e-6);
}

#[test]
fn lattice_constraint_counts() {
    let side = 3;
    let positions = unit_corners().node_positions(side);
    let state = SimulationState::from_positions(&positions, 0.1, &[false; 9]).unwrap();
    let constraints = lattice_constraints(side, &state, &SolverConfig::default());

    let count = |kind| constraints.iter().filter(|c| c.kind == kind).count();
    assert_eq!(count(ConstraintKind::Structural), 12);
    assert_eq!(count(ConstraintKind::Shear), 8);
    assert_eq!(count(ConstraintKind::Bend), 6);
    assert!(constraints.iter().all(|c| c.violation(&state) < 1e-6));
}

// ─── Solver Tests ─────────────────────────────────────────────

#[test]
fn solver_requires_init() {
    let mut solver = PositionBasedSolver::new();
    let mut state = SimulationState::from_positions(&[Vec3::ZERO], 1.0, &[false]).unwrap();
    assert!(solver.step(&mut state, DEFAULT_FIXED_DT).is_err());
}

#[test]
fn solver_name() {
    assert_eq!(PositionBasedSolver::new().name(), "position_based");
}

// ─── SoftBody Tests ───────────────────────────────────────────

#[test]
fn soft_body_spreads_mass() {
    let config = SolverConfig::default();
    let body = SoftBody::patch(&unit_corners(), 4, &config).unwrap();

    assert_eq!(body.node_count(), 16);
    assert_eq!(body.side(), 4);
    let node_mass = config.total_mass / 16.0;
    assert!((body.state().mass[15] - node_mass).abs() < 1e-6);
    assert!(body.constraint_count() > 0);
}

#[test]
fn soft_body_rejects_tiny_patch() {
    let result = SoftBody::patch(&unit_corners(), 1, &SolverConfig::default());
    assert!(result.is_err());
}

#[test]
fn soft_body_top_edge_stays_pinned() {
    let mut body = SoftBody::patch(&unit_corners(), 4, &SolverConfig::default()).unwrap();
    let top: Vec<Vec3> = (0..4).map(|i| body.node_position(NodeId(i))).collect();

    for _ in 0..30 {
        body.step(DEFAULT_FIXED_DT).unwrap();
    }

    for (i, p) in top.iter().enumerate() {
        assert_eq!(body.node_position(NodeId(i as u32)), *p);
    }
}

#[test]
fn soft_body_free_falls() {
    let mut body = SoftBody::patch(&unit_corners(), 3, &free_config()).unwrap();
    let before: Vec<f32> = body.state().pos_y.clone();

    for _ in 0..10 {
        body.step(DEFAULT_FIXED_DT).unwrap();
    }

    for (i, &y0) in before.iter().enumerate() {
        assert!(body.state().pos_y[i] < y0, "Node {i} did not fall");
    }
}

#[test]
fn soft_body_lands_on_ground_with_margin() {
    let config = SolverConfig {
        anchoring: Anchoring::None,
        ground_height: Some(0.0),
        collision_margin: 0.05,
        ..Default::default()
    };
    let corners = PatchCorners::from_transform(&Transform::from_translation(Vec3::new(0.0, 0.2, 0.0)));
    let mut body = SoftBody::patch(&corners, 3, &config).unwrap();

    for _ in 0..240 {
        body.step(DEFAULT_FIXED_DT).unwrap();
    }

    let min_y = body.state().pos_y.iter().copied().fold(f32::MAX, f32::min);
    assert!(min_y >= 0.05 - 1e-4, "min_y = {min_y}");
}

// ─── World Tests ──────────────────────────────────────────────

#[test]
fn world_fixed_step_accumulator() {
    let mut world = PhysicsWorld::new(SolverConfig::default()).unwrap();

    let step = world.step_simulation(DEFAULT_FIXED_DT).unwrap();
    assert_eq!(step.substeps, 1);
    assert!(!step.clamped);

    let step = world.step_simulation(DEFAULT_FIXED_DT * 0.25).unwrap();
    assert_eq!(step.substeps, 0, "Partial frame must accumulate");

    let step = world.step_simulation(0.0).unwrap();
    assert_eq!(step.substeps, 0);
    assert!((step.sim_time - DEFAULT_FIXED_DT as f64).abs() < 1e-6);
}

#[test]
fn world_treats_bad_dt_as_zero() {
    let mut world = PhysicsWorld::new(SolverConfig::default()).unwrap();
    assert_eq!(world.step_simulation(f32::NAN).unwrap().substeps, 0);
    assert_eq!(world.step_simulation(-1.0).unwrap().substeps, 0);
    assert_eq!(world.step_simulation(f32::INFINITY).unwrap().substeps, 0);
    assert_eq!(world.sim_time(), 0.0);
}

#[test]
fn world_clamps_long_frames() {
    let config = SolverConfig::default();
    let mut world = PhysicsWorld::new(config.clone()).unwrap();

    let step = world.step_simulation(5.0).unwrap();
    assert!(step.clamped);
    assert!(step.substeps <= config.max_substeps);
    assert!(step.sim_time <= config.max_frame_dt as f64 + 1e-6);
}

#[test]
fn world_body_lifecycle() {
    let mut world = PhysicsWorld::new(SolverConfig::default()).unwrap();
    let body = SoftBody::patch(&unit_corners(), 3, &SolverConfig::default()).unwrap();

    let id = world.add_soft_body(body).unwrap();
    assert_eq!(world.body_count(), 1);
    assert!(world.body(id).is_some());

    assert!(world.remove_soft_body(id).is_some());
    assert!(world.remove_soft_body(id).is_none());
    assert_eq!(world.body_count(), 0);
}

#[test]
fn world_teardown_stops_stepping() {
    let mut world = PhysicsWorld::new(SolverConfig::default()).unwrap();
    let body = SoftBody::patch(&unit_corners(), 3, &SolverConfig::default()).unwrap();
    world.add_soft_body(body).unwrap();

    world.teardown();
    assert!(world.is_torn_down());
    assert_eq!(world.body_count(), 0);
    assert!(matches!(world.step_simulation(DEFAULT_FIXED_DT), Err(PleatError::PhysicsNotReady)));

    // Idempotent
    world.teardown();
}

#[test]
fn world_rejects_invalid_config() {
    let config = SolverConfig { fixed_dt: 0.0, ..Default::default() };
    assert!(PhysicsWorld::new(config).is_err());
}

// ─── Loader Tests ─────────────────────────────────────────────

#[test]
fn loader_ready_delivers_once() {
    let world = PhysicsWorld::new(SolverConfig::default()).unwrap();
    let mut loader = WorldLoader::ready(world);
    assert!(loader.poll().unwrap().is_some());
    assert!(loader.poll().unwrap().is_none());
}

#[test]
fn loader_spawn_builds_world() {
    let loader = WorldLoader::spawn(SolverConfig::default()).unwrap();
    let world = loader.wait(Duration::from_secs(5)).unwrap();
    assert_eq!(world.body_count(), 0);
}

#[test]
fn loader_spawn_reports_build_error() {
    let config = SolverConfig { max_substeps: 0, ..Default::default() };
    let loader = WorldLoader::spawn(config).unwrap();
    let result = loader.wait(Duration::from_secs(5));
    assert!(matches!(result, Err(PleatError::InvalidConfig(_))));
}

#[test]
fn loader_deferred_handoff() {
    let (mut loader, handoff) = WorldLoader::deferred();
    assert!(loader.poll().unwrap().is_none());

    handoff.deliver(PhysicsWorld::new(SolverConfig::default()));
    assert!(loader.poll().unwrap().is_some());
}

#[test]
fn loader_wait_times_out() {
    let (loader, _handoff) = WorldLoader::deferred();
    let result = loader.wait(Duration::from_millis(10));
    assert!(matches!(result, Err(PleatError::PhysicsNotReady)));
}

#[test]
fn loader_dropped_handoff_is_an_error() {
    let (mut loader, handoff) = WorldLoader::deferred();
    drop(handoff);
    assert!(loader.poll().is_err());
}

// ─── Bridge Tests ─────────────────────────────────────────────

#[test]
fn bridge_rejects_non_square_mesh() {
    let positions: Vec<f32> = (0..17).flat_map(|i| [i as f32, 0.0, 0.0]).collect();
    let mesh = TriangleMesh::from_interleaved(&positions, &[]).unwrap();
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());

    let result = PhysicsBridge::new(&mesh, SolverConfig::default(), loader);
    assert!(matches!(
        result,
        Err(PleatError::TopologyMismatch { vertex_count: 17, .. })
    ));
}

#[test]
fn bridge_rejects_empty_mesh() {
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());
    let result = PhysicsBridge::new(&TriangleMesh::default(), SolverConfig::default(), loader);
    assert!(matches!(result, Err(PleatError::EmptyGeometry(_))));
}

#[test]
fn bridge_waits_for_world() {
    let mut mesh = curtain_panel(3, 2.0, 2.0);
    let before = mesh.clone();
    let (loader, handoff) = WorldLoader::deferred();
    let mut bridge = PhysicsBridge::new(&mesh, SolverConfig::default(), loader).unwrap();

    let step = bridge.step(&mut mesh, &curtain_transform(), DEFAULT_FIXED_DT).unwrap();
    assert_eq!(step, BridgeStep::NotReady);
    assert!(!step.wrote_positions());
    assert_eq!(mesh, before, "Mesh must be untouched while loading");
    assert!(!bridge.is_ready());

    handoff.deliver(PhysicsWorld::new(SolverConfig::default()));
    let step = bridge.step(&mut mesh, &curtain_transform(), DEFAULT_FIXED_DT).unwrap();
    assert_eq!(step, BridgeStep::Attached { segments: 3 });
    assert!(bridge.is_attached());
}

#[test]
fn bridge_writes_nodes_in_local_space() {
    let mut mesh = curtain_panel(3, 2.0, 2.0);
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());
    let mut bridge = PhysicsBridge::new(&mesh, SolverConfig::default(), loader).unwrap();

    bridge.step(&mut mesh, &curtain_transform(), DEFAULT_FIXED_DT).unwrap();

    // Top-left node sits at (p.x, p.y + s.y, p.z) in world space,
    // which is (0, 1, 0) after undoing the transform.
    let v = bridge.layout().vertex_for(NodeId(0));
    let p = mesh.position_vec3(v);
    assert!(p.distance(Vec3::new(0.0, 1.0, 0.0)) < 1e-5, "got {p:?}");

    let last = bridge.layout().vertex_for(NodeId(15));
    let p = mesh.position_vec3(last);
    assert!(p.distance(Vec3::new(0.0, 0.0, -1.0)) < 1e-5, "got {p:?}");
}

#[test]
fn bridge_steps_and_drops_free_nodes() {
    let mut mesh = curtain_panel(3, 2.0, 2.0);
    let config = free_config();
    let loader = WorldLoader::ready(PhysicsWorld::new(config.clone()).unwrap());
    let mut bridge = PhysicsBridge::new(&mesh, config, loader).unwrap();
    let transform = curtain_transform();

    bridge.step(&mut mesh, &transform, DEFAULT_FIXED_DT).unwrap();
    let attached = mesh.pos_y.clone();

    let step = bridge.step(&mut mesh, &transform, DEFAULT_FIXED_DT).unwrap();
    match step {
        BridgeStep::Stepped { substeps, sim_time } => {
            assert_eq!(substeps, 1);
            assert!(sim_time > 0.0);
        }
        other => panic!("expected Stepped, got {other:?}"),
    }
    for (i, &y0) in attached.iter().enumerate() {
        assert!(mesh.pos_y[i] < y0, "Vertex {i} did not fall");
    }
}

#[test]
fn bridge_rejects_resized_mesh() {
    let mesh = curtain_panel(4, 2.0, 2.0);
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());
    let mut bridge = PhysicsBridge::new(&mesh, SolverConfig::default(), loader).unwrap();

    let mut smaller = curtain_panel(3, 2.0, 2.0);
    let result = bridge.step(&mut smaller, &curtain_transform(), DEFAULT_FIXED_DT);
    assert!(matches!(result, Err(PleatError::TopologyMismatch { .. })));
}

#[test]
fn bridge_rejects_zero_scale_transform() {
    let mut mesh = curtain_panel(3, 2.0, 2.0);
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());
    let mut bridge = PhysicsBridge::new(&mesh, SolverConfig::default(), loader).unwrap();

    let transform = Transform {
        scale: Vec3::ZERO,
        ..Transform::IDENTITY
    };
    let result = bridge.step(&mut mesh, &transform, DEFAULT_FIXED_DT);
    assert!(matches!(result, Err(PleatError::InvalidConfig(_))));
}

#[test]
fn bridge_rebuild_reattaches() {
    let mut mesh = curtain_panel(3, 2.0, 2.0);
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());
    let mut bridge = PhysicsBridge::new(&mesh, SolverConfig::default(), loader).unwrap();
    let transform = curtain_transform();

    bridge.step(&mut mesh, &transform, DEFAULT_FIXED_DT).unwrap();
    assert!(bridge.is_attached());

    bridge.rebuild(SolverConfig::high_quality()).unwrap();
    assert!(!bridge.is_attached());
    assert_eq!(bridge.config().position_iterations, 30);

    let step = bridge.step(&mut mesh, &transform, DEFAULT_FIXED_DT).unwrap();
    assert!(matches!(step, BridgeStep::Attached { .. }));
    assert_eq!(bridge.world().map(|w| w.body_count()), Some(1));
}

#[test]
fn bridge_teardown_goes_inactive() {
    let mut mesh = curtain_panel(3, 2.0, 2.0);
    let loader = WorldLoader::ready(PhysicsWorld::new(SolverConfig::default()).unwrap());
    let mut bridge = PhysicsBridge::new(&mesh, SolverConfig::default(), loader).unwrap();
    bridge.step(&mut mesh, &curtain_transform(), DEFAULT_FIXED_DT).unwrap();

    bridge.teardown();
    assert!(bridge.is_torn_down());
    assert!(bridge.world().is_none());

    let before = mesh.clone();
    let step = bridge.step(&mut mesh, &curtain_transform(), DEFAULT_FIXED_DT).unwrap();
    assert_eq!(step, BridgeStep::Inactive);
    assert_eq!(mesh, before);
}
