//! Integration tests for pleat-io.

use std::f32::consts::{FRAC_PI_2, PI};

use pleat_io::config::{load_mesh_json, CurtainConfig, DriveModeKind, TransformConfig};
use pleat_io::validator::{validate_config, validate_mesh, validate_physics_mesh};
use pleat_mesh::generators::curtain_panel;
use pleat_mesh::TriangleMesh;
use pleat_solver::Anchoring;
use pleat_types::PleatError;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pleat-io-{}-{name}", std::process::id()))
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config() {
    let config = CurtainConfig::default();
    assert_eq!(config.mode, DriveModeKind::Analytic);
    assert_eq!(config.fold.layers, 3);
    assert!((config.physics.total_mass - 0.9).abs() < 1e-6);
    assert_eq!(config.transform.position, [0.0, -4.0, 0.0]);
    assert_eq!(config.transform.rotation, [FRAC_PI_2, PI, FRAC_PI_2]);
    assert!((config.transform.scale - 0.005).abs() < 1e-9);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn empty_toml_gives_defaults() {
    let config = CurtainConfig::from_toml_str("").unwrap();
    assert_eq!(config, CurtainConfig::default());
}

#[test]
fn full_toml_document() {
    let config = CurtainConfig::from_toml_str(
        r#"
        mode = "physics"

        [fold]
        layers = 5
        amount = 0.25

        [physics]
        total_mass = 1.5
        position_iterations = 4
        anchoring = "top_corners"
        normal_interval = 2.0

        [transform]
        position = [1.0, 2.0, 3.0]
        scale = 1.0
        "#,
    )
    .unwrap();

    assert_eq!(config.mode, DriveModeKind::Physics);
    assert_eq!(config.fold.layers, 5);
    assert!((config.fold.speed - 0.5).abs() < 1e-6);
    assert_eq!(config.physics.position_iterations, 4);
    assert_eq!(config.physics.anchoring, Anchoring::TopCorners);
    assert_eq!(config.physics.normal_interval, Some(2.0));
    assert_eq!(config.transform.position, [1.0, 2.0, 3.0]);
    assert_eq!(config.transform.rotation, TransformConfig::default().rotation);
}

#[test]
fn malformed_toml_is_a_serialization_error() {
    let result = CurtainConfig::from_toml_str("mode = [");
    assert!(matches!(result, Err(PleatError::Serialization(_))));

    let result = CurtainConfig::from_toml_str(r#"mode = "hover""#);
    assert!(matches!(result, Err(PleatError::Serialization(_))));
}

#[test]
fn config_file_round_trip() {
    let config = CurtainConfig {
        mode: DriveModeKind::Physics,
        ..Default::default()
    };
    let path = temp_path("curtain.toml");
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    let loaded = CurtainConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, config);
}

#[test]
fn missing_config_file_is_io_error() {
    let result = CurtainConfig::load(temp_path("does-not-exist.toml"));
    assert!(matches!(result, Err(PleatError::Io(_))));
}

#[test]
fn transform_config_builds_transform() {
    let t = TransformConfig {
        position: [1.0, 2.0, 3.0],
        rotation: [0.0; 3],
        scale: 2.0,
    }
    .to_transform();
    assert_eq!(t.translation.to_array(), [1.0, 2.0, 3.0]);
    assert_eq!(t.scale.to_array(), [2.0; 3]);
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn zero_layers_rejected() {
    let mut config = CurtainConfig::default();
    config.fold.layers = 0;
    assert!(matches!(validate_config(&config), Err(PleatError::InvalidConfig(_))));
}

#[test]
fn zero_scale_rejected() {
    let mut config = CurtainConfig::default();
    config.transform.scale = 0.0;
    assert!(validate_config(&config).is_err());
}

#[test]
fn non_finite_position_rejected() {
    let mut config = CurtainConfig::default();
    config.transform.position[1] = f32::NAN;
    assert!(validate_config(&config).is_err());
}

#[test]
fn bad_physics_rejected() {
    let mut config = CurtainConfig::default();
    config.physics.total_mass = -1.0;
    assert!(validate_config(&config).is_err());
}

#[test]
fn mesh_validation() {
    assert!(validate_mesh(&curtain_panel(3, 1.0, 1.0)).is_ok());
    assert!(matches!(
        validate_mesh(&TriangleMesh::default()),
        Err(PleatError::EmptyGeometry(_))
    ));
}

#[test]
fn physics_mesh_validation() {
    let layout = validate_physics_mesh(&curtain_panel(3, 1.0, 1.0)).unwrap();
    assert_eq!(layout.segments(), 3);

    let positions: Vec<f32> = (0..17).flat_map(|i| [0.0, i as f32, 0.0]).collect();
    let mesh = TriangleMesh::from_interleaved(&positions, &[]).unwrap();
    assert!(matches!(
        validate_physics_mesh(&mesh),
        Err(PleatError::TopologyMismatch { vertex_count: 17, .. })
    ));
}

#[test]
fn mesh_json_file() {
    let path = temp_path("panel.json");
    let mesh = curtain_panel(2, 1.0, 1.0);
    std::fs::write(&path, serde_json::to_string(&mesh).unwrap()).unwrap();

    let loaded = load_mesh_json(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.vertex_count(), 9);
    assert_eq!(loaded.triangle_count(), 8);
}

#[test]
fn mesh_json_with_bad_index_rejected() {
    let path = temp_path("broken.json");
    let mut mesh = curtain_panel(1, 1.0, 1.0);
    mesh.indices[0] = 99;
    std::fs::write(&path, serde_json::to_string(&mesh).unwrap()).unwrap();

    let result = load_mesh_json(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(PleatError::InvalidMesh(_))));
}
