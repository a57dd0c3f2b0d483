//! Integration tests for pleat-types.

use pleat_types::{BodyId, MeshId, NodeId, PleatError};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn mesh_id_index() {
    let id = MeshId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn body_and_node_index() {
    assert_eq!(BodyId(7).index(), 7);
    assert_eq!(NodeId::from(3).index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = MeshId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: MeshId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn topology_mismatch_display() {
    let err = PleatError::TopologyMismatch {
        vertex_count: 17,
        reason: "not a perfect square".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("17"));
    assert!(msg.contains("perfect square"));
}

#[test]
fn recoverable_classification() {
    assert!(PleatError::EmptyGeometry("no vertices".into()).is_recoverable());
    assert!(PleatError::PhysicsNotReady.is_recoverable());
    assert!(!PleatError::TopologyMismatch {
        vertex_count: 17,
        reason: String::new(),
    }
    .is_recoverable());
    assert!(!PleatError::InvalidConfig("layers".into()).is_recoverable());
}

#[test]
fn unknown_mesh_display() {
    let err = PleatError::UnknownMesh(MeshId(9));
    assert!(err.to_string().contains("MeshId(9)"));
}
