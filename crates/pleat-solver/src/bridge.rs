//! Mesh ↔ soft-body bridge.
//!
//! The bridge owns the physics world (once loaded) and one soft body
//! built from the curtain transform. Every frame it steps the world and
//! writes node positions into the mesh vertex buffer through the
//! detected grid layout.

use std::mem;

use pleat_math::Transform;
use pleat_mesh::{GridLayout, TriangleMesh};
use pleat_types::{BodyId, NodeId, PleatError, PleatResult};

use crate::config::SolverConfig;
use crate::loader::WorldLoader;
use crate::patch::PatchCorners;
use crate::softbody::SoftBody;
use crate::world::PhysicsWorld;

/// What a bridge step did to the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeStep {
    /// The world is still loading. Nothing was touched.
    NotReady,
    /// The body was created this frame and its rest nodes written.
    Attached { segments: usize },
    /// The world stepped and node positions were written.
    Stepped { substeps: u32, sim_time: f64 },
    /// The bridge has been torn down.
    Inactive,
}

impl BridgeStep {
    /// True if the vertex buffer was written.
    pub fn wrote_positions(&self) -> bool {
        matches!(self, BridgeStep::Attached { .. } | BridgeStep::Stepped { .. })
    }
}

enum BridgeState {
    Loading(WorldLoader),
    Ready {
        world: PhysicsWorld,
        body: Option<BodyId>,
    },
    TornDown,
}

/// Drives one mesh from a soft body.
pub struct PhysicsBridge {
    layout: GridLayout,
    config: SolverConfig,
    state: BridgeState,
}

impl PhysicsBridge {
    /// Detects the mesh grid and waits on `loader` for a world.
    ///
    /// Fails with `EmptyGeometry` or `TopologyMismatch` if the mesh
    /// cannot back a soft-body patch.
    pub fn new(mesh: &TriangleMesh, config: SolverConfig, loader: WorldLoader) -> PleatResult<Self> {
        config.validate()?;
        let layout = GridLayout::detect(mesh)?;
        tracing::debug!(
            vertex_count = mesh.vertex_count(),
            segments = layout.segments(),
            "physics bridge created"
        );
        Ok(Self {
            layout,
            config,
            state: BridgeState::Loading(loader),
        })
    }

    /// Advances the simulation and writes node positions into `mesh`.
    pub fn step(
        &mut self,
        mesh: &mut TriangleMesh,
        transform: &Transform,
        dt: f32,
    ) -> PleatResult<BridgeStep> {
        if mesh.vertex_count() != self.layout.node_count() {
            return Err(PleatError::TopologyMismatch {
                vertex_count: mesh.vertex_count(),
                reason: format!(
                    "bridge was built for {} vertices",
                    self.layout.node_count()
                ),
            });
        }

        let polled = match &mut self.state {
            BridgeState::Loading(loader) => Some(loader.poll()?),
            _ => None,
        };
        match polled {
            Some(None) => return Ok(BridgeStep::NotReady),
            Some(Some(world)) => {
                tracing::debug!("physics world ready");
                self.state = BridgeState::Ready { world, body: None };
            }
            None => {}
        }

        match &mut self.state {
            BridgeState::Loading(_) => Ok(BridgeStep::NotReady),
            BridgeState::TornDown => Ok(BridgeStep::Inactive),
            BridgeState::Ready { world, body } => match *body {
                None => {
                    if !transform.is_invertible() {
                        return Err(PleatError::InvalidConfig(
                            "Curtain transform has zero scale".into(),
                        ));
                    }
                    let corners = PatchCorners::from_transform(transform);
                    let soft = SoftBody::patch(&corners, self.layout.side(), &self.config)?;
                    write_nodes(&self.layout, &soft, transform, mesh)?;
                    *body = Some(world.add_soft_body(soft)?);
                    tracing::info!(
                        segments = self.layout.segments(),
                        nodes = self.layout.node_count(),
                        "soft body attached"
                    );
                    Ok(BridgeStep::Attached {
                        segments: self.layout.segments(),
                    })
                }
                Some(id) => {
                    let step = world.step_simulation(dt)?;
                    let soft = world.body(id).ok_or(PleatError::PhysicsNotReady)?;
                    write_nodes(&self.layout, soft, transform, mesh)?;
                    Ok(BridgeStep::Stepped {
                        substeps: step.substeps,
                        sim_time: step.sim_time,
                    })
                }
            },
        }
    }

    /// Replaces the body configuration.
    ///
    /// The current body is removed; the next step builds a new one from
    /// the transform. The world clock is kept.
    pub fn rebuild(&mut self, config: SolverConfig) -> PleatResult<()> {
        config.validate()?;
        if let BridgeState::Ready { world, body } = &mut self.state {
            if let Some(id) = body.take() {
                world.remove_soft_body(id);
            }
        }
        self.config = config;
        tracing::debug!("soft body scheduled for rebuild");
        Ok(())
    }

    /// Releases the world. Later steps report `Inactive`.
    pub fn teardown(&mut self) {
        match mem::replace(&mut self.state, BridgeState::TornDown) {
            BridgeState::Ready { mut world, .. } => world.teardown(),
            BridgeState::Loading(_) => tracing::debug!("physics torn down before loading finished"),
            BridgeState::TornDown => {}
        }
    }

    /// True once the world has loaded and until teardown.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, BridgeState::Ready { .. })
    }

    /// True once a body is live in the world.
    pub fn is_attached(&self) -> bool {
        matches!(self.state, BridgeState::Ready { body: Some(_), .. })
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.state, BridgeState::TornDown)
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn world(&self) -> Option<&PhysicsWorld> {
        match &self.state {
            BridgeState::Ready { world, .. } => Some(world),
            _ => None,
        }
    }

    /// The attached soft body, if any.
    pub fn body(&self) -> Option<&SoftBody> {
        match &self.state {
            BridgeState::Ready { world, body: Some(id) } => world.body(*id),
            _ => None,
        }
    }
}

fn write_nodes(
    layout: &GridLayout,
    body: &SoftBody,
    transform: &Transform,
    mesh: &mut TriangleMesh,
) -> PleatResult<()> {
    for node in 0..layout.node_count() {
        let node = NodeId(node as u32);
        let local = transform
            .inverse_transform_point(body.node_position(node))
            .ok_or_else(|| PleatError::InvalidConfig("Curtain transform is not invertible".into()))?;
        mesh.set_position(layout.vertex_for(node), local.x, local.y, local.z);
    }
    Ok(())
}
