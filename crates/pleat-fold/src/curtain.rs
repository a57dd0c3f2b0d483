//! Curtain — a group of meshes and the driver that moves them.
//!
//! A curtain is driven either by the fold kernel or by a soft body.
//! The driver is picked once, when the curtain is built, and stored as
//! a trait object; [`Curtain::switch_mode`] replaces it explicitly. The
//! two drivers never write the same buffer in one frame.

use pleat_math::Transform;
use pleat_solver::{BridgeStep, PhysicsBridge, SolverConfig, WorldLoader};
use pleat_telemetry::{EventBus, EventKind, FoldEvent};
use pleat_types::{MeshId, PleatError, PleatResult};

use crate::animator::{FoldAnimator, FoldTick};
use crate::cache::{MeshArena, PrepareOutcome};
use crate::kernel::deform_mesh;
use crate::normals::{NormalRefresh, PhysicsNormalSchedule};
use crate::params::FoldParams;

/// What a physics-driven curtain needs to start.
pub struct PhysicsSetup {
    pub config: SolverConfig,
    pub loader: WorldLoader,
}

/// How the curtain's vertices are driven.
pub enum DriveMode {
    /// Procedural fold kernel.
    Analytic,
    /// Soft-body simulation of the first mesh.
    Physics(PhysicsSetup),
}

/// Per-frame summary handed back to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame counter, starting at 1.
    pub frame: u64,
    /// Fold progress after the frame.
    pub progress: f32,
    /// True if any vertex buffer was written.
    pub positions_changed: bool,
    /// True if normals were rebuilt this frame.
    pub normals_recomputed: bool,
    /// True if the renderer must re-upload normals.
    pub normals_dirty: bool,
}

/// Everything a driver may touch during one frame.
pub struct FrameContext<'a> {
    pub arena: &'a mut MeshArena,
    pub meshes: &'a [MeshId],
    pub transform: &'a Transform,
    pub animator: &'a mut FoldAnimator,
    pub params: &'a FoldParams,
    pub dt: f32,
}

/// What a driver did during one frame.
#[derive(Debug, Clone, Default)]
pub struct DriveOutcome {
    pub positions_changed: bool,
    pub normals_recomputed: bool,
    pub normals_dirty: bool,
    pub events: Vec<EventKind>,
}

/// Per-frame update strategy of a curtain.
pub trait FrameDriver {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether fold toggles mean anything to this driver.
    fn accepts_toggle(&self) -> bool;

    /// Updates the vertex buffers for one frame.
    fn drive(&mut self, ctx: FrameContext<'_>) -> PleatResult<DriveOutcome>;

    /// Releases driver resources. Returns true if anything was released.
    fn teardown(&mut self) -> bool {
        false
    }
}

/// Drives every mesh with the fold kernel.
pub struct AnalyticDriver;

impl FrameDriver for AnalyticDriver {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn accepts_toggle(&self) -> bool {
        true
    }

    fn drive(&mut self, ctx: FrameContext<'_>) -> PleatResult<DriveOutcome> {
        let tick = ctx.animator.tick(ctx.dt, ctx.params.speed, ctx.params.rate);
        let Some(progress) = tick.progress() else {
            return Ok(DriveOutcome::default());
        };
        let refresh = NormalRefresh::after_fold_tick(&tick);

        let mut outcome = DriveOutcome::default();
        for &id in ctx.meshes {
            let (mesh, rest) = ctx.arena.record_mut(id)?.split_mut();
            let Some(rest) = rest else {
                continue;
            };
            deform_mesh(mesh, rest, progress, ctx.params)?;
            outcome.positions_changed = true;
            if refresh {
                NormalRefresh::recompute(mesh);
                outcome.normals_recomputed = true;
                outcome.events.push(EventKind::NormalsRecomputed { mesh: id });
            }
        }

        if let FoldTick::Completed { .. } = tick {
            outcome.normals_dirty = outcome.positions_changed;
            outcome.events.push(EventKind::FoldCompleted {
                folded: ctx.animator.is_folded(),
            });
        }
        Ok(outcome)
    }
}

/// Drives one mesh from a soft body.
pub struct PhysicsDriver {
    bridge: PhysicsBridge,
    mesh: MeshId,
    schedule: PhysicsNormalSchedule,
}

impl PhysicsDriver {
    pub fn new(bridge: PhysicsBridge, mesh: MeshId) -> Self {
        let schedule = PhysicsNormalSchedule::new(bridge.config().normal_interval);
        Self {
            bridge,
            mesh,
            schedule,
        }
    }

    pub fn bridge(&self) -> &PhysicsBridge {
        &self.bridge
    }
}

impl FrameDriver for PhysicsDriver {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn accepts_toggle(&self) -> bool {
        false
    }

    fn drive(&mut self, ctx: FrameContext<'_>) -> PleatResult<DriveOutcome> {
        let mesh = &mut ctx.arena.record_mut(self.mesh)?.mesh;
        let mut outcome = DriveOutcome::default();

        let step = self.bridge.step(mesh, ctx.transform, ctx.dt)?;
        if !step.wrote_positions() {
            return Ok(outcome);
        }
        // Every written frame goes through the inverse transform, so the
        // buffer can move even when the world took no substep.
        outcome.positions_changed = true;

        let refresh = match step {
            BridgeStep::Attached { segments } => {
                self.schedule.reset();
                outcome.events.push(EventKind::PhysicsAttached {
                    mesh: self.mesh,
                    segments,
                });
                true
            }
            BridgeStep::Stepped { substeps, sim_time } => {
                if substeps > 0 {
                    outcome.events.push(EventKind::PhysicsStep { substeps, sim_time });
                }
                self.schedule.should_recompute(sim_time)
            }
            BridgeStep::NotReady | BridgeStep::Inactive => false,
        };

        if refresh {
            NormalRefresh::recompute(mesh);
            outcome.normals_recomputed = true;
            outcome.normals_dirty = true;
            outcome.events.push(EventKind::NormalsRecomputed { mesh: self.mesh });
        }
        Ok(outcome)
    }

    fn teardown(&mut self) -> bool {
        if self.bridge.is_torn_down() {
            return false;
        }
        self.bridge.teardown();
        true
    }
}

/// Leaves every buffer alone.
pub struct InertDriver;

impl FrameDriver for InertDriver {
    fn name(&self) -> &'static str {
        "inert"
    }

    fn accepts_toggle(&self) -> bool {
        false
    }

    fn drive(&mut self, _ctx: FrameContext<'_>) -> PleatResult<DriveOutcome> {
        Ok(DriveOutcome::default())
    }
}

/// A group of meshes folded (or draped) together.
pub struct Curtain {
    meshes: Vec<MeshId>,
    transform: Transform,
    params: FoldParams,
    animator: FoldAnimator,
    driver: Box<dyn FrameDriver>,
    bus: Option<EventBus>,
    prepared: Vec<(MeshId, usize)>,
    frame: u64,
}

impl Curtain {
    /// Prepares every mesh and picks the driver.
    ///
    /// In physics mode, a mesh without vertices leaves the curtain
    /// inert; a mesh that is not a square grid is an error.
    pub fn new(
        arena: &mut MeshArena,
        meshes: Vec<MeshId>,
        transform: Transform,
        params: FoldParams,
        mode: DriveMode,
    ) -> PleatResult<Self> {
        params.validate()?;

        let mut prepared = Vec::new();
        for &id in &meshes {
            if arena.prepare(id)? == PrepareOutcome::Prepared {
                let vertex_count = arena.get(id).map_or(0, |r| r.mesh.vertex_count());
                prepared.push((id, vertex_count));
            }
        }

        let driver = build_driver(arena, &meshes, mode)?;
        tracing::info!(
            meshes = meshes.len(),
            driver = driver.name(),
            "curtain ready"
        );

        Ok(Self {
            meshes,
            transform,
            params,
            animator: FoldAnimator::new(),
            driver,
            bus: None,
            prepared,
            frame: 0,
        })
    }

    /// Attaches an event bus and replays the preparation events.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        for (mesh, vertex_count) in std::mem::take(&mut self.prepared) {
            bus.emit(FoldEvent::new(
                self.frame,
                EventKind::MeshPrepared { mesh, vertex_count },
            ));
        }
        self.bus = Some(bus);
        self
    }

    /// Flips the fold intent. Returns false if the driver ignores toggles.
    pub fn toggle(&mut self) -> bool {
        if !self.driver.accepts_toggle() {
            tracing::debug!(driver = self.driver.name(), "fold toggle ignored");
            return false;
        }
        self.animator.toggle();
        self.emit(EventKind::FoldToggled {
            folded: self.animator.is_folded(),
            progress: self.animator.progress(),
        });
        true
    }

    /// Runs one frame and flushes the frame's events to the bus sinks.
    pub fn tick(&mut self, arena: &mut MeshArena, dt: f32) -> PleatResult<FrameReport> {
        self.frame += 1;
        let outcome = self.driver.drive(FrameContext {
            arena,
            meshes: &self.meshes,
            transform: &self.transform,
            animator: &mut self.animator,
            params: &self.params,
            dt,
        })?;

        for kind in outcome.events {
            self.emit(kind);
        }
        if let Some(bus) = self.bus.as_mut() {
            bus.flush();
        }

        Ok(FrameReport {
            frame: self.frame,
            progress: self.animator.progress(),
            positions_changed: outcome.positions_changed,
            normals_recomputed: outcome.normals_recomputed,
            normals_dirty: outcome.normals_dirty,
        })
    }

    /// Replaces the driver.
    ///
    /// The old driver is torn down. Switching to analytic mode writes
    /// the kernel output for the current progress so no simulated pose
    /// is left behind.
    pub fn switch_mode(&mut self, arena: &mut MeshArena, mode: DriveMode) -> PleatResult<()> {
        let analytic = matches!(mode, DriveMode::Analytic);
        let driver = build_driver(arena, &self.meshes, mode)?;
        self.teardown();
        tracing::info!(from = self.driver.name(), to = driver.name(), "curtain drive mode switched");
        self.driver = driver;

        if analytic {
            let progress = self.animator.progress();
            for &id in &self.meshes {
                let (mesh, rest) = arena.record_mut(id)?.split_mut();
                if let Some(rest) = rest {
                    deform_mesh(mesh, rest, progress, &self.params)?;
                    NormalRefresh::recompute(mesh);
                }
            }
        }
        Ok(())
    }

    /// Releases the physics world, if any.
    pub fn teardown(&mut self) {
        if self.driver.teardown() {
            self.emit(EventKind::PhysicsTornDown);
        }
    }

    /// Tears down and disposes every mesh of the curtain.
    pub fn dispose(mut self, arena: &mut MeshArena) -> PleatResult<()> {
        self.teardown();
        for id in std::mem::take(&mut self.meshes) {
            arena.dispose(id)?;
            self.emit(EventKind::MeshDisposed { mesh: id });
        }
        if let Some(bus) = self.bus.as_mut() {
            bus.finish();
        }
        Ok(())
    }

    pub fn progress(&self) -> f32 {
        self.animator.progress()
    }

    pub fn animator(&self) -> &FoldAnimator {
        &self.animator
    }

    pub fn params(&self) -> &FoldParams {
        &self.params
    }

    /// Replaces the fold parameters. Takes effect on the next frame.
    pub fn set_params(&mut self, params: FoldParams) -> PleatResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn meshes(&self) -> &[MeshId] {
        &self.meshes
    }

    /// Name of the active driver.
    pub fn mode_name(&self) -> &'static str {
        self.driver.name()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn event_bus_mut(&mut self) -> Option<&mut EventBus> {
        self.bus.as_mut()
    }

    fn emit(&self, kind: EventKind) {
        if let Some(bus) = &self.bus {
            bus.emit(FoldEvent::new(self.frame, kind));
        }
    }
}

fn build_driver(
    arena: &MeshArena,
    meshes: &[MeshId],
    mode: DriveMode,
) -> PleatResult<Box<dyn FrameDriver>> {
    let setup = match mode {
        DriveMode::Analytic => return Ok(Box::new(AnalyticDriver)),
        DriveMode::Physics(setup) => setup,
    };

    let Some(&id) = meshes.first() else {
        tracing::warn!("physics mode without meshes, curtain stays inert");
        return Ok(Box::new(InertDriver));
    };
    if meshes.len() > 1 {
        tracing::debug!(
            mesh = id.0,
            ignored = meshes.len() - 1,
            "physics drives only the first mesh"
        );
    }

    // Grid detection reads the rest pose, not whatever the kernel left behind.
    let record = arena.get(id).ok_or(PleatError::UnknownMesh(id))?;
    let mut rest_mesh = record.mesh.clone();
    if let Some(rest) = record.rest() {
        rest.restore(&mut rest_mesh)?;
    }
    match PhysicsBridge::new(&rest_mesh, setup.config, setup.loader) {
        Ok(bridge) => Ok(Box::new(PhysicsDriver::new(bridge, id))),
        Err(PleatError::EmptyGeometry(reason)) => {
            tracing::warn!(mesh = id.0, %reason, "physics setup skipped");
            Ok(Box::new(InertDriver))
        }
        Err(e) => Err(e),
    }
}
