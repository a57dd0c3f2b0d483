//! CLI command implementations.

use std::time::Duration;

use pleat_debug::CurtainSnapshot;
use pleat_fold::{Curtain, DriveMode, FrameReport, MeshArena, PhysicsSetup};
use pleat_io::{load_mesh_json, validate_config, validate_mesh, CurtainConfig};
use pleat_mesh::generators::curtain_panel;
use pleat_solver::WorldLoader;
use pleat_telemetry::{EventBus, TracingSink};
use pleat_types::MeshId;

const FRAME_DT: f32 = 1.0 / 60.0;

/// Totals over a run.
#[derive(Default)]
struct RunSummary {
    moved: u32,
    normal_refreshes: u32,
    dirty: u32,
    last: Option<FrameReport>,
}

impl RunSummary {
    fn record(&mut self, report: FrameReport) {
        self.moved += report.positions_changed as u32;
        self.normal_refreshes += report.normals_recomputed as u32;
        self.dirty += report.normals_dirty as u32;
        self.last = Some(report);
    }
}

fn load_config(path: Option<&str>) -> Result<CurtainConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            println!("Config:    {path}");
            CurtainConfig::load(path)?
        }
        None => CurtainConfig::default(),
    };
    validate_config(&config)?;
    Ok(config)
}

fn event_bus() -> EventBus {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    bus
}

fn run(
    curtain: &mut Curtain,
    arena: &mut MeshArena,
    frames: u32,
    toggle_at: Option<u32>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let mut summary = RunSummary::default();
    for frame in 0..frames {
        if toggle_at == Some(frame) {
            curtain.toggle();
        }
        summary.record(curtain.tick(arena, FRAME_DT)?);
    }
    Ok(summary)
}

fn report(
    curtain: &Curtain,
    arena: &MeshArena,
    mesh: MeshId,
    summary: &RunSummary,
    snapshot_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = arena.get(mesh).ok_or("curtain mesh was released")?;
    let snapshot = CurtainSnapshot::capture(
        curtain.frame(),
        curtain.progress(),
        curtain.animator().is_folded(),
        curtain.mode_name(),
        &record.mesh,
    );

    println!("Frames:         {}", summary.last.map_or(0, |r| r.frame));
    println!("Progress:       {:.4}", curtain.progress());
    println!("Moved frames:   {}", summary.moved);
    println!("Normal refresh: {}", summary.normal_refreshes);
    println!("Normals dirty:  {}", summary.dirty);
    if let Some((lo, hi)) = snapshot.y_range() {
        println!("Y range:        [{lo:.4}, {hi:.4}]");
    }
    println!("Max depth:      {:.4}", snapshot.max_depth());

    if let Some(path) = snapshot_path {
        snapshot.write_to(path)?;
        println!("Snapshot written to: {path}");
    }
    Ok(())
}

/// Fold a generated panel with the analytic kernel.
pub fn fold(
    frames: u32,
    grid: usize,
    config_path: Option<&str>,
    snapshot_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pleat Fold");
    println!("──────────");
    let config = load_config(config_path)?;
    println!("Grid:      {grid}×{grid} segments");
    println!("Layers:    {}", config.fold.layers);
    println!();

    let mut arena = MeshArena::new();
    let mesh = arena.insert(curtain_panel(grid, 1.0, 1.0));
    let mut curtain = Curtain::new(
        &mut arena,
        vec![mesh],
        config.transform.to_transform(),
        config.fold,
        DriveMode::Analytic,
    )?
    .with_event_bus(event_bus());

    let summary = run(&mut curtain, &mut arena, frames, Some(0))?;
    report(&curtain, &arena, mesh, &summary, snapshot_path)?;
    curtain.dispose(&mut arena)?;
    Ok(())
}

/// Drape a generated panel with the soft-body solver.
pub fn drape(
    frames: u32,
    grid: usize,
    config_path: Option<&str>,
    snapshot_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pleat Drape");
    println!("───────────");
    let config = load_config(config_path)?;
    println!("Grid:      {grid}×{grid} segments");
    println!("Mass:      {} kg", config.physics.total_mass);
    println!("Anchoring: {:?}", config.physics.anchoring);
    println!();

    let world = WorldLoader::spawn(config.physics.clone())?.wait(Duration::from_secs(10))?;
    let mode = DriveMode::Physics(PhysicsSetup {
        config: config.physics.clone(),
        loader: WorldLoader::ready(world),
    });

    let mut arena = MeshArena::new();
    let mesh = arena.insert(curtain_panel(grid, 1.0, 1.0));
    let mut curtain = Curtain::new(
        &mut arena,
        vec![mesh],
        config.transform.to_transform(),
        config.fold,
        mode,
    )?
    .with_event_bus(event_bus());

    let summary = run(&mut curtain, &mut arena, frames, None)?;
    report(&curtain, &arena, mesh, &summary, snapshot_path)?;
    curtain.dispose(&mut arena)?;
    Ok(())
}

/// Inspect a curtain snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pleat Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = CurtainSnapshot::read_from(path)?;

    println!("Frame:        {}", snapshot.frame);
    println!("Mode:         {}", snapshot.mode);
    println!("Progress:     {:.4}", snapshot.progress);
    println!("Folded:       {}", snapshot.folded);
    println!("Vertices:     {}", snapshot.vertex_count);
    if let Some((lo, hi)) = snapshot.y_range() {
        println!("Y range:      [{lo:.4}, {hi:.4}]");
    }
    println!("Max depth:    {:.4}", snapshot.max_depth());

    Ok(())
}

/// Validate a config or mesh.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pleat Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = CurtainConfig::load(path)?;
        validate_config(&config)?;
        println!("✅ Config is valid ({:?} mode).", config.mode);
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let mesh = load_mesh_json(path)?;
        validate_mesh(&mesh)?;
        println!(
            "✅ Mesh is valid ({} verts, {} tris).",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        match pleat_mesh::GridLayout::detect(&mesh) {
            Ok(layout) => println!("   Physics ready: {0}×{0} segment grid.", layout.segments()),
            Err(e) => println!("   Not usable for physics: {e}"),
        }
    } else {
        return Err("Unsupported file format. Use .toml (config) or .json (mesh).".into());
    }

    Ok(())
}
