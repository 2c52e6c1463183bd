//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use drape_cloth::ClothState;
use drape_io::{scene_warnings, FrameRecorder, SceneConfig};
use drape_solver::{GrabInput, SimulationControl, SimulationLoop};
use drape_telemetry::{EventBus, JsonLinesSink, TracingSink};
use tracing::warn;

use crate::report::FrameEvents;

pub struct SimulateArgs {
    pub config: PathBuf,
    pub frames: u32,
    pub export_dir: Option<PathBuf>,
    pub clear: bool,
    pub events: Option<PathBuf>,
}

/// Run a headless simulation.
pub fn simulate(args: &SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("Drape Simulation");
    println!("────────────────");
    println!("Config: {}", args.config.display());

    let scene = SceneConfig::load_or_default(&args.config);
    scene.validate()?;
    for warning in scene_warnings(&scene) {
        warn!("{warning}");
    }

    let mut cloth = ClothState::new(scene.cloth.clone())?;
    let control = Arc::new(SimulationControl::new(scene.features));
    let mut sim = SimulationLoop::new(
        scene.physics.clone(),
        scene.collision.clone(),
        scene.self_collision.clone(),
        control,
    )?;

    println!(
        "Cloth:  {}×{} points, {} springs",
        scene.cloth.resolution_x,
        scene.cloth.resolution_y,
        cloth.topology().spring_count()
    );
    println!("Proxies: {}", scene.proxies.len());
    println!(
        "Frames: {} (dt {:.5}s, {} substeps)",
        args.frames, scene.physics.temporal.dt, scene.physics.temporal.substeps
    );
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    if let Some(path) = &args.events {
        bus.add_sink(Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))));
    }

    let mut recorder = args.export_dir.as_ref().map(FrameRecorder::new);
    if let Some(recorder) = recorder.as_mut() {
        if args.clear {
            recorder.clear()?;
        }
        recorder.start();
        recorder.record(&cloth)?;
    }

    // Headless runs never grab.
    let grab = GrabInput::default();
    let mut events = FrameEvents::new(scene.physics.temporal.dt);
    let mut wall_time = 0.0;
    let mut landed = 0;

    for _ in 0..args.frames {
        let Some(report) = sim.step_frame(&mut cloth, &scene.proxies, &grab) else {
            continue;
        };
        wall_time += report.wall_time;
        landed += report.points_landed;

        bus.emit_all(events.events_for(&report, &cloth));
        bus.flush();

        if let Some(recorder) = recorder.as_mut() {
            recorder.record(&cloth)?;
        }
    }
    bus.finalize();
    cloth.validate()?;

    let pinned = cloth.fixed().iter().filter(|f| **f).count();
    println!("Simulated:     {} frames", sim.frame());
    println!("Sim time:      {:.3}s", sim.sim_time());
    println!("Wall time:     {:.3}s", wall_time);
    println!("Landed:        {landed} points");
    println!("Pinned:        {pinned}/{}", cloth.point_count());
    println!("Kinetic:       {:.6e}", cloth.kinetic_energy());
    if let Some(recorder) = &recorder {
        println!(
            "Exported:      {} frames to {}",
            recorder.frames_written(),
            recorder.dir().display()
        );
    }

    Ok(())
}

/// Validate a scene file.
pub fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Drape Validator");
    println!("───────────────");
    println!();
    println!("Validating scene: {}", path.display());

    let scene = SceneConfig::load(path)?;
    scene.validate()?;

    let warnings = scene_warnings(&scene);
    for warning in &warnings {
        println!("⚠️  {warning}");
    }
    println!(
        "✅ Scene is valid ({}×{} cloth, {} proxies, {} warnings).",
        scene.cloth.resolution_x,
        scene.cloth.resolution_y,
        scene.proxies.len(),
        warnings.len()
    );
    Ok(())
}

/// Print the default scene.
pub fn defaults() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", SceneConfig::default().to_toml_string()?);
    Ok(())
}
