//! VOXVIEW Inspector
//!
//! Loads a scene exactly as the viewer would, drives it through a headless
//! render target for a number of simulated frames, and logs what happened.
//!
//! ```text
//! voxview_inspect assets/monument.vox --frames 120
//! voxview_inspect --synthetic 32 --seed 7 --export synthetic.vox
//! RUST_LOG=debug voxview_inspect --config viewer.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use voxview::rendering::{FrameInput, MoveDirection, RecordingTarget, VoxWriter};
use voxview::shared::Vec2;
use voxview::{init_logging, load_scene, Viewer, ViewerConfig, ViewerResult};

/// Simulated frame rate.
const FRAME_SECS: f64 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "voxview_inspect", about = "Load a voxel scene and report mesh and camera stats")]
struct Cli {
    /// `.vox` model to load (overrides the config's scene)
    model: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Generate a fully active synthetic chunk of this size instead of loading a model
    #[arg(long, conflicts_with = "model")]
    synthetic: Option<usize>,

    /// Seed for synthetic colors
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Write the loaded scene to this path as a `.vox` file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("voxview_inspect: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.log_filter) {
        eprintln!("voxview_inspect: logging unavailable: {e}");
    }

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("voxview_inspect: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn build_config(cli: &Cli) -> ViewerResult<ViewerConfig> {
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    if let Some(model) = &cli.model {
        config.scene.model = Some(model.clone());
    }
    if let Some(size) = cli.synthetic {
        config.scene.model = None;
        config.scene.synthetic_size = size;
    }
    if let Some(seed) = cli.seed {
        config.scene.seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, config: ViewerConfig) -> ViewerResult<()> {
    if let Some(path) = &cli.export {
        let model = load_scene(&config.scene)?.to_model();
        std::fs::write(path, VoxWriter::encode(&model)?)?;
        tracing::info!(path = %path.display(), voxels = model.voxel_count(), "scene exported");
    }

    let mut viewer = Viewer::new(config, RecordingTarget::new())?;

    for frame in 0..cli.frames {
        if !viewer.update(&simulated_input(frame)) {
            break;
        }
        viewer.render();
    }

    let grid = viewer.chunk().grid();
    let (vertices, indices) = viewer
        .chunk()
        .mesh()
        .map_or((0, 0), |m| (m.vertex_count(), m.index_count()));
    tracing::info!(
        size = grid.size(),
        active = grid.active_count(),
        vertices,
        indices,
        bytes = viewer.target().bytes_uploaded(),
        "scene summary"
    );

    let camera = viewer.camera();
    let position = camera.position();
    tracing::info!(
        frames = viewer.frames_rendered(),
        x = position.x,
        y = position.y,
        z = position.z,
        yaw = camera.yaw(),
        pitch = camera.pitch(),
        "camera after simulation"
    );

    let target = viewer.shutdown();
    tracing::info!(
        draws = target.draws.len(),
        live_meshes = target.live_meshes(),
        "render target released"
    );

    Ok(())
}

/// A slow orbit: strafe right while sweeping the pointer in a circle.
fn simulated_input(frame: u32) -> FrameInput {
    let t = f64::from(frame) * FRAME_SECS;
    let angle = (t * std::f64::consts::TAU / 4.0) as f32;

    FrameInput {
        pointer: Some(Vec2::new(
            400.0 + 50.0 * angle.cos(),
            300.0 + 20.0 * angle.sin(),
        )),
        actions: vec![MoveDirection::Right, MoveDirection::Forward],
        ..FrameInput::idle(FRAME_SECS)
    }
}
