//! # Viewer
//!
//! Composes configuration, scene, camera and render target, and advances them
//! one frame at a time. The windowing collaborator owns the event loop and
//! calls in:
//!
//! ```text
//! Viewer::new(config, target)        // build + upload the scene
//! loop {
//!     viewer.update(&input)          // camera follows input
//!     viewer.render()                // draw with current transforms
//! }
//! viewer.shutdown()                  // release device buffers
//! ```

use thiserror::Error;
use voxview_rendering::{
    CameraController, FormatError, FpsCamera, FrameInput, GridError, RenderTarget, VoxLoader,
    VoxelChunk, VoxelGrid,
};

use crate::config::{ConfigError, SceneConfig, ViewerConfig};

/// Errors that can occur while starting the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Model file could not be decoded.
    #[error("model decode failed: {0}")]
    Format(#[from] FormatError),

    /// Model could not be placed in a grid.
    #[error("model rejected: {0}")]
    Grid(#[from] GridError),

    /// Writing an exported scene failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for viewer operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Builds the grid a scene config describes.
///
/// # Errors
///
/// Returns error if the model file cannot be decoded, does not fit its grid,
/// or the synthetic size is too large.
pub fn load_scene(scene: &SceneConfig) -> ViewerResult<VoxelGrid> {
    match &scene.model {
        Some(path) => {
            let model = VoxLoader::load(path)?;
            tracing::info!(
                path = %path.display(),
                size_x = model.size_x,
                size_y = model.size_y,
                size_z = model.size_z,
                voxels = model.voxel_count(),
                "model loaded"
            );
            Ok(VoxelGrid::from_model(&model)?)
        }
        None => {
            tracing::info!(
                size = scene.synthetic_size,
                seed = scene.seed,
                "generating synthetic scene"
            );
            Ok(VoxelGrid::synthetic(scene.synthetic_size, scene.seed)?)
        }
    }
}

/// A running viewer bound to one render target.
pub struct Viewer<T: RenderTarget> {
    config: ViewerConfig,
    camera: FpsCamera,
    controller: CameraController,
    chunk: VoxelChunk<T::MeshHandle>,
    target: T,
    frames_rendered: u64,
    running: bool,
}

impl<T: RenderTarget> Viewer<T> {
    /// Loads the configured scene and uploads it to `target`.
    ///
    /// # Errors
    ///
    /// Returns error if the config is invalid or the scene cannot be built.
    pub fn new(config: ViewerConfig, mut target: T) -> ViewerResult<Self> {
        config.validate()?;
        let grid = load_scene(&config.scene)?;
        let mut chunk = VoxelChunk::new(grid);
        chunk.load(&mut target);

        let camera = FpsCamera::new(
            config.camera.position,
            config.window.aspect_ratio(),
            config.camera.speed,
            config.camera.sensitivity,
        );

        Ok(Self {
            config,
            camera,
            controller: CameraController::new(),
            chunk,
            target,
            frames_rendered: 0,
            running: true,
        })
    }

    /// Applies one frame of input. Returns false once exit has been requested.
    pub fn update(&mut self, input: &FrameInput) -> bool {
        if input.exit_requested {
            tracing::info!("exit requested");
            self.running = false;
        }
        if self.running {
            self.controller.update(&mut self.camera, input);
        }
        self.running
    }

    /// Draws the scene with the camera's current transforms.
    pub fn render(&mut self) {
        if self.chunk.render(&mut self.target, &self.camera.transforms()) {
            self.frames_rendered += 1;
        }
    }

    /// Forwards a window resize to the camera.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            tracing::debug!(width, "ignoring zero-height resize");
            return;
        }
        self.camera.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Releases device buffers and hands the target back.
    pub fn shutdown(mut self) -> T {
        self.chunk.unload(&mut self.target);
        tracing::info!(frames = self.frames_rendered, "viewer shut down");
        self.target
    }

    /// Configuration the viewer was started with.
    #[must_use]
    pub const fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &FpsCamera {
        &self.camera
    }

    /// The scene chunk.
    #[must_use]
    pub const fn chunk(&self) -> &VoxelChunk<T::MeshHandle> {
        &self.chunk
    }

    /// The render target.
    #[must_use]
    pub const fn target(&self) -> &T {
        &self.target
    }

    /// Frames drawn so far.
    #[must_use]
    pub const fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// False once exit has been requested.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }
}
