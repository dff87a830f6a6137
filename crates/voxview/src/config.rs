//! # Viewer Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) yields the stock viewer.
//!
//! ```toml
//! log_filter = "info"
//!
//! [window]
//! width = 1200
//! height = 800
//!
//! [camera]
//! position = { x = 0.0, y = 0.0, z = 15.0 }
//! speed = 1.5
//! sensitivity = 0.3
//!
//! [scene]
//! model = "assets/monument.vox"   # omit for a synthetic chunk
//! synthetic_size = 16
//! seed = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxview_shared::{
    Vec3, DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_SENSITIVITY, DEFAULT_CAMERA_SPEED,
    DEFAULT_SYNTHETIC_SIZE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MAX_GRID_SIZE,
};

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Window settings. Only the aspect ratio reaches the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowConfig {
    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position
    pub position: Vec3,
    /// Units per second
    pub speed: f32,
    /// Degrees per pointer unit
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            speed: DEFAULT_CAMERA_SPEED,
            sensitivity: DEFAULT_CAMERA_SENSITIVITY,
        }
    }
}

/// What to put in front of the camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// `.vox` file to load. When absent a synthetic chunk is generated.
    pub model: Option<PathBuf>,
    /// Side length of the synthetic chunk
    pub synthetic_size: usize,
    /// Seed for synthetic colors
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model: None,
            synthetic_size: DEFAULT_SYNTHETIC_SIZE,
            seed: 0,
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Scene settings
    pub scene: SceneConfig,
    /// `env_logger` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns error if the document does not parse or fails [`Self::validate`].
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// A relative `scene.model` path is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&source)?;
        if let (Some(model), Some(dir)) = (&config.scene.model, path.parent()) {
            if model.is_relative() {
                config.scene.model = Some(dir.join(model));
            }
        }

        tracing::debug!(path = %path.display(), "loaded viewer config");
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero window dimensions, a
    /// non-positive camera speed, or a synthetic size outside `1..=256`.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window must be non-empty, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.camera.speed.is_nan() || self.camera.speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera speed must be positive, got {}",
                self.camera.speed
            )));
        }
        if !(1..=MAX_GRID_SIZE).contains(&self.scene.synthetic_size) {
            return Err(ConfigError::Invalid(format!(
                "synthetic_size must be between 1 and {MAX_GRID_SIZE}, got {}",
                self.scene.synthetic_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.0, 15.0));
        assert!((config.window.aspect_ratio() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
            [camera]
            speed = 4.0

            [scene]
            seed = 99
            "#,
        )
        .unwrap();
        assert!((config.camera.speed - 4.0).abs() < f32::EPSILON);
        assert!((config.camera.sensitivity - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.scene.seed, 99);
        assert_eq!(config.scene.synthetic_size, 16);
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = ViewerConfig::from_toml_str("[window]\nheight = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_speed_rejected() {
        let err = ViewerConfig::from_toml_str("[camera]\nspeed = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_synthetic_size_rejected() {
        let err = ViewerConfig::from_toml_str("[scene]\nsynthetic_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_oversized_synthetic_size_rejected() {
        let err = ViewerConfig::from_toml_str("[scene]\nsynthetic_size = 257\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config = ViewerConfig::from_toml_str("[scene]\nsynthetic_size = 256\n").unwrap();
        assert_eq!(config.scene.synthetic_size, MAX_GRID_SIZE);
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = ViewerConfig::from_toml_str("[window\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
