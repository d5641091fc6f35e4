//! Viewer configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```ron
//! (
//!     window: (width: 1600, height: 900),
//!     controls: (damping_factor: 0.1),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gfx::camera::OrbitControlsConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vignette".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [8.0, 5.0, 8.0],
            look_at: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: OrbitControlsConfig,
    pub input: InputConfig,
    /// Frame rate of the render loop
    pub target_fps: u32,
    pub background: [f32; 3],
    pub ui_font_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            controls: OrbitControlsConfig::default(),
            input: InputConfig::default(),
            target_fps: 60,
            background: [0.1, 0.1, 0.12],
            ui_font_size: 18.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => {
                let contents = std::fs::read_to_string(path)?;
                Self::from_ron_str(&contents)
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_living_room() {
        let config = ViewerConfig::default();
        assert_eq!((config.window.width, config.window.height), (1200, 800));
        assert_eq!(config.camera.position, [8.0, 5.0, 8.0]);
        assert_eq!(config.controls.min_distance, 3.0);
        assert_eq!(config.controls.max_distance, 15.0);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let config =
            ViewerConfig::from_ron_str("(window: (width: 1600), controls: (damping_factor: 0.1))")
                .unwrap();
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.controls.damping_factor, 0.1);
        assert!(config.controls.enable_damping);
    }

    #[test]
    fn pretty_output_reads_back() {
        let config = ViewerConfig::default();
        let text = config.to_ron_string().unwrap();
        assert_eq!(ViewerConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(matches!(
            ViewerConfig::load_from_file("viewer.toml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        assert!(matches!(
            ViewerConfig::from_ron_str("(window: 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
