//! # Vignette Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use vignette::prelude::*;
//!
//! let catalog = SceneCatalog::builtin();
//! let mut manager = SceneManager::new(HeadlessBackend::default(), &ViewerConfig::default());
//! if let Some(scene) = catalog.get("SC01") {
//!     manager.load_scene(scene);
//! }
//! assert_eq!(manager.object_count(), 5);
//! ```

pub use crate::app::VignetteApp;
pub use crate::audio::{AudioCue, AudioKind, AudioListener};
pub use crate::catalog::{CameraPose, ObjectKind, ObjectPlacement, SceneCatalog, SceneDescription};
pub use crate::config::ViewerConfig;
pub use crate::error::{AppError, CatalogError, ConfigError, RenderError};
pub use crate::frame::{Clock, FrameTicker, ManualClock, SystemClock};
pub use crate::gfx::camera::{CameraController, OrbitControls, PerspectiveCamera};
pub use crate::gfx::rendering::{HeadlessBackend, RenderBackend, RenderEngine, UiOverlay};
pub use crate::gfx::scene::{Node, NodeKey, NodeKind, SceneGraph};
pub use crate::scene_manager::{LiveObject, SceneCaption, SceneManager};

pub use cgmath::{Point3, Vector3};
