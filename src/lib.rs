//! Vignette
//!
//! A small 3D viewer built on wgpu and winit that renders hand-authored
//! living-room scenes out of procedural models and switches between them.
//!
//! The windowed viewer lives in [`app`]; everything it drives can also run
//! headless through [`gfx::rendering::HeadlessBackend`].

pub mod app;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod frame;
pub mod gfx;
pub mod prelude;
pub mod scene_manager;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::VignetteApp;
pub use scene_manager::SceneManager;
