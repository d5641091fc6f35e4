//! # User Interface
//!
//! Dear ImGui overlay drawn on top of the scene. [`UiManager`] owns the
//! ImGui context and its winit/wgpu glue and implements
//! [`UiOverlay`](crate::gfx::rendering::UiOverlay) so the render engine can
//! draw it after the main pass. [`panel`] holds the scene picker.
//!
//! When the UI wants the mouse, camera input is not processed.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{scene_panel, SceneSelection};
