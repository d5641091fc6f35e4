//! Core rendering functionality
//!
//! Frame rendering behind the [`RenderBackend`] trait: the wgpu
//! [`RenderEngine`] for windows and [`HeadlessBackend`] for everything else.

pub mod backend;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use backend::{FrameStats, HeadlessBackend, RenderBackend, UiOverlay};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::{ObjectUniform, RenderEngine};
