//! # Graphics Module
//!
//! Everything between a scene description and pixels:
//!
//! - **Camera** ([`camera`]) - perspective camera, damped orbit controls and mouse input
//! - **Geometry** ([`geometry`]) - procedural primitive meshes
//! - **Scene** ([`scene`]) - node arena holding meshes, lights and audio emitters
//! - **Rendering** ([`rendering`]) - render backends, pipelines and the WGSL shader
//! - **Resources** ([`resources`]) - global uniforms and the depth buffer

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{OrbitControls, PerspectiveCamera};
pub use rendering::{HeadlessBackend, RenderBackend, RenderEngine};
pub use scene::SceneGraph;
