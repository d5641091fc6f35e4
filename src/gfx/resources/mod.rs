//! GPU resource management
//!
//! Global uniforms and render targets shared by the render engine.

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform, PointLightRaw, MAX_POINT_LIGHTS};
pub use texture_resource::TextureResource;
