//! # Procedural Geometry Generation
//!
//! This module generates the primitive shapes the vignette models are built
//! from, so no external model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with independent width, height and depth
//! - **Sphere**: UV sphere with configurable resolution
//! - **Cylinder**: tapered cylinder (different top and bottom radius), capped
//! - **Cone**: cone with an optional open base
//! - **Plane**: flat plane in the XY plane facing +Z
//!
//! All shapes are Y-up and centered on the origin.
//!
//! ## Usage
//!
//! ```rust
//! use vignette::gfx::geometry::{generate_box, generate_sphere, generate_cylinder};
//!
//! let body = generate_cylinder(0.2, 0.2, 1.2, 32);
//! let head = generate_sphere(0.2, 32, 32);
//! let base = generate_box(2.0, 0.5, 1.0);
//! assert!(body.triangle_count() > 0 && head.triangle_count() > 0);
//! assert_eq!(base.vertex_count(), 24);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
