//! # Vertex Data Structures
//!
//! This module defines vertex data structures used for 3D mesh rendering
//! by the vignette renderer. It provides the GPU-compatible vertex format
//! that [`GeometryData`](crate::gfx::geometry::GeometryData) is uploaded as.

/// Interleaved position + normal vertex, laid out for direct upload.
///
/// ```no_run
/// use vignette::gfx::scene::vertex::Vertex3D;
///
/// let floor_corner = Vertex3D {
///     position: [-5.0, 0.0, 5.0],
///     normal: [0.0, 1.0, 0.0],
/// };
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Vertex buffer layout: location 0 = position, location 1 = normal.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_struct_size() {
        let layout = Vertex3D::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }
}
