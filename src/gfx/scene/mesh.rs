//! Mesh nodes: a primitive shape plus a material

use std::hash::{Hash, Hasher};

use crate::gfx::geometry::{
    generate_box, generate_cone, generate_cylinder, generate_plane, generate_sphere, GeometryData,
};

use super::material::Material;

/// Parametric primitive a mesh node is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        segments: u32,
        open_ended: bool,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

impl Shape {
    /// Generates the triangle data for this shape
    pub fn geometry(&self) -> GeometryData {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
            Shape::Sphere { radius, segments } => generate_sphere(radius, segments, segments),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => generate_cylinder(radius_top, radius_bottom, height, segments),
            Shape::Cone {
                radius,
                height,
                segments,
                open_ended,
            } => generate_cone(radius, height, segments, open_ended),
            Shape::Plane { width, height } => generate_plane(width, height, 1, 1),
        }
    }

    /// Identity used to share GPU buffers between equal shapes
    pub fn key(&self) -> ShapeKey {
        ShapeKey(*self)
    }
}

/// Hashable wrapper comparing float parameters bit-for-bit
#[derive(Debug, Clone, Copy)]
pub struct ShapeKey(Shape);

impl ShapeKey {
    fn bits(&self) -> (u8, [u32; 4]) {
        match self.0 {
            Shape::Box {
                width,
                height,
                depth,
            } => (0, [width.to_bits(), height.to_bits(), depth.to_bits(), 0]),
            Shape::Sphere { radius, segments } => (1, [radius.to_bits(), segments, 0, 0]),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => (
                2,
                [
                    radius_top.to_bits(),
                    radius_bottom.to_bits(),
                    height.to_bits(),
                    segments,
                ],
            ),
            Shape::Cone {
                radius,
                height,
                segments,
                open_ended,
            } => (
                3,
                [radius.to_bits(), height.to_bits(), segments, open_ended as u32],
            ),
            Shape::Plane { width, height } => (4, [width.to_bits(), height.to_bits(), 0, 0]),
        }
    }
}

impl PartialEq for ShapeKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for ShapeKey {}

impl Hash for ShapeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub shape: Shape,
    pub material: Material,
}

impl Mesh {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_shapes_share_a_key() {
        let head = Shape::Sphere {
            radius: 0.2,
            segments: 32,
        };
        let toy = Shape::Sphere {
            radius: 0.1,
            segments: 32,
        };

        let keys: HashSet<ShapeKey> = [head.key(), head.key(), toy.key()].into_iter().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn variants_with_same_numbers_differ() {
        let plane = Shape::Plane {
            width: 1.0,
            height: 1.0,
        };
        let cube = Shape::Box {
            width: 1.0,
            height: 1.0,
            depth: 0.0,
        };
        assert_ne!(plane.key(), cube.key());
    }
}
