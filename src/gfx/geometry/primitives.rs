//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes used by the
//! procedural models. All shapes are generated with outward normals and
//! counter-clockwise winding when seen from outside.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a box centered at the origin
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
///
/// Each face has its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    // Unit cube corners, scaled below
    let positions: [[f32; 3]; 24] = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    for (i, p) in positions.iter().enumerate() {
        data.vertices.push([p[0] * width, p[1] * height, p[2] * depth]);
        data.normals.push(face_normals[i / 4]);
    }

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 at the north pole
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a capped, possibly tapered cylinder along the Y axis
///
/// # Arguments
/// * `radius_top` - Radius at `+height/2`
/// * `radius_bottom` - Radius at `-height/2`
/// * `height` - Height of the cylinder
/// * `segments` - Number of radial segments
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    generate_frustum(radius_top, radius_bottom, height, segments, false)
}

/// Generate a cone along the Y axis with its tip at `+height/2`
///
/// # Arguments
/// * `radius` - Base radius
/// * `height` - Height of the cone
/// * `segments` - Number of radial segments
/// * `open_ended` - When true the base disc is omitted (a lampshade)
pub fn generate_cone(radius: f32, height: f32, segments: u32, open_ended: bool) -> GeometryData {
    generate_frustum(0.0, radius, height, segments, open_ended)
}

fn generate_frustum(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    open_ended: bool,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    // Side: a top and a bottom vertex per column, seam duplicated
    for i in 0..=segs {
        let u = i as f32 / segs as f32;
        let angle = u * 2.0 * PI;
        let (sin_a, cos_a) = angle.sin_cos();

        let len = (1.0 + slope * slope).sqrt();
        let normal = [sin_a / len, slope / len, cos_a / len];

        data.vertices
            .push([radius_top * sin_a, half_height, radius_top * cos_a]);
        data.normals.push(normal);

        data.vertices
            .push([radius_bottom * sin_a, -half_height, radius_bottom * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let top = i * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;

        data.indices.extend_from_slice(&[top, bottom, next_top]);
        data.indices.extend_from_slice(&[bottom, next_bottom, next_top]);
    }

    if !open_ended {
        if radius_top > 0.0 {
            push_cap(&mut data, radius_top, half_height, segs, true);
        }
        if radius_bottom > 0.0 {
            push_cap(&mut data, radius_bottom, -half_height, segs, false);
        }
    }

    data
}

fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, facing_up: bool) {
    let normal = if facing_up {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, -1.0, 0.0]
    };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push(normal);

    let ring = data.vertices.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push([radius * sin_a, y, radius * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let current = ring + i;
        let next = current + 1;
        if facing_up {
            data.indices.extend_from_slice(&[center, current, next]);
        } else {
            data.indices.extend_from_slice(&[center, next, current]);
        }
    }
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Rotate by -π/2 about X to use it as a floor.
pub fn generate_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[i + 1, next_row + 1, next_row]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every triangle's winding agrees with the normal of its first vertex.
    fn assert_outward_winding(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| data.vertices[i as usize]);
            let face = cross(sub(b, a), sub(c, a));
            let normal = data.normals[tri[0] as usize];
            if dot(face, face) > 1e-12 {
                assert!(dot(face, normal) > 0.0, "triangle {:?} is wound inward", tri);
            }
        }
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(2.0, 0.5, 1.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);

        let max_x = cube.vertices.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        let max_y = cube.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, 1.0);
        assert_eq!(max_y, 0.25);
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.2, 8, 6);
        assert_eq!(sphere.vertices.len(), 9 * 7);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        for v in &sphere.vertices {
            let r = dot(*v, *v).sqrt();
            assert!((r - 0.2).abs() < 1e-5);
        }
        assert_outward_winding(&sphere);
    }

    #[test]
    fn test_tapered_cylinder_has_both_caps() {
        let lamp_base = generate_cylinder(0.2, 0.3, 0.1, 16);
        let side_vertices = 17 * 2;
        let cap_vertices = 1 + 17;
        assert_eq!(lamp_base.vertex_count(), side_vertices + 2 * cap_vertices);
        assert_eq!(lamp_base.triangle_count(), 16 * 2 + 16 * 2);
        assert_outward_winding(&lamp_base);
    }

    #[test]
    fn test_open_cone_has_no_caps() {
        let shade = generate_cone(0.3, 0.4, 16, true);
        assert_eq!(shade.vertex_count(), 17 * 2);
        assert_eq!(shade.triangle_count(), 16 * 2);

        let closed = generate_cone(0.3, 0.4, 16, false);
        assert_eq!(closed.vertex_count(), 17 * 2 + 1 + 17);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9);
        assert_eq!(plane.indices.len(), 24);
        assert_outward_winding(&plane);
    }
}
