//! Global uniform bindings for camera and scene lighting
//!
//! Everything shared by all draws in a frame lives in one uniform bound at
//! group 0: the camera, the summed ambient term, one directional light and up
//! to [`MAX_POINT_LIGHTS`] point lights. The layout MUST match `Globals` in
//! `scene.wgsl`.

use cgmath::{EuclideanSpace, InnerSpace};

use crate::{
    gfx::{
        camera::camera_utils::CameraUniform,
        scene::{LightKind, WorldLight},
    },
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

pub const MAX_POINT_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    /// Cutoff distance, 0.0 for none
    pub range: f32,
    /// Color premultiplied by intensity
    pub color: [f32; 3],
    pub _padding: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    /// Unit vector pointing from the surface towards the sun
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    /// x holds the number of valid entries in `point_lights`
    pub point_count: [u32; 4],
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
}

impl Default for GlobalUniform {
    fn default() -> Self {
        Self::new(CameraUniform::default(), &[])
    }
}

impl GlobalUniform {
    /// Packs the camera and the lights found in the graph
    ///
    /// Ambient lights are summed, the first directional light becomes the sun
    /// and point lights beyond the fixed limit are dropped.
    pub fn new(camera: CameraUniform, lights: &[WorldLight<'_>]) -> Self {
        let mut uniform = Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [0.0; 4],
            sun_direction: [0.0, 1.0, 0.0, 0.0],
            sun_color: [0.0; 4],
            point_count: [0; 4],
            point_lights: [PointLightRaw::default(); MAX_POINT_LIGHTS],
        };

        let mut has_sun = false;
        let mut points = 0usize;
        for world in lights {
            let radiance = world.light.radiance();
            match world.light.kind {
                LightKind::Ambient => {
                    for (sum, value) in uniform.ambient.iter_mut().zip(radiance) {
                        *sum += value;
                    }
                }
                LightKind::Directional if !has_sun => {
                    let towards = world.position.to_vec();
                    if towards.magnitude2() > 0.0 {
                        let dir = towards.normalize();
                        uniform.sun_direction = [dir.x, dir.y, dir.z, 0.0];
                    }
                    uniform.sun_color = [radiance[0], radiance[1], radiance[2], 0.0];
                    has_sun = true;
                }
                LightKind::Directional => {
                    log::trace!("ignoring extra directional light {:?}", world.key);
                }
                LightKind::Point { range } => {
                    if points == MAX_POINT_LIGHTS {
                        log::warn!("more than {MAX_POINT_LIGHTS} point lights, dropping {:?}", world.key);
                        continue;
                    }
                    uniform.point_lights[points] = PointLightRaw {
                        position: world.position.into(),
                        range,
                        color: radiance,
                        _padding: 0.0,
                    };
                    points += 1;
                }
            }
        }
        uniform.point_count[0] = points as u32;
        uniform
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Bind group layout and bind group for the global uniform (group 0)
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let layout = binding_types::single_entry_layout(
            device,
            "Globals Bind Group Layout",
            binding_types::uniform(),
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings { layout, bind_group }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Light, Node, NodeKind, SceneGraph};
    use approx::assert_relative_eq;

    #[test]
    fn layout_is_std140_sized() {
        // 16 + 64 + 4 * 16 + 8 * 32
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 400);
        assert_eq!(std::mem::size_of::<PointLightRaw>(), 32);
    }

    #[test]
    fn packs_room_and_lamp_lights() {
        let mut graph = SceneGraph::new();
        graph.add_to_root(Node::new("ambient", NodeKind::Light(Light::ambient(0xffffff, 0.5))));
        graph.add_to_root(Node::new("sun", NodeKind::Light(Light::directional(0xffffff, 0.8))).at(5.0, 5.0, 5.0));
        graph.add_to_root(Node::new("lamp", NodeKind::Light(Light::point(0xffa95c, 1.0, 5.0))).at(4.0, 1.5, 0.0));

        let uniform = GlobalUniform::new(CameraUniform::default(), &graph.lights());

        assert_relative_eq!(uniform.ambient[0], 0.5);
        assert_relative_eq!(uniform.sun_direction[1], 1.0 / 3.0f32.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(uniform.sun_color[2], 0.8);
        assert_eq!(uniform.point_count[0], 1);
        assert_eq!(uniform.point_lights[0].position, [4.0, 1.5, 0.0]);
        assert_eq!(uniform.point_lights[0].range, 5.0);
    }

    #[test]
    fn point_lights_beyond_the_limit_are_dropped() {
        let mut graph = SceneGraph::new();
        for i in 0..(MAX_POINT_LIGHTS + 3) {
            graph.add_to_root(
                Node::new("p", NodeKind::Light(Light::point(0xffffff, 1.0, 0.0))).at(i as f32, 0.0, 0.0),
            );
        }
        let uniform = GlobalUniform::new(CameraUniform::default(), &graph.lights());
        assert_eq!(uniform.point_count[0] as usize, MAX_POINT_LIGHTS);
    }
}
