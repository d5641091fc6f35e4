//! WGPU-based render engine
//!
//! Draws a [`SceneGraph`] into a window surface with a single forward pass:
//! one pipeline, one global uniform (camera and lights) and a per-draw
//! uniform addressed by dynamic offset. Vertex and index buffers are cached
//! per [`ShapeKey`], so the many identical spheres and boxes a scene uses
//! share one upload.

use std::{collections::HashMap, sync::Arc};

use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::gfx::{
    camera::PerspectiveCamera,
    resources::{GlobalBindings, GlobalUBO, GlobalUniform, TextureResource},
    scene::{SceneGraph, Shape, ShapeKey, WorldMesh},
};
use crate::wgpu_utils::{binding_types, DynamicUniformBuffer};

use super::backend::{RenderBackend, UiOverlay};
use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SCENE_PIPELINE: &str = "Scene";
const INITIAL_DRAW_CAPACITY: usize = 64;

/// Per-draw uniform, MUST match `Object` in `scene.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// roughness, metalness, double sided (0 or 1), unused
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn from_world_mesh(world_mesh: &WorldMesh<'_>) -> Self {
        let material = &world_mesh.mesh.material;
        let [r, g, b] = material.base_color;
        Self {
            model: world_mesh.world.into(),
            color: [r, g, b, 1.0],
            params: [
                material.roughness,
                material.metalness,
                if material.double_sided { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Uploaded vertex and index buffers for one shape
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, shape: &Shape) -> Self {
        let geometry = shape.geometry();
        let vertices = geometry.to_vertices();
        log::debug!(
            "uploading {:?}: {} vertices, {} triangles",
            shape,
            geometry.vertex_count(),
            geometry.triangle_count()
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: wgpu::TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: DynamicUniformBuffer<ObjectUniform>,
    object_bind_group: wgpu::BindGroup,
    mesh_cache: HashMap<ShapeKey, GpuMesh>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::UnsupportedSurface)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let object_layout = binding_types::single_entry_layout(
            &device,
            "Object Bind Group Layout",
            binding_types::dynamic_uniform(std::mem::size_of::<ObjectUniform>() as u64),
        );
        let object_buffer = DynamicUniformBuffer::new(&device, INITIAL_DRAW_CAPACITY);
        let object_bind_group = Self::create_object_bind_group(&device, &object_layout, &object_buffer);

        let device: Arc<wgpu::Device> = Arc::new(device);
        let queue: Arc<wgpu::Queue> = Arc::new(queue);
        let mut pipeline_manager = PipelineManager::new(device.clone());

        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        // Culling stays off so double-sided materials see their back faces;
        // the shader discards back faces of single-sided ones
        pipeline_manager.register_pipeline(
            SCENE_PIPELINE,
            PipelineConfig::default()
                .with_label("SCENE")
                .with_shader("scene")
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_bind_group_layouts(vec![
                    global_bindings.layout().clone(),
                    object_layout.clone(),
                ]),
        );
        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{error}");
            }
        }

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_layout,
            object_buffer,
            object_bind_group,
            mesh_cache: HashMap::new(),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.12,
                a: 1.0,
            },
        })
    }

    fn create_object_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &DynamicUniformBuffer<ObjectUniform>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.binding_resource(),
            }],
        })
    }

    pub fn set_clear_color(&mut self, [r, g, b]: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Uploads per-draw uniforms and any shapes not seen before
    fn prepare_draws(&mut self, meshes: &[WorldMesh<'_>]) {
        for world_mesh in meshes {
            let shape = world_mesh.mesh.shape;
            self.mesh_cache
                .entry(shape.key())
                .or_insert_with(|| GpuMesh::upload(&self.device, &shape));
        }

        if self.object_buffer.ensure_capacity(&self.device, meshes.len()) {
            self.object_bind_group =
                Self::create_object_bind_group(&self.device, &self.object_layout, &self.object_buffer);
        }
        let uniforms: Vec<ObjectUniform> = meshes.iter().map(ObjectUniform::from_world_mesh).collect();
        self.object_buffer.write(&self.queue, &uniforms);
    }
}

impl RenderBackend for RenderEngine {
    fn render(
        &mut self,
        graph: &SceneGraph,
        camera: &PerspectiveCamera,
        overlay: Option<&mut dyn UiOverlay>,
    ) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(e.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.global_ubo
            .update_content(&self.queue, GlobalUniform::new(camera.uniform(), &graph.lights()));

        let meshes = graph.meshes();
        self.prepare_draws(&meshes);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(SCENE_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for (index, world_mesh) in meshes.iter().enumerate().take(self.object_buffer.capacity()) {
                    let Some(gpu_mesh) = self.mesh_cache.get(&world_mesh.mesh.shape.key()) else {
                        continue;
                    };
                    render_pass.set_bind_group(1, &self.object_bind_group, &[self.object_buffer.offset(index)]);
                    render_pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
                }
            }
        }

        if let Some(overlay) = overlay {
            overlay.draw(&self.device, &self.queue, &mut encoder, &surface_texture_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.config.width, self.config.height) {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Material, Mesh, Node, NodeKind};

    #[test]
    fn object_uniform_matches_the_shader_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 96);
    }

    #[test]
    fn object_uniform_carries_material_and_world_matrix() {
        let mut graph = SceneGraph::new();
        let shade = Mesh::new(
            Shape::Cone {
                radius: 0.3,
                height: 0.4,
                segments: 32,
                open_ended: true,
            },
            Material::from_hex(0xeeeeee).with_roughness(0.5).double_sided(),
        );
        graph.add_to_root(Node::new("shade", NodeKind::Mesh(shade)).at(4.0, 1.6, 0.0));

        let meshes = graph.meshes();
        let uniform = ObjectUniform::from_world_mesh(&meshes[0]);

        assert_eq!(uniform.model[3][..3], [4.0, 1.6, 0.0]);
        assert_eq!(uniform.params, [0.5, 0.0, 1.0, 0.0]);
        assert_eq!(uniform.color[3], 1.0);
    }
}
