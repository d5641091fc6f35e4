//! The seam between scene state and whatever draws it
//!
//! [`SceneManager`](crate::scene_manager::SceneManager) only ever talks to a
//! [`RenderBackend`]. The wgpu [`RenderEngine`](super::RenderEngine) draws to
//! a window; [`HeadlessBackend`] draws nothing and records what it was asked
//! to draw.

use crate::error::RenderError;
use crate::gfx::camera::PerspectiveCamera;
use crate::gfx::scene::SceneGraph;

/// Something that can record extra draw commands on top of a rendered frame
pub trait UiOverlay {
    fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    );
}

pub trait RenderBackend {
    /// Draws one frame of `graph` seen through `camera`
    fn render(
        &mut self,
        graph: &SceneGraph,
        camera: &PerspectiveCamera,
        overlay: Option<&mut dyn UiOverlay>,
    ) -> Result<(), RenderError>;

    /// Resizes the output surface; zero-sized requests are ignored
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);
}

/// What the last headless frame contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    pub lights: usize,
    pub emitters: usize,
    pub overlay_drawn: bool,
}

/// Backend with no GPU behind it
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    width: u32,
    height: u32,
    frames: u64,
    resizes: u64,
    last: FrameStats,
    fail_next: bool,
}

impl HeadlessBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            frames: 0,
            resizes: 0,
            last: FrameStats::default(),
            fail_next: false,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of resizes that actually changed the surface size
    pub fn resizes(&self) -> u64 {
        self.resizes
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last
    }

    /// Makes the next `render` call fail as if the surface ran out of memory
    pub fn fail_next_frame(&mut self) {
        self.fail_next = true;
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(1200, 800)
    }
}

impl RenderBackend for HeadlessBackend {
    fn render(
        &mut self,
        graph: &SceneGraph,
        _camera: &PerspectiveCamera,
        overlay: Option<&mut dyn UiOverlay>,
    ) -> Result<(), RenderError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(RenderError::OutOfMemory);
        }

        self.last = FrameStats {
            meshes: graph.meshes().len(),
            lights: graph.lights().len(),
            emitters: graph.audio_emitters().len(),
            overlay_drawn: overlay.is_some(),
        };
        self.frames += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.resizes += 1;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Light, Node, NodeKind};
    use cgmath::Deg;

    #[test]
    fn records_frame_contents() {
        let mut graph = SceneGraph::new();
        graph.add_to_root(Node::new("sun", NodeKind::Light(Light::directional(0xffffff, 0.8))));
        let camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);

        let mut backend = HeadlessBackend::default();
        backend.render(&graph, &camera, None).unwrap();

        assert_eq!(backend.frames(), 1);
        assert_eq!(backend.last_frame().lights, 1);
        assert_eq!(backend.last_frame().meshes, 0);
    }

    #[test]
    fn injected_failure_affects_one_frame() {
        let graph = SceneGraph::new();
        let camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);
        let mut backend = HeadlessBackend::default();

        backend.fail_next_frame();
        assert!(backend.render(&graph, &camera, None).is_err());
        assert!(backend.render(&graph, &camera, None).is_ok());
        assert_eq!(backend.frames(), 1);
    }

    #[test]
    fn resize_ignores_zero_and_repeats() {
        let mut backend = HeadlessBackend::new(1200, 800);
        backend.resize(0, 600);
        backend.resize(1200, 800);
        assert_eq!(backend.resizes(), 0);
        backend.resize(800, 600);
        backend.resize(800, 600);
        assert_eq!(backend.size(), (800, 600));
        assert_eq!(backend.resizes(), 1);
    }
}
