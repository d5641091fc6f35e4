//! # Scene Manager
//!
//! Owns everything that changes when the user picks another vignette: the
//! render graph, the camera and its orbit controls, the audio listener and
//! the registry of live objects keyed by placement name.
//!
//! The static room (floor, walls, global lights) is built once in
//! [`SceneManager::new`]. [`SceneManager::load_scene`] tears down every
//! registered object before building the next scene, so a frame never shows
//! two scenes and the graph never accumulates stale nodes.
//!
//! ```rust
//! use vignette::catalog::SceneCatalog;
//! use vignette::config::ViewerConfig;
//! use vignette::gfx::rendering::HeadlessBackend;
//! use vignette::scene_manager::SceneManager;
//!
//! let catalog = SceneCatalog::builtin();
//! let mut manager = SceneManager::new(HeadlessBackend::default(), &ViewerConfig::default());
//!
//! manager.load_scene(catalog.get("SC01").unwrap());
//! manager.load_scene(catalog.get("SC02").unwrap());
//! manager.animate().unwrap();
//!
//! let mut names: Vec<_> = manager.object_names().collect();
//! names.sort();
//! assert_eq!(names, ["Jordan", "Pug", "ReadingLamp", "SideCouch"]);
//! ```

pub mod models;

use std::collections::HashMap;

use cgmath::{Deg, Point3};

use crate::audio::{attach_audio, AudioCue, AudioListener};
use crate::catalog::{ObjectKind, ObjectPlacement, SceneDescription};
use crate::config::ViewerConfig;
use crate::error::RenderError;
use crate::gfx::camera::{OrbitControls, PerspectiveCamera};
use crate::gfx::rendering::{RenderBackend, UiOverlay};
use crate::gfx::scene::{NodeKey, SceneGraph};

/// A placement that is currently instantiated in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct LiveObject {
    pub key: NodeKey,
    pub kind: ObjectKind,
    /// Authored size; recorded only, models have fixed dimensions
    pub size: Option<[f32; 3]>,
    pub audio: Option<AudioCue>,
}

/// Title and description of the loaded scene, as shown to the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneCaption {
    pub title: String,
    pub description: String,
}

pub struct SceneManager<B: RenderBackend> {
    graph: SceneGraph,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    listener: AudioListener,
    registry: HashMap<String, LiveObject>,
    /// Registry names in placement order
    order: Vec<String>,
    caption: SceneCaption,
    backend: B,
}

impl<B: RenderBackend> SceneManager<B> {
    /// Builds the room, its lights and the initial camera around `backend`
    pub fn new(backend: B, config: &ViewerConfig) -> Self {
        let (width, height) = backend.size();
        let camera_config = &config.camera;

        let mut camera = PerspectiveCamera::new(
            Deg(camera_config.fov_degrees),
            1.0,
            camera_config.near,
            camera_config.far,
        );
        camera.resize_projection(width, height);
        camera.position = Point3::from(camera_config.position);
        camera.look_at = Point3::from(camera_config.look_at);

        let mut controls = OrbitControls::new(config.controls);
        controls.target = camera.look_at;
        controls.update(&mut camera);

        let mut graph = SceneGraph::new();
        models::add_lights(&mut graph);
        models::add_room(&mut graph);

        let mut listener = AudioListener::new(0);
        listener.position = camera.position;

        log::debug!("room ready with {} nodes", graph.len());

        Self {
            graph,
            camera,
            controls,
            listener,
            registry: HashMap::new(),
            order: Vec::new(),
            caption: SceneCaption::default(),
            backend,
        }
    }

    /// Replaces the current vignette with `description`
    pub fn load_scene(&mut self, description: &SceneDescription) {
        let removed = self.clear_objects();
        log::info!(
            "loading '{}' ({} placements, {} nodes released)",
            description.title,
            description.objects.len(),
            removed
        );

        for placement in &description.objects {
            self.create_object(placement);
        }

        if let Some(pose) = &description.camera {
            self.camera.position = pose.position();
            self.camera.look_at = pose.look_at();
            self.controls.target = pose.look_at();
            self.controls.reset_input();
            self.controls.update(&mut self.camera);
            self.listener.position = self.camera.position;
        }

        self.caption = SceneCaption {
            title: description.title.clone(),
            description: description.description.clone(),
        };
    }

    /// Drops every registered object from the graph; returns removed node count
    fn clear_objects(&mut self) -> usize {
        let mut removed = 0;
        for name in self.order.drain(..) {
            if let Some(object) = self.registry.remove(&name) {
                removed += self.graph.remove(object.key);
            }
        }
        debug_assert!(self.registry.is_empty());
        removed
    }

    fn create_object(&mut self, placement: &ObjectPlacement) {
        let Some(key) = models::build(
            &mut self.graph,
            &placement.kind,
            &placement.name,
            placement.position(),
        ) else {
            log::trace!(
                "skipping '{}': no model for type '{}'",
                placement.name,
                placement.kind
            );
            return;
        };

        if let Some(node) = self.graph.get_mut(key) {
            node.transform.rotation = placement.rotation();
        }
        if let Some(cue) = &placement.audio {
            attach_audio(&mut self.graph, &self.listener, key, cue);
        }

        log::debug!(
            "placed {} '{}' at {:?}",
            placement.kind,
            placement.name,
            placement.position
        );

        let object = LiveObject {
            key,
            kind: placement.kind.clone(),
            size: placement.size,
            audio: placement.audio.clone(),
        };
        if let Some(previous) = self.registry.insert(placement.name.clone(), object) {
            log::warn!(
                "duplicate object name '{}', replacing the earlier {}",
                placement.name,
                previous.kind
            );
            self.graph.remove(previous.key);
            self.order.retain(|name| name != &placement.name);
        }
        self.order.push(placement.name.clone());
    }

    /// Advances the orbit controls and renders one frame
    pub fn animate(&mut self) -> Result<(), RenderError> {
        self.step_controls();
        self.backend.render(&self.graph, &self.camera, None)
    }

    /// Same as [`animate`](Self::animate) with a UI pass drawn over the scene
    pub fn animate_with_overlay(&mut self, overlay: &mut dyn UiOverlay) -> Result<(), RenderError> {
        self.step_controls();
        self.backend.render(&self.graph, &self.camera, Some(overlay))
    }

    fn step_controls(&mut self) {
        self.controls.update(&mut self.camera);
        self.listener.position = self.camera.position;
    }

    /// Matches camera aspect and output surface to a new viewport size
    pub fn on_window_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        self.camera.resize_projection(width, height);
        self.backend.resize(width, height);
    }

    pub fn object(&self, name: &str) -> Option<&LiveObject> {
        self.registry.get(name)
    }

    /// Registered names in placement order
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &LiveObject)> {
        self.order
            .iter()
            .filter_map(|name| self.registry.get(name).map(|object| (name.as_str(), object)))
    }

    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    pub fn caption(&self) -> &SceneCaption {
        &self.caption
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Camera and controls together, for feeding user input
    pub fn camera_rig(&mut self) -> (&PerspectiveCamera, &mut OrbitControls) {
        (&self.camera, &mut self.controls)
    }

    pub fn listener(&self) -> &AudioListener {
        &self.listener
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
