//! Windowed viewer: winit event loop around a [`SceneManager`]

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::catalog::SceneCatalog;
use crate::config::ViewerConfig;
use crate::error::AppError;
use crate::frame::FrameTicker;
use crate::gfx::{camera::CameraController, rendering::RenderEngine};
use crate::scene_manager::SceneManager;
use crate::ui::{scene_panel, SceneSelection, UiManager};

pub struct VignetteApp {
    config: ViewerConfig,
    catalog: SceneCatalog,
    initial_scene: String,
}

impl VignetteApp {
    /// Creates a viewer that opens on `initial_scene`, falling back to the
    /// first catalog entry when the key is unknown
    pub fn new(config: ViewerConfig, catalog: SceneCatalog, initial_scene: impl Into<String>) -> Self {
        Self {
            config,
            catalog,
            initial_scene: initial_scene.into(),
        }
    }

    /// Opens the window and blocks until it is closed
    pub fn run(self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut state = AppState::new(self.config, self.catalog, &self.initial_scene);

        event_loop.run_app(&mut state)?;

        match state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

struct AppState {
    config: ViewerConfig,
    catalog: SceneCatalog,
    selection: SceneSelection,
    controller: CameraController,
    ticker: FrameTicker,
    window: Option<Arc<Window>>,
    scene: Option<SceneManager<RenderEngine>>,
    ui_manager: Option<UiManager>,
    error: Option<AppError>,
}

impl AppState {
    fn new(config: ViewerConfig, catalog: SceneCatalog, initial_scene: &str) -> Self {
        let selection = SceneSelection::new(&catalog, initial_scene);
        let input = &config.input;
        let controller = CameraController::new(input.rotate_speed, input.zoom_speed, input.pan_speed);
        let ticker = FrameTicker::with_fps(config.target_fps);

        Self {
            config,
            catalog,
            selection,
            controller,
            ticker,
            window: None,
            scene: None,
            ui_manager: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_config = &self.config.window;
        let attributes = Window::default_attributes()
            .with_title(window_config.title.as_str())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let (width, height) = window.inner_size().into();
        let window_clone = window.clone();
        let mut renderer =
            pollster::block_on(async move { RenderEngine::new(window_clone, width, height).await })?;
        renderer.set_clear_color(self.config.background);

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
            self.config.ui_font_size,
        );

        let mut scene = SceneManager::new(renderer, &self.config);
        if let Some(description) = self
            .selection
            .current_key()
            .and_then(|key| self.catalog.get(key))
        {
            scene.load_scene(description);
        }

        window.request_redraw();
        self.window = Some(window);
        self.ui_manager = Some(ui_manager);
        self.scene = Some(scene);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(scene), Some(ui_manager)) = (
            self.window.as_ref(),
            self.scene.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        let selection = &mut self.selection;
        let mut picked = None;
        ui_manager.update_logic(window, |ui| {
            picked = scene_panel(ui, selection, scene.caption(), scene.objects());
        });

        if let Err(e) = scene.animate_with_overlay(ui_manager) {
            self.fail(event_loop, e.into());
            return;
        }

        // Switch after the frame so the old scene is never half torn down on screen
        if let Some(description) = picked.and_then(|key| self.catalog.get(&key)) {
            scene.load_scene(description);
        }
    }
}

/// Handles the parts of a window event that must not be lost to UI capture:
/// quitting, the pan modifier and focus loss. Returns true to exit.
fn route_before_ui(controller: &mut CameraController, event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if requests_exit(event.physical_key, event.state) {
                return true;
            }
            controller.process_keyed_events(event);
            false
        }
        WindowEvent::Focused(false) => {
            controller.release_all();
            false
        }
        _ => false,
    }
}

fn requests_exit(key: PhysicalKey, state: ElementState) -> bool {
    state == ElementState::Pressed && key == PhysicalKey::Code(KeyCode::Escape)
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if route_before_ui(&mut self.controller, &event) {
            event_loop.exit();
            return;
        }

        // UI gets input next
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.on_window_resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.ui_manager.as_ref().is_some_and(UiManager::wants_input) {
            return;
        }
        if let Some(scene) = self.scene.as_mut() {
            let (camera, controls) = scene.camera_rig();
            self.controller.process_events(&event, camera, controls);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            if self.ticker.poll() {
                window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.ticker.next_deadline()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{OrbitControls, PerspectiveCamera};
    use cgmath::Deg;

    #[test]
    fn only_pressing_escape_exits() {
        let escape = PhysicalKey::Code(KeyCode::Escape);
        assert!(requests_exit(escape, ElementState::Pressed));
        assert!(!requests_exit(escape, ElementState::Released));
        assert!(!requests_exit(PhysicalKey::Code(KeyCode::ShiftLeft), ElementState::Pressed));
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);
        let mut controls = OrbitControls::default();
        let mut controller = CameraController::default();
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            &camera,
            &mut controls,
        );

        assert!(!route_before_ui(&mut controller, &WindowEvent::Focused(false)));

        let queued = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (10.0, 0.0) },
            &camera,
            &mut controls,
        );
        assert!(!queued);
    }

    #[test]
    fn other_window_events_pass_through() {
        let mut controller = CameraController::default();
        assert!(!route_before_ui(&mut controller, &WindowEvent::Focused(true)));
        assert!(!route_before_ui(&mut controller, &WindowEvent::CloseRequested));
    }
}
