use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::{camera_utils::PerspectiveCamera, orbit_controls::OrbitControls};

/// Maps raw mouse and keyboard input onto [`OrbitControls`]
///
/// Left drag orbits, shift + left drag pans, the wheel zooms.
#[derive(Debug, Clone)]
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32, pan_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Feeds a device event to the controls; returns true when input was queued
    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        camera: &PerspectiveCamera,
        controls: &mut OrbitControls,
    ) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // left mouse button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 40.0,
                };
                if scroll == 0.0 {
                    return false;
                }
                // Scrolling up zooms in
                controls.dolly((1.0 + self.zoom_speed).powf(-scroll));
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                let (dx, dy) = (delta.0 as f32, delta.1 as f32);
                if self.is_shift_held {
                    controls.pan(camera, -dx * self.pan_speed, dy * self.pan_speed);
                } else {
                    controls.rotate_left(dx * self.rotate_speed);
                    controls.rotate_up(dy * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        self.process_key(event.physical_key, event.state);
    }

    /// Tracks the pan modifier; other keys are ignored
    pub fn process_key(&mut self, key: PhysicalKey, state: ElementState) {
        if let PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) = key {
            let held = state == ElementState::Pressed;
            if held != self.is_shift_held {
                log::trace!("shift held: {held}");
            }
            self.is_shift_held = held;
        }
    }

    /// Forgets held buttons, e.g. after the window loses focus
    pub fn release_all(&mut self) {
        self.is_mouse_pressed = false;
        self.is_shift_held = false;
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.005, 0.1, 0.001)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, InnerSpace, Point3};

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);
        camera.position = Point3::new(8.0, 5.0, 8.0);
        camera
    }

    #[test]
    fn motion_without_button_is_ignored() {
        let mut controller = CameraController::default();
        let mut controls = OrbitControls::default();
        let queued = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (10.0, 0.0) },
            &camera(),
            &mut controls,
        );
        assert!(!queued);
        assert!(!controls.is_settling());
    }

    #[test]
    fn drag_queues_rotation() {
        let mut controller = CameraController::default();
        let mut controls = OrbitControls::default();
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            &camera(),
            &mut controls,
        );

        let queued = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (10.0, 4.0) },
            &camera(),
            &mut controls,
        );
        assert!(queued);
        assert!(controls.is_settling());
    }

    #[test]
    fn wheel_up_moves_camera_closer() {
        let mut controller = CameraController::default();
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        let before = (cam.position - controls.target).magnitude2();

        controller.process_events(
            &DeviceEvent::MouseWheel {
                delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            },
            &cam,
            &mut controls,
        );
        controls.update(&mut cam);

        assert!((cam.position - controls.target).magnitude2() < before);
    }

    #[test]
    fn release_all_drops_held_button() {
        let mut controller = CameraController::default();
        let mut controls = OrbitControls::default();
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            &camera(),
            &mut controls,
        );
        controller.release_all();

        let queued = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (10.0, 4.0) },
            &camera(),
            &mut controls,
        );
        assert!(!queued);
    }

    fn press_left(controller: &mut CameraController, controls: &mut OrbitControls) {
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            &camera(),
            controls,
        );
    }

    #[test]
    fn shift_drag_pans_the_target() {
        let mut controller = CameraController::default();
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        controller.process_key(PhysicalKey::Code(KeyCode::ShiftLeft), ElementState::Pressed);
        press_left(&mut controller, &mut controls);

        controller.process_events(&DeviceEvent::MouseMotion { delta: (200.0, 0.0) }, &cam, &mut controls);
        controls.update(&mut cam);

        assert!((controls.target - Point3::new(0.0, 0.0, 0.0)).magnitude() > 0.0);
    }

    #[test]
    fn shift_release_returns_drag_to_orbit() {
        let mut controller = CameraController::default();
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        controller.process_key(PhysicalKey::Code(KeyCode::ShiftRight), ElementState::Pressed);
        controller.process_key(PhysicalKey::Code(KeyCode::ShiftRight), ElementState::Released);
        press_left(&mut controller, &mut controls);

        controller.process_events(&DeviceEvent::MouseMotion { delta: (200.0, 0.0) }, &cam, &mut controls);
        controls.update(&mut cam);

        assert_eq!(controls.target, Point3::new(0.0, 0.0, 0.0));
        assert!(controls.is_settling());
    }
}
