//! Damped orbit controls
//!
//! The controls own the orbit target and the pending user input. Every call
//! to [`OrbitControls::update`] re-derives spherical coordinates from the
//! camera's current position, so moving the camera directly (a scene's
//! authored pose) never snaps on the next frame.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3, Zero};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use super::camera_utils::PerspectiveCamera;

const EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitControlsConfig {
    pub enable_damping: bool,
    /// Share of the pending input applied per update
    pub damping_factor: f32,
    pub screen_space_panning: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits measured from +Y
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            screen_space_panning: false,
            min_distance: 3.0,
            max_distance: 15.0,
            min_polar_angle: 0.0,
            max_polar_angle: FRAC_PI_2,
        }
    }
}

/// Radius, polar angle from +Y (`phi`) and azimuth around Y from +Z (`theta`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius < EPS {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keeps phi away from the poles where the view basis degenerates
    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub config: OrbitControlsConfig,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vector3<f32>,
    scale: f32,
}

impl OrbitControls {
    pub fn new(config: OrbitControlsConfig) -> Self {
        Self {
            target: Point3::origin(),
            config,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vector3::zero(),
            scale: 1.0,
        }
    }

    /// Queues an azimuth rotation in radians
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    /// Queues a polar rotation in radians
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Queues a zoom; factors above 1.0 move the camera away
    pub fn dolly(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Queues a pan of the target in camera-relative units (fraction of the
    /// current distance). Without screen-space panning vertical motion slides
    /// along the floor plane instead of the camera's up vector.
    pub fn pan(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32) {
        let offset = camera.position - self.target;
        let distance = offset.magnitude();
        if distance < EPS {
            return;
        }

        let forward = (-offset).normalize();
        let right = forward.cross(camera.up);
        if right.magnitude2() < EPS {
            return;
        }
        let right = right.normalize();

        let up = if self.config.screen_space_panning {
            right.cross(forward).normalize()
        } else {
            camera.up.cross(right).normalize()
        };

        self.pan_offset += right * (dx * distance) + up * (dy * distance);
    }

    /// True while queued input is still being bled off
    pub fn is_settling(&self) -> bool {
        self.delta_theta.abs() > EPS
            || self.delta_phi.abs() > EPS
            || self.pan_offset.magnitude2() > EPS * EPS
            || (self.scale - 1.0).abs() > EPS
    }

    /// Drops all queued input
    pub fn reset_input(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vector3::zero();
        self.scale = 1.0;
    }

    /// Applies queued input to `camera` and aims it at the target
    ///
    /// Returns true when the camera position changed.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        let (share, decay) = if self.config.enable_damping {
            let factor = self.config.damping_factor.clamp(0.0, 1.0);
            (factor, 1.0 - factor)
        } else {
            (1.0, 0.0)
        };

        spherical.theta += self.delta_theta * share;
        spherical.phi += self.delta_phi * share;
        spherical.phi = spherical
            .phi
            .clamp(self.config.min_polar_angle, self.config.max_polar_angle);
        spherical.make_safe();

        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        self.target += self.pan_offset * share;

        camera.position = self.target + spherical.to_offset();
        camera.look_at = self.target;

        self.delta_theta *= decay;
        self.delta_phi *= decay;
        self.pan_offset *= decay;
        self.scale = 1.0;

        (camera.position - before).magnitude2() > EPS * EPS
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(OrbitControlsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Deg;

    fn camera_at(x: f32, y: f32, z: f32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);
        camera.position = Point3::new(x, y, z);
        camera
    }

    #[test]
    fn spherical_round_trips_an_offset() {
        let offset = Vector3::new(4.0, 4.0, 4.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert_relative_eq!(back, offset, epsilon = 1e-5);
    }

    #[test]
    fn update_without_input_keeps_a_valid_pose() {
        let mut camera = camera_at(6.0, 4.0, 4.0);
        let mut controls = OrbitControls::default();
        controls.target = Point3::new(2.0, 0.0, 0.0);

        controls.update(&mut camera);

        assert_relative_eq!(camera.position, Point3::new(6.0, 4.0, 4.0), epsilon = 1e-4);
        assert_eq!(camera.look_at, Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn distance_is_clamped() {
        let mut camera = camera_at(0.0, 0.0, 40.0);
        let mut controls = OrbitControls::default();
        controls.update(&mut camera);
        assert_relative_eq!((camera.position - controls.target).magnitude(), 15.0, epsilon = 1e-4);

        let mut close = camera_at(0.0, 1.0, 0.5);
        controls.update(&mut close);
        assert_relative_eq!((close.position - controls.target).magnitude(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn camera_never_goes_below_the_floor() {
        let mut camera = camera_at(0.0, -5.0, 5.0);
        let mut controls = OrbitControls::default();
        controls.update(&mut camera);
        assert!(camera.position.y >= -1e-4);
    }

    #[test]
    fn damping_applies_input_gradually() {
        let mut camera = camera_at(0.0, 5.0, 5.0);
        let mut controls = OrbitControls::default();
        let start = Spherical::from_offset(camera.position - controls.target).theta;

        controls.rotate_left(1.0);
        controls.update(&mut camera);
        let after_one = Spherical::from_offset(camera.position - controls.target).theta;
        assert_relative_eq!(after_one - start, -0.05, epsilon = 1e-4);
        assert!(controls.is_settling());

        for _ in 0..400 {
            controls.update(&mut camera);
        }
        let settled = Spherical::from_offset(camera.position - controls.target).theta;
        assert_relative_eq!(settled - start, -1.0, epsilon = 1e-3);
        assert!(!controls.is_settling());
    }

    #[test]
    fn undamped_input_applies_at_once() {
        let mut camera = camera_at(0.0, 5.0, 5.0);
        let mut controls = OrbitControls::new(OrbitControlsConfig {
            enable_damping: false,
            ..OrbitControlsConfig::default()
        });
        controls.dolly(2.0);
        controls.update(&mut camera);
        assert_relative_eq!(
            (camera.position - controls.target).magnitude(),
            2.0 * 50.0f32.sqrt(),
            epsilon = 1e-4
        );
        assert!(!controls.is_settling());
    }

    #[test]
    fn floor_panning_keeps_target_height() {
        let mut camera = camera_at(0.0, 5.0, 5.0);
        let mut controls = OrbitControls::new(OrbitControlsConfig {
            enable_damping: false,
            ..OrbitControlsConfig::default()
        });
        controls.pan(&camera, 0.1, 0.1);
        controls.update(&mut camera);
        assert_relative_eq!(controls.target.y, 0.0, epsilon = 1e-6);
        assert!(controls.target.x > 0.0);
        assert!(controls.target.z < 0.0);
    }
}
