pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_controls;

pub use camera_controller::CameraController;
pub use camera_utils::{Camera, CameraUniform, PerspectiveCamera};
pub use orbit_controls::{OrbitControls, OrbitControlsConfig, Spherical};
