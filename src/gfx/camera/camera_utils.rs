use cgmath::{perspective, Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Y-up perspective camera aimed at an explicit look-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(fovy: Deg<f32>, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 1.0),
            look_at: Point3::origin(),
            up: Vector3::unit_y(),
            fovy,
            aspect,
            znear,
            zfar,
        }
    }

    /// Updates the aspect ratio from a viewport size; a zero-height viewport
    /// leaves the camera untouched
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.look_at, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: [self.position.x, self.position.y, self.position.z, 1.0],
            view_proj: self.build_view_projection_matrix().into(),
        }
    }
}

impl Camera for PerspectiveCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::<f32>::identity().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Transform, Vector4};

    #[test]
    fn resize_sets_aspect_and_ignores_zero_height() {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.0, 0.1, 1000.0);
        camera.resize_projection(1200, 800);
        assert_eq!(camera.aspect, 1.5);
        camera.resize_projection(1200, 0);
        assert_eq!(camera.aspect, 1.5);
    }

    #[test]
    fn look_at_point_projects_to_screen_center() {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.5, 0.1, 1000.0);
        camera.position = Point3::new(6.0, 4.0, 4.0);
        camera.look_at = Point3::new(2.0, 0.0, 0.0);

        let clip = camera.build_view_projection_matrix() * Vector4::new(2.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        // wgpu depth range is 0..1
        assert!(ndc.z > 0.0 && ndc.z < 1.0);

        let behind = camera
            .view_matrix()
            .transform_point(Point3::new(2.0, 0.0, 0.0));
        assert!(behind.z < 0.0);
    }
}
