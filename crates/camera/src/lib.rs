#![warn(missing_docs)]
//! Camera and viewport source for the overlay.
//!
//! The overlay samples exactly one [`CameraFrame`] per rendered frame. A frame
//! carries the field of view, the viewport size in pixels and the camera's
//! world matrix, which is everything the billboard projection needs.

use glam::{DMat4, DVec2, DVec3, Mat4, Vec3};

/// Snapshot of the camera taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Vertical field of view in radians (zoom already applied).
    pub fov: f64,
    /// Viewport size in pixels.
    pub viewport: DVec2,
    /// Camera-to-world transform. Columns are right, up, backward, position.
    pub world: DMat4,
}

impl CameraFrame {
    /// Frame for a camera at the world origin looking down -Z.
    pub fn identity(width: u32, height: u32, fov: f64) -> Self {
        Self {
            fov,
            viewport: DVec2::new(f64::from(width), f64::from(height)),
            world: DMat4::IDENTITY,
        }
    }

    /// Camera forward direction in world space.
    pub fn forward(&self) -> DVec3 {
        -self.world.z_axis.truncate()
    }

    /// Camera left direction in world space.
    pub fn left(&self) -> DVec3 {
        -self.world.x_axis.truncate()
    }

    /// Camera up direction in world space.
    pub fn up(&self) -> DVec3 {
        self.world.y_axis.truncate()
    }

    /// Camera position in world space.
    pub fn position(&self) -> DVec3 {
        self.world.w_axis.truncate()
    }
}

/// First-person camera with position, orientation, zoom and viewport.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Field of view in radians before zoom.
    pub fov: f32,
    /// Zoom factor; the effective fov is `fov / zoom`.
    pub zoom: f32,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            zoom: 1.0,
            width: 1920,
            height: 1080,
        }
    }
}

impl Camera {
    /// Create a new camera with the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set the viewport size in pixels.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.set_viewport(width, height);
        self
    }

    /// Builder: set the field of view in degrees.
    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.fov = degrees.to_radians();
        self
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Get the right direction vector (camera's local X axis).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Get the up direction vector (camera's local Y axis).
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Field of view with zoom applied, in radians.
    pub fn fov_with_zoom(&self) -> f32 {
        self.fov / self.zoom.max(f32::EPSILON)
    }

    /// Camera-to-world matrix (inverse of the view matrix).
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.right().extend(0.0),
            self.up().extend(0.0),
            (-self.forward()).extend(0.0),
            self.position.extend(1.0),
        )
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Rotate the camera (add to yaw and pitch).
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation delta in radians
    /// * `delta_pitch` - Vertical rotation delta in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        // Clamp pitch to avoid gimbal lock
        const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Normalize yaw to [0, 2π]
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Update the viewport (call when window resizes).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Sample the camera for one overlay frame.
    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            fov: f64::from(self.fov_with_zoom()),
            viewport: DVec2::new(f64::from(self.width), f64::from(self.height)),
            world: self.world_matrix().as_dmat4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn camera_default_initialization() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::ZERO);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!((camera.width, camera.height), (1920, 1080));
    }

    #[test]
    fn camera_basis_is_right_handed() {
        let camera = Camera::default();
        assert!(approx(camera.forward(), Vec3::X));
        assert!(approx(camera.right(), Vec3::Z));
        assert!(approx(camera.up(), Vec3::Y));
    }

    #[test]
    fn world_matrix_inverts_view_matrix() {
        let mut camera = Camera::new(Vec3::new(3.0, 4.0, -2.0));
        camera.rotate(0.7, 0.3);
        let product = camera.world_matrix() * camera.view_matrix();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn camera_rotation_clamps_pitch() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn frame_carries_basis_and_viewport() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0)).with_viewport(1280, 720);
        let frame = camera.frame();
        assert_eq!(frame.viewport, DVec2::new(1280.0, 720.0));
        assert!((frame.position() - DVec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!((frame.left() + camera.right().as_dvec3()).length() < 1e-6);
        assert!((frame.up() - camera.up().as_dvec3()).length() < 1e-6);
        assert!((frame.forward() - camera.forward().as_dvec3()).length() < 1e-6);
    }

    #[test]
    fn zoom_narrows_fov() {
        let mut camera = Camera::default();
        camera.zoom = 2.0;
        assert!((camera.fov_with_zoom() - camera.fov / 2.0).abs() < 1e-6);
    }

    #[test]
    fn identity_frame_looks_down_negative_z() {
        let frame = CameraFrame::identity(1920, 1080, 1.0);
        assert_eq!(frame.forward(), DVec3::NEG_Z);
        assert_eq!(frame.left(), DVec3::NEG_X);
        assert_eq!(frame.up(), DVec3::Y);
    }
}
