//! # 3D Camera
//!
//! Perspective camera with look-at orientation. Matrices follow the usual
//! right-handed, Y-up conventions and are computed on demand.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// 3D perspective camera
///
/// # Coordinate System
/// Right-handed, Y-up world space:
/// - X+ = Right
/// - Y+ = Up
/// - Z+ = Towards the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to keep window drags quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Distance from the camera to its target
    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection for the current aspect ratio
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `projection * view`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    /// 75 degree camera at (3, 1.5, 5) with 16:9 aspect, clipping 0.1..1000
    fn default() -> Self {
        Self::perspective(Vec3::new(3.0, 1.5, 5.0), 75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Vec4};
    use approx::assert_relative_eq;

    #[test]
    fn test_view_matrix_moves_target_in_front() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let view = camera.view_matrix();
        let target_in_view = view.transform_point(&Point3::origin());
        assert_relative_eq!(target_in_view.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_projection_depends_on_aspect() {
        let mut camera = Camera::default();
        let wide = camera.projection_matrix();
        camera.set_aspect_ratio(1.0);
        let square = camera.projection_matrix();
        assert!(wide[(0, 0)] < square[(0, 0)]);
        assert_relative_eq!(wide[(1, 1)], square[(1, 1)]);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::default();
        let clip = camera.view_projection_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_distance_to_target() {
        let camera = Camera::perspective(Vec3::new(3.0, 0.0, 4.0), 75.0, 1.0, 0.1, 1000.0);
        assert_relative_eq!(camera.distance_to_target(), 5.0);
    }
}
