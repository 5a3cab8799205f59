//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene, camera and controls.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform from position, Euler angles in degrees and uniform scale
    ///
    /// Rotation order is X, then Y, then Z (intrinsic), matching the usual
    /// scene-graph convention for object rotations.
    pub fn from_euler_degrees(position: Vec3, rotation_degrees: Vec3, scale: f32) -> Self {
        let rotation = Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(rotation_degrees.x))
            * Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(rotation_degrees.y))
            * Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(rotation_degrees.z));
        Self {
            position,
            rotation,
            scale: Vec3::new(scale, scale, scale),
        }
    }

    /// Create a transform from the decomposed TRS arrays used by glTF nodes
    ///
    /// `rotation` is an `[x, y, z, w]` quaternion.
    pub fn from_trs(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        let [x, y, z, w] = rotation;
        Self {
            position: Vec3::from(translation),
            rotation: Quat::from_quaternion(Quaternion::new(w, x, y, z)),
            scale: Vec3::from(scale),
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }

    /// Combine this transform with another
    ///
    /// The result applies `other` first, then `self`.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Convert a `0xRRGGBB` color to normalized RGB components
    pub fn rgb_from_hex(hex: u32) -> Vec3 {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Vec3::new(channel(16), channel(8), channel(0))
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a right-handed perspective projection matrix (OpenGL clip space)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rgb_from_hex() {
        let color = utils::rgb_from_hex(0x87ceeb);
        assert_relative_eq!(color.x, 135.0 / 255.0);
        assert_relative_eq!(color.y, 206.0 / 255.0);
        assert_relative_eq!(color.z, 235.0 / 255.0);
        assert_eq!(utils::rgb_from_hex(0x000000), Vec3::zeros());
    }

    #[test]
    fn test_euler_rotation_about_y() {
        let transform = Transform::from_euler_degrees(Vec3::zeros(), Vec3::new(0.0, 90.0, 0.0), 1.0);
        let rotated = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_combine_applies_scale_then_offset() {
        let parent = Transform::from_euler_degrees(Vec3::new(0.0, -1.0, 0.0), Vec3::zeros(), 6.0);
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let combined = parent.combine(&child);
        assert_relative_eq!(combined.position, Vec3::new(6.0, -1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(combined.scale, Vec3::new(6.0, 6.0, 6.0));
    }

    #[test]
    fn test_from_trs_identity() {
        let transform = Transform::from_trs([0.0; 3], [0.0, 0.0, 0.0, 1.0], [1.0; 3]);
        assert_relative_eq!(transform.to_matrix(), Mat4::identity(), epsilon = 1e-6);
    }
}
