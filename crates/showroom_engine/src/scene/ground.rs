//! Shadow-catching ground plane

use crate::core::config::GroundConfig;
use crate::foundation::math::{utils, Transform, Vec3};

use super::ShadowFlags;

/// Fully transparent plane under the model that only shows received shadows
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlane {
    /// Edge length of the square plane
    pub size: f32,
    /// Linear RGB color
    pub color: Vec3,
    /// Roughness factor
    pub roughness: f32,
    /// Metalness factor
    pub metalness: f32,
    /// Opacity (always 0)
    pub opacity: f32,
    /// Alpha blended
    pub transparent: bool,
    /// Lies in the XZ plane at the origin
    pub transform: Transform,
    /// Receives shadows only
    pub shadow: ShadowFlags,
}

impl GroundPlane {
    /// Build the plane described by `config`
    pub fn from_config(config: &GroundConfig) -> Self {
        Self {
            size: config.size,
            color: utils::rgb_from_hex(config.color),
            roughness: config.roughness,
            metalness: config.metalness,
            opacity: 0.0,
            transparent: true,
            transform: Transform::from_euler_degrees(Vec3::zeros(), Vec3::new(-90.0, 0.0, 0.0), 1.0),
            shadow: ShadowFlags::RECEIVE,
        }
    }

    /// World-space plane normal
    pub fn normal(&self) -> Vec3 {
        self.transform.rotation * Vec3::z()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_faces_up() {
        let plane = GroundPlane::from_config(&GroundConfig::default());
        assert_relative_eq!(plane.normal(), Vec3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_plane_only_receives() {
        let plane = GroundPlane::from_config(&GroundConfig::new(50.0, 0x000000));
        assert_eq!(plane.shadow, ShadowFlags::RECEIVE);
        assert_eq!(plane.opacity, 0.0);
        assert!(plane.transparent);
        assert_eq!(plane.size, 50.0);
        assert_eq!(plane.color, Vec3::zeros());
    }
}
