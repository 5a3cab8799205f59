//! Shading parameters assigned to a surface by material classification

use serde::{Deserialize, Serialize};

/// PBR shading parameters for one material category
///
/// All factors are in `[0, 1]` except `environment_intensity`, which scales
/// reflections of the surrounding scene and may exceed 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadingProfile {
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Metalness factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,
    /// Surface opacity (0.0 = invisible, 1.0 = opaque)
    pub opacity: f32,
    /// Whether the surface is alpha blended
    pub transparent: bool,
    /// Environment reflection intensity
    pub environment_intensity: f32,
}

/// Profile for surfaces no keyword group claims
pub const DEFAULT_PROFILE: ShadingProfile = ShadingProfile::opaque(0.5, 0.5, 1.0);

impl ShadingProfile {
    /// Opaque surface profile
    pub const fn opaque(roughness: f32, metalness: f32, environment_intensity: f32) -> Self {
        Self {
            roughness,
            metalness,
            opacity: 1.0,
            transparent: false,
            environment_intensity,
        }
    }

    /// Alpha-blended surface profile
    pub const fn translucent(
        roughness: f32,
        metalness: f32,
        opacity: f32,
        environment_intensity: f32,
    ) -> Self {
        Self {
            roughness,
            metalness,
            opacity,
            transparent: true,
            environment_intensity,
        }
    }
}

impl Default for ShadingProfile {
    fn default() -> Self {
        DEFAULT_PROFILE
    }
}
