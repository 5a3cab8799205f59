//! Lighting system

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// Shadow map parameters for a shadow-casting light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    /// Shadow map resolution (square)
    pub map_size: u32,
    /// Near plane of the shadow camera
    pub near: f32,
    /// Far plane of the shadow camera
    pub far: f32,
    /// Half-extent of the orthographic shadow camera (directional lights only)
    pub extent: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 512,
            near: 0.5,
            far: 500.0,
            extent: 5.0,
        }
    }
}

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    /// Uniform light from every direction
    Ambient,
    /// Sky/ground gradient light
    Hemisphere,
    /// Directional light (like sunlight), aimed at the origin
    Directional,
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position (unused for ambient and hemisphere lights)
    pub position: Vec3,
    /// Light color; sky color for hemisphere lights
    pub color: Vec3,
    /// Color from below (hemisphere lights only)
    pub ground_color: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Cutoff distance of point lights, 0 for unlimited
    pub distance: f32,
    /// Shadow map settings when the light casts shadows
    pub shadow: Option<ShadowSettings>,
}

impl Light {
    /// Create an ambient light
    pub fn ambient(color: u32, intensity: f32) -> Self {
        Self {
            light_type: LightType::Ambient,
            position: Vec3::zeros(),
            color: utils::rgb_from_hex(color),
            ground_color: Vec3::zeros(),
            intensity,
            distance: 0.0,
            shadow: None,
        }
    }

    /// Create a hemisphere light
    pub fn hemisphere(sky_color: u32, ground_color: u32, intensity: f32) -> Self {
        Self {
            light_type: LightType::Hemisphere,
            position: Vec3::new(0.0, 1.0, 0.0),
            color: utils::rgb_from_hex(sky_color),
            ground_color: utils::rgb_from_hex(ground_color),
            intensity,
            distance: 0.0,
            shadow: None,
        }
    }

    /// Create a directional light shining from `position` towards the origin
    pub fn directional(position: Vec3, color: u32, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional,
            position,
            color: utils::rgb_from_hex(color),
            ground_color: Vec3::zeros(),
            intensity,
            distance: 0.0,
            shadow: None,
        }
    }

    /// Create a point light
    pub fn point(position: Vec3, color: u32, intensity: f32, distance: f32) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            color: utils::rgb_from_hex(color),
            ground_color: Vec3::zeros(),
            intensity,
            distance,
            shadow: None,
        }
    }

    /// Enable shadow casting on a directional or point light
    ///
    /// Ambient and hemisphere lights ignore the request.
    pub fn with_shadow(mut self, settings: ShadowSettings) -> Self {
        match self.light_type {
            LightType::Directional | LightType::Point => self.shadow = Some(settings),
            LightType::Ambient | LightType::Hemisphere => {
                log::warn!("Shadow settings ignored for {:?} light", self.light_type);
            }
        }
        self
    }

    /// Direction the light travels, for directional lights
    pub fn direction(&self) -> Option<Vec3> {
        match self.light_type {
            LightType::Directional => Some((-self.position).normalize()),
            _ => None,
        }
    }

    /// Whether this light renders into a shadow map
    pub fn casts_shadow(&self) -> bool {
        self.shadow.is_some()
    }
}

/// Lighting environment containing multiple lights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightingEnvironment {
    /// List of lights in the scene
    pub lights: Vec<Light>,
}

impl LightingEnvironment {
    /// Create a new empty lighting environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light to the environment
    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Number of lights that cast shadows
    pub fn shadow_caster_count(&self) -> usize {
        self.lights.iter().filter(|light| light.casts_shadow()).count()
    }

    /// Neutral studio rig: ambient, shadowed key light, fill, rim and sky light
    pub fn studio() -> Self {
        Self::new()
            .add_light(Light::ambient(0xffffff, 0.4))
            .add_light(
                Light::directional(Vec3::new(5.0, 10.0, 7.0), 0xffffff, 1.0).with_shadow(ShadowSettings {
                    map_size: 2048,
                    near: 0.5,
                    far: 50.0,
                    extent: 10.0,
                }),
            )
            .add_light(Light::directional(Vec3::new(-5.0, 5.0, 3.0), 0xffffff, 0.3))
            .add_light(Light::directional(Vec3::new(-3.0, 5.0, -5.0), 0xffffff, 0.4))
            .add_light(Light::hemisphere(0x87ceeb, 0x404040, 0.6))
    }

    /// Blue night rig: tinted ambient, shadowed key point light, blue sky light and back light
    pub fn night() -> Self {
        Self::new()
            .add_light(Light::ambient(0x4444ff, 0.4))
            .add_light(
                Light::point(Vec3::new(0.0, 5.0, 5.0), 0x00bfff, 2.0, 100.0)
                    .with_shadow(ShadowSettings::default()),
            )
            .add_light(Light::hemisphere(0x0077ff, 0x000000, 1.5))
            .add_light(Light::point(Vec3::new(-5.0, 2.0, -5.0), 0x0044ff, 1.5, 50.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_studio_rig() {
        let rig = LightingEnvironment::studio();
        assert_eq!(rig.lights.len(), 5);
        assert_eq!(rig.shadow_caster_count(), 1);

        let key = &rig.lights[1];
        assert_eq!(key.light_type, LightType::Directional);
        assert_eq!(key.intensity, 1.0);
        let shadow = key.shadow.expect("key light casts shadows");
        assert_eq!(shadow.map_size, 2048);
        assert_eq!(shadow.extent, 10.0);
    }

    #[test]
    fn test_night_rig() {
        let rig = LightingEnvironment::night();
        assert_eq!(rig.lights.len(), 4);
        assert_eq!(rig.shadow_caster_count(), 1);
        assert_eq!(rig.lights[1].light_type, LightType::Point);
        assert_eq!(rig.lights[1].distance, 100.0);
        assert_relative_eq!(rig.lights[0].color, utils::rgb_from_hex(0x4444ff));
    }

    #[test]
    fn test_directional_points_at_origin() {
        let light = Light::directional(Vec3::new(0.0, 10.0, 0.0), 0xffffff, 1.0);
        assert_relative_eq!(light.direction().unwrap(), Vec3::new(0.0, -1.0, 0.0));
        assert!(Light::ambient(0xffffff, 1.0).direction().is_none());
    }

    #[test]
    fn test_shadow_ignored_for_ambient_light() {
        let light = Light::ambient(0xffffff, 1.0).with_shadow(ShadowSettings::default());
        assert!(!light.casts_shadow());
        let hemi = Light::hemisphere(0xffffff, 0x000000, 1.0).with_shadow(ShadowSettings::default());
        assert!(!hemi.casts_shadow());
    }
}
