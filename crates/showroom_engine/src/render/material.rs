//! Surface materials as handed to the render backend

use serde::{Deserialize, Serialize};

use crate::assets::materials::ShadingProfile;

/// Alpha blending modes for surfaces
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AlphaMode {
    /// No transparency
    #[default]
    Opaque,
    /// Alpha testing with cutoff value
    Mask(f32),
    /// Alpha blending
    Blend,
}

/// Index of a material inside a loaded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub usize);

/// PBR material properties for one surface
///
/// Loaded from the asset, then adjusted by the material pass. The backend owns
/// whatever GPU state it derives from this; `needs_update` tells it to rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    /// Material name as authored in the asset (may be empty)
    pub name: String,

    /// Base color (RGBA)
    pub base_color: [f32; 4],

    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,

    /// Opacity (0.0 = transparent, 1.0 = opaque)
    pub opacity: f32,

    /// Whether the surface is alpha blended
    pub transparent: bool,

    /// Scale applied to environment reflections
    pub environment_intensity: f32,

    /// Alpha handling mode
    pub alpha_mode: AlphaMode,

    /// Render both faces
    pub double_sided: bool,

    /// Backend must re-upload this material
    pub needs_update: bool,
}

impl SurfaceMaterial {
    /// Create a new material with default properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            metalness: 1.0,
            roughness: 1.0,
            opacity: 1.0,
            transparent: false,
            environment_intensity: 1.0,
            alpha_mode: AlphaMode::Opaque,
            double_sided: false,
            needs_update: false,
        }
    }

    /// Build from a glTF material definition
    pub fn from_gltf(material: &gltf::Material<'_>) -> Self {
        let pbr = material.pbr_metallic_roughness();
        let alpha_mode = match material.alpha_mode() {
            gltf::material::AlphaMode::Opaque => AlphaMode::Opaque,
            gltf::material::AlphaMode::Mask => AlphaMode::Mask(material.alpha_cutoff().unwrap_or(0.5)),
            gltf::material::AlphaMode::Blend => AlphaMode::Blend,
        };
        let base_color = pbr.base_color_factor();

        Self {
            name: material.name().unwrap_or_default().to_string(),
            base_color,
            metalness: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            opacity: base_color[3],
            transparent: alpha_mode == AlphaMode::Blend,
            environment_intensity: 1.0,
            alpha_mode,
            double_sided: material.double_sided(),
            needs_update: false,
        }
    }

    /// Set the base color
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Set the metallic factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Make the surface alpha blended with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = true;
        self.alpha_mode = AlphaMode::Blend;
        self
    }

    /// Overwrite shading parameters from a classification profile
    ///
    /// Name, base color and sidedness are kept. A transparent profile switches
    /// the surface to alpha blending; an opaque one keeps the authored alpha mode.
    pub fn apply_profile(&mut self, profile: &ShadingProfile) {
        self.roughness = profile.roughness;
        self.metalness = profile.metalness;
        self.environment_intensity = profile.environment_intensity;
        self.opacity = profile.opacity;
        self.transparent = profile.transparent;
        if profile.transparent {
            self.alpha_mode = AlphaMode::Blend;
        } else if self.alpha_mode == AlphaMode::Blend {
            self.alpha_mode = AlphaMode::Opaque;
        }
        self.needs_update = true;
    }
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::materials::MaterialCategory;

    #[test]
    fn test_apply_glass_profile() {
        let mut material = SurfaceMaterial::new("Window_Front").with_color(0.2, 0.2, 0.2);
        material.apply_profile(&MaterialCategory::Glass.profile());

        assert_eq!(material.name, "Window_Front");
        assert_eq!(material.base_color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(material.roughness, 0.1);
        assert_eq!(material.metalness, 0.9);
        assert_eq!(material.opacity, 0.3);
        assert!(material.transparent);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert_eq!(material.environment_intensity, 1.5);
        assert!(material.needs_update);
    }

    #[test]
    fn test_apply_opaque_profile_clears_blending() {
        let mut material = SurfaceMaterial::new("tire").with_opacity(0.5);
        material.apply_profile(&MaterialCategory::Rubber.profile());

        assert_eq!(material.opacity, 1.0);
        assert!(!material.transparent);
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn test_apply_keeps_mask_mode() {
        let mut material = SurfaceMaterial::new("grille_metal");
        material.alpha_mode = AlphaMode::Mask(0.4);
        material.apply_profile(&MaterialCategory::Chrome.profile());

        assert_eq!(material.alpha_mode, AlphaMode::Mask(0.4));
        assert_eq!(material.environment_intensity, 1.8);
    }

    #[test]
    fn test_builder_clamps() {
        let material = SurfaceMaterial::default()
            .with_metalness(1.5)
            .with_roughness(-0.2);
        assert_eq!(material.metalness, 1.0);
        assert_eq!(material.roughness, 0.0);
        assert!(!material.needs_update);
    }
}
