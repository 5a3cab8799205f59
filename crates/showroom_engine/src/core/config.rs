//! # Viewer Configuration
//!
//! All settings a viewer session is built from. Nothing in the session reads
//! globals; everything it needs arrives through [`ViewerConfig`].
//!
//! ## Configuration Categories
//!
//! - **Engine**: logging and frame limit
//! - **Viewport**: initial surface size
//! - **Renderer**: tone mapping, color space and shadow map settings
//! - **Camera / Controls**: projection and orbit behavior
//! - **Lighting / Ground**: light rig and shadow-catcher plane
//! - **Model**: which asset to load, its placement, and whether the material pass runs
//!
//! Two presets cover the known setups: [`ViewerConfig::showroom`] and
//! [`ViewerConfig::night`].

use std::f32::consts::PI;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::{Transform, Vec3};
use crate::render::LightingEnvironment;

/// # Engine Configuration
///
/// Session-wide behavior: logging and how long the render loop runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level for the viewer
    pub log_level: String,
    /// Stop the render loop after this many frames; `None` runs until closed
    pub frame_limit: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_limit: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set frame limit
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ViewportConfig {
    /// Create a viewport configuration
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Validate that the viewport has an area
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// GPU selection hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerPreference {
    /// Let the platform decide
    #[default]
    Default,
    /// Prefer the discrete GPU
    HighPerformance,
    /// Prefer the integrated GPU
    LowPower,
}

/// Color space of the final framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSpace {
    /// sRGB output
    #[default]
    Srgb,
    /// Linear output
    Linear,
}

/// Tone mapping operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToneMapping {
    /// No tone mapping
    #[default]
    None,
    /// ACES filmic curve
    AcesFilmic,
    /// Reinhard operator
    Reinhard,
}

/// Shadow map filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowMapType {
    /// Unfiltered
    Basic,
    /// Percentage-closer filtering
    #[default]
    Pcf,
    /// Percentage-closer filtering with soft edges
    PcfSoft,
}

/// # Renderer Settings
///
/// Output settings forwarded to the render backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererSettings {
    /// Multisample anti-aliasing
    pub antialias: bool,
    /// GPU selection hint
    pub power_preference: PowerPreference,
    /// Framebuffer color space
    pub output_color_space: ColorSpace,
    /// Tone mapping operator
    pub tone_mapping: ToneMapping,
    /// Exposure applied before tone mapping
    pub tone_mapping_exposure: f32,
    /// Whether shadow maps are rendered
    pub shadows_enabled: bool,
    /// Shadow map filtering
    pub shadow_map_type: ShadowMapType,
}

impl RendererSettings {
    /// Create renderer settings with library defaults
    pub fn new() -> Self {
        Self {
            antialias: true,
            power_preference: PowerPreference::Default,
            output_color_space: ColorSpace::Srgb,
            tone_mapping: ToneMapping::None,
            tone_mapping_exposure: 1.0,
            shadows_enabled: true,
            shadow_map_type: ShadowMapType::Pcf,
        }
    }

    /// Set tone mapping operator and exposure
    pub fn with_tone_mapping(mut self, tone_mapping: ToneMapping, exposure: f32) -> Self {
        self.tone_mapping = tone_mapping;
        self.tone_mapping_exposure = exposure;
        self
    }

    /// Set GPU selection hint
    pub fn with_power_preference(mut self, preference: PowerPreference) -> Self {
        self.power_preference = preference;
        self
    }

    /// Enable or disable shadows
    pub fn with_shadows(mut self, enabled: bool, map_type: ShadowMapType) -> Self {
        self.shadows_enabled = enabled;
        self.shadow_map_type = map_type;
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tone_mapping_exposure > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Tone mapping exposure must be positive, got {}",
                self.tone_mapping_exposure
            )));
        }
        Ok(())
    }
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Initial camera position
    pub position: Vec3,
    /// Orbit and look-at target
    pub target: Vec3,
}

impl CameraConfig {
    /// Create a camera configuration at `position` looking at the origin
    pub fn new(position: Vec3) -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position,
            target: Vec3::zeros(),
        }
    }

    /// Validate projection parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "Field of view must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "Clipping planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if self.position == self.target {
            return Err(ConfigError::Invalid("Camera position must differ from its target".to_string()));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new(Vec3::new(3.0, 1.5, 5.0))
    }
}

/// # Orbit Controls Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Apply inertia to rotation
    pub enable_damping: bool,
    /// Fraction of pending rotation applied per update when damping
    pub damping_factor: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target; `None` is unbounded
    pub max_distance: Option<f32>,
    /// Smallest polar angle from +Y in radians
    pub min_polar_angle: f32,
    /// Largest polar angle from +Y in radians
    pub max_polar_angle: f32,
    /// Rotation speed multiplier
    pub rotate_speed: f32,
    /// Zoom speed multiplier
    pub zoom_speed: f32,
}

impl ControlsConfig {
    /// Create controls configuration with library defaults
    pub fn new() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: None,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }

    /// Configure damping
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor;
        self
    }

    /// Configure distance limits
    pub fn with_distance_limits(mut self, min: f32, max: Option<f32>) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Set the largest polar angle
    pub fn with_max_polar_angle(mut self, angle: f32) -> Self {
        self.max_polar_angle = angle;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "Damping factor must be in (0, 1], got {}",
                self.damping_factor
            )));
        }
        if self.min_distance < 0.0 || self.max_distance.is_some_and(|max| max < self.min_distance) {
            return Err(ConfigError::Invalid(format!(
                "Distance limits must satisfy 0 <= min <= max, got min={} max={:?}",
                self.min_distance, self.max_distance
            )));
        }
        if !(0.0 <= self.min_polar_angle && self.min_polar_angle <= self.max_polar_angle && self.max_polar_angle <= PI) {
            return Err(ConfigError::Invalid(format!(
                "Polar limits must satisfy 0 <= min <= max <= PI, got min={} max={}",
                self.min_polar_angle, self.max_polar_angle
            )));
        }
        Ok(())
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invisible plane that only catches shadows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Whether the plane is added to the scene
    pub enabled: bool,
    /// Edge length of the square plane
    pub size: f32,
    /// Plane color as `0xRRGGBB`
    pub color: u32,
    /// Plane roughness
    pub roughness: f32,
    /// Plane metalness
    pub metalness: f32,
}

impl GroundConfig {
    /// Create a ground plane configuration
    pub fn new(size: f32, color: u32) -> Self {
        Self {
            enabled: true,
            size,
            color,
            roughness: 1.0,
            metalness: 0.0,
        }
    }

    /// Set surface factors
    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && !(self.size > 0.0) {
            return Err(ConfigError::Invalid(format!("Ground size must be positive, got {}", self.size)));
        }
        Ok(())
    }
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self::new(20.0, 0xffffff)
    }
}

/// # Model Configuration
///
/// Which asset to load and how to place it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to a `.gltf` or `.glb` file
    pub path: Option<PathBuf>,
    /// Uniform scale
    pub scale: f32,
    /// Position offset
    pub position: Vec3,
    /// Euler rotation in degrees (X, Y, Z)
    pub rotation_degrees: Vec3,
    /// Run name-based material classification on load
    pub classify_materials: bool,
}

impl ModelConfig {
    /// Create a model configuration for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            scale: 1.0,
            position: Vec3::zeros(),
            rotation_degrees: Vec3::zeros(),
            classify_materials: true,
        }
    }

    /// Set uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set position offset
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set Euler rotation in degrees
    pub fn with_rotation_degrees(mut self, rotation: Vec3) -> Self {
        self.rotation_degrees = rotation;
        self
    }

    /// Enable or disable the material pass
    pub fn with_material_classification(mut self, enabled: bool) -> Self {
        self.classify_materials = enabled;
        self
    }

    /// Root transform applied to every node of the model
    pub fn transform(&self) -> Transform {
        Transform::from_euler_degrees(self.position, self.rotation_degrees, self.scale)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale > 0.0) {
            return Err(ConfigError::Invalid(format!("Model scale must be positive, got {}", self.scale)));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            scale: 1.0,
            position: Vec3::zeros(),
            rotation_degrees: Vec3::zeros(),
            classify_materials: true,
        }
    }
}

/// # Complete Viewer Configuration
///
/// Top-level configuration that encompasses all session subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Scene background color as `0xRRGGBB`
    pub background: u32,
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Initial viewport size
    pub viewport: ViewportConfig,
    /// Renderer output settings
    pub renderer: RendererSettings,
    /// Camera projection and placement
    pub camera: CameraConfig,
    /// Orbit controls
    pub controls: ControlsConfig,
    /// Light rig
    pub lighting: LightingEnvironment,
    /// Shadow-catcher plane
    pub ground: GroundConfig,
    /// Model to load
    pub model: ModelConfig,
}

impl ViewerConfig {
    /// Neutral product showroom: light background, studio rig, filmic tone
    /// mapping, bounded orbit and the material pass enabled
    pub fn showroom() -> Self {
        Self {
            background: 0xf0f0f0,
            engine: EngineConfig::default(),
            viewport: ViewportConfig::default(),
            renderer: RendererSettings::new()
                .with_power_preference(PowerPreference::HighPerformance)
                .with_tone_mapping(ToneMapping::AcesFilmic, 1.2)
                .with_shadows(true, ShadowMapType::PcfSoft),
            camera: CameraConfig::new(Vec3::new(3.0, 1.5, 5.0)),
            controls: ControlsConfig::new()
                .with_damping(true, 0.05)
                .with_distance_limits(2.0, Some(10.0))
                .with_max_polar_angle(PI * 0.5),
            lighting: LightingEnvironment::studio(),
            ground: GroundConfig::new(20.0, 0xffffff).with_surface(0.8, 0.2),
            model: ModelConfig::new("models/porsche.glb").with_scale(0.8),
        }
    }

    /// Dark stage: black background, blue light rig, no tone mapping, a large
    /// rotated model and no material pass
    pub fn night() -> Self {
        Self {
            background: 0x000000,
            engine: EngineConfig::default(),
            viewport: ViewportConfig::default(),
            renderer: RendererSettings::new(),
            camera: CameraConfig::new(Vec3::new(3.0, 2.0, 6.0)),
            controls: ControlsConfig::new()
                .with_damping(true, 0.05)
                .with_max_polar_angle(PI * 0.5),
            lighting: LightingEnvironment::night(),
            ground: GroundConfig::new(50.0, 0x000000),
            model: ModelConfig::new("models/blue_dragon.glb")
                .with_scale(6.0)
                .with_position(Vec3::new(0.0, -1.0, 0.0))
                .with_rotation_degrees(Vec3::new(-15.0, 145.0, 0.0))
                .with_material_classification(false),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "showroom" => Some(Self::showroom()),
            "night" => Some(Self::night()),
            _ => None,
        }
    }

    /// List all available preset names
    pub fn list_presets() -> Vec<&'static str> {
        vec!["showroom", "night"]
    }

    /// Replace the model path
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model.path = Some(path.into());
        self
    }

    /// Set the initial viewport size
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = ViewportConfig::new(width, height);
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        self.renderer.validate()?;
        self.camera.validate()?;
        self.controls.validate()?;
        self.ground.validate()?;
        self.model.validate()?;
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::showroom()
    }
}

impl Config for ViewerConfig {}
