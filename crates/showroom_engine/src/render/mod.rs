//! # Rendering System
//!
//! Renderer-facing model of the viewer: camera and orbit controls, light
//! rigs, surface materials, and the backend trait frames are submitted to.
//!
//! ## Architecture
//!
//! - **Camera / OrbitControls**: perspective projection and orbit navigation
//! - **Lighting**: light descriptions and the preset rigs
//! - **SurfaceMaterial**: per-surface PBR parameters the material pass writes
//! - **RenderBackend**: the seam to a concrete graphics API

pub mod backend;
pub mod camera;
pub mod controls;
pub mod lighting;
pub mod material;

pub use backend::{BackendResult, FrameData, HeadlessBackend, RenderBackend, RenderError};
pub use camera::Camera;
pub use controls::OrbitControls;
pub use lighting::{Light, LightType, LightingEnvironment, ShadowSettings};
pub use material::{AlphaMode, MaterialId, SurfaceMaterial};
