//! # Showroom Engine
//!
//! Session core of a 3D model viewer: loads a glTF model, classifies its
//! materials by name into glass, paint, chrome and rubber, and drives a camera,
//! orbit controls, light rig and render backend around it.
//!
//! ## Features
//!
//! - **Material Classification**: bilingual keyword matching to PBR shading profiles
//! - **glTF Loading**: `.gltf` and `.glb` with progress reporting
//! - **Presets**: showroom and night viewer configurations, loadable from TOML or RON
//! - **Backend Agnostic**: frames go through the `RenderBackend` trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use showroom_engine::prelude::*;
//!
//! struct Demo;
//!
//! impl Application for Demo {
//!     fn initialize<B: RenderBackend>(&mut self, _viewer: &mut Viewer<B>) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>) {
//!         if let Some(report) = viewer.report() {
//!             log::info!("{report}");
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = ViewerConfig::showroom().with_model_path("models/car.glb");
//!     config.engine = config.engine.with_frame_limit(60);
//!     Viewer::run(config, HeadlessBackend::new(1280, 720), &mut Demo)?;
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{StatusListener, Viewer, ViewerError};

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        assets::{
            GltfLoader, LoadStatus, LoadedModel, MaterialCategory, MaterialClassifier, MaterialPass, MaterialReport,
            ShadingProfile,
        },
        config::{Config, ConfigError},
        core::config::{ModelConfig, ViewerConfig},
        foundation::math::{Mat4, Transform, Vec3},
        render::{Camera, HeadlessBackend, LightingEnvironment, OrbitControls, RenderBackend, SurfaceMaterial},
        scene::Scene,
        AppError, AppEvent, Application, Viewer, ViewerError,
    };
}
