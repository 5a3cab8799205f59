//! # Core Module
//!
//! Shared abstractions the viewer session is assembled from.
//!
//! ## Organization
//!
//! - **Config**: Aggregate configuration for every viewer subsystem

pub mod config;

// Re-export commonly used config types
pub use crate::config::{Config, ConfigError};
pub use config::{
    CameraConfig, ColorSpace, ControlsConfig, EngineConfig, GroundConfig, ModelConfig, PowerPreference,
    RendererSettings, ShadowMapType, ToneMapping, ViewerConfig, ViewportConfig,
};
