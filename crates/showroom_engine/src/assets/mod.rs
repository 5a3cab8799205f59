//! Asset loading
//!
//! glTF model loading with progress reporting, plus the material
//! classification pass run on every loaded model.

pub mod gltf_loader;
pub mod materials;
pub mod progress;

pub use gltf_loader::{GltfLoader, LoadError, LoadedModel};
pub use materials::{
    Classification, MaterialAssignment, MaterialCategory, MaterialClassifier, MaterialPass, MaterialReport,
    ShadingProfile,
};
pub use progress::{LoadProgress, LoadStatus};
