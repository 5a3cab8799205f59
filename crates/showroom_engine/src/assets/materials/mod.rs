//! Material classification subsystem
//!
//! Maps material names to shading profiles and applies them to loaded models.

pub mod classifier;
pub mod material_pass;
pub mod shading_profile;

pub use classifier::{Classification, MaterialCategory, MaterialClassifier, MaterialRule, MATERIAL_RULES};
pub use material_pass::{MaterialAssignment, MaterialPass, MaterialReport};
pub use shading_profile::{ShadingProfile, DEFAULT_PROFILE};
