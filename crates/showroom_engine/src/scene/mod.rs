//! Scene management
//!
//! Holds what the viewer draws: the loaded model flattened into mesh nodes,
//! its materials, the background color and an optional shadow-catching
//! ground plane.

mod ground;
mod mesh_node;
mod scene_graph;

pub use ground::GroundPlane;
pub use mesh_node::{MeshNode, ShadowFlags};
pub use scene_graph::Scene;
