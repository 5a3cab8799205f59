//! Scene contents handed to the renderer each frame

use crate::assets::LoadedModel;
use crate::core::config::ModelConfig;
use crate::foundation::math::{utils, Transform, Vec3};
use crate::render::{MaterialId, SurfaceMaterial};

use super::{GroundPlane, MeshNode};

/// Everything drawn by the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    background: Vec3,
    model_transform: Transform,
    nodes: Vec<MeshNode>,
    materials: Vec<SurfaceMaterial>,
    ground: Option<GroundPlane>,
}

impl Scene {
    /// Create an empty scene with a `0xRRGGBB` background
    pub fn new(background: u32) -> Self {
        Self {
            background: utils::rgb_from_hex(background),
            model_transform: Transform::identity(),
            nodes: Vec::new(),
            materials: Vec::new(),
            ground: None,
        }
    }

    /// Add a ground plane
    pub fn with_ground(mut self, ground: GroundPlane) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Add a loaded model placed by `config`
    ///
    /// The model transform is applied on top of each node's own world
    /// transform. Material ids are offset so several models can share a scene.
    pub fn add_model(&mut self, model: LoadedModel, config: &ModelConfig) {
        let transform = config.transform();
        let root = transform.to_matrix();
        let offset = self.materials.len();

        let node_count = model.nodes.len();
        self.nodes.extend(model.nodes.into_iter().map(|mut node| {
            node.world_transform = root * node.world_transform;
            node.material = MaterialId(node.material.0 + offset);
            node
        }));
        self.materials.extend(model.materials);
        self.model_transform = transform;

        log::info!(
            "Added model to scene: {} mesh nodes, {} materials (scale {}, position {:?})",
            node_count,
            self.materials.len() - offset,
            config.scale,
            config.position
        );
    }

    /// Remove all model nodes and materials
    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            log::debug!("Clearing scene: {} nodes, {} materials", self.nodes.len(), self.materials.len());
        }
        self.nodes.clear();
        self.materials.clear();
        self.model_transform = Transform::identity();
    }

    /// Background color as linear RGB
    pub fn background(&self) -> Vec3 {
        self.background
    }

    /// Transform of the most recently added model
    pub fn model_transform(&self) -> &Transform {
        &self.model_transform
    }

    /// All mesh nodes
    pub fn nodes(&self) -> &[MeshNode] {
        &self.nodes
    }

    /// All materials
    pub fn materials(&self) -> &[SurfaceMaterial] {
        &self.materials
    }

    /// Look up a material by id
    pub fn material(&self, id: MaterialId) -> Option<&SurfaceMaterial> {
        self.materials.get(id.0)
    }

    /// Material of a node
    pub fn material_of(&self, node: &MeshNode) -> Option<&SurfaceMaterial> {
        self.material(node.material)
    }

    /// Ground plane, if any
    pub fn ground(&self) -> Option<&GroundPlane> {
        self.ground.as_ref()
    }

    /// Number of nodes that will be drawn
    pub fn visible_mesh_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.visible).count()
    }

    /// Whether no model is loaded
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mark every material as uploaded
    pub fn mark_materials_synced(&mut self) {
        for material in &mut self.materials {
            material.needs_update = false;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(0x000000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GroundConfig;
    use crate::foundation::math::Mat4;
    use approx::assert_relative_eq;

    fn model() -> LoadedModel {
        LoadedModel {
            materials: vec![SurfaceMaterial::new("paint"), SurfaceMaterial::new("glass")],
            nodes: vec![
                MeshNode::new("body", "body", MaterialId(0)),
                MeshNode::new("window", "window", MaterialId(1))
                    .with_transform(Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0))),
            ],
        }
    }

    #[test]
    fn test_add_model_applies_transform() {
        let mut scene = Scene::new(0xf0f0f0);
        let config = ModelConfig::new("car.glb")
            .with_scale(6.0)
            .with_position(Vec3::new(0.0, -1.0, 0.0));
        scene.add_model(model(), &config);

        assert_eq!(scene.visible_mesh_count(), 2);
        assert_relative_eq!(scene.nodes()[0].world_position(), Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(scene.nodes()[1].world_position(), Vec3::new(6.0, -1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_material_ids_offset_per_model() {
        let mut scene = Scene::default();
        let config = ModelConfig::new("car.glb");
        scene.add_model(model(), &config);
        scene.add_model(model(), &config);

        assert_eq!(scene.materials().len(), 4);
        let last = &scene.nodes()[3];
        assert_eq!(last.material, MaterialId(3));
        assert_eq!(scene.material_of(last).map(|m| m.name.as_str()), Some("glass"));
    }

    #[test]
    fn test_clear_keeps_ground_and_background() {
        let mut scene = Scene::new(0xffffff).with_ground(GroundPlane::from_config(&GroundConfig::default()));
        scene.add_model(model(), &ModelConfig::new("car.glb"));
        scene.clear();

        assert!(scene.is_empty());
        assert!(scene.materials().is_empty());
        assert!(scene.ground().is_some());
        assert_eq!(scene.background(), Vec3::new(1.0, 1.0, 1.0));
    }
}
