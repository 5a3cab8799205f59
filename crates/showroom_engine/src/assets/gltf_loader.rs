//! glTF model loader
//!
//! Reads `.gltf` and `.glb` files and flattens the default scene into one
//! [`MeshNode`] per primitive. Only names, materials and the node hierarchy are
//! extracted; vertex buffers are left to the render backend.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::{Mat4, Transform};
use crate::render::{MaterialId, SurfaceMaterial};
use crate::scene::MeshNode;

use super::LoadProgress;

/// Read size used when streaming a model from disk
const CHUNK_SIZE: usize = 64 * 1024;

/// Model loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// IO error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid glTF
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// The document defines no scene to show
    #[error("Model has no scene")]
    MissingScene,

    /// The scene contains no meshes
    #[error("Model scene contains no meshes")]
    EmptyScene,

    /// A node is reached twice while walking the scene, so the hierarchy is
    /// not a tree
    #[error("Node {node} appears more than once in the scene hierarchy")]
    InvalidHierarchy {
        /// Index of the repeated node
        node: usize,
    },
}

/// Materials and flattened mesh nodes of one model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedModel {
    /// One entry per glTF material, followed by a default material when any
    /// primitive has none
    pub materials: Vec<SurfaceMaterial>,
    /// One node per mesh primitive, in depth-first scene order
    pub nodes: Vec<MeshNode>,
}

impl LoadedModel {
    /// Material referenced by a node
    pub fn material_of(&self, node: &MeshNode) -> Option<&SurfaceMaterial> {
        self.materials.get(node.material.0)
    }
}

/// glTF loader
pub struct GltfLoader;

impl GltfLoader {
    /// Load a model file, reporting read progress after every chunk
    pub fn load<P, F>(path: P, mut on_progress: F) -> Result<LoadedModel, LoadError>
    where
        P: AsRef<Path>,
        F: FnMut(LoadProgress),
    {
        let path = path.as_ref();
        log::info!("Loading model: {}", path.display());

        let mut file = File::open(path)?;
        let total = file.metadata().ok().map(|metadata| metadata.len());
        let mut bytes = Vec::with_capacity(total.map_or(0, |len| len as usize));
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let read = file.read(&mut chunk)?;
            if read == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..read]);
            on_progress(LoadProgress::new(bytes.len() as u64, total));
        }
        if bytes.is_empty() {
            on_progress(LoadProgress::new(0, total));
        }

        let model = Self::from_slice(&bytes)?;
        log::info!(
            "Loaded {}: {} mesh nodes, {} materials",
            path.display(),
            model.nodes.len(),
            model.materials.len()
        );
        Ok(model)
    }

    /// Parse an in-memory `.gltf` or `.glb` document
    pub fn from_slice(bytes: &[u8]) -> Result<LoadedModel, LoadError> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        Self::from_document(&gltf.document)
    }

    fn from_document(document: &gltf::Document) -> Result<LoadedModel, LoadError> {
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(LoadError::MissingScene)?;

        let mut materials: Vec<SurfaceMaterial> = document.materials().map(|m| SurfaceMaterial::from_gltf(&m)).collect();
        let default_material = MaterialId(materials.len());
        let mut uses_default = false;

        let mut nodes = Vec::new();
        let mut visited = vec![false; document.nodes().len()];
        let mut stack: Vec<(gltf::Node<'_>, Mat4)> = scene.nodes().map(|node| (node, Mat4::identity())).collect();
        stack.reverse();

        while let Some((node, parent)) = stack.pop() {
            if std::mem::replace(&mut visited[node.index()], true) {
                return Err(LoadError::InvalidHierarchy { node: node.index() });
            }

            let (translation, rotation, scale) = node.transform().decomposed();
            let world = parent * Transform::from_trs(translation, rotation, scale).to_matrix();

            if let Some(mesh) = node.mesh() {
                for (index, primitive) in mesh.primitives().enumerate() {
                    let material = primitive.material().index().map_or_else(
                        || {
                            uses_default = true;
                            default_material
                        },
                        MaterialId,
                    );
                    nodes.push(
                        MeshNode::new(node.name().unwrap_or_default(), mesh.name().unwrap_or_default(), material)
                            .with_primitive(index)
                            .with_transform(world),
                    );
                }
            }

            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, world)));
        }

        if nodes.is_empty() {
            return Err(LoadError::EmptyScene);
        }
        if uses_default {
            materials.push(SurfaceMaterial::default());
        }

        Ok(LoadedModel { materials, nodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    const CAR: &str = r#"{
        "asset": { "version": "2.0" },
        "buffers": [{ "byteLength": 36, "uri": "triangle.bin" }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
        }],
        "materials": [
            { "name": "Body_Paint" },
            { "name": "Window_Glass", "alphaMode": "BLEND" }
        ],
        "meshes": [{
            "name": "car_body",
            "primitives": [
                { "attributes": { "POSITION": 0 }, "material": 0 },
                { "attributes": { "POSITION": 0 }, "material": 1 },
                { "attributes": { "POSITION": 0 } }
            ]
        }],
        "nodes": [
            { "name": "root", "translation": [0.0, 1.0, 0.0], "children": [1] },
            { "name": "body", "mesh": 0, "translation": [2.0, 0.0, 0.0] }
        ],
        "scenes": [{ "nodes": [0] }],
        "scene": 0
    }"#;

    #[test]
    fn test_flattens_primitives() {
        let model = GltfLoader::from_slice(CAR.as_bytes()).unwrap();
        assert_eq!(model.nodes.len(), 3);
        assert!(model.nodes.iter().all(|node| node.name == "body" && node.mesh_name == "car_body"));
        assert_eq!(model.nodes[1].primitive, 1);
        assert_eq!(model.nodes[1].material, MaterialId(1));
    }

    #[test]
    fn test_default_material_appended() {
        let model = GltfLoader::from_slice(CAR.as_bytes()).unwrap();
        assert_eq!(model.materials.len(), 3);
        assert_eq!(model.nodes[2].material, MaterialId(2));
        assert_eq!(model.material_of(&model.nodes[2]).map(|m| m.name.as_str()), Some(""));
        assert!(model.materials[1].transparent);
    }

    #[test]
    fn test_world_transform_includes_parents() {
        let model = GltfLoader::from_slice(CAR.as_bytes()).unwrap();
        assert_relative_eq!(model.nodes[0].world_position(), Vec3::new(2.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(GltfLoader::from_slice(b"not a model"), Err(LoadError::Gltf(_))));
    }

    #[test]
    fn test_missing_scene() {
        let json = r#"{ "asset": { "version": "2.0" } }"#;
        assert!(matches!(GltfLoader::from_slice(json.as_bytes()), Err(LoadError::MissingScene)));
    }

    #[test]
    fn test_scene_without_meshes() {
        let json = r#"{
            "asset": { "version": "2.0" },
            "nodes": [{ "name": "empty" }],
            "scenes": [{ "nodes": [0] }]
        }"#;
        assert!(matches!(GltfLoader::from_slice(json.as_bytes()), Err(LoadError::EmptyScene)));
    }

    #[test]
    fn test_cyclic_hierarchy() {
        let json = r#"{
            "asset": { "version": "2.0" },
            "buffers": [{ "byteLength": 36, "uri": "triangle.bin" }],
            "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
            "accessors": [{
                "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
            }],
            "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
            "nodes": [
                { "mesh": 0, "children": [1] },
                { "children": [0] }
            ],
            "scenes": [{ "nodes": [0] }]
        }"#;
        assert!(matches!(
            GltfLoader::from_slice(json.as_bytes()),
            Err(LoadError::InvalidHierarchy { node: 0 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = GltfLoader::load("does/not/exist.glb", |_| {});
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
