//! Renderable mesh nodes

use bitflags::bitflags;

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::render::MaterialId;

bitflags! {
    /// Shadow participation of a renderable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShadowFlags: u8 {
        /// Renders into shadow maps
        const CAST = 1 << 0;
        /// Samples shadow maps
        const RECEIVE = 1 << 1;
        /// Casts and receives
        const BOTH = Self::CAST.bits() | Self::RECEIVE.bits();
    }
}

/// One drawable primitive of a loaded model
///
/// glTF meshes with several primitives produce one node per primitive, all
/// sharing the node and mesh names.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    /// Name of the glTF node (may be empty)
    pub name: String,
    /// Name of the glTF mesh (may be empty)
    pub mesh_name: String,
    /// Index of the primitive inside its mesh
    pub primitive: usize,
    /// Model-space to world-space transform
    pub world_transform: Mat4,
    /// Material used by this primitive
    pub material: MaterialId,
    /// Shadow participation
    pub shadow: ShadowFlags,
    /// Whether the node is drawn
    pub visible: bool,
}

impl MeshNode {
    /// Create a visible node without shadows
    pub fn new(name: impl Into<String>, mesh_name: impl Into<String>, material: MaterialId) -> Self {
        Self {
            name: name.into(),
            mesh_name: mesh_name.into(),
            primitive: 0,
            world_transform: Mat4::identity(),
            material,
            shadow: ShadowFlags::empty(),
            visible: true,
        }
    }

    /// Set the world transform
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.world_transform = transform;
        self
    }

    /// Set the primitive index
    pub fn with_primitive(mut self, primitive: usize) -> Self {
        self.primitive = primitive;
        self
    }

    /// World-space position of the node origin
    pub fn world_position(&self) -> Vec3 {
        self.world_transform.transform_point(&Point3::origin()).coords
    }

    /// Whether the node renders into shadow maps
    pub fn casts_shadow(&self) -> bool {
        self.shadow.contains(ShadowFlags::CAST)
    }

    /// Whether the node samples shadow maps
    pub fn receives_shadow(&self) -> bool {
        self.shadow.contains(ShadowFlags::RECEIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_flags() {
        let mut node = MeshNode::new("door", "door_mesh", MaterialId(0));
        assert!(!node.casts_shadow());
        assert!(!node.receives_shadow());

        node.shadow = ShadowFlags::BOTH;
        assert!(node.casts_shadow());
        assert!(node.receives_shadow());

        node.shadow.remove(ShadowFlags::CAST);
        assert!(!node.casts_shadow());
        assert!(node.receives_shadow());
    }

    #[test]
    fn test_world_position() {
        let node = MeshNode::new("wheel", "", MaterialId(1))
            .with_transform(Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(node.world_position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
