//! Post-load material pass
//!
//! Walks every mesh node of a freshly loaded model, switches shadows on and,
//! when enabled, overwrites the node's material with the shading profile its
//! name classifies to.

use std::collections::BTreeMap;
use std::fmt;

use crate::assets::LoadedModel;
use crate::scene::ShadowFlags;

use super::{MaterialCategory, MaterialClassifier};

/// Classification applied to one mesh node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialAssignment {
    /// Node name
    pub node: String,
    /// Name of the material that was classified
    pub material: String,
    /// Resulting category
    pub category: MaterialCategory,
}

/// Outcome of a material pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialReport {
    /// Per-node assignments, in node order
    pub assignments: Vec<MaterialAssignment>,
    /// Number of nodes that had shadows enabled
    pub shadowed_nodes: usize,
}

impl MaterialReport {
    /// Number of nodes assigned to `category`
    pub fn count(&self, category: MaterialCategory) -> usize {
        self.assignments.iter().filter(|a| a.category == category).count()
    }

    /// Node counts for every category that occurred
    pub fn counts(&self) -> BTreeMap<MaterialCategory, usize> {
        let mut counts = BTreeMap::new();
        for assignment in &self.assignments {
            *counts.entry(assignment.category).or_insert(0) += 1;
        }
        counts
    }

    /// Number of classified nodes
    pub fn total(&self) -> usize {
        self.assignments.len()
    }
}

impl fmt::Display for MaterialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes classified", self.total())?;
        for category in MaterialCategory::ALL {
            write!(f, ", {}={}", category, self.count(category))?;
        }
        Ok(())
    }
}

/// Material pass over a loaded model
pub struct MaterialPass {
    classify: bool,
}

impl MaterialPass {
    /// Create a pass; with `classify` off only shadows are set
    pub fn new(classify: bool) -> Self {
        Self { classify }
    }

    /// Run the pass in place
    ///
    /// A material shared by several nodes is rewritten once per node; since
    /// classification depends only on the name the result is the same.
    pub fn run(&self, model: &mut LoadedModel) -> MaterialReport {
        let mut report = MaterialReport::default();

        for node in &mut model.nodes {
            node.shadow = ShadowFlags::BOTH;
            report.shadowed_nodes += 1;

            if !self.classify {
                continue;
            }

            let Some(material) = model.materials.get_mut(node.material.0) else {
                log::warn!("Node '{}' references missing material {}", node.name, node.material.0);
                continue;
            };

            let classification = MaterialClassifier::classify(&material.name);
            material.apply_profile(&classification.profile);
            log::debug!(
                "Mesh '{}' material '{}' classified as {}",
                node.name,
                material.name,
                classification.category
            );

            report.assignments.push(MaterialAssignment {
                node: node.name.clone(),
                material: material.name.clone(),
                category: classification.category,
            });
        }

        if self.classify {
            log::info!("Material pass: {report}");
        }
        report
    }
}

impl Default for MaterialPass {
    fn default() -> Self {
        Self::new(true)
    }
}
