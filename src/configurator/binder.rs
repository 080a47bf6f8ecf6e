use crate::resources::material::MeshStandardMaterial;
use crate::resources::texture::TextureSet;
use crate::scene::model::Model;

/// Result of [`apply_material`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The paintable material was (re)built.
    Applied,
    /// The paintable node already carried an identical material.
    Unchanged,
    /// The model has no mesh node with the paintable name. Not an error.
    MissingPaintableNode,
}

/// Assigns the paintable material built from `textures` to every mesh node
/// named `paintable_node`.
///
/// Calling it again with the same set leaves the model untouched, including
/// the material version.
pub fn apply_material(model: &mut Model, textures: &TextureSet, paintable_node: &str) -> BindOutcome {
    let targets = model.find_meshes_by_name(paintable_node);
    if targets.is_empty() {
        log::warn!(
            "Model {} has no paintable node named '{paintable_node}', material left unchanged",
            model.label
        );
        return BindOutcome::MissingPaintableNode;
    }
    if targets.len() > 1 {
        log::debug!(
            "Model {} has {} nodes named '{paintable_node}', painting all of them",
            model.label,
            targets.len()
        );
    }

    let material = MeshStandardMaterial::from_texture_set(textures);
    let mut outcome = BindOutcome::Unchanged;

    for handle in targets {
        let Some(node) = model.get_node_mut(handle) else {
            continue;
        };
        if node.material.as_ref() != Some(&material) {
            node.material = Some(material.clone());
            node.material_version = node.material_version.wrapping_add(1);
            outcome = BindOutcome::Applied;
        }
    }

    outcome
}
