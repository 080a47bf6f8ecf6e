use glam::{Quat, Vec3};

use crate::scene::model::{ModelAsset, ModelAssetNode};

/// Decodes the node graph of a glTF / GLB document.
///
/// Only the hierarchy is extracted: names, mesh presence and local TRS.
/// Geometry and the authored materials stay with the scene host.
pub fn decode(label: &str, bytes: &[u8]) -> anyhow::Result<ModelAsset> {
    let document = ::gltf::Gltf::from_slice(bytes)
        .map_err(|e| anyhow::anyhow!("Failed to parse glTF {label}: {e}"))?;

    let nodes: Vec<ModelAssetNode> = document
        .nodes()
        .map(|node| {
            let (translation, rotation, scale) = node.transform().decomposed();
            let mut asset_node = ModelAssetNode::new(node.name(), node.mesh().is_some());
            asset_node.translation = Vec3::from_array(translation);
            asset_node.rotation = Quat::from_array(rotation);
            asset_node.scale = Vec3::from_array(scale);
            asset_node.children_indices = node.children().map(|c| c.index()).collect();
            asset_node
        })
        .collect();

    let root_indices: Vec<usize> = match document
        .default_scene()
        .or_else(|| document.scenes().next())
    {
        Some(scene) => scene.nodes().map(|n| n.index()).collect(),
        None => {
            // No scene: every node without a parent is a root.
            let mut has_parent = vec![false; nodes.len()];
            for node in &nodes {
                for &child in &node.children_indices {
                    if let Some(flag) = has_parent.get_mut(child) {
                        *flag = true;
                    }
                }
            }
            (0..nodes.len()).filter(|&i| !has_parent[i]).collect()
        }
    };

    Ok(ModelAsset {
        label: label.to_string(),
        nodes,
        root_indices,
    })
}
