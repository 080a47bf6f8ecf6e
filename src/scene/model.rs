//! Model Node Graphs
//!
//! A loaded model exists in two forms:
//!
//! - [`ModelAsset`]: flat, index-linked node list produced by the decoder.
//!   Stored in the resource cache and shared read-only.
//! - [`Model`]: an instance owned by one configurator. Its nodes carry
//!   materials, so rebinding textures never touches the shared asset.

use glam::{Quat, Vec3};
use slotmap::{SlotMap, new_key_type};

use crate::resources::material::MeshStandardMaterial;

new_key_type! {
    pub struct NodeHandle;
}

/// Decoded node: data only, children referenced by index into `ModelAsset::nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAssetNode {
    pub name: Option<String>,
    pub is_mesh: bool,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub children_indices: Vec<usize>,
}

impl ModelAssetNode {
    #[must_use]
    pub fn new(name: Option<&str>, is_mesh: bool) -> Self {
        Self {
            name: name.map(str::to_string),
            is_mesh,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            children_indices: Vec::new(),
        }
    }
}

/// Decoded model, the intermediate between file bytes and a [`Model`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAsset {
    pub label: String,
    pub nodes: Vec<ModelAssetNode>,
    pub root_indices: Vec<usize>,
}

/// Node of an instantiated model.
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: Option<String>,
    pub is_mesh: bool,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    /// Material assigned by the configurator, `None` keeps the authored one.
    pub material: Option<MeshStandardMaterial>,
    /// Incremented whenever `material` is replaced.
    pub material_version: u64,
}

impl ModelNode {
    #[must_use]
    pub fn new(name: Option<&str>, is_mesh: bool) -> Self {
        Self {
            name: name.map(str::to_string),
            is_mesh,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
            children: Vec::new(),
            material: None,
            material_version: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

/// Owned node graph of one model instance.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub label: String,
    nodes: SlotMap<NodeHandle, ModelNode>,
    roots: Vec<NodeHandle>,
}

impl Model {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Creates an owned instance of a decoded model.
    #[must_use]
    pub fn instantiate(asset: &ModelAsset) -> Self {
        let mut model = Self::new(&asset.label);

        let handles: Vec<NodeHandle> = asset
            .nodes
            .iter()
            .map(|src| {
                let mut node = ModelNode::new(src.name.as_deref(), src.is_mesh);
                node.translation = src.translation;
                node.rotation = src.rotation;
                node.scale = src.scale;
                model.nodes.insert(node)
            })
            .collect();

        for (index, src) in asset.nodes.iter().enumerate() {
            for &child_index in &src.children_indices {
                if let Some(&child) = handles.get(child_index) {
                    if !model.attach(child, handles[index]) {
                        log::warn!(
                            "Model {}: node {child_index} cannot be a child of node {index}, link ignored",
                            asset.label
                        );
                    }
                } else {
                    log::warn!("Model {}: node {index} has invalid child {child_index}", asset.label);
                }
            }
        }

        model.roots = asset
            .root_indices
            .iter()
            .filter_map(|&i| handles.get(i).copied())
            .collect();

        model
    }

    /// Adds a root node.
    pub fn add_node(&mut self, node: ModelNode) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.roots.push(handle);
        handle
    }

    /// Moves `child` under `parent`.
    ///
    /// Returns `false` and leaves the graph unchanged when the move would
    /// create a cycle or either node is missing.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> bool {
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            return false;
        }

        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|&c| c != child);
        } else {
            self.roots.retain(|&r| r != child);
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        true
    }

    /// Whether `ancestor` is `node` or one of its parents.
    fn is_ancestor_or_self(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&ModelNode> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut ModelNode> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first walk from the roots.
    pub fn traverse(&self, visitor: &mut dyn FnMut(NodeHandle, &ModelNode)) {
        let mut stack: Vec<NodeHandle> = self.roots.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                visitor(handle, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// All mesh nodes named `name`, in traversal order.
    #[must_use]
    pub fn find_meshes_by_name(&self, name: &str) -> Vec<NodeHandle> {
        let mut found = Vec::new();
        self.traverse(&mut |handle, node| {
            if node.is_mesh && node.name.as_deref() == Some(name) {
                found.push(handle);
            }
        });
        found
    }

    /// Node names in traversal order (unnamed nodes are skipped).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack: Vec<NodeHandle> = self.roots.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                names.extend(node.name.as_deref());
                stack.extend(node.children.iter().rev().copied());
            }
        }
        names
    }
}
