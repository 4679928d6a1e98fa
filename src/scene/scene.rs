use std::sync::atomic::{AtomicU32, Ordering};

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeKey;
use crate::scene::node::Node;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// Pure data layer: node storage plus world-matrix propagation. The
/// reflection pass reads surface world transforms from here and toggles
/// node visibility around its offscreen render; everything else about the
/// scene belongs to the host.
pub struct Scene {
    pub id: u32,

    nodes: SlotMap<NodeKey, Node>,
    root_nodes: Vec<NodeKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
        }
    }

    /// Inserts a node as a root and returns its handle.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Re-parents `child` under `parent`, keeping both sides of the
    /// relationship in sync.
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }

        self.root_nodes.retain(|&k| k != child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Returns the cached world matrix of `key`.
    #[must_use]
    pub fn world_matrix(&self, key: NodeKey) -> Option<&Affine3A> {
        self.nodes.get(key).map(Node::world_matrix)
    }

    /// Sets the traversal visibility of `key`.
    pub fn set_visible(&mut self, key: NodeKey, visible: bool) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.visible = visible;
        }
    }

    #[must_use]
    pub fn is_visible(&self, key: NodeKey) -> bool {
        self.nodes.get(key).is_some_and(|node| node.visible)
    }

    /// Propagates local matrices down the hierarchy into world matrices.
    ///
    /// Depth-first from the roots; each node's world matrix is its parent's
    /// world matrix times its (freshly dirty-checked) local matrix.
    pub fn update_world_matrices(&mut self) {
        let mut stack: Vec<(NodeKey, Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&key| (key, Affine3A::IDENTITY))
            .collect();

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };

            node.transform.update_local_matrix();
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);

            for &child in node.children() {
                stack.push((child, world));
            }
        }
    }
}
