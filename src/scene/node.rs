use crate::scene::NodeKey;
use crate::scene::transform::Transform;
use glam::Affine3A;

/// A minimal scene node: hierarchy links, a transform, and a visibility
/// flag.
///
/// # Visibility
///
/// `visible` doubles as the self-reflection exclusion mechanism: the
/// reflection pass hides the reflective surface's node for the duration of
/// its offscreen render so the surface cannot occlude or reflect into its
/// own buffer.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node handle (None for root nodes)
    pub(crate) parent: Option<NodeKey>,
    /// Child node handles
    pub(crate) children: Vec<NodeKey>,

    /// Transform component (hot data accessed every frame)
    pub transform: Transform,

    /// Visibility flag for traversal
    pub visible: bool,
}

impl Node {
    /// Creates a new node with default transform and visibility.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Returns a reference to the world transformation matrix.
    ///
    /// Updated by [`Scene::update_world_matrices`](crate::Scene::update_world_matrices).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
