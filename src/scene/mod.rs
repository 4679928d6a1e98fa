//! Scene-graph collaborator types.
//!
//! The reflection pass is a standalone component held by the host; it only
//! needs a narrow slice of a scene graph to do its work:
//! - [`Node`]: hierarchy + transform + visibility (the visibility flag is
//!   how the surface is excluded from its own reflection render)
//! - [`Transform`]: TRS with cached local/world matrices
//! - [`Scene`]: node storage and world-matrix propagation
//! - [`Camera`]: the real camera the mirror camera is derived from

pub mod camera;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a [`Node`] stored in a [`Scene`].
    pub struct NodeKey;
}
