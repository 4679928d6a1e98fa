//! Planar reflection pass for wgpu scene renderers.
//!
//! Reworks a camera's view of a flat mirror into three per-frame steps:
//! derive a mirror camera by reflecting the real camera through the
//! surface plane, clip the mirrored frustum obliquely at that plane, and
//! composite the offscreen render back onto the surface with a projective
//! texture matrix. [`ReflectionPass`] drives the sequence; hosts plug in
//! through the [`HostRenderer`] trait.

pub mod errors;
pub mod host;
pub mod material;
pub mod pass;
pub mod plane;
pub mod scene;
pub mod settings;
pub mod target;

pub use errors::{ReflectorError, Result};
pub use host::HostRenderer;
pub use material::{MirrorMaterial, MirrorUniforms, overlay_blend};
pub use pass::{MirrorCamera, ReflectionPass};
pub use plane::Plane;
pub use scene::{Camera, Node, NodeKey, Scene, Transform};
pub use settings::ReflectorSettings;
pub use target::ReflectionTarget;
