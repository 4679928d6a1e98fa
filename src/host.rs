//! Host renderer contract.
//!
//! The reflection pass never owns a frame loop or a scene traversal; it
//! reaches the real renderer through this narrow trait. A wgpu host
//! typically uses [`ReflectionTarget`](crate::ReflectionTarget) as its
//! [`Target`](HostRenderer::Target); tests can substitute any handle type.

use crate::errors::Result;
use crate::pass::MirrorCamera;
use crate::scene::Scene;
use crate::settings::ReflectorSettings;

/// Callback interface a host rendering engine implements for the pass.
///
/// All methods are invoked synchronously from inside the host's own
/// pre-render hook; implementations must not assume re-entrancy.
pub trait HostRenderer {
    /// Offscreen render target handle. Allocated through
    /// [`create_target`](Self::create_target) and owned by the pass until
    /// disposal.
    type Target;

    /// Allocates a color (+ depth) offscreen target of
    /// `settings.width` x `settings.height`.
    fn create_target(&mut self, settings: &ReflectorSettings) -> Result<Self::Target>;

    /// Releases a target previously returned by
    /// [`create_target`](Self::create_target).
    fn release_target(&mut self, target: Self::Target);

    /// Renders `scene` from the mirror camera into `target`.
    ///
    /// Contract: bind `target` as the active render target, render with
    /// blending disabled (the reflection buffer must not blend against
    /// stale contents), then restore the previously bound target. Nodes
    /// with `visible == false` are excluded from the traversal. The
    /// camera's projection matrix is in GL clip-space convention; apply
    /// [`GL_TO_WGPU_DEPTH`](crate::material::GL_TO_WGPU_DEPTH) before
    /// upload when targeting wgpu.
    fn render_reflection(&mut self, scene: &Scene, camera: &MirrorCamera, target: &Self::Target);

    /// Whether a stereo/XR camera override is currently active.
    fn xr_enabled(&self) -> bool;
    fn set_xr_enabled(&mut self, enabled: bool);

    /// Whether shadow maps are recomputed automatically each render.
    fn shadow_auto_update(&self) -> bool;
    fn set_shadow_auto_update(&mut self, enabled: bool);
}
