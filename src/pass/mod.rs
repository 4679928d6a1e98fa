//! Planar Reflection Pass
//!
//! The per-frame core of the crate. [`ReflectionPass`] is a standalone
//! component a scene node *holds*: the host's render loop invokes it
//! through [`on_pre_render`](ReflectionPass::on_pre_render) before drawing
//! the reflective surface. Three responsibilities execute in strict
//! sequence:
//!
//! 1. **Mirror camera derivation** ([`mirror_camera`]): reflect the real
//!    camera through the surface plane.
//! 2. **Oblique clip adjustment** ([`oblique`]): align the virtual
//!    camera's near plane with the mirror so geometry behind it is
//!    clipped.
//! 3. **Texture projection & composite** ([`texture_matrix`]): render the
//!    mirrored view offscreen and publish the projective sampling matrix
//!    plus tint/opacity to the shading stage.
//!
//! Nothing persists across frames beyond the recomputed matrices; every
//! frame is derived from scratch from the current transforms.

pub mod mirror_camera;
pub mod oblique;
pub mod state;
pub mod texture_matrix;

pub use mirror_camera::MirrorCamera;

use glam::Mat4;

use crate::errors::Result;
use crate::host::HostRenderer;
use crate::material::MirrorUniforms;
use crate::pass::state::HostStateGuard;
use crate::scene::{Camera, NodeKey, Scene};
use crate::settings::ReflectorSettings;

/// Per-surface planar reflection component.
///
/// Owns the offscreen target handle and the frame's virtual camera;
/// multiple reflective surfaces each own an independent pass and share no
/// mutable state.
pub struct ReflectionPass<R: HostRenderer> {
    surface: NodeKey,
    settings: ReflectorSettings,
    target: Option<R::Target>,
    mirror_camera: Option<MirrorCamera>,
    texture_matrix: Mat4,
    uniforms: MirrorUniforms,
}

impl<R: HostRenderer> ReflectionPass<R> {
    /// Validates `settings` and acquires the offscreen target from the
    /// host. The target is allocated exactly once here and released
    /// exactly once in [`dispose`](Self::dispose).
    pub fn new(renderer: &mut R, surface: NodeKey, settings: ReflectorSettings) -> Result<Self> {
        settings.validate()?;
        let target = renderer.create_target(&settings)?;
        log::debug!(
            "acquired {}x{} reflection target",
            settings.width,
            settings.height
        );

        Ok(Self {
            surface,
            uniforms: MirrorUniforms::from_settings(&settings),
            settings,
            target: Some(target),
            mirror_camera: None,
            texture_matrix: Mat4::IDENTITY,
        })
    }

    /// Per-frame hook, called by the host before it draws the surface.
    ///
    /// Runs synchronously on the host's render thread with no suspension
    /// points. When the camera is behind the mirror plane the whole frame
    /// is skipped *before any host state is touched*: the offscreen buffer
    /// keeps its previous contents and the host's normal render still
    /// proceeds (the surface draws with the stale texture).
    pub fn on_pre_render(&mut self, renderer: &mut R, scene: &mut Scene, camera: &Camera) {
        let Some(target) = self.target.as_ref() else {
            log::trace!("reflection skipped: pass disposed");
            return;
        };
        let Some(surface_world) = scene.world_matrix(self.surface).copied() else {
            log::trace!("reflection skipped: surface node missing");
            return;
        };

        let Some(mut mirror) = MirrorCamera::derive(camera, &surface_world) else {
            log::trace!("reflection skipped: camera behind mirror plane");
            return;
        };

        mirror.apply_oblique_clip(&surface_world, self.settings.clip_bias);

        // Matrices are frozen from here on; the texture matrix must come
        // from the same camera state the offscreen render uses.
        let texture_matrix = texture_matrix::texture_matrix(
            mirror.projection_matrix(),
            mirror.view_matrix(),
            &surface_world,
        );

        let mut guard = HostStateGuard::capture(renderer);
        scene.set_visible(self.surface, false);
        guard.renderer().render_reflection(scene, &mirror, target);
        scene.set_visible(self.surface, true);
        drop(guard);

        self.texture_matrix = texture_matrix;
        self.uniforms.texture_matrix = texture_matrix;
        self.mirror_camera = Some(mirror);
    }

    /// Releases the offscreen target back to the host. Safe to call more
    /// than once; the second call is a no-op.
    pub fn dispose(&mut self, renderer: &mut R) {
        match self.target.take() {
            Some(target) => {
                renderer.release_target(target);
                log::debug!("released reflection target");
            }
            None => log::debug!("reflection pass already disposed"),
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.target.is_none()
    }

    /// Handle of the reflective surface's node.
    #[must_use]
    pub fn surface(&self) -> NodeKey {
        self.surface
    }

    #[must_use]
    pub fn settings(&self) -> &ReflectorSettings {
        &self.settings
    }

    /// The offscreen target, for hosts that need to bind its color
    /// attachment during compositing.
    #[must_use]
    pub fn target(&self) -> Option<&R::Target> {
        self.target.as_ref()
    }

    /// Last frame's virtual camera, if a reflection was rendered.
    #[must_use]
    pub fn mirror_camera(&self) -> Option<&MirrorCamera> {
        self.mirror_camera.as_ref()
    }

    /// Surface-local point → offscreen texture coordinates, from the most
    /// recent rendered frame.
    #[must_use]
    pub fn texture_matrix(&self) -> &Mat4 {
        &self.texture_matrix
    }

    /// Uniform inputs for the shading stage, kept in sync with
    /// [`texture_matrix`](Self::texture_matrix).
    #[must_use]
    pub fn uniforms(&self) -> &MirrorUniforms {
        &self.uniforms
    }
}
