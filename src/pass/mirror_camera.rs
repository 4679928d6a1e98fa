//! Mirror camera derivation.
//!
//! Every frame, a virtual camera is produced by reflecting the real camera
//! through the reflective surface's plane: mirrored position, mirrored
//! look-at point, and a mirrored (but not negated) up vector so the
//! reflected image keeps its screen orientation. The virtual camera is a
//! pure computation vehicle and is never inserted into the host scene
//! graph.

use glam::{Affine3A, Mat4, Vec3};

use crate::pass::oblique;
use crate::plane::Plane;
use crate::scene::Camera;

/// The virtual camera a reflection frame is rendered from.
#[derive(Debug, Clone)]
pub struct MirrorCamera {
    /// Mirrored camera position in world space.
    pub position: Vec3,
    /// Mirrored look-at point in world space.
    pub target: Vec3,
    /// Mirrored up vector.
    pub up: Vec3,
    /// Far-plane distance, copied from the real camera.
    pub far: f32,

    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl MirrorCamera {
    /// Derives the mirror camera for one frame.
    ///
    /// Returns `None` when the camera is behind (or exactly on) the mirror
    /// plane, which skips the whole reflection computation for the frame: a
    /// camera that cannot see the mirror's front face has no meaningful
    /// reflection to render.
    ///
    /// A camera lying exactly on the plane with a front-facing view would
    /// produce a degenerate look-at; that edge case is accepted, not
    /// guarded.
    #[must_use]
    pub fn derive(camera: &Camera, surface_world: &Affine3A) -> Option<Self> {
        let surface_position = Vec3::from(surface_world.translation);
        let camera_position = camera.position();
        let normal = surface_normal(surface_world);

        let to_surface = surface_position - camera_position;
        if to_surface.dot(normal) >= 0.0 {
            return None;
        }

        // Reflect-and-negate, expressed as subtraction from the surface
        // anchor point
        let position = surface_position - to_surface.reflect(normal);

        let look_at = camera_position + camera.forward();
        let to_target = surface_position - look_at;
        let target = surface_position - to_target.reflect(normal);

        // Reflect only: negating would flip the image vertically
        let up = camera.up().reflect(normal);

        let view_matrix = Mat4::look_at_rh(position, target, up);

        Some(Self {
            position,
            target,
            up,
            far: camera.far,
            view_matrix,
            // Verbatim copy; the oblique adjustment rewrites the third row
            projection_matrix: *camera.projection_matrix(),
        })
    }

    /// Rewrites the projection's near plane to be coplanar with the
    /// surface, offset by `clip_bias`. Call once per frame after
    /// [`derive`](Self::derive); the projection is frozen afterwards.
    pub fn apply_oblique_clip(&mut self, surface_world: &Affine3A, clip_bias: f32) {
        let plane = surface_plane(surface_world);
        let clip_plane = oblique::view_space_plane(&plane, &self.view_matrix);
        oblique::apply_clip_plane(&mut self.projection_matrix, clip_plane, clip_bias);
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }
}

/// Outward normal of the reflective surface: local +Z under the surface's
/// rotation only (scale and translation ignored).
#[must_use]
pub fn surface_normal(surface_world: &Affine3A) -> Vec3 {
    Vec3::from(surface_world.matrix3.z_axis).normalize()
}

/// The surface's world-space mirror plane.
#[must_use]
pub fn surface_plane(surface_world: &Affine3A) -> Plane {
    Plane::from_normal_and_point(
        surface_normal(surface_world),
        Vec3::from(surface_world.translation),
    )
}
