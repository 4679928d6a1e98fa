//! Texture-space projection matrix.
//!
//! Maps a point in the reflective surface's local space to the [0, 1]
//! texture coordinates of the offscreen reflection buffer, enabling
//! projective sampling in the compositing shader. Built from the *frozen*
//! mirror-camera matrices of the same frame; reusing stale camera state
//! here would desynchronize sampling from the rendered image.

use glam::{Affine3A, Mat4, Vec4};

/// Maps GL clip space [-1, 1] to texture space [0, 1] on all three axes.
pub const TEXTURE_BIAS: Mat4 = Mat4::from_cols(
    Vec4::new(0.5, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 0.5, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.5, 0.5, 0.5, 1.0),
);

/// Composes `bias * projection * view * surface_world`.
///
/// `projection` and `view` are the mirror camera's frozen matrices;
/// `surface_world` lifts surface-local vertex positions into world space
/// first. Pass `Affine3A::IDENTITY` to map world-space points directly.
#[must_use]
pub fn texture_matrix(projection: &Mat4, view: &Mat4, surface_world: &Affine3A) -> Mat4 {
    TEXTURE_BIAS * *projection * *view * Mat4::from(*surface_world)
}
