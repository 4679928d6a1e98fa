//! Oblique near-plane clipping.
//!
//! An unmodified perspective projection clips against a near plane that is
//! axis-aligned to the camera, not to the mirror, so a naive reflection
//! render shows geometry that lies behind the mirror. The standard
//! oblique-frustum technique re-derives the projection's third row so the
//! near clip plane coincides with an arbitrary view-space plane.
//!
//! Matrix element indexing follows the column-major GL convention the
//! projection matrices use (`m[c * 4 + r]`), mapped onto `glam`'s column
//! axes: element 8 is `z_axis.x`, element 14 is `w_axis.z`, and the third
//! row is the `z` lane of each column.

use glam::{Mat4, Vec4};

use crate::plane::Plane;

/// Transforms a world-space plane into the view space of `view_matrix`.
#[must_use]
pub fn view_space_plane(plane: &Plane, view_matrix: &Mat4) -> Vec4 {
    plane.transformed(view_matrix).as_vec4()
}

/// Replaces `projection`'s near plane with the view-space `clip_plane`,
/// offset by `clip_bias` along NDC z to avoid z-fighting.
///
/// Only the third row of the matrix changes; the other three rows are left
/// bit-identical. The resulting near plane no longer depends on the
/// original near/far settings.
pub fn apply_clip_plane(projection: &mut Mat4, clip_plane: Vec4, clip_bias: f32) {
    let q = Vec4::new(
        (sign(clip_plane.x) + projection.z_axis.x) / projection.x_axis.x,
        (sign(clip_plane.y) + projection.z_axis.y) / projection.y_axis.y,
        -1.0,
        (1.0 + projection.z_axis.z) / projection.w_axis.z,
    );

    // Scale the plane so it satisfies the clip-space constraint
    let c = clip_plane * (2.0 / clip_plane.dot(q));

    projection.x_axis.z = c.x;
    projection.y_axis.z = c.y;
    projection.z_axis.z = c.z + 1.0 - clip_bias;
    projection.w_axis.z = c.w;
}

// Zero stays zero, unlike f32::signum.
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
