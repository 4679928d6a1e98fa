//! Oblique near-plane clipping tests
//!
//! Tests for:
//! - Only the projection's third row changes, all other elements are
//!   bit-identical (clip bias zero and nonzero)
//! - Points on the mirror plane map to the near plane (NDC z = -1 + bias)
//! - Straight-on mirrors (view-space plane normal with zero x/y)

use glam::{Affine3A, Mat4, Vec3, Vec4};
use reflector::pass::mirror_camera::surface_plane;
use reflector::pass::oblique::{apply_clip_plane, view_space_plane};
use reflector::scene::Camera;
use reflector::MirrorCamera;
use std::f32::consts::FRAC_PI_2;

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// y=0 plane, outward normal +Y.
fn horizontal_surface() -> Affine3A {
    Affine3A::from_rotation_x(-FRAC_PI_2)
}

fn derive_mirror(eye: Vec3, surface: &Affine3A) -> (Camera, MirrorCamera) {
    let mut camera = Camera::new_perspective(45.0, 1.0, 0.1, 100.0);
    camera.look_at_from(eye, Vec3::ZERO, Vec3::Y);
    let mirror = MirrorCamera::derive(&camera, surface).expect("front-facing camera");
    (camera, mirror)
}

/// NDC z of a world-space point under the mirror camera's matrices.
fn ndc_z(mirror: &MirrorCamera, world_point: Vec3) -> f32 {
    let clip = *mirror.projection_matrix() * *mirror.view_matrix() * world_point.extend(1.0);
    assert!(clip.w > 0.0, "point must be in front of the camera");
    clip.z / clip.w
}

// ============================================================================
// Row isolation
// ============================================================================

fn assert_only_third_row_changed(clip_bias: f32) {
    let surface = horizontal_surface();
    let (_, mut mirror) = derive_mirror(Vec3::new(0.0, 5.0, 10.0), &surface);

    let before = mirror.projection_matrix().to_cols_array();
    mirror.apply_oblique_clip(&surface, clip_bias);
    let after = mirror.projection_matrix().to_cols_array();

    let mut third_row_changed = false;
    for i in 0..16 {
        if i % 4 == 2 {
            third_row_changed |= before[i] != after[i];
        } else {
            assert_eq!(
                before[i], after[i],
                "element {i} outside the third row changed (bias {clip_bias})"
            );
        }
    }
    assert!(third_row_changed, "third row was not rewritten");
}

#[test]
fn only_third_row_changes_with_zero_bias() {
    assert_only_third_row_changed(0.0);
}

#[test]
fn only_third_row_changes_with_nonzero_bias() {
    assert_only_third_row_changed(0.02);
}

// ============================================================================
// Near plane placement
// ============================================================================

#[test]
fn mirror_plane_points_map_to_near_plane() {
    let surface = horizontal_surface();
    let (_, mut mirror) = derive_mirror(Vec3::new(0.0, 5.0, 10.0), &surface);
    mirror.apply_oblique_clip(&surface, 0.0);

    for p in [Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0), Vec3::new(-2.0, 0.0, 3.0)] {
        let z = ndc_z(&mirror, p);
        assert!(approx_eq(z, -1.0), "plane point {p} mapped to NDC z {z}");
    }
}

#[test]
fn clip_bias_offsets_the_near_plane() {
    let surface = horizontal_surface();
    let bias = 0.1;
    let (_, mut mirror) = derive_mirror(Vec3::new(0.0, 5.0, 10.0), &surface);
    mirror.apply_oblique_clip(&surface, bias);

    let z = ndc_z(&mirror, Vec3::ZERO);
    assert!(
        approx_eq(z, -1.0 + bias),
        "biased plane point mapped to NDC z {z}"
    );
}

#[test]
fn near_plane_independent_of_original_near_far() {
    let surface = horizontal_surface();

    for (near, far) in [(0.1_f32, 100.0_f32), (1.0, 2000.0)] {
        let mut camera = Camera::new_perspective(45.0, 1.0, near, far);
        camera.look_at_from(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, Vec3::Y);
        let mut mirror = MirrorCamera::derive(&camera, &surface).unwrap();
        mirror.apply_oblique_clip(&surface, 0.0);

        let z = ndc_z(&mirror, Vec3::ZERO);
        assert!(
            approx_eq(z, -1.0),
            "near {near} / far {far}: plane point mapped to NDC z {z}"
        );
    }
}

#[test]
fn straight_on_mirror_clips_at_plane() {
    // z=0 plane with outward normal +Z: the surface's identity transform.
    // The view-space plane normal has zero x/y, exercising the sign(0)
    // branches of the q vector.
    let surface = Affine3A::IDENTITY;
    let mut camera = Camera::new_perspective(60.0, 1.0, 0.1, 50.0);
    camera.look_at_from(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);

    let mut mirror = MirrorCamera::derive(&camera, &surface).unwrap();
    mirror.apply_oblique_clip(&surface, 0.0);

    let z = ndc_z(&mirror, Vec3::new(0.5, 0.5, 0.0));
    assert!(approx_eq(z, -1.0), "plane point mapped to NDC z {z}");
}

// ============================================================================
// View-space plane helper
// ============================================================================

#[test]
fn view_space_plane_preserves_signed_distance() {
    let surface = horizontal_surface();
    let (_, mirror) = derive_mirror(Vec3::new(0.0, 5.0, 10.0), &surface);

    let world_plane = surface_plane(&surface);
    let clip_plane = view_space_plane(&world_plane, mirror.view_matrix());

    // The view matrix is rigid, so signed distances are preserved: a world
    // point 2 above the plane sits 2 from the view-space plane.
    let world_point = Vec3::new(0.0, 2.0, 0.0);
    let view_point = mirror.view_matrix().transform_point3(world_point);
    let distance = clip_plane.dot(view_point.extend(1.0));
    assert!(approx_eq(distance.abs(), 2.0), "distance was {distance}");
}

#[test]
fn apply_clip_plane_on_raw_projection() {
    // Bypass the mirror camera entirely: clip against a view-space plane
    // 5 units down the view axis, normal toward the camera.
    let mut proj = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
    apply_clip_plane(&mut proj, Vec4::new(0.0, 0.0, 1.0, 5.0), 0.0);

    let clip = proj * Vec4::new(0.0, 0.0, -5.0, 1.0);
    let z = clip.z / clip.w;
    assert!(approx_eq(z, -1.0), "plane point mapped to NDC z {z}");
}

#[test]
fn projection_matrix_is_gl_convention() {
    // Sanity-check the convention the oblique formula assumes: the
    // unadjusted near plane maps to NDC z = -1.
    let proj = Mat4::perspective_rh_gl(1.0, 1.0, 0.5, 100.0);
    let clip = proj * Vec4::new(0.0, 0.0, -0.5, 1.0);
    assert!(approx_eq(clip.z / clip.w, -1.0));
}
