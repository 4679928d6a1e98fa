//! Compositing contract tests
//!
//! Tests for:
//! - Overlay-blend operator identities
//! - MirrorUniforms layout and defaults
//! - ReflectorSettings defaults and validation
//! - GL-to-wgpu depth range correction

use glam::{Mat4, Vec3, Vec4};
use reflector::material::{overlay_blend, MirrorUniforms, GL_TO_WGPU_DEPTH};
use reflector::{ReflectorError, ReflectorSettings};

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Overlay blend
// ============================================================================

#[test]
fn overlay_of_black_base_is_black() {
    for i in 0..=10 {
        let x = i as f32 / 10.0;
        assert!(vec3_approx(
            overlay_blend(Vec3::ZERO, Vec3::splat(x)),
            Vec3::ZERO
        ));
    }
}

#[test]
fn overlay_of_white_base_is_white() {
    for i in 0..=10 {
        let x = i as f32 / 10.0;
        assert!(vec3_approx(
            overlay_blend(Vec3::ONE, Vec3::splat(x)),
            Vec3::ONE
        ));
    }
}

#[test]
fn overlay_of_mid_gray_base_is_identity() {
    for i in 0..=10 {
        let x = i as f32 / 10.0;
        assert!(vec3_approx(
            overlay_blend(Vec3::splat(0.5), Vec3::splat(x)),
            Vec3::splat(x)
        ));
    }
}

#[test]
fn overlay_branches_agree_at_midpoint() {
    // Both branch formulas evaluate to the blend value at base = 0.5, so
    // the operator is continuous across the branch switch
    let blend = 0.37;
    let below = overlay_blend(Vec3::splat(0.5 - 1e-5), Vec3::splat(blend)).x;
    let above = overlay_blend(Vec3::splat(0.5 + 1e-5), Vec3::splat(blend)).x;
    assert!((below - above).abs() < 1e-3);
}

#[test]
fn overlay_is_per_channel() {
    let base = Vec3::new(0.0, 0.5, 1.0);
    let blend = Vec3::splat(0.25);
    let out = overlay_blend(base, blend);
    assert!(approx_eq(out.x, 0.0));
    assert!(approx_eq(out.y, 0.25));
    assert!(approx_eq(out.z, 1.0));
}

// ============================================================================
// Uniform layout
// ============================================================================

#[test]
fn mirror_uniforms_layout_matches_wgsl() {
    // mat4x4 (64) + vec3 (12) + f32 (4), no implicit padding
    assert_eq!(std::mem::size_of::<MirrorUniforms>(), 80);

    let uniforms = MirrorUniforms::default();
    assert_eq!(bytemuck::bytes_of(&uniforms).len(), 80);
}

#[test]
fn mirror_uniforms_default_from_settings() {
    let uniforms = MirrorUniforms::default();
    assert_eq!(uniforms.texture_matrix, Mat4::IDENTITY);
    assert!(vec3_approx(uniforms.color, Vec3::splat(0.5)));
    assert!(approx_eq(uniforms.opacity, 1.0));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_documented_defaults() {
    let settings = ReflectorSettings::default();
    assert!(vec3_approx(settings.color, Vec3::splat(0.5)));
    assert_eq!(settings.width, 512);
    assert_eq!(settings.height, 512);
    assert!(approx_eq(settings.clip_bias, 0.0));
    assert!(approx_eq(settings.opacity, 1.0));
    assert!(settings.transparent);
    assert!(settings.shader_override.is_none());
}

#[test]
fn settings_reject_zero_resolution() {
    let settings = ReflectorSettings {
        width: 0,
        ..Default::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(ReflectorError::InvalidTargetSize { width: 0, .. })
    ));

    let settings = ReflectorSettings {
        height: 0,
        ..Default::default()
    };
    assert!(settings.validate().is_err());
}

// ============================================================================
// Depth range correction
// ============================================================================

#[test]
fn depth_correction_remaps_gl_to_wgpu() {
    let near = GL_TO_WGPU_DEPTH * Vec4::new(0.0, 0.0, -1.0, 1.0);
    let far = GL_TO_WGPU_DEPTH * Vec4::new(0.0, 0.0, 1.0, 1.0);

    assert!(approx_eq(near.z, 0.0));
    assert!(approx_eq(far.z, 1.0));
    // x/y/w untouched
    let v = GL_TO_WGPU_DEPTH * Vec4::new(0.25, -0.5, 0.0, 1.0);
    assert!(approx_eq(v.x, 0.25) && approx_eq(v.y, -0.5) && approx_eq(v.w, 1.0));
}
