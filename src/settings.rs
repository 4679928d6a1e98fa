//! Reflector Configuration
//!
//! [`ReflectorSettings`] collects everything that is fixed at construction
//! time: the tint color blended over the reflection, the offscreen buffer
//! resolution, the near-clip bias used by the oblique frustum adjustment,
//! and the compositing opacity. The settings are immutable once a
//! [`ReflectionPass`](crate::ReflectionPass) has been built from them.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reflector::ReflectorSettings;
//!
//! // Defaults: mid-gray tint, 512x512 buffer, no clip bias, fully opaque
//! let settings = ReflectorSettings::default();
//!
//! // Slight bias to avoid z-fighting on large mirrors
//! let settings = ReflectorSettings {
//!     clip_bias: 0.003,
//!     ..Default::default()
//! };
//! ```

use std::borrow::Cow;

use glam::Vec3;

use crate::errors::{ReflectorError, Result};

/// Construction-time configuration for a reflection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectorSettings {
    /// Tint color overlay-blended with the sampled reflection.
    pub color: Vec3,
    /// Offscreen buffer width in pixels.
    pub width: u32,
    /// Offscreen buffer height in pixels.
    pub height: u32,
    /// Offset applied to the oblique near plane to avoid z-fighting with
    /// the mirror geometry. Zero keeps the clip plane exactly coplanar.
    pub clip_bias: f32,
    /// Blend factor between the surface's own texture and the composited
    /// reflection. `1.0` shows the full reflection blend.
    pub opacity: f32,
    /// Whether the compositing pipeline alpha-blends against the scene.
    pub transparent: bool,
    /// Replacement WGSL source for the compositing shader. `None` uses the
    /// built-in shader.
    pub shader_override: Option<Cow<'static, str>>,
}

impl Default for ReflectorSettings {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.5),
            width: 512,
            height: 512,
            clip_bias: 0.0,
            opacity: 1.0,
            transparent: true,
            shader_override: None,
        }
    }
}

impl ReflectorSettings {
    /// Checks that the configured buffer resolution is usable.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReflectorError::InvalidTargetSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
