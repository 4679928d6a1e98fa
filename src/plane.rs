//! World-space plane math for the mirror surface.
//!
//! A plane is stored in Hessian normal form: a unit `normal` and a signed
//! `constant`, so that a point `p` lies on the plane when
//! `normal.dot(p) + constant == 0`. The reflective surface's plane is
//! rebuilt from its node's world transform every frame and never persisted.

use glam::{Mat4, Vec3, Vec4};

/// An infinite plane in Hessian normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    /// Signed distance of the origin from the plane.
    pub constant: f32,
}

impl Plane {
    /// Builds the plane with the given `normal` passing through `point`.
    ///
    /// `normal` is normalized; a zero normal yields a degenerate plane and
    /// undefined output downstream.
    #[must_use]
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Signed distance of `point` from the plane, positive on the side the
    /// normal points into.
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Mirrors `point` to the opposite side of the plane.
    #[inline]
    #[must_use]
    pub fn mirror_point(&self, point: Vec3) -> Vec3 {
        point - 2.0 * self.distance_to_point(point) * self.normal
    }

    /// Transforms the plane by `matrix` (normal via inverse-transpose),
    /// renormalizing the result.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let v = matrix.inverse().transpose() * self.as_vec4();
        let normal = Vec3::new(v.x, v.y, v.z);
        let inv_len = normal.length().recip();
        Self {
            normal: normal * inv_len,
            constant: v.w * inv_len,
        }
    }

    /// The plane as `(nx, ny, nz, constant)`.
    #[inline]
    #[must_use]
    pub fn as_vec4(&self) -> Vec4 {
        self.normal.extend(self.constant)
    }
}
