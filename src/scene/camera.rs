use glam::{Affine3A, Mat4, Vec3};

/// Perspective camera the mirror camera is derived from.
///
/// # Clip-space convention
///
/// The projection matrix uses the GL convention (NDC z in [-1, 1],
/// `Mat4::perspective_rh_gl`): the oblique clip adjustment rewrites
/// projection rows under that convention. Hosts targeting wgpu apply
/// [`GL_TO_WGPU_DEPTH`](crate::material::GL_TO_WGPU_DEPTH) when uploading
/// view-projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // Cached matrices, read by the reflection pass
    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix =
            Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far);
    }

    /// Adopts `world_transform` as the camera pose and refreshes the view
    /// matrix (its inverse).
    pub fn set_world_transform(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
    }

    /// Places the camera at `eye` looking at `target`.
    pub fn look_at_from(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let view = Affine3A::look_at_rh(eye, target, up);
        self.world_matrix = view.inverse();
        self.view_matrix = Mat4::from(view);
    }

    /// Camera position in world space.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.world_matrix.translation)
    }

    /// Unit view direction (world-space -Z of the camera frame).
    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (-Vec3::from(self.world_matrix.matrix3.z_axis)).normalize()
    }

    /// Unit up vector (world-space +Y of the camera frame).
    #[inline]
    #[must_use]
    pub fn up(&self) -> Vec3 {
        Vec3::from(self.world_matrix.matrix3.y_axis).normalize()
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }
}
