use crate::data::types::CameraUniform;
use glam::{Mat4, Vec3};

/// Vertical field of view, degrees.
pub const FOV_Y_DEG: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// The scene is pushed this far down -Z, away from the viewer.
pub const VIEW_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -100.0);

/// Rotation applied per rendered frame, degrees. Not scaled by elapsed time.
pub const SPIN_STEP_DEG: f32 = 0.1;
/// Un-normalized spin axis.
pub const SPIN_AXIS: Vec3 = Vec3::new(0.1, 0.1, 0.1);

/// Fixed camera looking at a slowly spinning field.
///
/// The model rotation is stored as an accumulated angle about a fixed axis, so
/// repeated per-frame increments do not drift the way a re-multiplied matrix would.
#[derive(Debug, Clone)]
pub struct Camera {
    pub proj: Mat4,
    pub view: Mat4,
    /// Accumulated spin in degrees, kept in `[0, 360)`.
    pub spin_deg: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            proj: Self::projection(width, height),
            view: Mat4::from_translation(VIEW_OFFSET),
            spin_deg: 0.0,
        }
    }

    // wgpu clip space has 0..1 depth; perspective_rh targets exactly that.
    fn projection(width: u32, height: u32) -> Mat4 {
        Mat4::perspective_rh(
            FOV_Y_DEG.to_radians(),
            width.max(1) as f32 / height.max(1) as f32,
            Z_NEAR,
            Z_FAR,
        )
    }

    /// Rebuilds the projection for a new surface size. Zero sizes (minimized) are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.proj = Self::projection(width, height);
        }
    }

    /// Advances the spin by one frame's worth.
    pub fn advance(&mut self) {
        self.spin_deg = (self.spin_deg + SPIN_STEP_DEG).rem_euclid(360.0);
    }

    #[inline]
    pub fn model(&self) -> Mat4 {
        Mat4::from_axis_angle(SPIN_AXIS.normalize(), self.spin_deg.to_radians())
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view * self.model()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
