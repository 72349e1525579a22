//! Core data types for the galaxy viewer, focused on GPU data representation.

/// Per-frame camera uniform. Must match `CameraUniform` in `galaxy_points.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// `proj * view * model`, column-major.
    pub view_proj: [[f32; 4]; 4],
}

const _: [(); 64] = [(); core::mem::size_of::<CameraUniform>()];

/// Device-resident copy of one point cloud. Written once at creation.
#[derive(Debug)]
pub struct PointBuffer {
    /// Vertex buffer of `galaxy_field::Point` records.
    pub vtx: wgpu::Buffer,
    /// Number of points stored in `vtx`.
    pub len: u32,
}

impl PointBuffer {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the buffer contents in bytes.
    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.len as u64 * galaxy_field::POINT_STRIDE as u64
    }
}
