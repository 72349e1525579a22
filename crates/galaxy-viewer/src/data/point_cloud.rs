use crate::data::types::PointBuffer;
use crate::error::{Result, ViewerError};
use galaxy_field::PointCloud;
use wgpu::util::DeviceExt;

/// Rejects a vertex buffer of `bytes` that the device cannot allocate.
pub fn check_buffer_size(bytes: u64, limits: &wgpu::Limits) -> Result<()> {
    if bytes > limits.max_buffer_size {
        return Err(ViewerError::Device(format!(
            "{bytes} bytes of points exceed the device buffer limit of {} bytes ({} points)",
            limits.max_buffer_size,
            limits.max_buffer_size / galaxy_field::POINT_STRIDE as u64
        )));
    }
    Ok(())
}

/// Copy a generated cloud into a static vertex buffer.
///
/// The cloud is only borrowed; callers are free to drop it once this returns.
/// The buffer has no `COPY_DST` usage, so nothing can rewrite it afterwards.
pub fn upload_point_cloud(device: &wgpu::Device, cloud: &PointCloud) -> Result<PointBuffer> {
    let len = u32::try_from(cloud.len()).map_err(|_| {
        ViewerError::Device(format!("{} points exceed a single draw", cloud.len()))
    })?;

    // Oversized buffers come back invalid and wgpu panics when mapping them,
    // so the limit is checked before any allocation.
    check_buffer_size(cloud.as_bytes().len() as u64, &device.limits())?;

    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Galaxy Points"),
        contents: cloud.as_bytes(),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let validation = pollster::block_on(device.pop_error_scope());
    let oom = pollster::block_on(device.pop_error_scope());
    if let Some(err) = oom.or(validation) {
        return Err(ViewerError::Device(format!(
            "vertex buffer upload of {} bytes failed: {err}",
            cloud.as_bytes().len()
        )));
    }

    // Bounds logging is confined to debug builds.
    #[cfg(debug_assertions)]
    if let Some(b) = cloud.bounds() {
        log::debug!(
            "Point cloud AABB min({:.2},{:.2},{:.2}) max({:.2},{:.2},{:.2})",
            b.min[0], b.min[1], b.min[2],
            b.max[0], b.max[1], b.max[2],
        );
    }

    let buffer = PointBuffer { vtx, len };
    log::info!(
        "Uploaded {} points ({} bytes) to the GPU",
        buffer.len,
        buffer.byte_len()
    );

    Ok(buffer)
}
