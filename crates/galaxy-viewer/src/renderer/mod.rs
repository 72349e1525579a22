//! The frame renderer. Owns the point pipeline, the depth target and the
//! camera uniform; device handles come in through [`RenderContext`].

pub mod context;
pub mod pipelines;
pub mod targets;

use self::{context::GfxContext, pipelines::points::PointPipeline, targets::Targets};
use crate::{
    camera::Camera,
    data::types::{CameraUniform, PointBuffer},
    error::{Result, ViewerError},
};
use wgpu::util::DeviceExt;

/// Explicit graphics state handed to every component: device handles plus
/// the current camera and model transform.
pub struct RenderContext {
    pub gfx: GfxContext,
    pub camera: Camera,
}

/// Clears, draws the point buffer and submits, once per frame.
pub struct PointRenderer {
    pub targets: Targets,
    pub points: PointPipeline,
    camera_ubo: wgpu::Buffer,
    camera_bind: wgpu::BindGroup,
}

impl PointRenderer {
    pub fn new(ctx: &RenderContext, color_fmt: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let device = &ctx.gfx.device;
        let targets = Targets::new(device, width, height);
        let points = PointPipeline::new(device, color_fmt, targets.depth_fmt);

        let camera_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera UBO"),
            contents: bytemuck::bytes_of(&ctx.camera.uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera BindGroup"),
            layout: &points.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        Self {
            targets,
            points,
            camera_ubo,
            camera_bind,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.targets.resize(device, width, height);
        }
    }

    /// Renders one frame of `count` points from `buffer` into `target`.
    ///
    /// `target` must match the size the renderer was last resized to.
    pub fn render_frame(
        &self,
        ctx: &RenderContext,
        target: &wgpu::TextureView,
        buffer: &PointBuffer,
        count: u32,
    ) -> Result<()> {
        let device = &ctx.gfx.device;
        let queue = &ctx.gfx.queue;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let uniform: CameraUniform = ctx.camera.uniform();
        queue.write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&uniform));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        // Blend and depth state live in the pipeline and end with the pass.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Galaxy Points Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.points.draw(&mut pass, &self.camera_bind, buffer, count);
        }

        queue.submit(std::iter::once(encoder.finish()));

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ViewerError::Render(err.to_string()));
        }

        log::trace!("Frame drawn: {} points, spin {:.1}°", count.min(buffer.len), ctx.camera.spin_deg);
        Ok(())
    }
}
