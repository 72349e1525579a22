use crate::data::types::{CameraUniform, PointBuffer};
use galaxy_field::{COLOR_OFFSET, POINT_STRIDE, POSITION_OFFSET};

/// Vertex layout of one `galaxy_field::Point` record.
pub const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    // Position (vec3)
    wgpu::VertexAttribute {
        shader_location: 0,
        offset: POSITION_OFFSET as u64,
        format: wgpu::VertexFormat::Float32x3,
    },
    // Color (vec3)
    wgpu::VertexAttribute {
        shader_location: 1,
        offset: COLOR_OFFSET as u64,
        format: wgpu::VertexFormat::Float32x3,
    },
];

pub fn point_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: POINT_STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POINT_ATTRIBUTES,
    }
}

pub struct PointPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub camera_layout: wgpu::BindGroupLayout,
}

impl PointPipeline {
    pub fn new(
        device: &wgpu::Device,
        color_fmt: wgpu::TextureFormat,
        depth_fmt: wgpu::TextureFormat,
    ) -> Self {
        // Uniform buffer layout for the camera
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera UBO Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<CameraUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shaders/galaxy_points.wgsl"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../shaders/galaxy_points.wgsl").into(),
            ),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Galaxy Points PipelineLayout"),
            bind_group_layouts: &[&camera_layout],
            push_constant_ranges: &[],
        });

        // Points are always one pixel in wgpu; there is no size or sprite state.
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Galaxy Points Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[point_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_fmt,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    // src-alpha, one-minus-src-alpha
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            pipeline,
            camera_layout,
        }
    }

    /// Draws the first `count` points of `points`. An empty range records nothing.
    pub fn draw<'a>(
        &'a self,
        rpass: &mut wgpu::RenderPass<'a>,
        camera_bind: &'a wgpu::BindGroup,
        points: &'a PointBuffer,
        count: u32,
    ) {
        let count = count.min(points.len);
        if count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, camera_bind, &[]);
        rpass.set_vertex_buffer(0, points.vtx.slice(..));
        rpass.draw(0..count, 0..1);
    }
}
