use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use super::helpers;
use crate::geometry::{MeshData, Vertex};
use crate::scene::TextureHandle;
use crate::uniforms::{FrameUniforms, MaterialUniforms, ObjectUniforms};

pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

pub(crate) fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &MeshData) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    }
}

/// Pipeline and layouts of the lit scene pass.
pub(crate) struct SceneResources {
    pub(crate) object_bgl: wgpu::BindGroupLayout,
    pub(crate) material_bgl: wgpu::BindGroupLayout,
    pub(crate) frame_buffer: wgpu::Buffer,
    pub(crate) frame_bg: wgpu::BindGroup,
    pub(crate) pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> SceneResources {
    let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_frame_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_object_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_material_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
            helpers::texture_entry(1),
            helpers::sampler_entry(2),
        ],
    });

    let frame_buffer = helpers::uniform_buffer(
        device,
        "scene_frame_uniforms",
        &FrameUniforms::zeroed(),
    );
    let frame_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_frame_bg"),
        layout: &frame_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: frame_buffer.as_entire_binding(),
        }],
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_scene"),
        bind_group_layouts: &[&frame_bgl, &object_bgl, &material_bgl],
        push_constant_ranges: &[],
    });
    let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attributes,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    SceneResources {
        object_bgl,
        material_bgl,
        frame_buffer,
        frame_bg,
        pipeline,
    }
}

/// Per-node uniforms and bind groups.
pub(crate) struct DrawSlot {
    pub(crate) object_buffer: wgpu::Buffer,
    pub(crate) object_bg: wgpu::BindGroup,
    pub(crate) material_buffer: wgpu::Buffer,
    pub(crate) material_bg: wgpu::BindGroup,
    /// Texture currently bound; `None` means the white placeholder.
    pub(crate) bound_texture: Option<TextureHandle>,
}

impl DrawSlot {
    pub(crate) fn new(
        device: &wgpu::Device,
        scene: &SceneResources,
        sampler: &wgpu::Sampler,
        material: &MaterialUniforms,
        texture: (Option<TextureHandle>, &wgpu::TextureView),
    ) -> Self {
        let object_buffer = helpers::uniform_buffer(
            device,
            "object_uniforms",
            &ObjectUniforms::zeroed(),
        );
        let object_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &scene.object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });
        let material_buffer = helpers::uniform_buffer(device, "material_uniforms", material);
        let material_bg =
            material_bind_group(device, scene, sampler, &material_buffer, texture.1);
        Self {
            object_buffer,
            object_bg,
            material_buffer,
            material_bg,
            bound_texture: texture.0,
        }
    }

    pub(crate) fn rebind_texture(
        &mut self,
        device: &wgpu::Device,
        scene: &SceneResources,
        sampler: &wgpu::Sampler,
        handle: TextureHandle,
        view: &wgpu::TextureView,
    ) {
        self.material_bg = material_bind_group(device, scene, sampler, &self.material_buffer, view);
        self.bound_texture = Some(handle);
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    scene: &SceneResources,
    sampler: &wgpu::Sampler,
    buffer: &wgpu::Buffer,
    view: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("material_bg"),
        layout: &scene.material_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
