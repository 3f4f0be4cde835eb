use super::helpers;
use crate::uniforms::NoiseUniforms;

/// The noise pass: scene texture in, swapchain out.
pub(crate) struct NoiseResources {
    pub(crate) bgl: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_noise_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> NoiseResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("noise_bgl"),
        entries: &[
            helpers::texture_entry(0),
            helpers::sampler_entry(1),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "noise_uniforms",
        &NoiseUniforms {
            time: 0.0,
            effect: 0.0,
            direction: 0.0,
            aspect_ratio: 1.0,
        },
    );
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_noise"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_post_pipeline(
        device,
        &layout,
        shader,
        "fs_noise",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    NoiseResources {
        bgl,
        uniform_buffer,
        pipeline,
    }
}

pub(crate) fn create_noise_bind_group(
    device: &wgpu::Device,
    noise: &NoiseResources,
    sampler: &wgpu::Sampler,
    scene_view: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_noise"),
        layout: &noise.bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(scene_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: noise.uniform_buffer.as_entire_binding(),
            },
        ],
    })
}

#[inline]
pub(crate) fn write_noise_uniforms(queue: &wgpu::Queue, buffer: &wgpu::Buffer, u: &NoiseUniforms) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(u));
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    r.draw(0..3, 0..1);
}
