use fnv::FnvHashMap;
use web_sys as web;

use crate::assets::{AssetQueue, ImageData};
use crate::camera::{Camera, LightRig};
use crate::scene::{MeshHandle, NodeId, SceneGraph, TextureHandle};
use crate::uniforms::{FrameUniforms, MaterialUniforms, NoiseUniforms, ObjectUniforms};

mod helpers;
mod mesh;
mod post;
mod targets;
use mesh::{DrawSlot, GpuMesh, SceneResources};
use post::NoiseResources;
use targets::RenderTargets;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static NOISE_WGSL: &str = include_str!("../shaders/noise.wgsl");

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    scene: SceneResources,
    noise: NoiseResources,
    bg_noise: wgpu::BindGroup,

    meshes: FnvHashMap<MeshHandle, GpuMesh>,
    textures: FnvHashMap<TextureHandle, (wgpu::Texture, wgpu::TextureView)>,
    placeholder: (wgpu::Texture, wgpu::TextureView),
    slots: FnvHashMap<NodeId, DrawSlot>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Transparent canvas so the page shows through the cleared background.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let noise_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("noise_shader"),
            source: wgpu::ShaderSource::Wgsl(NOISE_WGSL.into()),
        });
        let scene = mesh::create_scene_resources(&device, &scene_shader, targets::SCENE_FORMAT);
        let noise = post::create_noise_resources(&device, &noise_shader, format);
        let bg_noise =
            post::create_noise_bind_group(&device, &noise, &linear_sampler, &targets.scene_view);
        let placeholder = helpers::upload_rgba_texture(
            &device,
            &queue,
            "placeholder_tex",
            &ImageData::solid([255, 255, 255, 255]),
        );

        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            scene,
            noise,
            bg_noise,
            meshes: FnvHashMap::default(),
            textures: FnvHashMap::default(),
            placeholder,
            slots: FnvHashMap::default(),
            width,
            height,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    /// Move everything the loaders decoded since the last frame onto the GPU.
    pub fn upload_pending(&mut self, assets: &mut AssetQueue) {
        if !assets.has_pending() {
            return;
        }
        for (handle, data) in assets.take_meshes() {
            let gpu = mesh::upload_mesh(&self.device, "mesh", &data);
            self.meshes.insert(handle, gpu);
        }
        for (handle, image) in assets.take_textures() {
            let tex = helpers::upload_rgba_texture(&self.device, &self.queue, "texture", &image);
            self.textures.insert(handle, tex);
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen targets and the bind group that samples them
            self.targets.recreate(&self.device, width, height);
            self.bg_noise = post::create_noise_bind_group(
                &self.device,
                &self.noise,
                &self.linear_sampler,
                &self.targets.scene_view,
            );
        }
    }

    pub fn render(
        &mut self,
        graph: &SceneGraph,
        camera: &Camera,
        lights: &LightRig,
        noise: &NoiseUniforms,
    ) -> Result<(), wgpu::SurfaceError> {
        let draws = graph.drawables();
        self.sync_slots(&draws);

        self.queue.write_buffer(
            &self.scene.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::new(camera, lights)),
        );
        for (id, world, _) in &draws {
            if let Some(slot) = self.slots.get(id) {
                self.queue.write_buffer(
                    &slot.object_buffer,
                    0,
                    bytemuck::bytes_of(&ObjectUniforms::from_world(*world)),
                );
            }
        }
        post::write_noise_uniforms(&self.queue, &self.noise.uniform_buffer, noise);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene.pipeline);
            rpass.set_bind_group(0, &self.scene.frame_bg, &[]);
            for (id, _, drawable) in &draws {
                let (Some(gpu_mesh), Some(slot)) =
                    (self.meshes.get(&drawable.mesh), self.slots.get(id))
                else {
                    continue;
                };
                rpass.set_bind_group(1, &slot.object_bg, &[]);
                rpass.set_bind_group(2, &slot.material_bg, &[]);
                rpass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }

        post::blit(
            &mut encoder,
            "noise_pass",
            &view,
            wgpu::Color::TRANSPARENT,
            &self.noise.pipeline,
            &self.bg_noise,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> GpuState<'a> {
    /// Create slots for new drawables and bind textures that arrived since.
    fn sync_slots(&mut self, draws: &[(NodeId, glam::Mat4, crate::scene::Drawable)]) {
        for (id, _, drawable) in draws {
            let wanted = drawable.material.texture();
            let ready = wanted.filter(|h| self.textures.contains_key(h));
            match self.slots.get_mut(id) {
                Some(slot) => {
                    if let Some(h) = ready {
                        if slot.bound_texture != Some(h) {
                            let (_, view) = &self.textures[&h];
                            slot.rebind_texture(
                                &self.device,
                                &self.scene,
                                &self.linear_sampler,
                                h,
                                view,
                            );
                        }
                    }
                }
                None => {
                    let view = match ready {
                        Some(h) => &self.textures[&h].1,
                        None => &self.placeholder.1,
                    };
                    let slot = DrawSlot::new(
                        &self.device,
                        &self.scene,
                        &self.linear_sampler,
                        &MaterialUniforms::from_material(&drawable.material),
                        (ready, view),
                    );
                    self.slots.insert(*id, slot);
                }
            }
        }
    }
}
