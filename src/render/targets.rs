use super::helpers;

/// Offscreen targets for the scene pass.
///
/// - `scene_view` holds the lit scene in Rgba16Float; the noise pass samples it.
/// - `depth_view` is the matching depth buffer.
///
/// Only the views are kept; each view holds on to its texture.
pub(crate) struct RenderTargets {
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
}

pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (_, scene_view) = helpers::create_color_texture(
            device,
            "scene_tex",
            width,
            height,
            SCENE_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (_, depth_view) = helpers::create_depth_texture(device, width, height);
        Self {
            scene_view,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
