// GPU uniform layouts shared by `render` and the frame loop. Field order
// and padding match the WGSL structs in `shaders/`.

use glam::Mat4;

use crate::camera::{Camera, LightRig, Viewport};
use crate::controller::EffectParams;
use crate::scene::Material;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NoiseUniforms {
    pub time: f32,
    pub effect: f32,
    pub direction: f32,
    pub aspect_ratio: f32,
}

impl NoiseUniforms {
    pub fn new(params: EffectParams, elapsed_sec: f32, viewport: &Viewport) -> Self {
        Self {
            time: elapsed_sec,
            effect: params.intensity,
            direction: params.direction,
            aspect_ratio: viewport.aspect(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub lights: [[f32; 4]; 3],
}

impl FrameUniforms {
    pub fn new(camera: &Camera, rig: &LightRig) -> Self {
        let dirs = rig.world_directions(camera);
        let mut lights = [[0.0; 4]; 3];
        for (i, (d, l)) in dirs.iter().zip(rig.directional.iter()).enumerate() {
            lights[i] = [d.x, d.y, d.z, l.intensity];
        }
        let [r, g, b] = rig.ambient;
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            ambient: [r, g, b, 1.0],
            lights,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniforms {
    pub fn from_world(world: Mat4) -> Self {
        Self {
            model: world.to_cols_array_2d(),
            normal: world.inverse().transpose().to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl MaterialUniforms {
    pub fn from_material(material: &Material) -> Self {
        match material {
            Material::Lambert { color, .. } => Self {
                color: *color,
                params: [0.0; 4],
            },
            Material::Unlit { color } => Self {
                color: *color,
                params: [1.0, 0.0, 0.0, 0.0],
            },
        }
    }
}
