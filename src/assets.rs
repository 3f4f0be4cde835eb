// Asset decoding and the hand-off queue to the renderer.
//
// Decoding is pure: bytes in, CPU meshes and RGBA images out. Fetching lives
// in `loader` and GPU upload in `render`; the `AssetQueue` sits between
// them so loads never touch the GPU directly.

use glam::Mat4;
use std::mem;

use crate::error::AssetError;
use crate::geometry::{MeshData, Vertex};
use crate::scene::{MeshHandle, TextureHandle};

/// Tightly packed RGBA8 pixels, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }
}

/// Decode a PNG/JPEG texture.
pub fn decode_image(bytes: &[u8]) -> Result<ImageData, AssetError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(ImageData {
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// One triangle primitive of a decoded model, with its node transform
/// relative to the model root.
#[derive(Clone, Debug)]
pub struct ModelPart {
    pub name: String,
    pub mesh: MeshData,
    pub local: Mat4,
    pub base_color: [f32; 4],
    pub texture: Option<ImageData>,
}

#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub parts: Vec<ModelPart>,
}

impl ModelData {
    /// Re-center every part's geometry on its own bounding-box center.
    pub fn center_parts(&mut self) {
        for part in &mut self.parts {
            part.mesh.center();
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertices.len()).sum()
    }
}

/// Decode a binary glTF (`.glb`) with embedded buffers and images.
pub fn decode_glb(bytes: &[u8]) -> Result<ModelData, AssetError> {
    let (doc, buffers, images) = gltf::import_slice(bytes)?;
    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or(AssetError::EmptyModel)?;

    let mut model = ModelData::default();
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, &buffers, &images, &mut model);
    }
    if model.parts.is_empty() {
        return Err(AssetError::EmptyModel);
    }
    log::info!(
        "[assets] glb decoded: parts={} vertices={}",
        model.parts.len(),
        model.vertex_count()
    );
    Ok(model)
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    model: &mut ModelData,
) {
    let local = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let base_name = node.name().or(mesh.name()).unwrap_or("mesh");
        for (i, prim) in mesh.primitives().enumerate() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let Some(data) = read_primitive(&prim, buffers) else {
                continue;
            };
            let pbr = prim.material().pbr_metallic_roughness();
            let texture = pbr
                .base_color_texture()
                .and_then(|info| images.get(info.texture().source().index()))
                .and_then(gltf_image_to_rgba);
            model.parts.push(ModelPart {
                name: format!("{base_name}#{i}"),
                mesh: data,
                local,
                base_color: pbr.base_color_factor(),
                texture,
            });
        }
    }
    for child in node.children() {
        collect_node(&child, local, buffers, images, model);
    }
}

fn read_primitive(prim: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Option<MeshData> {
    let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }
    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
    let uv_set = prim
        .material()
        .pbr_metallic_roughness()
        .base_color_texture()
        .map(|ti| ti.tex_coord())
        .unwrap_or(0);
    let uvs: Option<Vec<[f32; 2]>> = reader
        .read_tex_coords(uv_set)
        .map(|tc| tc.into_f32().collect());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(ix) => ix.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let has_normals = normals.as_ref().is_some_and(|n| n.len() == positions.len());
    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            position: *p,
            normal: normals
                .as_ref()
                .and_then(|n| n.get(i).copied())
                .unwrap_or([0.0, 0.0, 0.0]),
            uv: uvs.as_ref().and_then(|u| u.get(i).copied()).unwrap_or([0.0, 0.0]),
        })
        .collect();

    let mut mesh = MeshData { vertices, indices };
    if !has_normals {
        mesh.compute_normals();
    }
    Some(mesh)
}

fn gltf_image_to_rgba(img: &gltf::image::Data) -> Option<ImageData> {
    use gltf::image::Format;
    let px = &img.pixels;
    let rgba = match img.format {
        Format::R8G8B8A8 => px.clone(),
        Format::R8G8B8 => px
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        Format::R8G8 => px
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        Format::R8 => px.iter().flat_map(|&l| [l, l, l, 255]).collect(),
        other => {
            log::warn!("[assets] unsupported embedded image format {:?}", other);
            return None;
        }
    };
    Some(ImageData {
        width: img.width,
        height: img.height,
        rgba,
    })
}

/// Decoded data waiting for the next frame to upload it.
///
/// Handles are handed out immediately so the scene graph can reference a
/// mesh or texture before the renderer has seen it; the renderer skips
/// drawables whose mesh has not arrived and samples a white placeholder for
/// textures that have not arrived.
#[derive(Debug, Default)]
pub struct AssetQueue {
    next_mesh: u32,
    next_texture: u32,
    meshes: Vec<(MeshHandle, MeshData)>,
    textures: Vec<(TextureHandle, ImageData)>,
}

impl AssetQueue {
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        let h = MeshHandle(self.next_mesh);
        self.next_mesh += 1;
        self.meshes.push((h, mesh));
        h
    }

    /// Allocate a handle for a texture that is still being fetched.
    pub fn reserve_texture(&mut self) -> TextureHandle {
        let h = TextureHandle(self.next_texture);
        self.next_texture += 1;
        h
    }

    pub fn add_texture(&mut self, image: ImageData) -> TextureHandle {
        let h = self.reserve_texture();
        self.fulfil_texture(h, image);
        h
    }

    pub fn fulfil_texture(&mut self, handle: TextureHandle, image: ImageData) {
        self.textures.push((handle, image));
    }

    pub fn take_meshes(&mut self) -> Vec<(MeshHandle, MeshData)> {
        mem::take(&mut self.meshes)
    }

    pub fn take_textures(&mut self) -> Vec<(TextureHandle, ImageData)> {
        mem::take(&mut self.textures)
    }

    pub fn has_pending(&self) -> bool {
        !self.meshes.is_empty() || !self.textures.is_empty()
    }
}
