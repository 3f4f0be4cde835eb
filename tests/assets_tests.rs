// Host-side tests for model/texture decoding and the upload queue.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod geometry {
    include!("../src/geometry.rs");
}
mod scene {
    include!("../src/scene.rs");
}
mod error {
    include!("../src/error.rs");
}
mod assets {
    include!("../src/assets.rs");
}

use assets::*;
use error::AssetError;
use geometry::MeshData;
use glam::Vec3;

/// Pack a JSON document and an optional binary chunk into a GLB container.
fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let mut total = 12 + 8 + json.len();
    if !bin.is_empty() {
        total += 8 + bin.len();
    }

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    if !bin.is_empty() {
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin);
    }
    out
}

fn triangle_glb() -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0];
    let bin: Vec<u8> = positions.iter().flat_map(|f| f.to_le_bytes()).collect();
    let json = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0, "name": "tri", "translation": [1.0, 2.0, 3.0]}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "accessors": [{
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0.0, 0.0, 0.0], "max": [2.0, 2.0, 0.0]
        }],
        "bufferViews": [{"buffer": 0, "byteLength": 36}],
        "buffers": [{"byteLength": 36}]
    }"#;
    glb(json, &bin)
}

#[test]
fn minimal_glb_decodes_into_one_part() {
    let model = decode_glb(&triangle_glb()).expect("decode");
    assert_eq!(model.parts.len(), 1);
    let part = &model.parts[0];
    assert_eq!(part.name, "tri#0");
    assert_eq!(part.mesh.vertices.len(), 3);
    // Non-indexed primitives get sequential indices.
    assert_eq!(part.mesh.indices, vec![0, 1, 2]);
    assert_eq!(part.base_color, [1.0; 4]);
    assert!(part.texture.is_none());
    assert_eq!(part.local.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(model.vertex_count(), 3);
}

#[test]
fn missing_normals_are_computed() {
    let model = decode_glb(&triangle_glb()).unwrap();
    for v in &model.parts[0].mesh.vertices {
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn center_parts_recenters_geometry() {
    let mut model = decode_glb(&triangle_glb()).unwrap();
    model.center_parts();
    let (lo, hi) = model.parts[0].mesh.bounds().unwrap();
    assert!(((lo + hi) * 0.5).length() < 1e-6);
}

#[test]
fn garbage_bytes_fail_with_gltf_error() {
    let err = decode_glb(b"definitely not a model").unwrap_err();
    assert!(matches!(err, AssetError::Gltf(_)), "{err:?}");
}

#[test]
fn model_without_meshes_is_empty() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "scenes": [{"nodes": [0]}],
        "nodes": [{"name": "empty"}]
    }"#;
    let err = decode_glb(&glb(json, &[])).unwrap_err();
    assert!(matches!(err, AssetError::EmptyModel), "{err:?}");
}

#[test]
fn png_decodes_to_rgba8() {
    let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&bytes).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 3));
    assert_eq!(decoded.rgba.len(), 2 * 3 * 4);
    assert_eq!(&decoded.rgba[..4], &[10, 20, 30, 255]);
}

#[test]
fn rgb_png_gains_opaque_alpha() {
    let img = image::RgbImage::from_pixel(1, 1, image::Rgb([1, 2, 3]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    assert_eq!(decode_image(&bytes).unwrap().rgba, vec![1, 2, 3, 255]);
}

#[test]
fn garbage_image_fails_with_image_error() {
    let err = decode_image(&[0, 1, 2, 3]).unwrap_err();
    assert!(matches!(err, AssetError::Image(_)), "{err:?}");
}

#[test]
fn queue_hands_out_handles_and_drains() {
    let mut q = AssetQueue::default();
    assert!(!q.has_pending());

    let m0 = q.add_mesh(MeshData::sphere(3.0));
    let m1 = q.add_mesh(MeshData::sphere(3.0));
    assert_ne!(m0, m1);

    let pending = q.reserve_texture();
    let ready = q.add_texture(ImageData::solid([255, 0, 0, 255]));
    assert_ne!(pending, ready);
    assert!(q.has_pending());

    assert_eq!(q.take_meshes().len(), 2);
    let textures = q.take_textures();
    assert_eq!(textures.len(), 1);
    assert_eq!(textures[0].0, ready);
    assert!(!q.has_pending());

    // A late fetch fulfils the reserved handle.
    q.fulfil_texture(pending, ImageData::solid([0; 4]));
    assert_eq!(q.take_textures()[0].0, pending);
}
