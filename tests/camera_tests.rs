// Host-side tests for the camera, orbit controls, light rig and the
// uniform blocks fed from them.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod sections {
    include!("../src/sections.rs");
}
mod controller {
    include!("../src/controller.rs");
}
mod scene {
    include!("../src/scene.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod uniforms {
    include!("../src/uniforms.rs");
}

use camera::*;
use controller::EffectParams;
use glam::Vec3;
use uniforms::*;

#[test]
fn camera_defaults() {
    let c = Camera::new(1.5);
    assert_eq!(c.eye, Vec3::new(0.0, 0.0, 200.0));
    assert_eq!(c.target, Vec3::ZERO);
    assert!((c.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!((c.znear, c.zfar), (0.1, 1000.0));
}

#[test]
fn resize_feeds_camera_and_noise_aspect() {
    let mut viewport = Viewport::new(800.0, 600.0);
    let mut cam = Camera::new(viewport.aspect());
    viewport.resize(1920.0, 480.0);

    cam.fit_viewport(&viewport);
    let noise = NoiseUniforms::new(
        EffectParams {
            direction: 0.0,
            intensity: 0.0,
        },
        0.0,
        &viewport,
    );
    assert_eq!(cam.aspect, 4.0);
    assert_eq!(noise.aspect_ratio, 4.0);

    let p = cam.projection_matrix();
    // x scale is y scale divided by aspect
    assert!((p.x_axis.x * 4.0 - p.y_axis.y).abs() < 1e-5);
}

#[test]
fn zero_height_viewport_keeps_finite_aspect() {
    let v = Viewport::new(300.0, 0.0);
    assert_eq!(v.aspect(), 1.0);
}

#[test]
fn noise_uniforms_carry_effect_params() {
    let v = Viewport::new(100.0, 50.0);
    let n = NoiseUniforms::new(
        EffectParams {
            direction: -0.5,
            intensity: 0.25,
        },
        3.5,
        &v,
    );
    assert_eq!(n.time, 3.5);
    assert_eq!(n.effect, 0.25);
    assert_eq!(n.direction, -0.5);
    assert_eq!(n.aspect_ratio, 2.0);
}

#[test]
fn uniform_blocks_match_wgsl_sizes() {
    use std::mem::size_of;
    assert_eq!(size_of::<NoiseUniforms>(), 16);
    assert_eq!(size_of::<FrameUniforms>(), 128);
    assert_eq!(size_of::<ObjectUniforms>(), 128);
    assert_eq!(size_of::<MaterialUniforms>(), 32);
}

#[test]
fn orbit_starts_from_camera_position() {
    let cam = Camera::new(1.0);
    let orbit = OrbitControls::new(&cam, None);
    let mut moved = cam.clone();
    orbit.apply(&mut moved);
    assert!((moved.eye - cam.eye).length() < 1e-3);
}

#[test]
fn orbit_without_autorotate_stays_put() {
    let cam = Camera::new(1.0);
    let mut orbit = OrbitControls::new(&cam, None);
    orbit.update(10.0);
    let mut moved = cam.clone();
    orbit.apply(&mut moved);
    assert!((moved.eye - cam.eye).length() < 1e-3);
}

#[test]
fn autorotate_speed_two_is_thirty_seconds_per_turn() {
    let mut cam = Camera::new(1.0);
    let mut orbit = OrbitControls::new(&cam, Some(2.0));
    orbit.update(7.5);
    orbit.apply(&mut cam);
    // A quarter turn, clockwise seen from above: +Z swings round to -X.
    assert!((cam.eye - Vec3::new(-200.0, 0.0, 0.0)).length() < 0.1);

    orbit.update(22.5);
    orbit.apply(&mut cam);
    assert!((cam.eye - Vec3::new(0.0, 0.0, 200.0)).length() < 0.1);
}

#[test]
fn drag_rotates_and_keeps_radius() {
    let mut cam = Camera::new(1.0);
    let mut orbit = OrbitControls::new(&cam, None);
    orbit.drag(-250.0, 0.0, 1000.0);
    orbit.apply(&mut cam);
    assert!((cam.eye.length() - 200.0).abs() < 1e-2);
    assert!(cam.eye.x > 199.0);
}

#[test]
fn vertical_drag_is_clamped_at_poles() {
    let mut cam = Camera::new(1.0);
    let mut orbit = OrbitControls::new(&cam, None);
    // Never exactly over a pole, where the view would flip.
    orbit.drag(0.0, 10_000.0, 100.0);
    orbit.apply(&mut cam);
    let off_axis = |eye: Vec3| Vec3::new(eye.x, 0.0, eye.z).length();
    assert!(cam.eye.y > 199.0 && off_axis(cam.eye) > 0.1);
    orbit.drag(0.0, -10_000.0, 100.0);
    orbit.apply(&mut cam);
    assert!(cam.eye.y < -199.0 && off_axis(cam.eye) > 0.1);
    assert!((cam.eye.length() - 200.0).abs() < 1e-2);
}

#[test]
fn lights_follow_the_camera() {
    let rig = LightRig::default();
    let mut cam = Camera::new(1.0);
    let front = rig.world_directions(&cam);
    for d in front {
        assert!((d.length() - 1.0).abs() < 1e-4);
    }
    // Key light sits in front of the camera side of the scene.
    assert!(front[0].z > 0.9);

    let mut orbit = OrbitControls::new(&cam, None);
    orbit.drag(-500.0, 0.0, 1000.0);
    orbit.apply(&mut cam);
    let behind = rig.world_directions(&cam);
    assert!(behind[0].z < -0.9);
}

#[test]
fn frame_uniforms_pack_light_intensities() {
    let rig = LightRig::default();
    let cam = Camera::new(1.0);
    let f = FrameUniforms::new(&cam, &rig);
    assert_eq!(f.lights[0][3], 1.0);
    assert_eq!(f.lights[1][3], 0.5);
    assert_eq!(f.lights[2][3], 1.0);
    assert_eq!(f.ambient[3], 1.0);
}

#[test]
fn unlit_material_flag() {
    let unlit = MaterialUniforms::from_material(&scene::Material::Unlit {
        color: [1.0, 1.0, 0.0, 1.0],
    });
    assert_eq!(unlit.params[0], 1.0);
    let lit = MaterialUniforms::from_material(&scene::Material::textured(scene::TextureHandle(0)));
    assert_eq!(lit.params[0], 0.0);
    assert_eq!(lit.color, [1.0; 4]);
}
