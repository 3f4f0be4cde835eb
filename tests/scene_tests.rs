// Host-side tests for the scene graph transform semantics.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}
mod scene {
    include!("../src/scene.rs");
}

use glam::{Quat, Vec3};
use scene::*;
use std::f32::consts::FRAC_PI_2;

fn dummy_drawable() -> Drawable {
    Drawable {
        mesh: MeshHandle(0),
        material: Material::Unlit { color: [1.0; 4] },
    }
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn new_graph_has_only_root() {
    let g = SceneGraph::new();
    let root = g.node(g.root());
    assert_eq!(root.name, "scene");
    assert_eq!(root.parent(), None);
    assert!(root.children().is_empty());
    assert!(g.drawables().is_empty());
}

#[test]
fn translate_moves_along_rotated_local_axis() {
    let mut g = SceneGraph::new();
    let n = g.add_group(g.root(), "n");
    g.rotate_y(n, FRAC_PI_2);
    g.translate_x(n, 1.0);
    // +X turned a quarter about +Y points at -Z.
    assert!(approx(g.node(n).transform.translation, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn translate_before_rotate_uses_unrotated_axis() {
    let mut g = SceneGraph::new();
    let n = g.add_group(g.root(), "n");
    g.translate_x(n, 70.0);
    g.rotate_y(n, 185.0);
    assert!(approx(g.node(n).transform.translation, Vec3::new(70.0, 0.0, 0.0)));
}

#[test]
fn rotate_y_accumulates() {
    let mut g = SceneGraph::new();
    let n = g.add_group(g.root(), "n");
    g.rotate_y(n, 0.3);
    g.rotate_y(n, 0.4);
    let expected = Quat::from_rotation_y(0.7);
    assert!(g.node(n).transform.rotation.angle_between(expected) < 1e-5);
}

#[test]
fn world_matrix_composes_hierarchy() {
    let mut g = SceneGraph::new();
    let parent = g.add_group(g.root(), "parent");
    g.set_position(parent, Vec3::new(10.0, 0.0, 0.0));
    g.set_scale(parent, 2.0);
    let child = g.add_group(parent, "child");
    g.set_position(child, Vec3::new(1.0, 0.0, 0.0));
    assert!(approx(g.world_position(child), Vec3::new(12.0, 0.0, 0.0)));

    g.rotate_y(parent, FRAC_PI_2);
    assert!(approx(g.world_position(child), Vec3::new(10.0, 0.0, -2.0)));
}

#[test]
fn look_at_points_local_z_at_target() {
    let mut g = SceneGraph::new();
    let n = g.add_group(g.root(), "n");
    g.set_position(n, Vec3::new(5.0, 2.0, 0.0));
    let target = Vec3::new(-3.0, 8.0, 40.0);
    g.look_at(n, target);
    let m = g.world_matrix(n);
    let forward = m.z_axis.truncate().normalize();
    let wanted = (target - g.world_position(n)).normalize();
    assert!(forward.dot(wanted) > 0.9999);
}

#[test]
fn look_at_compensates_rotated_parents() {
    let mut g = SceneGraph::new();
    let spin = g.add_group(g.root(), "spin");
    g.rotate_y(spin, 1.3);
    let inner = g.add_group(spin, "inner");
    g.rotate_y(inner, -0.4);
    let eye = g.add_group(inner, "eye");
    g.set_position(eye, Vec3::new(-15.0, 65.0, 36.0));

    let target = Vec3::new(30.0, -10.0, 200.0);
    g.look_at(eye, target);
    let m = g.world_matrix(eye);
    let forward = m.z_axis.truncate().normalize();
    let wanted = (target - g.world_position(eye)).normalize();
    assert!(forward.dot(wanted) > 0.9999);
}

#[test]
fn look_at_same_point_is_noop() {
    let mut g = SceneGraph::new();
    let n = g.add_group(g.root(), "n");
    g.rotate_y(n, 0.5);
    let before = g.node(n).transform.rotation;
    g.look_at(n, Vec3::ZERO);
    assert_eq!(g.node(n).transform.rotation, before);
}

#[test]
fn centered_pointer_leaves_axis_eye_undeflected() {
    let camera_eye = Vec3::new(0.0, 0.0, 200.0);
    let mut pointer = input::PointerState::default();
    pointer.set(640.0, 360.0);
    let target = input::pointer_world_target(&pointer, 1280.0, 720.0, camera_eye);
    assert!(approx(target, camera_eye));

    let mut g = SceneGraph::new();
    let eye = g.add_group(g.root(), "eye");
    g.set_position(eye, Vec3::new(0.0, 0.0, 36.0));
    g.look_at(eye, target);
    assert!(g.node(eye).transform.rotation.angle_between(Quat::IDENTITY) < 1e-4);
}

#[test]
fn unseen_pointer_targets_camera() {
    let camera_eye = Vec3::new(0.0, 0.0, 200.0);
    let pointer = input::PointerState::default();
    assert_eq!(
        input::pointer_world_target(&pointer, 800.0, 600.0, camera_eye),
        camera_eye
    );
}

#[test]
fn pointer_right_and_up_maps_to_positive_world_offsets() {
    let camera_eye = Vec3::new(0.0, 0.0, 200.0);
    let mut pointer = input::PointerState::default();
    pointer.set(500.0, 100.0);
    let t = input::pointer_world_target(&pointer, 800.0, 600.0, camera_eye);
    assert!(t.x > 0.0);
    assert!(t.y > 0.0);
    assert_eq!(t.z, camera_eye.z);
}

#[test]
fn drawables_lists_parents_before_children() {
    let mut g = SceneGraph::new();
    let group = g.add_group(g.root(), "group");
    let a = g.add_mesh(group, "a", dummy_drawable());
    let b = g.add_mesh(a, "b", dummy_drawable());
    let c = g.add_mesh(g.root(), "c", dummy_drawable());
    let ids: Vec<NodeId> = g.drawables().iter().map(|(id, _, _)| *id).collect();
    assert_eq!(ids.len(), 3);
    let pos = |id| ids.iter().position(|x| *x == id).unwrap();
    assert!(pos(a) < pos(b));
    assert!(ids.contains(&c));
    assert!(!ids.contains(&group));
}

#[test]
fn drawables_carry_world_matrices() {
    let mut g = SceneGraph::new();
    let group = g.add_group(g.root(), "group");
    g.set_position(group, Vec3::new(0.0, 80.0, 0.0));
    let m = g.add_mesh(group, "m", dummy_drawable());
    g.set_position(m, Vec3::new(70.0, 0.0, 0.0));
    let (_, world, _) = g.drawables().into_iter().find(|(id, _, _)| *id == m).unwrap();
    assert!(approx(world.w_axis.truncate(), Vec3::new(70.0, 80.0, 0.0)));
}

#[test]
fn duplicate_names_get_distinct_nodes() {
    let mut g = SceneGraph::new();
    let first = g.add_group(g.root(), "dup");
    let second = g.add_group(g.root(), "dup");
    assert_ne!(first, second);
    assert_eq!(g.node(first).parent(), Some(g.root()));
    assert_eq!(g.node(g.root()).children(), &[first, second]);
}

#[test]
fn textured_material_reports_its_texture() {
    let mut g = SceneGraph::new();
    let m = g.add_mesh(
        g.root(),
        "m",
        Drawable {
            mesh: MeshHandle(1),
            material: Material::textured(TextureHandle(3)),
        },
    );
    assert_eq!(
        g.node(m).drawable.unwrap().material.texture(),
        Some(TextureHandle(3))
    );
    assert_eq!(dummy_drawable().material.texture(), None);
}
