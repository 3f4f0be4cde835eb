// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_converge_without_overshoot() {
    // 0 < k < 1 keeps the exponential filter monotonic
    assert!(DIRECTION_SMOOTHING > 0.0 && DIRECTION_SMOOTHING < 1.0);
    assert!(INTENSITY_SMOOTHING > 0.0 && INTENSITY_SMOOTHING < 1.0);
    assert!((0.0..=1.0).contains(&INITIAL_INTENSITY));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_frustum_contains_scene() {
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_FAR > CAMERA_NEAR);
    // Eye distance plus the halo radius must stay within the far plane.
    assert!(CAMERA_Z + HALO_RADIUS < CAMERA_FAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn halo_ring_is_thin() {
    assert!(HALO_TUBE < HALO_RADIUS * 0.1);
    assert!(HALO_RADIAL_SEGMENTS >= 3);
    assert!(HALO_TUBULAR_SEGMENTS >= 3);
}

#[test]
fn eyes_sit_in_front_of_the_head() {
    assert!(LEFT_EYE_POSITION[0] < RIGHT_EYE_POSITION[0]);
    assert_eq!(LEFT_EYE_POSITION[1], RIGHT_EYE_POSITION[1]);
    assert!(LEFT_EYE_POSITION[2] > 0.0 && RIGHT_EYE_POSITION[2] > 0.0);
}

#[test]
fn lights_have_positive_intensity() {
    for (pos, intensity) in [KEY_LIGHT, FILL_LIGHT, BACK_LIGHT] {
        assert!(intensity > 0.0);
        assert!(pos.iter().any(|c| *c != 0.0));
    }
    assert!(AMBIENT_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn asset_names() {
    assert!(PRIMARY_MODEL.ends_with(".glb"));
    assert!(SECONDARY_MODEL.ends_with(".glb"));
    assert!(DEFAULT_ASSET_BASE.ends_with('/'));
}
