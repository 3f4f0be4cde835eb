use glam::Vec3;

use crate::constants::POINTER_WORLD_SCALE;

/// Latest pointer position in client (CSS) pixels.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub seen: bool,
}

impl PointerState {
    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.seen = true;
    }
}

/// Orbit drag in progress, tracked in client pixels.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Pixel delta since the previous sample; `None` when no drag is active.
    pub fn update(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// World point the eyes follow: the pointer's offset from the window center
/// projected onto the camera plane, in front of the camera.
///
/// A pointer at the center of the window maps to the camera position.
#[inline]
pub fn pointer_world_target(
    pointer: &PointerState,
    window_width: f32,
    window_height: f32,
    camera_eye: Vec3,
) -> Vec3 {
    if !pointer.seen {
        return camera_eye;
    }
    let x = (pointer.x - window_width * 0.5) * POINTER_WORLD_SCALE;
    let y = (pointer.y - window_height * 0.5) * -POINTER_WORLD_SCALE;
    Vec3::new(camera_eye.x + x, camera_eye.y + y, camera_eye.z)
}
