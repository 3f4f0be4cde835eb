use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

use crate::constants::*;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-4), self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Take the projection aspect from the container, as the noise pass does.
    #[inline]
    pub fn fit_viewport(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Camera-to-world transform (inverse of the view matrix).
    pub fn world_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }
}

/// Pixel size of the scene container; the single source of the aspect ratio
/// used by both the projection and the noise pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Rotate-only orbit controls: drag to swing the camera around its target,
/// optional autorotation. Zoom and pan are disabled.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pub autorotate: Option<f32>,
    pub rotate_speed: f32,
}

impl OrbitControls {
    pub fn new(camera: &Camera, autorotate: Option<f32>) -> Self {
        let offset = camera.eye - camera.target;
        let radius = offset.length().max(1e-4);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        Self {
            radius,
            theta,
            phi,
            autorotate,
            rotate_speed: ORBIT_ROTATE_SPEED,
        }
    }

    /// Pointer drag in CSS pixels; a drag the height of the element is one
    /// full turn.
    pub fn drag(&mut self, dx_px: f32, dy_px: f32, element_height_px: f32) {
        let h = element_height_px.max(1.0);
        self.theta -= TAU * dx_px / h * self.rotate_speed;
        self.phi -= TAU * dy_px / h * self.rotate_speed;
        self.clamp_polar();
    }

    /// Advance autorotation; `speed` 2.0 is one turn per 30 seconds.
    pub fn update(&mut self, dt_sec: f32) {
        if let Some(speed) = self.autorotate {
            self.theta -= TAU / 60.0 * speed * dt_sec.max(0.0);
        }
        self.theta = self.theta.rem_euclid(TAU);
    }

    pub fn apply(&self, camera: &mut Camera) {
        let s = self.phi.sin();
        let offset = Vec3::new(
            self.radius * s * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * s * self.theta.cos(),
        );
        camera.eye = camera.target + offset;
    }

    fn clamp_polar(&mut self) {
        self.phi = self
            .phi
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
    }
}

/// A directional light parented to the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraLight {
    /// Position in camera space; the light shines from here toward the
    /// world origin.
    pub offset: Vec3,
    pub intensity: f32,
}

/// Ambient plus three directional lights, all riding along with the camera.
#[derive(Clone, Debug)]
pub struct LightRig {
    pub ambient: [f32; 3],
    pub directional: [CameraLight; 3],
}

impl Default for LightRig {
    fn default() -> Self {
        let light = |(p, i): ([f32; 3], f32)| CameraLight {
            offset: Vec3::from(p),
            intensity: i,
        };
        Self {
            ambient: AMBIENT_COLOR,
            directional: [light(KEY_LIGHT), light(FILL_LIGHT), light(BACK_LIGHT)],
        }
    }
}

impl LightRig {
    /// World-space unit vectors pointing from the surface toward each light.
    pub fn world_directions(&self, camera: &Camera) -> [Vec3; 3] {
        let cam_world = camera.world_matrix();
        self.directional.map(|l| {
            let p = cam_world.transform_point3(l.offset);
            p.normalize_or_zero()
        })
    }
}
