use glam::Vec3;
use std::str::FromStr;

use crate::constants::*;

/// A textured sphere orbiting inside the halo group.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitBody {
    pub texture: &'static str,
    pub radius: f32,
    /// Local translation, applied before `yaw`.
    pub offset: Vec3,
    pub yaw: f32,
}

impl OrbitBody {
    const fn new(texture: &'static str, radius: f32, offset: Vec3, yaw: f32) -> Self {
        Self {
            texture,
            radius,
            offset,
            yaw,
        }
    }
}

/// The three tuning presets the page ships with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Mouse-follow eyes plus the duck riding the halo.
    Eyes,
    /// Wider five-body orbit with camera autorotation.
    Orbit,
    /// Autorotating camera, duck, asymmetric smoothing.
    Spin,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "eyes" => Ok(Variant::Eyes),
            "orbit" => Ok(Variant::Orbit),
            "spin" => Ok(Variant::Spin),
            other => Err(format!("unknown scene variant '{other}'")),
        }
    }
}

/// Everything that differs between the page variants.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub variant: Variant,
    pub orbit: Vec<OrbitBody>,
    /// Orbit-control autorotate speed; `None` leaves the camera still.
    pub autorotate: Option<f32>,
    pub eye_tracking: bool,
    pub secondary_model: bool,
    pub direction_smoothing: f32,
    pub intensity_smoothing: f32,
    pub load_spin: f32,
    pub halo_spin: f32,
    /// Prefix for every fetched asset URL.
    pub asset_base: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::eyes()
    }
}

impl SceneConfig {
    pub fn eyes() -> Self {
        Self {
            variant: Variant::Eyes,
            orbit: vec![
                OrbitBody::new("earth.jpg", 12.0, Vec3::new(70.0, 0.0, 0.0), 0.0),
                OrbitBody::new("smiley.png", 10.0, Vec3::new(-65.0, 0.0, 0.0), 185.0),
                OrbitBody::new("beachball.jpg", 8.0, Vec3::new(0.0, 0.0, 55.0), 0.0),
                OrbitBody::new("rainbow.jpg", 12.0, Vec3::new(0.0, 0.0, -65.0), 0.0),
            ],
            autorotate: None,
            eye_tracking: true,
            secondary_model: true,
            direction_smoothing: DIRECTION_SMOOTHING,
            intensity_smoothing: INTENSITY_SMOOTHING,
            load_spin: LOAD_GROUP_SPIN,
            halo_spin: HALO_GROUP_SPIN,
            asset_base: DEFAULT_ASSET_BASE.to_string(),
        }
    }

    pub fn orbit() -> Self {
        Self {
            variant: Variant::Orbit,
            orbit: vec![
                OrbitBody::new("earth.jpg", 12.0, Vec3::new(75.0, 0.0, 0.0), 0.0),
                OrbitBody::new("smiley.png", 10.0, Vec3::new(-70.0, 0.0, 0.0), 185.0),
                OrbitBody::new("beachball.jpg", 8.0, Vec3::new(0.0, 0.0, 60.0), 0.0),
                OrbitBody::new("rainbow.jpg", 12.0, Vec3::new(0.0, 0.0, -70.0), 0.0),
                OrbitBody::new("earth.jpg", 6.0, Vec3::new(40.0, 0.0, -50.0), 1.2),
            ],
            autorotate: Some(4.0),
            eye_tracking: false,
            secondary_model: false,
            ..Self::eyes()
        }
    }

    pub fn spin() -> Self {
        Self {
            variant: Variant::Spin,
            autorotate: Some(2.0),
            eye_tracking: false,
            secondary_model: true,
            direction_smoothing: 0.01,
            intensity_smoothing: 0.05,
            load_spin: 0.005,
            ..Self::eyes()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Eyes => Self::eyes(),
            Variant::Orbit => Self::orbit(),
            Variant::Spin => Self::spin(),
        }
    }

    /// Build from the container's `data-variant` / `data-assets` attributes.
    /// Unknown variants fall back to the default preset.
    pub fn from_attributes(variant: Option<&str>, asset_base: Option<&str>) -> Self {
        let variant = match variant.map(str::parse::<Variant>) {
            Some(Ok(v)) => v,
            Some(Err(e)) => {
                log::warn!("[config] {e}; using default");
                Variant::Eyes
            }
            None => Variant::Eyes,
        };
        let mut config = Self::for_variant(variant);
        if let Some(base) = asset_base.filter(|b| !b.is_empty()) {
            config.asset_base = base.to_string();
        }
        config
    }

    pub fn asset_url(&self, file: &str) -> String {
        if self.asset_base.ends_with('/') {
            format!("{}{}", self.asset_base, file)
        } else {
            format!("{}/{}", self.asset_base, file)
        }
    }
}
