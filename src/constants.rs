/// Scene, smoothing and interaction tuning constants.
///
/// These constants express intended behavior (smoothing factors, timer
/// lengths, layout offsets) and keep magic numbers out of the code.
// Effect smoothing (fraction of the remaining distance covered per frame)
pub const DIRECTION_SMOOTHING: f32 = 0.02;
pub const INTENSITY_SMOOTHING: f32 = 0.02;

// Quiet period after the last scroll event before the effect fades out
pub const SCROLL_QUIET_SEC: f32 = 0.10;

// The page opens with the effect fully on and fading out
pub const INITIAL_INTENSITY: f32 = 1.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 200.0;

// Orbit controls (rotate only)
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

// Pointer -> eye target mapping (world units per CSS pixel)
pub const POINTER_WORLD_SCALE: f32 = 0.5;

// Per-frame group spin (radians)
pub const LOAD_GROUP_SPIN: f32 = 0.01;
pub const HALO_GROUP_SPIN: f32 = 0.01;

// Model placement
pub const BUST_SCALE: f32 = 120.0;
pub const BUST_YAW: f32 = -1.0;
pub const DUCK_SCALE: f32 = 20.0;
pub const DUCK_OFFSET: [f32; 2] = [35.0, 40.0]; // local +X, +Z
pub const DUCK_YAW: f32 = 20.0;

// Halo ring
pub const HALO_RADIUS: f32 = 55.0;
pub const HALO_TUBE: f32 = 0.75;
pub const HALO_RADIAL_SEGMENTS: u32 = 30;
pub const HALO_TUBULAR_SEGMENTS: u32 = 48;
pub const HALO_TILT: f32 = std::f32::consts::PI / 2.25;
pub const HALO_COLOR: [f32; 3] = [1.0, 1.0, 0.0];
pub const HALO_LIFT: f32 = 80.0;

// Eyes
pub const EYE_RADIUS: f32 = 6.0;
pub const EYE_TEXTURE: &str = "eye.png";
pub const LEFT_EYE_POSITION: [f32; 3] = [-15.0, 65.0, 36.0];
pub const RIGHT_EYE_POSITION: [f32; 3] = [6.5, 65.0, 32.0];
pub const RIGHT_EYE_YAW: f32 = 0.5;

// Lights (positions are in camera space so the rig follows the camera)
pub const AMBIENT_COLOR: [f32; 3] = [0.051, 0.051, 0.051]; // 0x404040, linear
pub const KEY_LIGHT: ([f32; 3], f32) = ([-1.0, 1.0, 3.0], 1.0);
pub const FILL_LIGHT: ([f32; 3], f32) = ([1.0, 1.0, 3.0], 0.5);
pub const BACK_LIGHT: ([f32; 3], f32) = ([-1.0, 3.0, -1.0], 1.0);

// Assets
pub const PRIMARY_MODEL: &str = "bust2.glb";
pub const SECONDARY_MODEL: &str = "duck.glb";
pub const DEFAULT_ASSET_BASE: &str = "../";
