use std::time::Duration;

// Shared geometry/lighting/timing constants used by the core and the web frontend.

// Arch layout
pub const DEFAULT_TOOTH_COUNT: usize = 14;
pub const MAX_TOOTH_COUNT: usize = 64;
pub const ARCH_RADIUS_X: f32 = 3.5;
pub const ARCH_RADIUS_Y: f32 = 4.5;
pub const ARCH_Z_BIAS: f32 = -2.0; // pushes the arch curve back toward the camera target
pub const UPPER_Y_OFFSET: f32 = 1.2;
pub const LOWER_Y_OFFSET: f32 = -1.2;

// Tooth sizing and material
pub const TOOTH_SCALE_MIN: f32 = 0.7;
pub const TOOTH_SCALE_MAX: f32 = 0.9; // exclusive
pub const TOOTH_RADIUS: f32 = 0.3;
pub const TOOTH_LENGTH: f32 = 0.4;
pub const TOOTH_CAP_SEGMENTS: u32 = 4;
pub const TOOTH_RADIAL_SEGMENTS: u32 = 8;
pub const TOOTH_ROUGHNESS: f32 = 0.2;
pub const TOOTH_METALNESS: f32 = 0.1;

// Gum base (half torus)
pub const GUM_RADIUS: f32 = 4.0;
pub const GUM_TUBE: f32 = 0.25;
pub const GUM_RADIAL_SEGMENTS: u32 = 16;
pub const GUM_TUBULAR_SEGMENTS: u32 = 32;
pub const GUM_Y_NUDGE: f32 = 0.1;
pub const GUM_ROUGHNESS: f32 = 0.6;

// Palette (sRGB, 0..1)
pub const UPPER_TOOTH_COLOR: [f32; 3] = [0.973, 0.980, 0.988]; // #f8fafc
pub const LOWER_TOOTH_COLOR: [f32; 3] = [0.945, 0.961, 0.976]; // #f1f5f9
pub const GUM_COLOR: [f32; 3] = [0.996, 0.792, 0.792]; // #fecaca
pub const BACKGROUND_COLOR: [f32; 3] = [0.973, 0.980, 0.988]; // slate-50
pub const SHADOW_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

// Arch group
pub const GROUP_TILT_X: f32 = 0.1;
pub const FLOAT_SPEED: f32 = 2.0;
pub const FLOAT_ROTATION_INTENSITY: f32 = 0.3;
pub const FLOAT_INTENSITY: f32 = 0.3;
pub const FLOAT_PHASE_RANGE_SEC: f32 = 10_000.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.8;
pub const SPOT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const SPOT_ANGLE: f32 = 0.15;
pub const SPOT_PENUMBRA: f32 = 1.0;
pub const SPOT_INTENSITY: f32 = 1.5;
pub const POINT_POSITION: [f32; 3] = [-10.0, -10.0, -10.0];
pub const POINT_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_POSITION: [f32; 3] = [0.0, 10.0, 0.0];
pub const DIRECTIONAL_INTENSITY: f32 = 0.5;

// Ground contact shadow
pub const SHADOW_PLANE_Y: f32 = -4.0;
pub const SHADOW_OPACITY: f32 = 0.3;
pub const SHADOW_SCALE: f32 = 15.0;
pub const SHADOW_BLUR: f32 = 2.5;
pub const SHADOW_FAR: f32 = 4.5;

// Camera
pub const CAMERA_POSITION: [f32; 3] = [10.0, 8.0, 12.0];
pub const CAMERA_FOV_DEG: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 25.0;
pub const ORBIT_AUTO_ROTATE_SPEED: f32 = 0.5; // 2π/60 rad/s per unit, so 120 s per orbit
pub const ORBIT_DAMPING_REFERENCE_HZ: f32 = 60.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1.0e-6;
pub const ORBIT_RADIUS_FLOOR: f32 = 1.0e-4; // keeps the eye off the target when min_distance is 0

// Loading / scanning
pub const SCAN_DELAY: Duration = Duration::from_millis(1500);
pub const OVERLAY_FADE: Duration = Duration::from_millis(800);

// Overlay loops
pub const SCAN_RING_PERIOD: Duration = Duration::from_secs(6);
pub const PROGRESS_SWEEP_PERIOD: Duration = Duration::from_millis(2500);
pub const PULSE_PERIOD: Duration = Duration::from_secs(2);
pub const SPIN_PERIOD: Duration = Duration::from_secs(1);
pub const PROGRESS_SWEEP_FROM_PX: f32 = -192.0;
pub const PROGRESS_SWEEP_TO_PX: f32 = 192.0;
pub const PULSE_MIN_OPACITY: f32 = 0.5;
pub const PULSE_EASE: [f32; 4] = [0.4, 0.0, 0.6, 1.0]; // cubic-bezier control points

// Outbound viewport contract
pub const MIN_VIEWPORT_HEIGHT_PX: u32 = 500;
