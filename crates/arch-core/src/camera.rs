//! Orbit camera rig.
//!
//! The rig keeps a spherical offset (radius, polar, azimuth) around a fixed
//! target. User input and auto-rotation accumulate angular deltas which are
//! bled into the orientation a fraction at a time, giving the inertial
//! glide-out after a drag ends. Zoom is multiplicative and always clamped to
//! the configured distance bounds.

use crate::constants::*;
use crate::error::{Result, ViewerError};
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

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
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit rig parameters.
///
/// - `damping_factor`: fraction of pending motion applied per 60 Hz frame, in (0, 1]
/// - `min_distance`/`max_distance`: inclusive bounds for the camera-target distance
/// - `auto_rotate_speed`: 1.0 means one revolution per 60 s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    pub target: Vec3,
    pub position: Vec3,
    pub fov_deg: f32,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            position: Vec3::from_array(CAMERA_POSITION),
            fov_deg: CAMERA_FOV_DEG,
            damping_factor: ORBIT_DAMPING_FACTOR,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            auto_rotate_speed: ORBIT_AUTO_ROTATE_SPEED,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(ViewerError::InvalidConfig(msg));
        if !self.min_distance.is_finite() || !self.max_distance.is_finite() {
            return bad("distance bounds must be finite".to_string());
        }
        if self.min_distance < 0.0 || self.max_distance < 0.0 {
            return bad(format!(
                "distance bounds must be non-negative, got [{}, {}]",
                self.min_distance, self.max_distance
            ));
        }
        if self.max_distance == 0.0 {
            return bad("max_distance must be positive".to_string());
        }
        if self.min_distance > self.max_distance {
            return bad(format!(
                "min_distance ({}) exceeds max_distance ({})",
                self.min_distance, self.max_distance
            ));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return bad(format!(
                "damping_factor must be in (0, 1], got {}",
                self.damping_factor
            ));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return bad(format!("fov_deg must be in (0, 180), got {}", self.fov_deg));
        }
        for (name, v) in [
            ("auto_rotate_speed", self.auto_rotate_speed),
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
        ] {
            if !v.is_finite() {
                return bad(format!("{name} must be finite"));
            }
        }
        if !self.target.is_finite() || !self.position.is_finite() {
            return bad("camera target and position must be finite".to_string());
        }
        if (self.position - self.target).length() <= f32::EPSILON {
            return bad("camera position must differ from its target".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct OrbitRig {
    config: OrbitConfig,
    radius: f32,
    /// Polar angle measured from +Y.
    phi: f32,
    /// Azimuth measured from +Z toward +X.
    theta: f32,
    delta_phi: f32,
    delta_theta: f32,
    pending_scale: f32,
    auto_rotate: bool,
    interacting: bool,
}

impl OrbitRig {
    pub fn new(config: OrbitConfig) -> Result<Self> {
        config.validate()?;
        let offset = config.position - config.target;
        let radius = offset.length();
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let theta = offset.x.atan2(offset.z);
        Ok(Self {
            config,
            radius: radius.clamp(config.min_distance, config.max_distance),
            phi: clamp_polar(phi),
            theta,
            delta_phi: 0.0,
            delta_theta: 0.0,
            pending_scale: 1.0,
            auto_rotate: false,
            interacting: false,
        })
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Enable or disable auto-rotation; the current orientation is kept as is.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// A drag is in progress; auto-rotation holds until it ends.
    pub fn begin_interaction(&mut self) {
        self.interacting = true;
    }

    pub fn end_interaction(&mut self) {
        self.interacting = false;
    }

    pub fn rotate_left(&mut self, angle: f32) {
        if angle.is_finite() {
            self.delta_theta -= angle;
        }
    }

    pub fn rotate_up(&mut self, angle: f32) {
        if angle.is_finite() {
            self.delta_phi -= angle;
        }
    }

    /// Rotate from a pointer drag measured in pixels against the viewport height.
    pub fn drag(&mut self, dx_px: f32, dy_px: f32, viewport_height_px: f32) {
        let h = viewport_height_px.max(1.0);
        self.rotate_left(TAU * dx_px / h * self.config.rotate_speed);
        self.rotate_up(TAU * dy_px / h * self.config.rotate_speed);
    }

    /// Multiply the pending distance by `scale`; values < 1 move closer.
    ///
    /// The accumulated factor stays finite and positive however many steps
    /// arrive before the next update.
    pub fn dolly(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.pending_scale = (self.pending_scale * scale).clamp(f32::MIN_POSITIVE, f32::MAX);
        }
    }

    /// One wheel notch: negative `delta_y` zooms in.
    pub fn zoom_step(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.config.zoom_speed);
        if delta_y < 0.0 {
            self.dolly(step);
        } else if delta_y > 0.0 {
            self.dolly(1.0 / step);
        }
    }

    fn frame_damping(&self, dt_sec: f32) -> f32 {
        let frames = dt_sec * ORBIT_DAMPING_REFERENCE_HZ;
        1.0 - (1.0 - self.config.damping_factor).powf(frames)
    }

    /// Advance the rig by `dt`. Returns true while motion is still settling.
    pub fn update(&mut self, dt: Duration) -> bool {
        let dt_sec = dt.as_secs_f32();
        if self.auto_rotate && !self.interacting {
            let angle = TAU / 60.0 * self.config.auto_rotate_speed * dt_sec;
            self.rotate_left(angle);
        }

        let k = self.frame_damping(dt_sec);
        self.theta = (self.theta + self.delta_theta * k).rem_euclid(TAU);
        self.phi = clamp_polar(self.phi + self.delta_phi * k);
        let scaled = self.radius * self.pending_scale;
        let next = if scaled.is_finite() { scaled } else { self.radius };
        self.radius = next
            .max(ORBIT_RADIUS_FLOOR)
            .clamp(self.config.min_distance, self.config.max_distance);

        self.delta_theta *= 1.0 - k;
        self.delta_phi *= 1.0 - k;
        self.pending_scale = 1.0;

        self.delta_theta.abs() > 1e-5 || self.delta_phi.abs() > 1e-5
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.config.target
            + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.config.target,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: self.config.fov_deg.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[inline]
fn clamp_polar(phi: f32) -> f32 {
    phi.clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON)
}
