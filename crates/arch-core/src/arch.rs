use crate::constants::*;
use crate::error::{Result, ViewerError};
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI};

/// Input parameters for one arch of teeth.
///
/// Fields:
/// - `tooth_count`: number of teeth along the half circle (must be > 1)
/// - `is_upper`: upper jaw arches flip their teeth so crowns face down
/// - `y_offset`: world-space height of the tooth row
/// - `radius_x`, `radius_y`: semi-axes of the elliptical arch curve (XZ plane)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchSpec {
    pub tooth_count: usize,
    pub is_upper: bool,
    pub y_offset: f32,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl ArchSpec {
    pub fn upper() -> Self {
        Self {
            tooth_count: DEFAULT_TOOTH_COUNT,
            is_upper: true,
            y_offset: UPPER_Y_OFFSET,
            radius_x: ARCH_RADIUS_X,
            radius_y: ARCH_RADIUS_Y,
        }
    }

    pub fn lower() -> Self {
        Self {
            tooth_count: DEFAULT_TOOTH_COUNT,
            is_upper: false,
            y_offset: LOWER_Y_OFFSET,
            radius_x: ARCH_RADIUS_X,
            radius_y: ARCH_RADIUS_Y,
        }
    }

    /// Reject specs that cannot produce a meaningful arch.
    pub fn validate(&self) -> Result<()> {
        if self.tooth_count <= 1 {
            return Err(ViewerError::InvalidSpec(format!(
                "tooth_count must be greater than 1, got {}",
                self.tooth_count
            )));
        }
        if self.tooth_count > MAX_TOOTH_COUNT {
            return Err(ViewerError::InvalidSpec(format!(
                "tooth_count must be at most {MAX_TOOTH_COUNT}, got {}",
                self.tooth_count
            )));
        }
        if !self.y_offset.is_finite() {
            return Err(ViewerError::InvalidSpec(format!(
                "y_offset must be finite, got {}",
                self.y_offset
            )));
        }
        for (name, r) in [("radius_x", self.radius_x), ("radius_y", self.radius_y)] {
            if !r.is_finite() || r <= 0.0 {
                return Err(ViewerError::InvalidSpec(format!(
                    "{name} must be finite and positive, got {r}"
                )));
            }
        }
        Ok(())
    }

    /// Angle of tooth `index` along the half circle: 0 for the first tooth, π for the last.
    #[inline]
    pub fn angle_of(&self, index: usize) -> f32 {
        (index as f32 / (self.tooth_count - 1) as f32) * PI
    }
}

/// Transform and look of one generated tooth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToothPlacement {
    pub index: usize,
    pub angle: f32,
    pub position: Vec3,
    /// Euler angles, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: f32,
    pub color: [f32; 3],
}

impl ToothPlacement {
    pub fn orientation(&self) -> Quat {
        euler_xyz(self.rotation)
    }
}

/// Half-torus gum tissue transform for one arch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GumBase {
    pub position: Vec3,
    pub rotation: Vec3,
    pub radius: f32,
    pub tube: f32,
    pub arc: f32,
    pub color: [f32; 3],
    pub roughness: f32,
}

impl GumBase {
    pub fn orientation(&self) -> Quat {
        euler_xyz(self.rotation)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArchLayout {
    pub spec: ArchSpec,
    pub teeth: Vec<ToothPlacement>,
    pub gum_base: GumBase,
}

/// Generate the tooth placements and gum base for one arch.
///
/// Position and rotation depend only on the spec; the per-tooth scale is drawn
/// from `rng`, so a seeded generator yields bit-identical layouts.
pub fn generate<R: Rng>(spec: &ArchSpec, rng: &mut R) -> Result<ArchLayout> {
    spec.validate()?;

    let color = if spec.is_upper {
        UPPER_TOOTH_COLOR
    } else {
        LOWER_TOOTH_COLOR
    };
    let flip_x = if spec.is_upper { PI } else { 0.0 };

    let teeth = (0..spec.tooth_count)
        .map(|i| {
            let angle = spec.angle_of(i);
            let position = Vec3::new(
                angle.cos() * spec.radius_x,
                spec.y_offset,
                angle.sin() * spec.radius_y + ARCH_Z_BIAS,
            );
            ToothPlacement {
                index: i,
                angle,
                position,
                rotation: Vec3::new(flip_x, -angle + FRAC_PI_2, 0.0),
                scale: rng.gen_range(TOOTH_SCALE_MIN..TOOTH_SCALE_MAX),
                color,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "[arch] generated {} teeth (upper={}, y={:.2})",
        teeth.len(),
        spec.is_upper,
        spec.y_offset
    );

    Ok(ArchLayout {
        spec: *spec,
        teeth,
        gum_base: gum_base_for(spec),
    })
}

/// Gum base placement; the upper base sits 0.1 above its row and the lower base 0.1 below.
pub fn gum_base_for(spec: &ArchSpec) -> GumBase {
    let nudge = if spec.is_upper { -GUM_Y_NUDGE } else { GUM_Y_NUDGE };
    GumBase {
        position: Vec3::new(0.0, spec.y_offset - nudge, ARCH_Z_BIAS),
        rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
        radius: GUM_RADIUS,
        tube: GUM_TUBE,
        arc: PI,
        color: GUM_COLOR,
        roughness: GUM_ROUGHNESS,
    }
}

#[inline]
pub fn euler_xyz(r: Vec3) -> Quat {
    Quat::from_rotation_x(r.x) * Quat::from_rotation_y(r.y) * Quat::from_rotation_z(r.z)
}
