//! Scene description: two arches, fixed lighting rig, contact shadow and backdrop.
//!
//! Nothing here touches a GPU. A renderer consumes the description, usually
//! through [`Scene::batches`], which flattens it into instance data.

use crate::arch::{self, euler_xyz, ArchLayout, ArchSpec};
use crate::constants::*;
use crate::error::{Result, ViewerError};
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    Spot {
        position: Vec3,
        angle: f32,
        penumbra: f32,
        intensity: f32,
        cast_shadow: bool,
    },
    Point {
        position: Vec3,
        intensity: f32,
    },
    Directional {
        position: Vec3,
        intensity: f32,
    },
}

/// The fixed four-light rig: one ambient, one spot, one point, one directional.
pub fn studio_lights() -> SmallVec<[Light; 4]> {
    smallvec::smallvec![
        Light::Ambient {
            intensity: AMBIENT_INTENSITY,
        },
        Light::Spot {
            position: Vec3::from_array(SPOT_POSITION),
            angle: SPOT_ANGLE,
            penumbra: SPOT_PENUMBRA,
            intensity: SPOT_INTENSITY,
            cast_shadow: true,
        },
        Light::Point {
            position: Vec3::from_array(POINT_POSITION),
            intensity: POINT_INTENSITY,
        },
        Light::Directional {
            position: Vec3::from_array(DIRECTIONAL_POSITION),
            intensity: DIRECTIONAL_INTENSITY,
        },
    ]
}

/// Soft ground shadow plane under the arches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactShadow {
    pub position: Vec3,
    pub opacity: f32,
    pub scale: f32,
    pub blur: f32,
    pub far: f32,
}

impl Default for ContactShadow {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, SHADOW_PLANE_Y, 0.0),
            opacity: SHADOW_OPACITY,
            scale: SHADOW_SCALE,
            blur: SHADOW_BLUR,
            far: SHADOW_FAR,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvironmentPreset {
    #[default]
    Studio,
}

/// Gentle idle bobbing of the arch group.
///
/// `pose(t)` repeats every `8π / speed` seconds; `phase` shifts the cycle so two
/// viewers do not bob in lockstep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatPose {
    pub rotation: Vec3,
    pub lift: f32,
}

impl FloatMotion {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            speed: FLOAT_SPEED,
            rotation_intensity: FLOAT_ROTATION_INTENSITY,
            float_intensity: FLOAT_INTENSITY,
            phase: rng.gen_range(0.0..FLOAT_PHASE_RANGE_SEC),
        }
    }

    pub fn period_sec(&self) -> f32 {
        4.0 * TAU / self.speed
    }

    pub fn pose(&self, elapsed_sec: f32) -> FloatPose {
        let cycle = (self.phase + elapsed_sec) / 4.0 * self.speed;
        let (s, c) = cycle.sin_cos();
        FloatPose {
            rotation: Vec3::new(c / 8.0, s / 8.0, s / 20.0) * self.rotation_intensity,
            lift: s / 10.0 * self.float_intensity,
        }
    }
}

/// Which primitive mesh an instance is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Tooth,
    Gum,
    Shadow,
}

/// Per-instance GPU data: model matrix, color (rgb + opacity), material params.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = roughness, y = metalness, z = shading mode (0 lit, 1 shadow), w = unused.
    pub material: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct DrawBatches {
    pub teeth: Vec<InstanceRaw>,
    pub gums: Vec<InstanceRaw>,
    pub shadow: Vec<InstanceRaw>,
}

impl DrawBatches {
    pub fn get(&self, kind: MeshKind) -> &[InstanceRaw] {
        match kind {
            MeshKind::Tooth => &self.teeth,
            MeshKind::Gum => &self.gums,
            MeshKind::Shadow => &self.shadow,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub upper: ArchLayout,
    pub lower: ArchLayout,
    pub group_rotation: Vec3,
    pub float_motion: FloatMotion,
    pub lights: SmallVec<[Light; 4]>,
    pub contact_shadow: ContactShadow,
    pub environment: EnvironmentPreset,
    pub background: [f32; 3],
}

impl Scene {
    pub fn arches(&self) -> [&ArchLayout; 2] {
        [&self.upper, &self.lower]
    }

    pub fn tooth_count(&self) -> usize {
        self.upper.teeth.len() + self.lower.teeth.len()
    }

    /// World transform of the floating arch group for the given pose.
    pub fn group_transform(&self, pose: FloatPose) -> Mat4 {
        Mat4::from_rotation_translation(euler_xyz(pose.rotation), Vec3::new(0.0, pose.lift, 0.0))
            * Mat4::from_quat(euler_xyz(self.group_rotation))
    }

    /// Flatten the scene into per-mesh instance lists.
    pub fn batches(&self, pose: FloatPose) -> DrawBatches {
        let group = self.group_transform(pose);
        let mut out = DrawBatches::default();
        for layout in self.arches() {
            for tooth in &layout.teeth {
                let local = Mat4::from_scale_rotation_translation(
                    Vec3::splat(tooth.scale),
                    tooth.orientation(),
                    tooth.position,
                );
                out.teeth.push(InstanceRaw {
                    model: (group * local).to_cols_array_2d(),
                    color: rgba(tooth.color, 1.0),
                    material: [TOOTH_ROUGHNESS, TOOTH_METALNESS, 0.0, 0.0],
                });
            }
            let gum = &layout.gum_base;
            let local = Mat4::from_rotation_translation(gum.orientation(), gum.position);
            out.gums.push(InstanceRaw {
                model: (group * local).to_cols_array_2d(),
                color: rgba(gum.color, 1.0),
                material: [gum.roughness, 0.0, 0.0, 0.0],
            });
        }
        let shadow = &self.contact_shadow;
        out.shadow.push(InstanceRaw {
            model: Mat4::from_scale_rotation_translation(
                Vec3::new(shadow.scale, 1.0, shadow.scale),
                Quat::IDENTITY,
                shadow.position,
            )
            .to_cols_array_2d(),
            color: rgba(SHADOW_COLOR, shadow.opacity),
            material: [1.0, 0.0, 1.0, shadow.blur / shadow.scale],
        });
        out
    }
}

#[inline]
fn rgba(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}

/// Build the full scene from an upper and a lower arch spec.
///
/// The upper spec must be flagged upper and sit strictly above the lower one,
/// so the two arches can never intersect vertically.
pub fn assemble<R: Rng>(upper: &ArchSpec, lower: &ArchSpec, rng: &mut R) -> Result<Scene> {
    if !upper.is_upper || lower.is_upper {
        return Err(ViewerError::InvalidSpec(
            "expected one upper and one lower arch".to_string(),
        ));
    }
    if upper.y_offset.is_finite()
        && lower.y_offset.is_finite()
        && upper.y_offset <= lower.y_offset
    {
        return Err(ViewerError::InvalidSpec(format!(
            "upper y_offset ({}) must be above lower y_offset ({})",
            upper.y_offset, lower.y_offset
        )));
    }
    let upper = arch::generate(upper, rng)?;
    let lower = arch::generate(lower, rng)?;
    let float_motion = FloatMotion::new(rng);
    Ok(Scene {
        upper,
        lower,
        group_rotation: Vec3::new(GROUP_TILT_X, 0.0, 0.0),
        float_motion,
        lights: studio_lights(),
        contact_shadow: ContactShadow::default(),
        environment: EnvironmentPreset::Studio,
        background: BACKGROUND_COLOR,
    })
}
