//! Viewer composition root.
//!
//! A `Viewer` owns one scene, one camera rig, one loading machine and one
//! overlay animator. The host drives it with `mount()`, then `update(dt)`
//! once per frame, and finally `dispose()`.

use crate::arch::ArchSpec;
use crate::camera::{Camera, OrbitConfig, OrbitRig};
use crate::constants::MIN_VIEWPORT_HEIGHT_PX;
use crate::error::{Result, ViewerError};
use crate::loading::{LoadingConfig, LoadingState, LoadingStateMachine};
use crate::overlay::{OverlayAnimator, OverlayFrame};
use crate::scene::{self, DrawBatches, FloatPose, Scene};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;
use std::time::Duration;

/// Clinical status attached to the tooth of interest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToothStatus {
    #[default]
    Healthy,
    Implant,
}

impl FromStr for ToothStatus {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "healthy" => Ok(ToothStatus::Healthy),
            "implant" => Ok(ToothStatus::Implant),
            other => Err(ViewerError::InvalidSpec(format!(
                "unknown tooth status '{other}'"
            ))),
        }
    }
}

/// Inbound props from the surrounding page.
///
/// Both fields are stored and reported back but do not yet change geometry or
/// colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerProps {
    pub active_tooth_id: u32,
    pub status: ToothStatus,
}

impl Default for ViewerProps {
    fn default() -> Self {
        Self {
            active_tooth_id: 36,
            status: ToothStatus::Healthy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerConfig {
    pub upper: ArchSpec,
    pub lower: ArchSpec,
    pub orbit: OrbitConfig,
    pub loading: LoadingConfig,
    pub min_viewport_height_px: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            upper: ArchSpec::upper(),
            lower: ArchSpec::lower(),
            orbit: OrbitConfig::default(),
            loading: LoadingConfig::default(),
            min_viewport_height_px: MIN_VIEWPORT_HEIGHT_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Disposed,
}

/// Per-frame output handed to the renderer and the DOM overlay.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub camera: Camera,
    pub float_pose: FloatPose,
    pub loading: LoadingState,
    pub auto_rotate: bool,
    pub overlay: OverlayFrame,
}

pub struct Viewer {
    props: ViewerProps,
    config: ViewerConfig,
    scene: Scene,
    rig: OrbitRig,
    loading: LoadingStateMachine,
    overlay: OverlayAnimator,
    lifecycle: Lifecycle,
    elapsed: Duration,
    aspect: f32,
}

impl Viewer {
    /// Build a viewer with an explicit random source for the scene variation.
    pub fn with_rng<R: Rng>(
        props: ViewerProps,
        config: ViewerConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let rig = OrbitRig::new(config.orbit)?;
        let loading = LoadingStateMachine::new(config.loading)?;
        let scene = scene::assemble(&config.upper, &config.lower, rng)?;
        log::info!(
            "[viewer] scene ready: {} teeth, tooth #{} ({:?})",
            scene.tooth_count(),
            props.active_tooth_id,
            props.status
        );
        Ok(Self {
            props,
            config,
            scene,
            rig,
            loading,
            overlay: OverlayAnimator::new(),
            lifecycle: Lifecycle::Created,
            elapsed: Duration::ZERO,
            aspect: 1.0,
        })
    }

    /// Build a viewer from a seed; `None` draws one from OS entropy.
    pub fn new(props: ViewerProps, config: ViewerConfig, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(props, config, &mut rng)
    }

    pub fn props(&self) -> &ViewerProps {
        &self.props
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut OrbitRig {
        &mut self.rig
    }

    pub fn loading(&self) -> &LoadingStateMachine {
        &self.loading
    }

    pub fn overlay(&self) -> &OverlayAnimator {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayAnimator {
        &mut self.overlay
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn min_viewport_height_px(&self) -> u32 {
        self.config.min_viewport_height_px
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Attach to the host and arm the scan timer.
    pub fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            log::warn!("[viewer] mount ignored in {:?}", self.lifecycle);
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.loading.start();
        self.rig.set_auto_rotate(false);
        log::info!("[viewer] mounted");
    }

    /// Advance every component by `dt`. Returns `None` unless mounted.
    pub fn update(&mut self, dt: Duration) -> Option<FrameSnapshot> {
        if self.lifecycle != Lifecycle::Mounted {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.loading.advance(dt).is_some() {
            self.rig.set_auto_rotate(self.loading.auto_rotate_enabled());
        }
        self.rig.update(dt);
        let state = self.loading.state();
        self.overlay.advance(dt, state);
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            camera: self.rig.camera(self.aspect),
            float_pose: self.float_pose(),
            loading: self.loading.state(),
            auto_rotate: self.rig.auto_rotate(),
            overlay: self.overlay.frame(self.loading.overlay_opacity()),
        }
    }

    pub fn float_pose(&self) -> FloatPose {
        self.scene.float_motion.pose(self.elapsed.as_secs_f32())
    }

    pub fn batches(&self) -> DrawBatches {
        self.scene.batches(self.float_pose())
    }

    /// Cancel the scan timer, stop all loops and freeze the camera.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.loading.dispose();
        self.overlay.stop_all();
        self.rig.set_auto_rotate(false);
        self.lifecycle = Lifecycle::Disposed;
        log::info!("[viewer] disposed");
    }
}

/// What the host should show in the viewport.
pub enum ViewerSurface {
    Live(Box<Viewer>),
    Placeholder(ViewerError),
}

impl ViewerSurface {
    /// Build a viewer, degrading any construction error to a placeholder.
    pub fn build(props: ViewerProps, config: ViewerConfig, seed: Option<u64>) -> Self {
        match Viewer::new(props, config, seed) {
            Ok(v) => ViewerSurface::Live(Box::new(v)),
            Err(e) => {
                log::error!("[viewer] falling back to placeholder: {e}");
                ViewerSurface::Placeholder(e)
            }
        }
    }

    /// Swap a live viewer for a placeholder after a fatal host failure.
    pub fn fail(&mut self, error: ViewerError) {
        if let ViewerSurface::Live(v) = self {
            v.dispose();
        }
        log::error!("[viewer] {error}");
        *self = ViewerSurface::Placeholder(error);
    }

    /// Replace a disposed live viewer with a fresh, mounted one built from the
    /// same props and config. Used when a page comes back from the
    /// back/forward cache. Placeholders stay as they are.
    pub fn restart(&mut self, seed: Option<u64>) {
        let ViewerSurface::Live(v) = self else {
            return;
        };
        if v.lifecycle() != Lifecycle::Disposed {
            log::warn!("[viewer] restart ignored in {:?}", v.lifecycle());
            return;
        }
        let (props, config) = (*v.props(), *v.config());
        *self = ViewerSurface::build(props, config, seed);
        if let ViewerSurface::Live(v) = self {
            v.mount();
            log::info!("[viewer] restarted");
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ViewerSurface::Placeholder(_))
    }
}
