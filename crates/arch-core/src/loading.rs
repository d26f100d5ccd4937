//! Scanning → ready transition.
//!
//! The machine owns a single one-shot timer armed by `start()`. Time only
//! moves when the host calls `advance(dt)`, so tests drive it with simulated
//! durations. `dispose()` disarms the timer for good.

use crate::constants::{OVERLAY_FADE, SCAN_DELAY};
use crate::error::{Result, ViewerError};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingState {
    Scanning,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingConfig {
    pub delay: Duration,
    pub fade: Duration,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            delay: SCAN_DELAY,
            fade: OVERLAY_FADE,
        }
    }
}

impl LoadingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.delay.is_zero() {
            return Err(ViewerError::InvalidConfig(
                "scan delay must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OneShot {
    remaining: Duration,
}

#[derive(Clone, Debug)]
pub struct LoadingStateMachine {
    config: LoadingConfig,
    state: LoadingState,
    timer: Option<OneShot>,
    started: bool,
    disposed: bool,
    since_ready: Duration,
}

impl LoadingStateMachine {
    pub fn new(config: LoadingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: LoadingState::Scanning,
            timer: None,
            started: false,
            disposed: false,
            since_ready: Duration::ZERO,
        })
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadingState::Scanning
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm the scan timer. Only the first call on a live machine has an effect.
    pub fn start(&mut self) {
        if self.disposed {
            log::warn!("[loading] start ignored: machine already disposed");
            return;
        }
        if self.started {
            return;
        }
        self.started = true;
        self.state = LoadingState::Scanning;
        self.timer = Some(OneShot {
            remaining: self.config.delay,
        });
        log::debug!("[loading] scanning for {:?}", self.config.delay);
    }

    /// Feed elapsed time. Returns `Some(Ready)` on the single tick the timer fires.
    pub fn advance(&mut self, dt: Duration) -> Option<LoadingState> {
        if self.disposed {
            return None;
        }
        match self.timer.as_mut() {
            Some(timer) => {
                if dt < timer.remaining {
                    timer.remaining -= dt;
                    return None;
                }
                let overshoot = dt - timer.remaining;
                self.timer = None;
                self.state = LoadingState::Ready;
                self.since_ready = overshoot;
                log::info!("[loading] scan complete, viewer ready");
                Some(LoadingState::Ready)
            }
            None => {
                if self.state == LoadingState::Ready {
                    self.since_ready = self.since_ready.saturating_add(dt);
                }
                None
            }
        }
    }

    /// Cancel the pending timer; the state is frozen from here on.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.timer.take().is_some() {
            log::debug!("[loading] pending scan timer cancelled");
        }
        self.disposed = true;
    }

    /// Opacity of the scanning overlay: 1 while scanning, then a linear fade to 0.
    pub fn overlay_opacity(&self) -> f32 {
        match self.state {
            LoadingState::Scanning => 1.0,
            LoadingState::Ready if self.config.fade.is_zero() => 0.0,
            LoadingState::Ready => {
                let t = self.since_ready.as_secs_f32() / self.config.fade.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
        }
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_opacity() > 0.0
    }

    pub fn auto_rotate_enabled(&self) -> bool {
        self.state == LoadingState::Ready && !self.disposed
    }
}
