//! Looping presentational animations layered over the canvas.
//!
//! Each track keeps its phase as integer nanoseconds modulo its period, so a
//! track sampled after any whole number of periods reads back its exact
//! starting value no matter how the elapsed time was chopped into frames.

use crate::constants::*;
use crate::loading::LoadingState;
use fnv::FnvHashMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayTrack {
    /// Dashed ring around the scan icon.
    ScanRing,
    /// Inner ring inside the dashed ring.
    ScanRingPulse,
    /// Refresh icon next to the scanning caption.
    RefreshSpinner,
    /// Bar sliding across the progress track.
    ProgressSweep,
    /// Status dot beside the impression label.
    StatusPulse,
    /// Square spinner in the bottom status badge.
    BadgeSpinner,
}

impl OverlayTrack {
    pub const ALL: [OverlayTrack; 6] = [
        OverlayTrack::ScanRing,
        OverlayTrack::ScanRingPulse,
        OverlayTrack::RefreshSpinner,
        OverlayTrack::ProgressSweep,
        OverlayTrack::StatusPulse,
        OverlayTrack::BadgeSpinner,
    ];
}

/// When a track is allowed to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackGate {
    Always,
    WhileScanning,
}

/// Shape of the animated property over one period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Linear 0 → 360 degrees.
    Spin,
    /// Linear `from` → `to`, then jump back.
    Sweep { from: f32, to: f32 },
    /// Opacity 1 → `min` → 1 with the standard pulse easing per half.
    Pulse { min: f32 },
}

impl Curve {
    pub fn eval(&self, progress: f32) -> f32 {
        match *self {
            Curve::Spin => 360.0 * progress,
            Curve::Sweep { from, to } => from + (to - from) * progress,
            Curve::Pulse { min } => {
                let [x1, y1, x2, y2] = PULSE_EASE;
                if progress < 0.5 {
                    let e = cubic_bezier(x1, y1, x2, y2, progress * 2.0);
                    1.0 + (min - 1.0) * e
                } else {
                    let e = cubic_bezier(x1, y1, x2, y2, progress * 2.0 - 1.0);
                    min + (1.0 - min) * e
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopTrack {
    period_ns: u64,
    phase_ns: u64,
    pub gate: TrackGate,
    pub curve: Curve,
    running: bool,
}

impl LoopTrack {
    pub fn new(period: Duration, gate: TrackGate, curve: Curve) -> Self {
        Self {
            period_ns: (period.as_nanos() as u64).max(1),
            phase_ns: 0,
            gate,
            curve,
            running: true,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period_ns)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Normalized position in the current cycle, in [0, 1).
    pub fn progress(&self) -> f32 {
        (self.phase_ns as f64 / self.period_ns as f64) as f32
    }

    pub fn value(&self) -> f32 {
        self.curve.eval(self.progress())
    }

    /// Value the track would show `elapsed` after a restart.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let phase = (elapsed.as_nanos() % self.period_ns as u128) as u64;
        self.curve
            .eval((phase as f64 / self.period_ns as f64) as f32)
    }

    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        let step = (dt.as_nanos() % self.period_ns as u128) as u64;
        self.phase_ns = (self.phase_ns + step) % self.period_ns;
    }

    pub fn restart(&mut self) {
        self.phase_ns = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

/// Everything the host needs to draw the overlay for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayFrame {
    pub scan_overlay_opacity: f32,
    pub scan_ring_deg: f32,
    pub scan_ring_pulse_opacity: f32,
    pub refresh_spinner_deg: f32,
    pub progress_sweep_px: f32,
    pub status_pulse_opacity: f32,
    pub badge_spinner_deg: f32,
}

#[derive(Clone, Debug)]
pub struct OverlayAnimator {
    tracks: FnvHashMap<OverlayTrack, LoopTrack>,
}

impl Default for OverlayAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayAnimator {
    pub fn new() -> Self {
        let pulse = Curve::Pulse {
            min: PULSE_MIN_OPACITY,
        };
        let mut tracks = FnvHashMap::default();
        tracks.insert(
            OverlayTrack::ScanRing,
            LoopTrack::new(SCAN_RING_PERIOD, TrackGate::WhileScanning, Curve::Spin),
        );
        tracks.insert(
            OverlayTrack::ScanRingPulse,
            LoopTrack::new(PULSE_PERIOD, TrackGate::WhileScanning, pulse),
        );
        tracks.insert(
            OverlayTrack::RefreshSpinner,
            LoopTrack::new(SPIN_PERIOD, TrackGate::WhileScanning, Curve::Spin),
        );
        tracks.insert(
            OverlayTrack::ProgressSweep,
            LoopTrack::new(
                PROGRESS_SWEEP_PERIOD,
                TrackGate::Always,
                Curve::Sweep {
                    from: PROGRESS_SWEEP_FROM_PX,
                    to: PROGRESS_SWEEP_TO_PX,
                },
            ),
        );
        tracks.insert(
            OverlayTrack::StatusPulse,
            LoopTrack::new(PULSE_PERIOD, TrackGate::Always, pulse),
        );
        tracks.insert(
            OverlayTrack::BadgeSpinner,
            LoopTrack::new(SPIN_PERIOD, TrackGate::Always, Curve::Spin),
        );
        Self { tracks }
    }

    pub fn track(&self, track: OverlayTrack) -> &LoopTrack {
        &self.tracks[&track]
    }

    pub fn is_active(&self, track: OverlayTrack, state: LoadingState) -> bool {
        let t = self.track(track);
        t.is_running()
            && match t.gate {
                TrackGate::Always => true,
                TrackGate::WhileScanning => state == LoadingState::Scanning,
            }
    }

    pub fn advance(&mut self, dt: Duration, state: LoadingState) {
        for t in self.tracks.values_mut() {
            if t.gate == TrackGate::WhileScanning && state != LoadingState::Scanning {
                continue;
            }
            t.advance(dt);
        }
    }

    pub fn restart(&mut self, track: OverlayTrack) {
        if let Some(t) = self.tracks.get_mut(&track) {
            t.restart();
        }
    }

    pub fn stop_all(&mut self) {
        for t in self.tracks.values_mut() {
            t.stop();
        }
    }

    pub fn any_running(&self) -> bool {
        self.tracks.values().any(|t| t.is_running())
    }

    pub fn value(&self, track: OverlayTrack) -> f32 {
        self.track(track).value()
    }

    pub fn frame(&self, scan_overlay_opacity: f32) -> OverlayFrame {
        OverlayFrame {
            scan_overlay_opacity,
            scan_ring_deg: self.value(OverlayTrack::ScanRing),
            scan_ring_pulse_opacity: self.value(OverlayTrack::ScanRingPulse),
            refresh_spinner_deg: self.value(OverlayTrack::RefreshSpinner),
            progress_sweep_px: self.value(OverlayTrack::ProgressSweep),
            status_pulse_opacity: self.value(OverlayTrack::StatusPulse),
            badge_spinner_deg: self.value(OverlayTrack::BadgeSpinner),
        }
    }
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function evaluated at `t` in [0, 1].
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let bez = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    // x(s) is monotonic for control points in [0, 1]; bisect for the s with x(s) = t.
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    let mut s = t;
    for _ in 0..32 {
        let x = bez(x1, x2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bez(y1, y2, s)
}
