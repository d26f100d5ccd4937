// Tests for the looping overlay tracks.

use arch_core::overlay::{cubic_bezier, TrackGate};
use arch_core::{LoadingState, OverlayAnimator, OverlayTrack};
use std::time::Duration;

#[test]
fn every_track_is_periodic() {
    let anim = OverlayAnimator::new();
    for track in OverlayTrack::ALL {
        let t = anim.track(track);
        let period = t.period();
        for ms in [0u64, 1, 137, 499, 999, 1733, 2401, 5999] {
            let at = Duration::from_millis(ms);
            assert_eq!(
                t.value_at(at),
                t.value_at(at + period),
                "{track:?} at {ms}ms"
            );
            assert_eq!(t.value_at(at), t.value_at(at + period * 7));
        }
    }
}

#[test]
fn uneven_frames_do_not_drift() {
    let fresh = OverlayAnimator::new();
    let mut anim = OverlayAnimator::new();
    // 30 s is a whole number of periods for every track
    let pattern = [7u64, 16, 17, 10];
    for _ in 0..600 {
        for ms in pattern {
            anim.advance(Duration::from_millis(ms), LoadingState::Scanning);
        }
    }
    for track in OverlayTrack::ALL {
        assert_eq!(anim.track(track).progress(), 0.0, "{track:?}");
        assert_eq!(anim.value(track), fresh.value(track));
    }
}

#[test]
fn scan_tracks_freeze_once_ready() {
    let mut anim = OverlayAnimator::new();
    anim.advance(Duration::from_millis(300), LoadingState::Scanning);
    let ring = anim.value(OverlayTrack::ScanRing);
    let sweep = anim.value(OverlayTrack::ProgressSweep);

    anim.advance(Duration::from_millis(300), LoadingState::Ready);
    assert_eq!(anim.value(OverlayTrack::ScanRing), ring);
    assert_ne!(anim.value(OverlayTrack::ProgressSweep), sweep);

    assert!(!anim.is_active(OverlayTrack::ScanRing, LoadingState::Ready));
    assert!(anim.is_active(OverlayTrack::BadgeSpinner, LoadingState::Ready));
    assert!(anim.is_active(OverlayTrack::ScanRing, LoadingState::Scanning));
    assert_eq!(
        anim.track(OverlayTrack::RefreshSpinner).gate,
        TrackGate::WhileScanning
    );
}

#[test]
fn curves_hit_their_keyframes() {
    let anim = OverlayAnimator::new();

    let sweep = anim.track(OverlayTrack::ProgressSweep);
    assert_eq!(sweep.value_at(Duration::ZERO), -192.0);
    assert!(sweep.value_at(Duration::from_millis(1250)).abs() < 1e-3);
    assert!(sweep.value_at(Duration::from_millis(2499)) > 191.0);

    let ring = anim.track(OverlayTrack::ScanRing);
    assert_eq!(ring.value_at(Duration::ZERO), 0.0);
    assert!((ring.value_at(Duration::from_millis(1500)) - 90.0).abs() < 1e-3);
    assert!((ring.value_at(Duration::from_secs(3)) - 180.0).abs() < 1e-3);

    let spinner = anim.track(OverlayTrack::BadgeSpinner);
    assert!((spinner.value_at(Duration::from_millis(250)) - 90.0).abs() < 1e-3);

    let pulse = anim.track(OverlayTrack::StatusPulse);
    assert_eq!(pulse.value_at(Duration::ZERO), 1.0);
    assert!((pulse.value_at(Duration::from_secs(1)) - 0.5).abs() < 1e-6);
    for ms in (0..2000).step_by(50) {
        let v = pulse.value_at(Duration::from_millis(ms));
        assert!((0.5 - 1e-4..=1.0 + 1e-4).contains(&v), "pulse {v} at {ms}ms");
    }
}

#[test]
fn restart_and_stop() {
    let mut anim = OverlayAnimator::new();
    anim.advance(Duration::from_millis(400), LoadingState::Scanning);
    assert!(anim.track(OverlayTrack::BadgeSpinner).progress() > 0.0);
    anim.restart(OverlayTrack::BadgeSpinner);
    assert_eq!(anim.track(OverlayTrack::BadgeSpinner).progress(), 0.0);

    anim.stop_all();
    assert!(!anim.any_running());
    let frame = anim.frame(1.0);
    anim.advance(Duration::from_millis(123), LoadingState::Scanning);
    assert_eq!(anim.frame(1.0), frame);

    anim.restart(OverlayTrack::ProgressSweep);
    assert!(anim.any_running());
    assert!(anim.track(OverlayTrack::ProgressSweep).is_running());
    assert!(!anim.track(OverlayTrack::ScanRing).is_running());
}

#[test]
fn pulse_easing_is_monotonic() {
    let mut last = 0.0;
    for i in 0..=100 {
        let y = cubic_bezier(0.4, 0.0, 0.6, 1.0, i as f32 / 100.0);
        assert!(y >= last - 1e-6);
        last = y;
    }
    assert!(cubic_bezier(0.4, 0.0, 0.6, 1.0, 0.0).abs() < 1e-6);
    assert!((cubic_bezier(0.4, 0.0, 0.6, 1.0, 1.0) - 1.0).abs() < 1e-6);
    assert!((cubic_bezier(0.4, 0.0, 0.6, 1.0, 0.5) - 0.5).abs() < 1e-3);
}
