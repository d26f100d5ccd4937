// Tests for the scanning/ready loading machine.

use arch_core::{LoadingConfig, LoadingState, LoadingStateMachine, ViewerError};
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn machine() -> LoadingStateMachine {
    LoadingStateMachine::new(LoadingConfig::default()).unwrap()
}

#[test]
fn starts_scanning_and_becomes_ready_after_delay() {
    let mut m = machine();
    assert_eq!(m.state(), LoadingState::Scanning);
    m.start();
    assert!(m.has_pending_timer());
    assert_eq!(m.advance(ms(1499)), None);
    assert!(m.is_loading());
    assert!(!m.auto_rotate_enabled());
    assert_eq!(m.advance(ms(1)), Some(LoadingState::Ready));
    assert!(!m.is_loading());
    assert!(!m.has_pending_timer());
    assert!(m.auto_rotate_enabled());
}

#[test]
fn ready_is_terminal() {
    let mut m = machine();
    m.start();
    m.advance(ms(2000));
    for _ in 0..100 {
        assert_eq!(m.advance(ms(250)), None);
        assert_eq!(m.state(), LoadingState::Ready);
    }
    m.start();
    m.advance(ms(5000));
    assert_eq!(m.state(), LoadingState::Ready);
}

#[test]
fn nothing_happens_before_start() {
    let mut m = machine();
    assert_eq!(m.advance(ms(10_000)), None);
    assert_eq!(m.state(), LoadingState::Scanning);
    assert!(!m.has_pending_timer());
}

#[test]
fn repeated_start_does_not_rearm_the_timer() {
    let mut m = machine();
    m.start();
    m.advance(ms(1000));
    m.start();
    assert_eq!(m.advance(ms(500)), Some(LoadingState::Ready));
}

#[test]
fn dispose_before_delay_cancels_transition() {
    let mut m = machine();
    m.start();
    m.advance(ms(700));
    m.dispose();
    assert!(m.is_disposed());
    assert!(!m.has_pending_timer());
    assert_eq!(m.advance(ms(10_000)), None);
    assert_eq!(m.state(), LoadingState::Scanning);

    m.start();
    assert!(!m.has_pending_timer());
    assert!(!m.auto_rotate_enabled());
}

#[test]
fn dispose_after_ready_freezes_auto_rotate() {
    let mut m = machine();
    m.start();
    m.advance(ms(1500));
    assert!(m.auto_rotate_enabled());
    m.dispose();
    m.dispose();
    assert!(!m.auto_rotate_enabled());
    assert_eq!(m.state(), LoadingState::Ready);
}

#[test]
fn overlay_fades_out_after_ready() {
    let mut m = machine();
    m.start();
    assert_eq!(m.overlay_opacity(), 1.0);
    m.advance(ms(1500));
    assert!((m.overlay_opacity() - 1.0).abs() < 1e-6);
    m.advance(ms(400));
    assert!((m.overlay_opacity() - 0.5).abs() < 1e-3);
    assert!(m.overlay_visible());
    m.advance(ms(400));
    assert_eq!(m.overlay_opacity(), 0.0);
    assert!(!m.overlay_visible());
}

#[test]
fn overshoot_counts_toward_the_fade() {
    let mut m = machine();
    m.start();
    m.advance(ms(1900));
    assert!((m.overlay_opacity() - 0.5).abs() < 1e-3);
}

#[test]
fn zero_fade_hides_overlay_immediately() {
    let mut m = LoadingStateMachine::new(LoadingConfig {
        delay: ms(10),
        fade: Duration::ZERO,
    })
    .unwrap();
    m.start();
    m.advance(ms(10));
    assert_eq!(m.overlay_opacity(), 0.0);
}

#[test]
fn zero_delay_is_rejected() {
    let cfg = LoadingConfig {
        delay: Duration::ZERO,
        fade: ms(800),
    };
    assert!(matches!(
        LoadingStateMachine::new(cfg),
        Err(ViewerError::InvalidConfig(_))
    ));
}
