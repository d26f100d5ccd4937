// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use std::time::Duration;

#[test]
fn drag_reports_deltas_for_the_captured_pointer_only() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(1, Vec2::new(10.0, 10.0)), None);

    drag.begin(7, Vec2::new(100.0, 50.0));
    assert_eq!(drag.move_to(7, Vec2::new(110.0, 45.0)), Some(Vec2::new(10.0, -5.0)));
    // a second finger does not steer the camera
    assert_eq!(drag.move_to(8, Vec2::new(300.0, 300.0)), None);
    assert_eq!(drag.move_to(7, Vec2::new(111.0, 45.0)), Some(Vec2::new(1.0, 0.0)));
    // no movement, no delta
    assert_eq!(drag.move_to(7, Vec2::new(111.0, 45.0)), None);

    assert!(!drag.end(8));
    assert!(drag.end(7));
    assert!(!drag.active);
    assert_eq!(drag.move_to(7, Vec2::new(200.0, 45.0)), None);
}

#[test]
fn wheel_notches_follow_delta_mode() {
    // pixel deltas from a mouse wheel
    assert_eq!(wheel_notches(100.0, 0), 1.0);
    assert_eq!(wheel_notches(-100.0, 0), -1.0);
    assert_eq!(wheel_notches(300.0, 0), 3.0);
    // line deltas (Firefox)
    assert_eq!(wheel_notches(-3.0, 1), -1.0);
    // page deltas clamp to the per-event maximum
    assert_eq!(wheel_notches(1.0, 2), 4.0);
    assert_eq!(wheel_notches(-1.0, 2), -4.0);
}

#[test]
fn tiny_trackpad_deltas_still_zoom() {
    assert_eq!(wheel_notches(2.0, 0), 1.0);
    assert_eq!(wheel_notches(-0.5, 0), -1.0);
}

#[test]
fn zero_or_garbage_wheel_deltas_are_ignored() {
    assert_eq!(wheel_notches(0.0, 0), 0.0);
    assert_eq!(wheel_notches(f64::NAN, 0), 0.0);
    assert_eq!(wheel_notches(f64::INFINITY, 1), 0.0);
}

#[test]
fn drag_viewport_height_never_collapses() {
    assert_eq!(drag_viewport_height(720.0), 720.0);
    assert_eq!(drag_viewport_height(0.0), 1.0);
    assert_eq!(drag_viewport_height(-5.0), 1.0);
}

#[test]
fn frame_dt_is_clamped_after_stalls() {
    let max = Duration::from_millis(100);
    assert_eq!(clamp_frame_dt(Duration::from_millis(16), max), Duration::from_millis(16));
    assert_eq!(clamp_frame_dt(Duration::from_secs(30), max), max);
}

#[test]
fn local_css_px_is_relative_to_element() {
    let p = local_css_px(250, 130, 200.0, 100.5);
    assert_eq!(p, Vec2::new(50.0, 29.5));
}
