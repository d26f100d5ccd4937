// Tests for the orbit rig: bounds, damping and auto-rotation.

use arch_core::{OrbitConfig, OrbitRig, ViewerError};
use std::f32::consts::TAU;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn rig() -> OrbitRig {
    OrbitRig::new(OrbitConfig::default()).unwrap()
}

/// Signed shortest difference between two azimuths.
fn angle_diff(a: f32, b: f32) -> f32 {
    (a - b + TAU / 2.0).rem_euclid(TAU) - TAU / 2.0
}

#[test]
fn rejects_invalid_configs() {
    let cases = [
        OrbitConfig {
            min_distance: 30.0,
            max_distance: 10.0,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            damping_factor: 0.0,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            damping_factor: 1.5,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            max_distance: f32::NAN,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            fov_deg: 0.0,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            min_distance: -1.0,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            min_distance: 0.0,
            max_distance: 0.0,
            ..OrbitConfig::default()
        },
        OrbitConfig {
            position: glam::Vec3::ZERO,
            min_distance: 0.0,
            ..OrbitConfig::default()
        },
    ];
    for cfg in cases {
        assert!(
            matches!(OrbitRig::new(cfg), Err(ViewerError::InvalidConfig(_))),
            "{cfg:?} should be rejected"
        );
    }
}

#[test]
fn initial_pose_matches_configured_position() {
    let r = rig();
    let eye = r.eye();
    assert!((eye - glam::Vec3::new(10.0, 8.0, 12.0)).length() < 1e-4);
    assert!((r.distance() - 308.0_f32.sqrt()).abs() < 1e-4);
    assert!(!r.auto_rotate());
    let cam = r.camera(16.0 / 9.0);
    assert!((cam.fovy_radians - 40.0_f32.to_radians()).abs() < 1e-6);
    assert_eq!(cam.target, glam::Vec3::ZERO);
}

#[test]
fn initial_distance_outside_bounds_is_clamped() {
    let cfg = OrbitConfig {
        position: glam::Vec3::new(0.0, 0.0, 100.0),
        ..OrbitConfig::default()
    };
    assert_eq!(OrbitRig::new(cfg).unwrap().distance(), 25.0);
}

#[test]
fn distance_stays_in_bounds_under_extreme_zoom() {
    let mut r = rig();
    for _ in 0..1000 {
        r.zoom_step(-120.0);
    }
    r.update(FRAME);
    assert_eq!(r.distance(), 5.0);

    for _ in 0..1000 {
        r.zoom_step(120.0);
    }
    r.update(FRAME);
    assert_eq!(r.distance(), 25.0);

    // alternating bursts, checked after every frame
    for i in 0..400 {
        let notches = (i % 37) as i32 - 18;
        for _ in 0..notches.abs() {
            r.zoom_step(notches as f32);
        }
        r.dolly(if i % 2 == 0 { 1e6 } else { 1e-6 });
        r.update(FRAME);
        assert!((5.0..=25.0).contains(&r.distance()), "frame {i}: {}", r.distance());
    }
}

#[test]
fn zero_min_distance_survives_collapse_and_blowout() {
    let mut r = OrbitRig::new(OrbitConfig {
        min_distance: 0.0,
        ..OrbitConfig::default()
    })
    .unwrap();

    // pull all the way in until the radius hits its floor
    for _ in 0..4 {
        r.dolly(f32::MIN_POSITIVE);
        r.dolly(f32::MIN_POSITIVE);
        r.update(FRAME);
        assert!((0.0..=25.0).contains(&r.distance()), "{}", r.distance());
    }
    assert!(r.distance() > 0.0);

    // then throw it as far as a float allows
    for _ in 0..4 {
        r.dolly(f32::MAX);
        r.dolly(f32::MAX);
        r.update(FRAME);
        assert!((0.0..=25.0).contains(&r.distance()), "{}", r.distance());
    }
    assert_eq!(r.distance(), 25.0);

    let cam = r.camera(1.0);
    assert!(cam.eye.is_finite());
    assert!(cam.view_proj().is_finite());
}

#[test]
fn dolly_ignores_non_finite_and_non_positive_scales() {
    let mut r = rig();
    let before = r.distance();
    r.dolly(f32::NAN);
    r.dolly(f32::INFINITY);
    r.dolly(0.0);
    r.dolly(-2.0);
    r.update(FRAME);
    assert_eq!(r.distance(), before);
}

#[test]
fn drag_motion_decays_to_rest() {
    let mut r = rig();
    let start = r.azimuth();
    r.rotate_left(1.0);
    let mut settling = true;
    let mut frames = 0;
    while settling && frames < 2000 {
        settling = r.update(FRAME);
        frames += 1;
    }
    assert!(!settling, "rig never came to rest");
    assert!((angle_diff(r.azimuth(), start) + 1.0).abs() < 1e-3);

    // once at rest, further frames do not move the camera
    let eye = r.eye();
    for _ in 0..10 {
        r.update(FRAME);
    }
    assert!((r.eye() - eye).length() < 1e-3);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let mut r = rig();
    r.rotate_up(100.0);
    for _ in 0..600 {
        r.update(FRAME);
    }
    assert!(r.polar() > 0.0);
    r.rotate_up(-100.0);
    for _ in 0..600 {
        r.update(FRAME);
    }
    assert!(r.polar() < std::f32::consts::PI);
}

#[test]
fn auto_rotate_sweeps_one_revolution_per_minute() {
    let mut r = rig();
    r.set_auto_rotate(true);
    let mut travelled = 0.0;
    let mut last = r.azimuth();
    for _ in 0..600 {
        r.update(FRAME);
        let now = r.azimuth();
        let step = angle_diff(now, last);
        assert!(step <= 0.0, "auto-rotate must keep one direction");
        travelled += step;
        last = now;
    }
    // ten seconds at 0.5 speed is one twelfth of a turn, less the damping lag
    let expected = -TAU / 12.0;
    assert!((travelled - expected).abs() < 0.05, "travelled {travelled}");
}

#[test]
fn toggling_auto_rotate_keeps_orientation() {
    let mut r = rig();
    let eye = r.eye();
    r.set_auto_rotate(true);
    assert_eq!(r.eye(), eye);
    r.set_auto_rotate(false);
    assert_eq!(r.eye(), eye);
    r.update(FRAME);
    assert!((r.eye() - eye).length() < 1e-5);
}

#[test]
fn interaction_pauses_auto_rotation() {
    let mut r = rig();
    r.set_auto_rotate(true);
    r.begin_interaction();
    let start = r.azimuth();
    for _ in 0..60 {
        r.update(FRAME);
    }
    assert!(angle_diff(r.azimuth(), start).abs() < 1e-6);
    r.end_interaction();
    for _ in 0..60 {
        r.update(FRAME);
    }
    assert!(angle_diff(r.azimuth(), start) < 0.0);
}
