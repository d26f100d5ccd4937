// Host-side tests for the web host constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_unique_and_non_empty() {
    let ids = [
        CANVAS_ID,
        PLACEHOLDER_ID,
        PLACEHOLDER_REASON_ID,
        SCAN_OVERLAY_ID,
        SCAN_RING_ID,
        SCAN_RING_PULSE_ID,
        REFRESH_SPINNER_ID,
        PROGRESS_SWEEP_ID,
        STATUS_PULSE_ID,
        BADGE_SPINNER_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "id '{a}' must not contain spaces");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn prop_attributes_are_data_attributes() {
    for attr in [ATTR_ACTIVE_TOOTH, ATTR_STATUS, ATTR_SEED] {
        assert!(attr.starts_with("data-"));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wheel_tuning_is_consistent() {
    assert!(WHEEL_NOTCH_PX > 0.0);
    assert!(WHEEL_LINE_PX > 0.0 && WHEEL_LINE_PX < WHEEL_PAGE_PX);
    assert!(WHEEL_MAX_NOTCHES_PER_EVENT >= 1.0);
    assert!(DRAG_MIN_VIEWPORT_PX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_clamp_allows_normal_frames() {
    // a 30 Hz frame must pass through untouched
    assert!(MAX_FRAME_DT_MS > 34);
    // but a background-tab stall must not skip the whole scan delay in one step
    assert!(MAX_FRAME_DT_MS < 1500);
}
