use crate::constants::{
    DRAG_MIN_VIEWPORT_PX, WHEEL_LINE_PX, WHEEL_MAX_NOTCHES_PER_EVENT, WHEEL_NOTCH_PX,
    WHEEL_PAGE_PX,
};
use glam::Vec2;
use std::time::Duration;

/// Tracks a single active pointer drag on the canvas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = pos;
    }

    /// Movement since the previous sample, or `None` for a foreign or idle pointer.
    pub fn move_to(&mut self, pointer_id: i32, pos: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        (delta.is_finite() && delta != Vec2::ZERO).then_some(delta)
    }

    /// Returns true if this ended the active drag.
    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.active && pointer_id == self.pointer_id {
            self.active = false;
            return true;
        }
        false
    }
}

/// Convert a wheel delta into signed zoom notches.
///
/// `delta_mode` follows `WheelEvent.deltaMode`: 0 pixels, 1 lines, 2 pages.
/// Positive values zoom out.
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    let px = delta_y as f32
        * match delta_mode {
            1 => WHEEL_LINE_PX,
            2 => WHEEL_PAGE_PX,
            _ => 1.0,
        };
    if !px.is_finite() || px == 0.0 {
        return 0.0;
    }
    let notches = px / WHEEL_NOTCH_PX;
    // trackpads send many tiny deltas; never let one round to nothing
    let magnitude = notches.abs().clamp(1.0, WHEEL_MAX_NOTCHES_PER_EVENT);
    magnitude.round().copysign(notches)
}

/// Viewport height used to scale drag rotation.
#[inline]
pub fn drag_viewport_height(css_height: f64) -> f32 {
    (css_height as f32).max(DRAG_MIN_VIEWPORT_PX)
}

/// Clamp a frame delta so a long stall does not fast-forward timers and damping.
#[inline]
pub fn clamp_frame_dt(dt: Duration, max: Duration) -> Duration {
    dt.min(max)
}

/// Pointer position relative to the element's top-left corner, in CSS pixels.
#[inline]
pub fn local_css_px(client_x: i32, client_y: i32, rect_left: f64, rect_top: f64) -> Vec2 {
    Vec2::new(
        (client_x as f64 - rect_left) as f32,
        (client_y as f64 - rect_top) as f32,
    )
}
