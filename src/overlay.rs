use crate::constants::*;
use crate::dom;
use arch_core::OverlayFrame;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Swap the canvas for the static placeholder and show why.
pub fn show_placeholder(document: &web::Document, canvas: &web::HtmlCanvasElement, reason: &str) {
    _ = canvas.style().set_property("display", "none");
    hide(document, SCAN_OVERLAY_ID);
    show(document, PLACEHOLDER_ID);
    if let Some(el) = document.get_element_by_id(PLACEHOLDER_REASON_ID) {
        el.set_text_content(Some(reason));
    }
}

fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = dom::html_element_by_id(document, id) {
        _ = el.style().set_property(property, value);
    }
}

#[inline]
fn rotate(deg: f32) -> String {
    format!("rotate({deg:.2}deg)")
}

/// Push one frame of overlay animation values into the DOM.
pub fn apply(document: &web::Document, frame: &OverlayFrame) {
    let opacity = frame.scan_overlay_opacity.clamp(0.0, 1.0);
    if opacity > 0.0 {
        set_style(document, SCAN_OVERLAY_ID, "display", "");
        set_style(document, SCAN_OVERLAY_ID, "opacity", &format!("{opacity:.3}"));
        set_style(document, SCAN_RING_ID, "transform", &rotate(frame.scan_ring_deg));
        set_style(
            document,
            SCAN_RING_PULSE_ID,
            "opacity",
            &format!("{:.3}", frame.scan_ring_pulse_opacity),
        );
        set_style(
            document,
            REFRESH_SPINNER_ID,
            "transform",
            &rotate(frame.refresh_spinner_deg),
        );
    } else {
        set_style(document, SCAN_OVERLAY_ID, "display", "none");
    }

    set_style(
        document,
        PROGRESS_SWEEP_ID,
        "transform",
        &format!("translateX({:.1}px)", frame.progress_sweep_px),
    );
    set_style(
        document,
        STATUS_PULSE_ID,
        "opacity",
        &format!("{:.3}", frame.status_pulse_opacity),
    );
    set_style(
        document,
        BADGE_SPINNER_ID,
        "transform",
        &rotate(frame.badge_spinner_deg),
    );
}
