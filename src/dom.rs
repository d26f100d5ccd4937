use crate::constants::{ATTR_ACTIVE_TOOTH, ATTR_SEED, ATTR_STATUS};
use arch_core::{ToothStatus, ViewerProps};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Make sure the canvas is never laid out shorter than the viewer's minimum height.
pub fn apply_min_height(canvas: &web::HtmlCanvasElement, min_height_px: u32) {
    _ = canvas
        .style()
        .set_property("min-height", &format!("{min_height_px}px"));
}

/// Read the inbound props from the canvas data attributes, falling back to defaults.
pub fn read_props(canvas: &web::HtmlCanvasElement) -> ViewerProps {
    let mut props = ViewerProps::default();
    if let Some(raw) = canvas.get_attribute(ATTR_ACTIVE_TOOTH) {
        match raw.trim().parse::<u32>() {
            Ok(id) => props.active_tooth_id = id,
            Err(_) => log::warn!("[dom] ignoring {ATTR_ACTIVE_TOOTH}='{raw}'"),
        }
    }
    if let Some(raw) = canvas.get_attribute(ATTR_STATUS) {
        match raw.parse::<ToothStatus>() {
            Ok(status) => props.status = status,
            Err(e) => log::warn!("[dom] {e}"),
        }
    }
    props
}

/// Optional fixed seed for reproducible scenes.
pub fn read_seed(canvas: &web::HtmlCanvasElement) -> Option<u64> {
    canvas
        .get_attribute(ATTR_SEED)
        .and_then(|raw| raw.trim().parse::<u64>().ok())
}
