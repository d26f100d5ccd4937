use crate::input;
use arch_core::{Lifecycle, OrbitRig, ViewerSurface};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<ViewerSurface>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

impl InputWiring {
    /// Run `f` against the camera rig of a mounted viewer; no-op otherwise.
    fn with_rig(&self, f: impl FnOnce(&mut OrbitRig)) {
        if let ViewerSurface::Live(v) = &mut *self.viewer.borrow_mut() {
            if v.lifecycle() == Lifecycle::Mounted {
                f(v.rig_mut());
            }
        }
    }

    fn local_px(&self, ev: &web::PointerEvent) -> glam::Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        input::local_css_px(ev.client_x(), ev.client_y(), rect.left(), rect.top())
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w, "pointerup");
    wire_pointerup(&w, "pointercancel");
    wire_wheel(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let pos = w.local_px(&ev);
        w.drag_state.borrow_mut().begin(ev.pointer_id(), pos);
        w.with_rig(|rig| rig.begin_interaction());
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = w.local_px(&ev);
        let delta = w.drag_state.borrow_mut().move_to(ev.pointer_id(), pos);
        if let Some(d) = delta {
            let h = input::drag_viewport_height(w.canvas.get_bounding_client_rect().height());
            w.with_rig(|rig| rig.drag(d.x, d.y, h));
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerup(w: &InputWiring, event_name: &str) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.drag_state.borrow_mut().end(ev.pointer_id()) {
            w.with_rig(|rig| rig.end_interaction());
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let notches = input::wheel_notches(ev.delta_y(), ev.delta_mode());
        if notches == 0.0 {
            return;
        }
        w.with_rig(|rig| {
            for _ in 0..notches.abs() as u32 {
                rig.zoom_step(notches);
            }
        });
        // keep the page from scrolling while zooming the scene
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
