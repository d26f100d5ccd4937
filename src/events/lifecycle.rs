use crate::frame::{self, FrameContext, LoopHandle};
use arch_core::ViewerSurface;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct PageLifecycle {
    pub viewer: Rc<RefCell<ViewerSurface>>,
    pub frame_ctx: Rc<RefCell<FrameContext>>,
    pub frame_loop: LoopHandle,
    pub seed: Option<u64>,
}

/// Tear the viewer down on `pagehide`, and bring up a fresh one if the page
/// is restored from the back/forward cache.
pub fn wire_page_lifecycle(page: PageLifecycle) {
    let Some(wnd) = web::window() else {
        return;
    };
    let frame_loop = Rc::new(RefCell::new(page.frame_loop));

    {
        let viewer = page.viewer.clone();
        let frame_loop = frame_loop.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let ViewerSurface::Live(v) = &mut *viewer.borrow_mut() {
                v.dispose();
            }
            frame_loop.borrow().cancel();
        }) as Box<dyn FnMut()>);
        _ = wnd.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let viewer = page.viewer;
        let frame_ctx = page.frame_ctx;
        let seed = page.seed;
        let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
            if !ev.persisted() {
                return;
            }
            viewer.borrow_mut().restart(seed);
            if viewer.borrow().is_placeholder() {
                return;
            }
            log::info!("[viewer] restored from page cache");
            frame_ctx.borrow_mut().last_instant = Instant::now();
            let handle = frame::start_loop(frame_ctx.clone());
            frame_loop.replace(handle).cancel();
        }) as Box<dyn FnMut(_)>);
        _ = wnd.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
