use crate::constants::MAX_FRAME_DT_MS;
use crate::input;
use crate::overlay;
use crate::render;
use arch_core::{ViewerError, ViewerSurface};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: Rc<RefCell<ViewerSurface>>,
    pub gpu: render::GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub last_instant: Instant,
}

impl FrameContext {
    /// Advance and draw one frame. Returns false once the loop should stop.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = input::clamp_frame_dt(
            now - self.last_instant,
            Duration::from_millis(MAX_FRAME_DT_MS),
        );
        self.last_instant = now;

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);

        let mut surface = self.viewer.borrow_mut();
        let viewer = match &mut *surface {
            ViewerSurface::Live(v) => v,
            ViewerSurface::Placeholder(_) => return false,
        };
        let (gw, gh) = self.gpu.size();
        viewer.set_aspect(gw as f32 / gh.max(1) as f32);
        let Some(snap) = viewer.update(dt) else {
            return false;
        };
        overlay::apply(&self.document, &snap.overlay);

        let batches = viewer.batches();
        match self.gpu.render(&snap.camera, &batches) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                let reason = "GPU ran out of memory".to_string();
                overlay::show_placeholder(&self.document, &self.canvas, &reason);
                surface.fail(ViewerError::BackendUnavailable(reason));
                false
            }
            Err(e) => {
                log::error!("render error: {:?}", e);
                true
            }
        }
    }
}

/// Handle to a running `requestAnimationFrame` loop.
#[derive(Clone)]
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    /// Cancel the pending frame and drop the tick closure.
    ///
    /// Must not be called from inside the tick itself.
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        if self.tick.borrow_mut().take().is_some() {
            log::info!("[frame] loop cancelled");
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, raf_id: &Cell<Option<i32>>) {
    let tick_ref = tick.borrow();
    if let (Some(w), Some(cb)) = (web::window(), tick_ref.as_ref()) {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let handle = LoopHandle {
        raf_id: Rc::new(Cell::new(None)),
        tick: Rc::new(RefCell::new(None)),
    };
    let tick_clone = handle.tick.clone();
    let raf_id = handle.raf_id.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *handle.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id.set(None);
        if !frame_ctx_tick.borrow_mut().frame() {
            log::info!("[frame] loop stopped");
            return;
        }
        request_frame(&tick_clone, &raf_id);
    }) as Box<dyn FnMut()>));
    request_frame(&handle.tick, &handle.raf_id);
    handle
}
