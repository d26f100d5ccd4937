#![cfg(target_arch = "wasm32")]
use arch_core::{ViewerConfig, ViewerError, ViewerSurface};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::CANVAS_ID;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("arch-viewer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let props = dom::read_props(&canvas);
    let seed = dom::read_seed(&canvas);
    let config = ViewerConfig::default();
    dom::apply_min_height(&canvas, config.min_viewport_height_px);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let mut surface = ViewerSurface::build(props, config, seed);
    let gpu_result = match &surface {
        ViewerSurface::Live(v) => Some(render::GpuState::new(&canvas, v.scene()).await),
        ViewerSurface::Placeholder(_) => None,
    };
    let gpu = match gpu_result {
        Some(Ok(g)) => Some(g),
        Some(Err(e)) => {
            surface.fail(ViewerError::BackendUnavailable(e.to_string()));
            None
        }
        None => None,
    };

    let Some(gpu) = gpu else {
        let reason = match &surface {
            ViewerSurface::Placeholder(e) => e.to_string(),
            ViewerSurface::Live(_) => "renderer unavailable".to_string(),
        };
        overlay::show_placeholder(&document, &canvas, &reason);
        return Ok(());
    };
    if let ViewerSurface::Live(v) = &mut surface {
        v.mount();
    }

    let viewer = Rc::new(RefCell::new(surface));

    // Pointer drag orbits, wheel zooms
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer: viewer.clone(),
        gpu,
        canvas,
        document,
        last_instant: Instant::now(),
    }));
    let frame_loop = frame::start_loop(frame_ctx.clone());
    events::wire_page_lifecycle(events::PageLifecycle {
        viewer,
        frame_ctx,
        frame_loop,
        seed,
    });

    Ok(())
}
