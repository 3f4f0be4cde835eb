#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assemble;
mod assets;
mod camera;
mod capability;
mod config;
mod constants;
mod controller;
mod dom;
mod error;
mod events;
mod frame;
mod geometry;
mod input;
mod lifecycle;
mod loader;
mod overlay;
mod render;
mod scene;
mod sections;
mod uniforms;

use capability::Startup;
use error::SceneError;

fn gpu_exposed(window: &web::Window) -> bool {
    js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("gpu"))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Stop drawing when the page goes away and resume when the back/forward
/// cache brings it back.
fn wire_lifecycle(anim: Rc<frame::AnimationLoop>) {
    use lifecycle::{LoopAction, PageTransition};

    let Some(window) = web::window() else {
        return;
    };
    for transition in [PageTransition::Hide, PageTransition::Show] {
        let anim = anim.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
            match lifecycle::loop_action(transition, ev.persisted()) {
                LoopAction::Start => anim.start(),
                LoopAction::Stop => anim.stop(),
                LoopAction::Keep => {}
            }
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback(
            transition.event_name(),
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("halo-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let startup = Startup::from_capability(gpu_exposed(&window));
    if !startup.builds_scene() {
        overlay::show_startup(&document, startup);
        return Err(SceneError::CapabilityUnavailable.into());
    }

    let container = document
        .query_selector(".three")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing .three"))?;
    let config = config::SceneConfig::from_attributes(
        container.get_attribute("data-variant").as_deref(),
        container.get_attribute("data-assets").as_deref(),
    );
    log::info!("[config] variant={:?}", config.variant);

    let canvas = create_canvas(&document, &container)?;
    let (css_w, css_h) = dom::element_size(&container);
    let viewport = Rc::new(RefCell::new(camera::Viewport::new(css_w, css_h)));
    dom::sync_canvas_backing_size(&canvas, css_w, css_h);

    // An adapter that cannot be acquired counts as no capability.
    let Some(gpu) = frame::init_gpu(&canvas).await else {
        canvas.remove();
        overlay::show_startup(&document, Startup::Fallback);
        return Err(SceneError::CapabilityUnavailable.into());
    };

    let controller = Rc::new(RefCell::new(controller::EffectController::new(
        config.direction_smoothing,
        config.intensity_smoothing,
    )));
    let camera = camera::Camera::new(viewport.borrow().aspect());
    let orbit = Rc::new(RefCell::new(camera::OrbitControls::new(
        &camera,
        config.autorotate,
    )));
    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    let drag = Rc::new(RefCell::new(input::DragState::default()));

    let (scene, textures) = assemble::SceneState::new(config);
    let scene = Rc::new(RefCell::new(scene));

    events::wire_viewport_handlers(
        &document,
        events::ViewportWiring {
            container: container.clone(),
            canvas: canvas.clone(),
            viewport: viewport.clone(),
            controller: controller.clone(),
        },
    );
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
        drag,
        orbit: orbit.clone(),
        viewport: viewport.clone(),
    });

    let now = Instant::now();
    let anim = Rc::new(frame::AnimationLoop::new(frame::FrameContext {
        scene: scene.clone(),
        controller,
        viewport,
        orbit,
        pointer,
        camera,
        lights: camera::LightRig::default(),
        gpu: Some(gpu),
        canvas,
        started: now,
        last_instant: now,
    }));
    anim.start();
    wire_lifecycle(anim);

    loader::spawn_loads(scene, textures);
    Ok(())
}
