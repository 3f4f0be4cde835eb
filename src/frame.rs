use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::assemble::SceneState;
use crate::camera::{Camera, LightRig, OrbitControls, Viewport};
use crate::controller::EffectController;
use crate::dom;
use crate::input::{self, PointerState};
use crate::render;
use crate::uniforms::NoiseUniforms;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneState>>,
    pub controller: Rc<RefCell<EffectController>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub pointer: Rc<RefCell<PointerState>>,

    pub camera: Camera,
    pub lights: LightRig,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,

    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let elapsed = (now - self.started).as_secs_f32();

        {
            let mut orbit = self.orbit.borrow_mut();
            orbit.update(dt_sec);
            orbit.apply(&mut self.camera);
        }
        let viewport = *self.viewport.borrow();
        self.camera.fit_viewport(&viewport);

        let mut scene = self.scene.borrow_mut();
        let eye_target = scene.config.eye_tracking.then(|| {
            let (win_w, win_h) = dom::window_size();
            input::pointer_world_target(&self.pointer.borrow(), win_w, win_h, self.camera.eye)
        });
        scene.advance(eye_target);

        let params = self.controller.borrow_mut().tick(dt_sec);

        if let Some(g) = &mut self.gpu {
            g.upload_pending(&mut scene.assets);
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let noise = NoiseUniforms::new(params, elapsed, &viewport);
            if let Err(e) = g.render(&scene.graph, &self.camera, &self.lights, &noise) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// requestAnimationFrame driver. `stop` cancels the pending frame and drops
/// the tick closure; a later `start` picks up the same frame context.
pub struct AnimationLoop {
    ctx: Rc<RefCell<FrameContext<'static>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}

impl AnimationLoop {
    pub fn new(ctx: FrameContext<'static>) -> Self {
        Self {
            ctx: Rc::new(RefCell::new(ctx)),
            tick: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.borrow().is_some()
    }

    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        // Time spent stopped does not count as one long frame.
        self.ctx.borrow_mut().last_instant = Instant::now();
        let ctx = self.ctx.clone();
        let tick = self.tick.clone();
        let pending = self.pending.clone();
        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);
            ctx.borrow_mut().frame();
            if let Some(cb) = tick.borrow().as_ref() {
                pending.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = self.tick.borrow().as_ref() {
            self.pending.set(request_frame(cb));
        }
        log::info!("[frame] loop started");
    }

    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}
