use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::{OrbitControls, Viewport};
use crate::input::{DragState, PointerState};

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub drag: Rc<RefCell<DragState>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

/// Document-wide so the eyes follow the pointer over the page text too.
fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        w.pointer.borrow_mut().set(x, y);
        let delta = w.drag.borrow_mut().update(x, y);
        if let Some((dx, dy)) = delta {
            let height = w.viewport.borrow().height;
            w.orbit.borrow_mut().drag(dx, dy, height);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(document) = crate::dom::window_document() {
        _ = document
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let drag = w.drag.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Primary button only
        if ev.button() != 0 {
            return;
        }
        drag.borrow_mut().begin(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &PointerWiring) {
    let drag = w.drag.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        drag.borrow_mut().end();
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        for name in ["pointerup", "pointercancel"] {
            _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}
