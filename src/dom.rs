use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::sections::{Fade, FadeScope, FadeTarget, FadeTiming};

#[wasm_bindgen]
extern "C" {
    /// `Element.animate(keyframes, options)` with plain option objects.
    #[wasm_bindgen(method, js_name = animate)]
    fn animate_keyframes(
        this: &web::Element,
        keyframes: &js_sys::Array,
        options: &js_sys::Object,
    );
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Scene container size in CSS pixels.
pub fn element_size(el: &web::Element) -> (f32, f32) {
    let rect = el.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

pub fn window_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(w.inner_width()), dim(w.inner_height()))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, css_w: f32, css_h: f32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let w_px = (css_w as f64 * dpr) as u32;
        let h_px = (css_h as f64 * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
        let style = canvas.style();
        _ = style.set_property("width", &format!("{css_w}px"));
        _ = style.set_property("height", &format!("{css_h}px"));
    }
}

pub fn query_all(root: &web::Element, selector: &str) -> Vec<web::Element> {
    let mut out = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                out.push(el);
            }
        }
    }
    out
}

pub fn document_query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    match document.document_element() {
        Some(root) => query_all(&root, selector),
        None => Vec::new(),
    }
}

#[inline]
pub fn has_descendant(root: &web::Element, selector: &str) -> bool {
    matches!(root.query_selector(selector), Ok(Some(_)))
}

/// The element a fade applies to, relative to the observed `scope`.
pub fn fade_element(scope: &web::Element, target: FadeTarget) -> Option<web::Element> {
    match target.scope() {
        FadeScope::Observed => Some(scope.clone()),
        FadeScope::Section => scope.query_selector(target.selector()).ok().flatten(),
        FadeScope::Document => window_document()?
            .query_selector(target.selector())
            .ok()
            .flatten(),
    }
}

/// Start one Web Animations fade; the end state sticks (`fill: forwards`).
pub fn animate(el: &web::Element, fade: &Fade) {
    let frame = js_sys::Object::new();
    for (prop, value) in fade.to.css_properties() {
        _ = js_sys::Reflect::set(&frame, &JsValue::from_str(prop), &JsValue::from_str(&value));
    }
    let keyframes = js_sys::Array::of1(&frame);

    let timing = fade.timing();
    let options = js_sys::Object::new();
    let set = |key: &str, value: JsValue| {
        _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &value);
    };
    set("duration", JsValue::from_f64(timing.duration_ms));
    set("delay", JsValue::from_f64(timing.delay_ms));
    set("fill", JsValue::from_str(FadeTiming::FILL));
    set("easing", JsValue::from_str(FadeTiming::EASING));

    el.animate_keyframes(&keyframes, &options);
}

pub fn apply_fades<'f>(scope: &web::Element, fades: impl IntoIterator<Item = &'f Fade>) {
    for fade in fades {
        if let Some(el) = fade_element(scope, fade.target) {
            animate(&el, fade);
        }
    }
}
