use wasm_bindgen::JsCast;
use web_sys as web;

use crate::capability::Startup;

/// Reflect the startup decision on the static `.error-message` element.
#[inline]
pub fn show_startup(document: &web::Document, startup: Startup) {
    if startup.builds_scene() {
        return;
    }
    let el = document
        .query_selector(".error-message")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(el) = el {
        _ = el.style().set_property("display", startup.error_display());
    }
}

/// Drop the `loading` class once the primary model is in the scene.
#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(body) = document.body() {
        _ = body.class_list().remove_1("loading");
    }
}

#[inline]
pub fn is_loading(document: &web::Document) -> bool {
    document
        .body()
        .map(|b| b.class_list().contains("loading"))
        .unwrap_or(false)
}
