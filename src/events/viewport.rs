use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::Viewport;
use crate::controller::EffectController;
use crate::dom;
use crate::sections::{self, FadeTarget, SectionKind, Watched};

#[derive(Clone)]
pub struct ViewportWiring {
    pub container: web::Element,
    pub canvas: web::HtmlCanvasElement,
    pub viewport: Rc<RefCell<Viewport>>,
    pub controller: Rc<RefCell<EffectController>>,
}

pub fn wire_viewport_handlers(document: &web::Document, w: ViewportWiring) {
    wire_resize(&w);
    wire_scroll(&w);
    wire_sections(document, &w);
    wire_title(document);
}

/// Re-read the container rect; the next frame picks the aspect up for both
/// the projection and the noise pass.
pub fn sync_viewport(w: &ViewportWiring) {
    let (width, height) = dom::element_size(&w.container);
    w.viewport.borrow_mut().resize(width, height);
    dom::sync_canvas_backing_size(&w.canvas, width, height);
}

fn wire_resize(w: &ViewportWiring) {
    sync_viewport(w);
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || sync_viewport(&w)) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_scroll(w: &ViewportWiring) {
    let controller = w.controller.clone();
    let closure = Closure::wrap(Box::new(move || {
        controller.borrow_mut().set_scroll_active();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn observe_all(
    elements: &[web::Element],
    watched: Watched,
    mut on_change: impl FnMut(&web::Element, bool) + 'static,
) {
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                on_change(&entry.target(), entry.is_intersecting());
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_root_margin(watched.root_margin());
    match web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for el in elements {
                observer.observe(el);
            }
        }
        Err(e) => log::error!("[sections] IntersectionObserver {:?}: {:?}", watched, e),
    }
    closure.forget();
}

fn section_enter(
    section: &web::Element,
    kind: SectionKind,
    controller: &RefCell<EffectController>,
) {
    let has_both = dom::has_descendant(section, FadeTarget::Images.selector())
        && dom::has_descendant(section, FadeTarget::Text.selector());
    dom::apply_fades(section, &sections::enter_fades(kind, has_both));
    controller.borrow_mut().set_direction(kind);
}

fn wire_sections(document: &web::Document, w: &ViewportWiring) {
    let all = dom::document_query_all(document, Watched::Sections.selector());
    for section in &all {
        let kind = SectionKind::from_class_list(&section.class_name());
        dom::apply_fades(section, &sections::reset_fades(kind));
    }
    log::info!("[sections] observing {}", all.len());

    let controller = w.controller.clone();
    observe_all(&all, Watched::Sections, move |section, visible| {
        let kind = SectionKind::from_class_list(&section.class_name());
        if visible {
            section_enter(section, kind, &controller);
        } else {
            dom::apply_fades(section, &sections::reset_fades(kind));
        }
    });
}

fn wire_title(document: &web::Document) {
    let titles = dom::document_query_all(document, Watched::Title.selector());
    if titles.is_empty() {
        return;
    }
    observe_all(&titles, Watched::Title, |el, visible| {
        let fade = if visible {
            sections::title_enter()
        } else {
            sections::title_leave()
        };
        dom::animate(el, &fade);
    });
}
