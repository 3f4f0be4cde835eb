use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::assemble::{SceneState, TextureRequest};
use crate::assets::{self, ModelData};
use crate::constants::{PRIMARY_MODEL, SECONDARY_MODEL};
use crate::dom;
use crate::error::{AssetError, SceneError};
use crate::overlay;

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    let window = web::window().ok_or_else(|| AssetError::Fetch("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(AssetError::Fetch(format!("HTTP {}", resp.status())));
    }
    let promise = resp
        .array_buffer()
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn fetch_model(url: &str) -> Result<ModelData, SceneError> {
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| SceneError::asset(url, e))?;
    assets::decode_glb(&bytes).map_err(|e| SceneError::asset(url, e))
}

async fn fetch_texture(scene: Rc<RefCell<SceneState>>, request: TextureRequest) {
    let result = match fetch_bytes(&request.url).await {
        Ok(bytes) => assets::decode_image(&bytes),
        Err(e) => Err(e),
    };
    match result {
        Ok(image) => {
            log::info!(
                "[assets] texture {} {}x{}",
                request.url,
                image.width,
                image.height
            );
            scene
                .borrow_mut()
                .assets
                .fulfil_texture(request.handle, image);
        }
        // Leaves the white placeholder bound.
        Err(e) => log::error!("{}", SceneError::asset(request.url, e)),
    }
}

fn spawn_textures(scene: &Rc<RefCell<SceneState>>, requests: Vec<TextureRequest>) {
    for request in requests {
        spawn_local(fetch_texture(scene.clone(), request));
    }
}

/// Primary model first; the secondary model only once the primary is in.
async fn load_models(scene: &Rc<RefCell<SceneState>>) -> Result<(), SceneError> {
    let (primary_url, secondary_url) = {
        let s = scene.borrow();
        let secondary = s
            .config
            .secondary_model
            .then(|| s.config.asset_url(SECONDARY_MODEL));
        (s.config.asset_url(PRIMARY_MODEL), secondary)
    };

    let model = fetch_model(&primary_url).await?;
    log::info!(
        "[assets] {} parts={} vertices={}",
        primary_url,
        model.parts.len(),
        model.vertex_count()
    );
    let requests = scene.borrow_mut().on_primary_loaded(model);
    spawn_textures(scene, requests);
    if let Some(document) = dom::window_document() {
        overlay::hide_loading(&document);
    }

    if let Some(url) = secondary_url {
        let model = fetch_model(&url).await?;
        let node = scene.borrow_mut().on_secondary_loaded(model);
        log::info!("[assets] {} attached as node {:?}", url, node);
    }
    Ok(())
}

/// Kick off every fetch. Failures are logged and never retried.
pub fn spawn_loads(scene: Rc<RefCell<SceneState>>, initial: Vec<TextureRequest>) {
    spawn_textures(&scene, initial);
    spawn_local(async move {
        if let Err(e) = load_models(&scene).await {
            log::error!("{}", e);
            if let Some(document) = dom::window_document() {
                if overlay::is_loading(&document) {
                    log::warn!("[assets] page stays in loading state");
                }
            }
        }
    });
}
