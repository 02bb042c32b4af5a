#![cfg(target_arch = "wasm32")]
//! Service worker: precache on install, drop stale generations on activate,
//! and route fetches through the cache manager.

use backend::WorkerBackend;
use folio_core::cache::{CacheConfig, CacheManager, Route};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys as web;

mod backend;

type Manager = CacheManager<WorkerBackend>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let scope: web::ServiceWorkerGlobalScope = js_sys::global().dyn_into()?;
    let manager = CacheManager::new(WorkerBackend::new(scope.clone()), CacheConfig::default());
    log::info!("[sw] starting with cache {}", manager.config().versioned_cache);

    wire_install(&scope, manager.clone());
    wire_activate(&scope, manager.clone());
    wire_fetch(&scope, manager.clone());
    wire_sync(&scope, manager);
    Ok(())
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn listen<E: JsCast + 'static>(
    scope: &web::ServiceWorkerGlobalScope,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: JsValue| handler(ev.unchecked_into::<E>()))
        as Box<dyn FnMut(JsValue)>);
    let added = scope.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    if let Err(e) = added {
        log::error!("[sw] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

fn wire_install(scope: &web::ServiceWorkerGlobalScope, manager: Manager) {
    let scope_ev = scope.clone();
    listen(scope, "install", move |ev: web::ExtendableEvent| {
        let manager = manager.clone();
        let scope = scope_ev.clone();
        let work = future_to_promise(async move {
            manager.install().await.map_err(js_error)?;
            // Activate immediately instead of waiting for old pages to close.
            JsFuture::from(scope.skip_waiting()?).await?;
            Ok(JsValue::UNDEFINED)
        });
        _ = ev.wait_until(&work);
    });
}

fn wire_activate(scope: &web::ServiceWorkerGlobalScope, manager: Manager) {
    let scope_ev = scope.clone();
    listen(scope, "activate", move |ev: web::ExtendableEvent| {
        let manager = manager.clone();
        let scope = scope_ev.clone();
        let work = future_to_promise(async move {
            let removed = manager.activate().await.map_err(js_error)?;
            log::info!("[sw] activated; removed {} stale caches", removed.len());
            JsFuture::from(scope.clients().claim()).await?;
            Ok(JsValue::UNDEFINED)
        });
        _ = ev.wait_until(&work);
    });
}

fn wire_fetch(scope: &web::ServiceWorkerGlobalScope, manager: Manager) {
    listen(scope, "fetch", move |ev: web::FetchEvent| {
        let request = ev.request();
        let meta = backend::request_meta(&request);
        let route = manager.route(&meta);
        if route == Route::PassThrough {
            return;
        }
        let manager = manager.clone();
        let event = ev.clone();
        let response = future_to_promise(async move {
            let served = manager
                .respond(route, &meta, request)
                .await
                .map_err(js_error)?;
            if let Some(refresh) = served.revalidation {
                let refresh = future_to_promise(async move {
                    refresh.await;
                    Ok(JsValue::UNDEFINED)
                });
                _ = event.wait_until(&refresh);
            }
            Ok(served.response.into())
        });
        if let Err(e) = ev.respond_with(&response) {
            log::error!("[sw] respondWith failed: {:?}", e);
        }
    });
}

fn wire_sync(scope: &web::ServiceWorkerGlobalScope, manager: Manager) {
    listen(scope, "sync", move |ev: web::ExtendableEvent| {
        let tag = js_sys::Reflect::get(&ev, &JsValue::from_str("tag"))
            .ok()
            .and_then(|t| t.as_string())
            .unwrap_or_default();
        let manager = manager.clone();
        let work = future_to_promise(async move {
            manager.sync(&tag).await;
            Ok(JsValue::UNDEFINED)
        });
        _ = ev.wait_until(&work);
    });
}
