use crate::constants::{SERVICE_WORKER_URL, SKIP_SW_HOSTNAME};
use crate::dom::EventListener;
use folio_core::constants::PERIODIC_SYNC_MIN_INTERVAL_MS;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Register the service worker once the page has loaded.
pub fn register_on_load(sync_tag: String) -> Option<EventListener> {
    let window = web::window()?;
    let host = window.location().hostname().unwrap_or_default();
    if host == SKIP_SW_HOSTNAME {
        log::info!("[sw] skipping registration on {}", host);
        return None;
    }
    let navigator = window.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        log::info!("[sw] service workers unsupported");
        return None;
    }
    let window_ev = window.clone();
    EventListener::new(&window, "load", false, move |_| {
        let container = window_ev.navigator().service_worker();
        let tag = sync_tag.clone();
        spawn_local(async move {
            match register(&container, &tag).await {
                Ok(()) => log::info!("[sw] registration successful"),
                Err(e) => log::error!("[sw] registration failed: {:?}", e),
            }
        });
    })
}

async fn register(container: &web::ServiceWorkerContainer, sync_tag: &str) -> anyhow::Result<()> {
    let registration = JsFuture::from(container.register(SERVICE_WORKER_URL))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let registration: web::ServiceWorkerRegistration = registration
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("unexpected registration value {:?}", e))?;
    if let Err(e) = register_periodic_sync(&registration, sync_tag).await {
        // Not retried; the site works without it.
        log::warn!("[sw] periodic sync registration failed: {:?}", e);
    }
    Ok(())
}

/// `registration.periodicSync.register(tag, { minInterval })`, when present.
async fn register_periodic_sync(
    registration: &web::ServiceWorkerRegistration,
    sync_tag: &str,
) -> anyhow::Result<()> {
    let key = JsValue::from_str("periodicSync");
    if !js_sys::Reflect::has(registration, &key).unwrap_or(false) {
        return Ok(());
    }
    let periodic =
        js_sys::Reflect::get(registration, &key).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let register: js_sys::Function = js_sys::Reflect::get(&periodic, &JsValue::from_str("register"))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("periodicSync.register is not a function"))?;
    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("minInterval"),
        &JsValue::from_f64(PERIODIC_SYNC_MIN_INTERVAL_MS as f64),
    )
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let promise: js_sys::Promise = register
        .call2(&periodic, &JsValue::from_str(sync_tag), &options)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("periodicSync.register did not return a promise"))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    log::info!("[sw] periodic sync registered as {}", sync_tag);
    Ok(())
}
