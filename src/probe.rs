//! Gathers an [`EnvironmentSnapshot`] from the browser and keeps the
//! [`DeviceContext`] fresh across resizes and orientation changes.

use crate::constants::REDUCED_MOTION_QUERY;
use crate::dom::EventListener;
use folio_core::{DeviceContext, DeviceProfile, EnvironmentSnapshot};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Read the environment. Probes that throw are treated as "capability absent".
pub fn snapshot(window: &web::Window) -> EnvironmentSnapshot {
    snapshot_with_webgl2(window, probe_webgl2(window))
}

/// Like [`snapshot`] but with a known WebGL2 answer, so no context is created.
pub fn snapshot_with_webgl2(window: &web::Window, supports_webgl2: bool) -> EnvironmentSnapshot {
    let defaults = EnvironmentSnapshot::default();
    EnvironmentSnapshot {
        viewport_width: window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(defaults.viewport_width),
        user_agent: window.navigator().user_agent().unwrap_or_default(),
        device_pixel_ratio: window.device_pixel_ratio(),
        supports_webgl2,
        heap_limit_bytes: heap_limit(window),
        prefers_reduced_motion: window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false),
    }
}

fn probe_webgl2(window: &web::Window) -> bool {
    let Some(document) = window.document() else {
        return false;
    };
    let canvas = match document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    {
        Some(c) => c,
        None => return false,
    };
    matches!(canvas.get_context("webgl2"), Ok(Some(_)))
}

/// `performance.memory.jsHeapSizeLimit`, where the browser exposes it.
fn heap_limit(window: &web::Window) -> Option<u64> {
    let performance = window.performance()?;
    let memory = js_sys::Reflect::get(&performance, &JsValue::from_str("memory")).ok()?;
    if memory.is_undefined() || memory.is_null() {
        return None;
    }
    js_sys::Reflect::get(&memory, &JsValue::from_str("jsHeapSizeLimit"))
        .ok()?
        .as_f64()
        .filter(|v| *v > 0.0)
        .map(|v| v as u64)
}

/// Re-probes on `resize` and `orientationchange`; listeners go away on drop.
pub struct DeviceWatcher {
    _listeners: Vec<EventListener>,
}

pub fn watch(
    device: Rc<RefCell<DeviceContext>>,
    on_change: impl FnMut(&DeviceProfile) + 'static,
) -> Option<DeviceWatcher> {
    let window = web::window()?;
    let on_change: Rc<RefCell<dyn FnMut(&DeviceProfile)>> = Rc::new(RefCell::new(on_change));
    let listeners = ["resize", "orientationchange"]
        .into_iter()
        .filter_map(|event| {
            let device = device.clone();
            let on_change = on_change.clone();
            let window_ev = window.clone();
            EventListener::new(&window, event, true, move |_| {
                let profile = {
                    let mut ctx = device.borrow_mut();
                    let env = snapshot_with_webgl2(&window_ev, ctx.supports_webgl2());
                    if !ctx.refresh(&env) {
                        return;
                    }
                    ctx.profile().clone()
                };
                log::info!(
                    "[probe] profile changed: mobile={} low_perf={} dpr={:.2}",
                    profile.is_mobile,
                    profile.is_low_performance,
                    profile.device_pixel_ratio
                );
                (on_change.borrow_mut())(&profile);
            })
        })
        .collect();
    Some(DeviceWatcher {
        _listeners: listeners,
    })
}
