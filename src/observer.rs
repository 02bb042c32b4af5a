use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type EntryCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

#[inline]
pub fn supported() -> bool {
    dom::window_has("IntersectionObserver")
}

/// Owned intersection observer; disconnected on drop.
pub struct Observer {
    observer: web::IntersectionObserver,
    _callback: EntryCallback,
    connected: bool,
}

impl Observer {
    /// `None` when intersection observation is unavailable; callers then do
    /// the deferred work eagerly.
    pub fn new(
        root_margin: &str,
        thresholds: &[f64],
        mut on_entry: impl FnMut(&web::IntersectionObserverEntry, &web::IntersectionObserver)
            + 'static,
    ) -> Option<Self> {
        if !supported() {
            return None;
        }
        let callback: EntryCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web::IntersectionObserverEntry = entry.unchecked_into();
                    on_entry(&entry, &observer);
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let init = web::IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        let thresholds: js_sys::Array = thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        init.set_threshold(&thresholds);

        let created =
            web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init);
        match created {
            Ok(observer) => Some(Self {
                observer,
                _callback: callback,
                connected: true,
            }),
            Err(e) => {
                log::warn!("[observer] construction failed: {:?}", e);
                None
            }
        }
    }

    #[inline]
    pub fn observe(&self, el: &web::Element) {
        if self.connected {
            self.observer.observe(el);
        }
    }

    #[inline]
    pub fn unobserve(&self, el: &web::Element) {
        self.observer.unobserve(el);
    }

    pub fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            self.observer.disconnect();
        }
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.disconnect();
    }
}
