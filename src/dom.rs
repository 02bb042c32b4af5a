use folio_core::PixelRatioRange;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// `name in window`, used to detect optional browser APIs.
#[inline]
pub fn window_has(name: &str) -> bool {
    web::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str(name)).unwrap_or(false))
        .unwrap_or(false)
}

pub fn query_all(root: &web::Document, selector: &str) -> Vec<web::Element> {
    match root.query_selector_all(selector) {
        Ok(list) => node_list_elements(&list),
        Err(e) => {
            log::warn!("[dom] bad selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn query_all_in(root: &web::Element, selector: &str) -> Vec<web::Element> {
    root.query_selector_all(selector)
        .map(|list| node_list_elements(&list))
        .unwrap_or_default()
}

fn node_list_elements(list: &web::NodeList) -> Vec<web::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        set_class(&body, class, on);
    }
}

pub fn set_root_class(document: &web::Document, class: &str, on: bool) {
    if let Some(root) = document.document_element() {
        set_class(&root, class, on);
    }
}

pub fn set_style_property(el: &web::Element, name: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property(name, value);
    }
}

/// Append `<link rel="prefetch" href=…>` to `<head>`.
pub fn append_prefetch_link(document: &web::Document, href: &str) -> bool {
    let Some(head) = document.head() else {
        return false;
    };
    let link = match document.create_element("link") {
        Ok(el) => el,
        Err(_) => return false,
    };
    _ = link.set_attribute("rel", "prefetch");
    _ = link.set_attribute("href", href);
    head.append_child(&link).is_ok()
}

/// Size the canvas backing store to its CSS size times the device pixel
/// ratio, clamped to the tier's range.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, range: &PixelRatioRange) {
    if let Some(w) = web::window() {
        let dpr = range.clamp(w.device_pixel_ratio());
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// An attached DOM event listener; detached on drop.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
    attached: bool,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            log::warn!("[dom] could not listen for {}: {:?}", event, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            closure,
            attached: true,
        })
    }

    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// A pending `setTimeout`; cleared on drop.
///
/// Must not be dropped from inside its own callback.
pub struct Timeout {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(delay_ms: u32, callback: impl FnOnce() + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure: Closure<dyn FnMut()> = Closure::once(callback);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|e| log::warn!("[dom] setTimeout failed: {:?}", e))
            .ok()?;
        Some(Self {
            id: Some(id),
            _closure: closure,
        })
    }

    pub fn cancel(&mut self) {
        if let (Some(id), Some(w)) = (self.id.take(), web::window()) {
            w.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
