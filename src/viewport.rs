use crate::constants::VH_PROPERTY;
use crate::dom::{self, EventListener};
use folio_core::vh_property_value;
use web_sys as web;

/// Keeps `--vh` on `<html>` equal to 1% of the viewport height.
pub struct ViewportHeight {
    _listener: Option<EventListener>,
}

pub fn install() -> Option<ViewportHeight> {
    let window = web::window()?;
    update(&window);
    let window_ev = window.clone();
    let listener = EventListener::new(&window, "resize", true, move |_| update(&window_ev));
    Some(ViewportHeight {
        _listener: listener,
    })
}

fn update(window: &web::Window) {
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return;
    };
    if let Some(height) = window.inner_height().ok().and_then(|v| v.as_f64()) {
        dom::set_style_property(&root, VH_PROPERTY, &vh_property_value(height));
    }
}
