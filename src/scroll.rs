use crate::constants::*;
use crate::dom::{self, EventListener, Timeout};
use folio_core::{DeviceProfile, ScrollBurstState, ScrollConfig};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

struct ScrollInner {
    document: web::Document,
    state: ScrollBurstState,
    cooldown: Option<Timeout>,
    on_settle: Rc<dyn Fn()>,
}

/// Toggles cheap-rendering classes during fast scroll bursts.
pub struct ScrollOptimizer {
    inner: Rc<RefCell<ScrollInner>>,
    listener: Option<EventListener>,
}

impl ScrollOptimizer {
    /// `on_settle` runs each time a burst ends.
    pub fn install(
        config: ScrollConfig,
        profile: &DeviceProfile,
        on_settle: impl Fn() + 'static,
    ) -> Option<Self> {
        let window = web::window()?;
        let document = window.document()?;

        if profile.is_mobile {
            dom::set_body_class(&document, REDUCE_ANIMATIONS_CLASS, true);
            for el in dom::query_all(&document, ESSENTIAL_ANIMATION_SELECTOR) {
                dom::set_style_property(&el, "display", "block");
                dom::set_class(&el, ESSENTIAL_ANIMATIONS_CLASS, true);
            }
        }

        let initial = window.scroll_y().unwrap_or(0.0);
        let inner = Rc::new(RefCell::new(ScrollInner {
            document,
            state: ScrollBurstState::new(config, initial),
            cooldown: None,
            on_settle: Rc::new(on_settle),
        }));
        let weak = Rc::downgrade(&inner);
        let window_ev = window.clone();
        let listener = EventListener::new(&window, "scroll", true, move |_| {
            if let Some(inner) = weak.upgrade() {
                on_scroll(&inner, window_ev.scroll_y().unwrap_or(0.0));
            }
        });
        Some(Self { inner, listener })
    }

    #[inline]
    pub fn is_bursting(&self) -> bool {
        self.inner.borrow().state.is_bursting()
    }

    /// Detach the listener and clear any pending cooldown.
    pub fn teardown(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener.detach();
        }
        let mut inner = self.inner.borrow_mut();
        if let Some(mut timer) = inner.cooldown.take() {
            timer.cancel();
        }
        if inner.state.is_bursting() {
            set_burst_classes(&inner.document, false);
        }
    }
}

impl Drop for ScrollOptimizer {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn on_scroll(inner: &Rc<RefCell<ScrollInner>>, scroll_top: f64) {
    let mut s = inner.borrow_mut();
    let reaction = s.state.on_scroll(scroll_top);
    if reaction.entered_burst {
        log::debug!("[scroll] burst started at {:.0}px", scroll_top);
        set_burst_classes(&s.document, true);
    }
    let weak: Weak<RefCell<ScrollInner>> = Rc::downgrade(inner);
    let token = reaction.rearm;
    let delay = s.state.cooldown_ms();
    // Dropping the previous timer clears it.
    s.cooldown = Timeout::new(delay, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let settle = {
            let mut s = inner.borrow_mut();
            if !s.state.on_cooldown(token) {
                return;
            }
            set_burst_classes(&s.document, false);
            s.on_settle.clone()
        };
        log::debug!("[scroll] burst ended");
        settle();
    });
}

fn set_burst_classes(document: &web::Document, on: bool) {
    dom::set_body_class(document, SCROLL_ACTIVE_CLASS, on);
    dom::set_root_class(document, IS_SCROLLING_CLASS, on);
}
