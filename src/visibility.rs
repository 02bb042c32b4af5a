use crate::observer::Observer;
use folio_core::{VisibilityConfig, VisibilityState};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Reports visibility transitions of one region until unobserved or dropped.
pub struct VisibilityTracker {
    observer: Option<Observer>,
}

impl VisibilityTracker {
    /// Without intersection observation the region is reported visible once.
    pub fn observe(
        region: &web::Element,
        config: &VisibilityConfig,
        on_change: impl FnMut(bool) + 'static,
    ) -> Self {
        let state = Rc::new(RefCell::new(VisibilityState::new(config)));
        let on_change: Rc<RefCell<dyn FnMut(bool)>> = Rc::new(RefCell::new(on_change));

        let state_cb = state.clone();
        let on_change_cb = on_change.clone();
        let observer = Observer::new(&config.root_margin(), &config.thresholds(), move |entry, _| {
            let change = state_cb
                .borrow_mut()
                .apply(entry.is_intersecting(), entry.intersection_ratio());
            if let Some(visible) = change {
                (on_change_cb.borrow_mut())(visible);
            }
        });

        match observer {
            Some(observer) => {
                observer.observe(region);
                Self {
                    observer: Some(observer),
                }
            }
            None => {
                log::info!("[visibility] no intersection observer; assuming visible");
                let change = state.borrow_mut().set(true);
                if let Some(visible) = change {
                    (on_change.borrow_mut())(visible);
                }
                Self { observer: None }
            }
        }
    }

    /// Stop observing; safe to call repeatedly.
    pub fn unobserve(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
    }

    #[inline]
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }
}
