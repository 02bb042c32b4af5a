//! Deferred images and backgrounds, idle route prefetch, and visible-link
//! prefetch.

use crate::constants::*;
use crate::dom;
use crate::idle::{IdleHandle, IdleScheduler};
use crate::observer::{self, Observer};
use folio_core::{
    background_image_value, image_action, root_margin, ImageAction, LazyConfig, PrefetchLedger,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

struct LazyInner {
    document: web::Document,
    config: LazyConfig,
    idle: IdleScheduler,
    ledger: RefCell<PrefetchLedger>,
    observers: RefCell<Vec<Observer>>,
    sections: RefCell<Option<Observer>>,
    tasks: RefCell<Vec<IdleHandle>>,
}

#[derive(Clone)]
pub struct LazyLoader {
    inner: Rc<LazyInner>,
}

impl LazyLoader {
    pub fn new(document: web::Document, config: LazyConfig, idle: IdleScheduler) -> Self {
        Self {
            inner: Rc::new(LazyInner {
                document,
                config,
                idle,
                ledger: RefCell::new(PrefetchLedger::default()),
                observers: RefCell::new(Vec::new()),
                sections: RefCell::new(None),
                tasks: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn start(&self) {
        if observer::supported() {
            self.observe_images();
            self.observe_backgrounds();
        } else {
            log::info!("[lazy] no intersection observer; loading everything now");
            let images = dom::query_all(&self.inner.document, LAZY_IMAGE_SELECTOR);
            let backgrounds = dom::query_all(&self.inner.document, BACKGROUND_SELECTOR);
            images.iter().for_each(load_image);
            backgrounds.iter().for_each(load_background);
        }
        self.schedule_route_prefetch();
        self.schedule_link_prefetch();
    }

    /// Resolve deferred resources in sections that are (nearly) on screen,
    /// during idle time.
    pub fn resolve_visible_sections(&self) {
        let weak = Rc::downgrade(&self.inner);
        let margin = root_margin(self.inner.config.section_margin_px);
        let sections = Observer::new(&margin, &[0.0], move |entry, observer| {
            if !entry.is_intersecting() {
                return;
            }
            let section = entry.target();
            observer.unobserve(&section);
            if let Some(inner) = weak.upgrade() {
                let task = inner.idle.schedule(None, move |budget| {
                    if budget.did_timeout() {
                        log::debug!("[lazy] section resolve ran on timeout");
                    }
                    resolve_within(&section)
                });
                push_task(&inner, task);
            }
        });
        match sections {
            Some(sections) => {
                for section in dom::query_all(&self.inner.document, SECTION_SELECTOR) {
                    sections.observe(&section);
                }
                // Replacing the previous observer disconnects it.
                *self.inner.sections.borrow_mut() = Some(sections);
            }
            None => {
                for section in dom::query_all(&self.inner.document, SECTION_SELECTOR) {
                    resolve_within(&section);
                }
            }
        }
    }

    pub fn prefetched(&self) -> usize {
        self.inner.ledger.borrow().len()
    }

    fn observe_images(&self) {
        let margin = root_margin(self.inner.config.image_margin_px);
        let observer = Observer::new(&margin, &[IMAGE_VISIBLE_RATIO], |entry, observer| {
            let Some(img) = entry.target().dyn_into::<web::HtmlImageElement>().ok() else {
                return;
            };
            let data_src = img.dataset().get(DATA_SRC_KEY);
            let current = img.get_attribute("src").unwrap_or_default();
            match image_action(entry.is_intersecting(), data_src.as_deref(), &current) {
                ImageAction::Wait => {}
                ImageAction::Load(src) => {
                    img.set_src(&src);
                    dom::set_class(&img, LAZY_CLASS, false);
                    observer.unobserve(&img);
                }
                ImageAction::Release => observer.unobserve(&img),
            }
        });
        self.attach(observer, LAZY_IMAGE_SELECTOR);
    }

    fn observe_backgrounds(&self) {
        let margin = root_margin(self.inner.config.background_margin_px);
        let observer = Observer::new(&margin, &[0.0], |entry, observer| {
            if entry.is_intersecting() {
                let el = entry.target();
                load_background(&el);
                observer.unobserve(&el);
            }
        });
        self.attach(observer, BACKGROUND_SELECTOR);
    }

    fn attach(&self, observer: Option<Observer>, selector: &str) {
        let Some(observer) = observer else {
            return;
        };
        let targets = dom::query_all(&self.inner.document, selector);
        log::debug!("[lazy] observing {} elements for {}", targets.len(), selector);
        for el in &targets {
            observer.observe(el);
        }
        self.inner.observers.borrow_mut().push(observer);
    }

    fn schedule_route_prefetch(&self) {
        let weak = Rc::downgrade(&self.inner);
        let delay = self.inner.config.prefetch_fallback_delay_ms;
        let task = self.inner.idle.schedule(Some(delay), move |budget| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            log::debug!("[lazy] route prefetch with {:.0}ms idle", budget.time_remaining());
            let routes = inner
                .ledger
                .borrow_mut()
                .claim_all(inner.config.secondary_routes.iter().map(String::as_str));
            for route in &routes {
                dom::append_prefetch_link(&inner.document, route);
            }
            log::info!("[lazy] prefetched {} routes", routes.len());
        });
        push_task(&self.inner, task);
    }

    fn schedule_link_prefetch(&self) {
        let weak = Rc::downgrade(&self.inner);
        let delay = self.inner.config.prefetch_fallback_delay_ms;
        let task = self.inner.idle.schedule(Some(delay), move |_| {
            if let Some(inner) = weak.upgrade() {
                observe_links(&inner);
            }
        });
        push_task(&self.inner, task);
    }
}

fn observe_links(inner: &Rc<LazyInner>) {
    let weak: Weak<LazyInner> = Rc::downgrade(inner);
    let observer = Observer::new("0px", &[0.0], move |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let link = entry.target();
        observer.unobserve(&link);
        let (Some(inner), Some(href)) = (weak.upgrade(), link.get_attribute("href")) else {
            return;
        };
        if inner.ledger.borrow_mut().claim(&href) {
            dom::append_prefetch_link(&inner.document, &href);
        }
    });
    let Some(observer) = observer else {
        prefetch_all_links(inner);
        return;
    };
    for link in dom::query_all(&inner.document, LINK_SELECTOR) {
        observer.observe(&link);
    }
    inner.observers.borrow_mut().push(observer);
}

/// Without intersection observation every eligible link is hinted up front.
fn prefetch_all_links(inner: &LazyInner) {
    let hrefs: Vec<String> = dom::query_all(&inner.document, LINK_SELECTOR)
        .iter()
        .filter_map(|link| link.get_attribute("href"))
        .collect();
    let fresh = inner
        .ledger
        .borrow_mut()
        .claim_all(hrefs.iter().map(String::as_str));
    for href in &fresh {
        dom::append_prefetch_link(&inner.document, href);
    }
    log::info!("[lazy] no intersection observer; prefetched {} links", fresh.len());
}

fn push_task(inner: &LazyInner, task: Option<IdleHandle>) {
    let mut tasks = inner.tasks.borrow_mut();
    tasks.retain(|t| !t.has_fired());
    tasks.extend(task);
}

fn load_image(el: &web::Element) {
    if let Some(img) = el.dyn_ref::<web::HtmlImageElement>() {
        if let Some(src) = img.dataset().get(DATA_SRC_KEY) {
            img.set_src(&src);
            dom::set_class(img, LAZY_CLASS, false);
        }
    }
}

fn load_background(el: &web::Element) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let dataset = html.dataset();
        if let Some(url) = dataset.get(DATA_BACKGROUND_KEY) {
            dom::set_style_property(el, "background-image", &background_image_value(&url));
            dataset.delete(DATA_BACKGROUND_KEY);
        }
    }
}

/// Load every deferred image and background inside `section` that has not
/// been loaded yet.
fn resolve_within(section: &web::Element) {
    for el in dom::query_all_in(section, SECTION_IMAGE_SELECTOR) {
        let unset = el.get_attribute("src").map(|s| s.is_empty()).unwrap_or(true);
        if unset {
            load_image(&el);
        }
    }
    for el in dom::query_all_in(section, BACKGROUND_SELECTOR) {
        load_background(&el);
    }
}
