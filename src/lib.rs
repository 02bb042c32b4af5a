#![cfg(target_arch = "wasm32")]
use folio_core::{DeviceContext, OptimizerConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod fps;
mod frame;
mod idle;
mod lazy;
mod observer;
mod probe;
mod scene;
mod scroll;
mod sw_register;
mod viewport;
mod visibility;

/// Everything the page keeps alive between mount and teardown. Dropping it
/// detaches every listener, observer, timer and frame callback.
struct Session {
    device: Rc<RefCell<DeviceContext>>,
    _viewport: Option<viewport::ViewportHeight>,
    lazy: lazy::LazyLoader,
    scene: Option<Rc<scene::SceneDriver>>,
    visibility: Option<visibility::VisibilityTracker>,
    fps: fps::FrameRateMonitor,
    _watcher: Option<probe::DeviceWatcher>,
    _scene_resize: Option<dom::EventListener>,
    scroll: Option<scroll::ScrollOptimizer>,
    _sw: Option<dom::EventListener>,
}

impl Session {
    fn stop(mut self) {
        self.fps.stop();
        if let Some(tracker) = self.visibility.as_mut() {
            tracker.unobserve();
        }
        if let Some(scroll) = self.scroll.as_mut() {
            if scroll.is_bursting() {
                log::debug!("[scroll] torn down mid-burst");
            }
            scroll.teardown();
        }
        log::info!(
            "folio-web teardown: fps={:?} degraded={} prefetched={} rendering={}",
            self.fps.average(),
            self.device.borrow().is_degraded(),
            self.lazy.prefetched(),
            self.scene.as_ref().map(|s| s.is_rendering()).unwrap_or(false)
        );
        debug_assert!(!self.fps.is_running());
        debug_assert!(self.visibility.as_ref().map_or(true, |v| !v.is_observing()));
    }
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    match init(OptimizerConfig::default()) {
        Ok(session) => SESSION.with(|s| *s.borrow_mut() = Some(session)),
        Err(e) => log::error!("init error: {:?}", e),
    }
    Ok(())
}

/// Detach everything the performance layer installed.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(session) = SESSION.with(|s| s.borrow_mut().take()) {
        session.stop();
    }
}

fn init(config: OptimizerConfig) -> anyhow::Result<Session> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let device = Rc::new(RefCell::new(DeviceContext::new(
        &probe::snapshot(&window),
        config.thresholds.clone(),
    )));
    let profile = device.borrow().profile().clone();
    log::info!(
        "[probe] mobile={} low_perf={} dpr={:.2} webgl2={}",
        profile.is_mobile,
        profile.is_low_performance,
        profile.device_pixel_ratio,
        profile.supports_advanced_graphics
    );

    let viewport = viewport::install();

    let idle = idle::IdleScheduler::detect();
    log::info!("[idle] strategy {:?}", idle.strategy());
    let lazy = lazy::LazyLoader::new(document.clone(), config.lazy.clone(), idle);
    lazy.start();

    // Hero scene: quality follows the device profile and the hero's visibility.
    let scene = scene::SceneDriver::mount(&document, &profile).map(Rc::new);
    let visibility = scene.as_ref().map(|scene| {
        let scene_vis = scene.clone();
        let device_vis = device.clone();
        let on_change = move |visible| {
            let profile = device_vis.borrow().profile().clone();
            scene_vis.set_visible(&profile, visible);
        };
        visibility::VisibilityTracker::observe(&scene.element(), &config.visibility, on_change)
    });
    if scene.is_none() {
        log::info!("[scene] no #{} element; quality control idle", constants::HERO_ELEMENT_ID);
    }

    let fps = {
        let device_fps = device.clone();
        let scene_fps = scene.clone();
        fps::FrameRateMonitor::start(move |sample| {
            let degraded = device_fps
                .borrow_mut()
                .record_fps(sample.instantaneous, sample.average);
            if degraded {
                let profile = device_fps.borrow().profile().clone();
                if let Some(scene) = &scene_fps {
                    scene.profile_changed(&profile);
                }
            }
        })
    };

    let watcher = {
        let scene_watch = scene.clone();
        probe::watch(device.clone(), move |profile| {
            if let Some(scene) = &scene_watch {
                scene.profile_changed(profile);
            }
        })
    };
    let scene_resize = scene.clone().and_then(|scene| {
        dom::EventListener::new(&window, "resize", true, move |_| scene.resize())
    });

    let scroll = {
        let lazy_settle = lazy.clone();
        scroll::ScrollOptimizer::install(config.scroll.clone(), &profile, move || {
            lazy_settle.resolve_visible_sections()
        })
    };

    let sw = sw_register::register_on_load(config.cache.sync_tag.clone());

    Ok(Session {
        device,
        _viewport: viewport,
        lazy,
        scene,
        visibility,
        fps,
        _watcher: watcher,
        _scene_resize: scene_resize,
        scroll,
        _sw: sw,
    })
}
