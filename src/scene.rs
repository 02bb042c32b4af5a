use crate::constants::*;
use crate::dom;
use crate::frame::FrameLoop;
use folio_core::{DeviceProfile, LoopCommand, QualityController, QualityTier, QualityUpdate};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame state of the hero decoration. The artwork itself lives in CSS
/// and reads the custom properties written here.
struct HeroScene {
    element: web::Element,
    canvas: Option<web::HtmlCanvasElement>,
    tier: QualityTier,
    phase_deg: f64,
    last_ts: Option<f64>,
}

impl HeroScene {
    fn apply_tier(&mut self, tier: QualityTier) {
        self.tier = tier;
        let el = &self.element;
        dom::set_style_property(el, PARTICLE_SCALE_PROPERTY, &tier.particle_scale.to_string());
        dom::set_style_property(el, ANIMATION_SPEED_PROPERTY, &tier.animation_speed.to_string());
        _ = el.set_attribute("data-quality", tier.kind.as_str());
        _ = el.set_attribute("data-geometry", tier.geometry_detail.as_str());
        _ = el.set_attribute(
            "data-particles",
            &tier.particle_count(HERO_PARTICLE_BASELINE).to_string(),
        );
        _ = el.set_attribute("data-stars", &tier.particle_count(HERO_STAR_BASELINE).to_string());
        if let Some(canvas) = &self.canvas {
            if !tier.is_suspended() {
                dom::sync_canvas_backing_size(canvas, &tier.pixel_ratio);
            }
        }
    }

    fn frame(&mut self, timestamp_ms: f64) {
        let dt_sec = match self.last_ts {
            Some(prev) => ((timestamp_ms - prev) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_ts = Some(timestamp_ms);
        let step = dt_sec * HERO_DEGREES_PER_SEC * self.tier.animation_speed as f64;
        self.phase_deg = (self.phase_deg + step) % 360.0;
        dom::set_style_property(
            &self.element,
            HERO_PHASE_PROPERTY,
            &format!("{:.2}deg", self.phase_deg),
        );
    }
}

/// Owns the hero's quality controller and render loop. The loop only runs
/// while the hero is visible.
pub struct SceneDriver {
    scene: Rc<RefCell<HeroScene>>,
    controller: RefCell<QualityController>,
    frames: FrameLoop,
}

impl SceneDriver {
    pub fn mount(document: &web::Document, profile: &DeviceProfile) -> Option<Self> {
        let element = document.get_element_by_id(HERO_ELEMENT_ID)?;
        let canvas = document
            .get_element_by_id(HERO_CANVAS_ID)
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok());
        let controller = QualityController::new(profile);
        let scene = Rc::new(RefCell::new(HeroScene {
            element,
            canvas,
            tier: *controller.current(),
            phase_deg: 0.0,
            last_ts: None,
        }));
        scene.borrow_mut().apply_tier(*controller.current());

        let scene_tick = scene.clone();
        let frames = FrameLoop::new(move |ts| scene_tick.borrow_mut().frame(ts));
        Some(Self {
            scene,
            controller: RefCell::new(controller),
            frames,
        })
    }

    pub fn element(&self) -> web::Element {
        self.scene.borrow().element.clone()
    }

    pub fn set_visible(&self, profile: &DeviceProfile, visible: bool) {
        let update = self.controller.borrow_mut().set_visible(profile, visible);
        self.apply(update);
    }

    pub fn profile_changed(&self, profile: &DeviceProfile) {
        let update = self.controller.borrow_mut().profile_changed(profile);
        self.apply(update);
    }

    /// Re-fit the canvas after a resize without changing tier.
    pub fn resize(&self) {
        let scene = self.scene.borrow();
        if let Some(canvas) = &scene.canvas {
            if !scene.tier.is_suspended() {
                dom::sync_canvas_backing_size(canvas, &scene.tier.pixel_ratio);
            }
        }
    }

    #[inline]
    pub fn is_rendering(&self) -> bool {
        self.frames.is_running()
    }

    fn apply(&self, update: Option<QualityUpdate>) {
        let Some(update) = update else {
            return;
        };
        log::info!(
            "[scene] tier {} (speed {:.2}, particles x{:.2})",
            update.tier.kind.as_str(),
            update.tier.animation_speed,
            update.tier.particle_scale
        );
        self.scene.borrow_mut().apply_tier(update.tier);
        match update.command {
            Some(LoopCommand::Suspend) => self.frames.suspend(),
            Some(LoopCommand::Resume) => {
                self.scene.borrow_mut().last_ts = None;
                self.frames.resume();
            }
            None => {}
        }
    }
}
