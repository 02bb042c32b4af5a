use crate::dom::{self, EventListener};
use crate::frame::FrameLoop;
use folio_core::{FpsSample, FrameRateMeter};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Samples rendered frames and reports the rolling average once per second.
///
/// Sampling pauses while the document is hidden; animation frames are not
/// delivered then, so the gap says nothing about rendering speed.
pub struct FrameRateMonitor {
    frames: Rc<FrameLoop>,
    meter: Rc<RefCell<FrameRateMeter>>,
    stopped: Rc<Cell<bool>>,
    _visibility: Option<EventListener>,
}

impl FrameRateMonitor {
    pub fn start(mut on_sample: impl FnMut(FpsSample) + 'static) -> Self {
        let meter = Rc::new(RefCell::new(FrameRateMeter::new(instant::now())));
        let meter_tick = meter.clone();
        let frames = Rc::new(FrameLoop::new(move |timestamp_ms| {
            let sample = meter_tick.borrow_mut().on_frame(timestamp_ms);
            if let Some(sample) = sample {
                log::debug!(
                    "[fps] period {:.1} fps, average {}",
                    sample.instantaneous,
                    sample.average
                );
                on_sample(sample);
            }
        }));
        let stopped = Rc::new(Cell::new(false));
        let visibility = dom::window_document().and_then(|document| {
            let frames = frames.clone();
            let meter = meter.clone();
            let stopped = stopped.clone();
            let doc = document.clone();
            EventListener::new(&document, "visibilitychange", false, move |_| {
                if stopped.get() {
                    return;
                }
                if doc.hidden() {
                    frames.suspend();
                } else {
                    meter.borrow_mut().restart(instant::now());
                    frames.resume();
                }
            })
        });
        let hidden = dom::window_document().map(|d| d.hidden()).unwrap_or(false);
        if !hidden {
            frames.resume();
        }
        Self {
            frames,
            meter,
            stopped,
            _visibility: visibility,
        }
    }

    /// Cancels the pending frame; safe to call repeatedly.
    pub fn stop(&self) {
        self.stopped.set(true);
        self.frames.suspend();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn average(&self) -> Option<u32> {
        self.meter.borrow().window().rounded_mean()
    }
}
