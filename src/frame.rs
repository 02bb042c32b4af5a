use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct LoopState {
    running: bool,
    frame_id: Option<i32>,
    tick: Option<Closure<dyn FnMut(f64)>>,
}

/// A `requestAnimationFrame` loop that can be suspended and resumed.
///
/// While suspended no frame is requested at all. `suspend` is idempotent and
/// also runs on drop.
pub struct FrameLoop {
    state: Rc<RefCell<LoopState>>,
}

impl FrameLoop {
    /// The loop starts suspended; call [`FrameLoop::resume`] to start it.
    pub fn new(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let state = Rc::new(RefCell::new(LoopState {
            running: false,
            frame_id: None,
            tick: None,
        }));
        let weak: Weak<RefCell<LoopState>> = Rc::downgrade(&state);
        let tick = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.borrow_mut().frame_id = None;
            if !state.borrow().running {
                return;
            }
            on_frame(timestamp_ms);
            request_frame(&state);
        }) as Box<dyn FnMut(f64)>);
        state.borrow_mut().tick = Some(tick);
        Self { state }
    }

    pub fn resume(&self) {
        if self.state.borrow().running {
            return;
        }
        self.state.borrow_mut().running = true;
        request_frame(&self.state);
    }

    pub fn suspend(&self) {
        let mut s = self.state.borrow_mut();
        s.running = false;
        if let (Some(id), Some(w)) = (s.frame_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.suspend();
    }
}

fn request_frame(state: &Rc<RefCell<LoopState>>) {
    let mut s = state.borrow_mut();
    if !s.running || s.frame_id.is_some() {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    let id = s
        .tick
        .as_ref()
        .and_then(|tick| window.request_animation_frame(tick.as_ref().unchecked_ref()).ok());
    s.frame_id = id;
}
