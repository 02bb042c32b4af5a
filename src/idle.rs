//! Idle-time scheduling with a timer fallback, chosen once at startup.

use crate::dom;
use folio_core::{IdleStrategy, SyntheticDeadline};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Time left for idle work, native or synthesised by the fallback.
pub enum IdleBudget {
    Native(web::IdleDeadline),
    Synthetic(SyntheticDeadline),
}

impl IdleBudget {
    pub fn time_remaining(&self) -> f64 {
        match self {
            IdleBudget::Native(d) => d.time_remaining(),
            IdleBudget::Synthetic(d) => d.time_remaining(instant::now()),
        }
    }

    pub fn did_timeout(&self) -> bool {
        match self {
            IdleBudget::Native(d) => d.did_timeout(),
            IdleBudget::Synthetic(d) => d.did_timeout(),
        }
    }
}

enum Pending {
    Idle(u32),
    Timer(i32),
}

/// A scheduled piece of idle work; cancelled if dropped before it ran.
pub struct IdleHandle {
    pending: Option<Pending>,
    fired: Rc<Cell<bool>>,
    _closure: Closure<dyn FnMut(JsValue)>,
}

impl IdleHandle {
    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    pub fn cancel(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if self.fired.get() {
            return;
        }
        if let Some(w) = web::window() {
            match pending {
                Pending::Idle(id) => w.cancel_idle_callback(id),
                Pending::Timer(id) => w.clear_timeout_with_handle(id),
            }
        }
    }
}

impl Drop for IdleHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IdleScheduler {
    strategy: IdleStrategy,
}

impl IdleScheduler {
    pub fn detect() -> Self {
        Self {
            strategy: IdleStrategy::select(
                web::window().is_some(),
                dom::window_has("requestIdleCallback"),
            ),
        }
    }

    #[inline]
    pub fn strategy(&self) -> IdleStrategy {
        self.strategy
    }

    /// Run `work` when the browser is idle. With the timer fallback the
    /// timeout hint becomes the delay. Returns `None` outside a browser.
    pub fn schedule(
        &self,
        timeout_hint_ms: Option<u32>,
        work: impl FnOnce(IdleBudget) + 'static,
    ) -> Option<IdleHandle> {
        let window = web::window()?;
        let fired = Rc::new(Cell::new(false));
        let fired_cb = fired.clone();
        let scheduled_at = instant::now();
        let mut work = Some(work);
        let closure = Closure::wrap(Box::new(move |arg: JsValue| {
            fired_cb.set(true);
            let budget = match arg.dyn_into::<web::IdleDeadline>() {
                Ok(deadline) => IdleBudget::Native(deadline),
                Err(_) => IdleBudget::Synthetic(SyntheticDeadline::new(scheduled_at)),
            };
            if let Some(work) = work.take() {
                work(budget);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let pending = match self.strategy {
            IdleStrategy::Unavailable => return None,
            IdleStrategy::Native => {
                let options = web::IdleRequestOptions::new();
                if let Some(ms) = timeout_hint_ms {
                    options.set_timeout(ms);
                }
                window
                    .request_idle_callback_with_options(closure.as_ref().unchecked_ref(), &options)
                    .map(Pending::Idle)
            }
            IdleStrategy::Timer => window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    IdleStrategy::timer_delay_ms(timeout_hint_ms) as i32,
                )
                .map(Pending::Timer),
        };
        match pending {
            Ok(pending) => Some(IdleHandle {
                pending: Some(pending),
                fired,
                _closure: closure,
            }),
            Err(e) => {
                log::warn!("[idle] scheduling failed: {:?}", e);
                None
            }
        }
    }
}
