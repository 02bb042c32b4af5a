use crate::constants::{IDLE_POLYFILL_BUDGET_MS, IDLE_POLYFILL_DELAY_MS};

/// How idle work is scheduled, picked once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleStrategy {
    /// `requestIdleCallback` is available.
    Native,
    /// Plain timer; the delay is the caller's timeout hint or the polyfill default.
    Timer,
    /// No browser environment; scheduled work never runs.
    Unavailable,
}

impl IdleStrategy {
    pub fn select(has_window: bool, has_idle_callback: bool) -> Self {
        match (has_window, has_idle_callback) {
            (false, _) => IdleStrategy::Unavailable,
            (true, true) => IdleStrategy::Native,
            (true, false) => IdleStrategy::Timer,
        }
    }

    /// Delay the timer fallback waits before running the callback.
    #[inline]
    pub fn timer_delay_ms(timeout_hint_ms: Option<u32>) -> u32 {
        match timeout_hint_ms {
            Some(ms) if ms > 0 => ms,
            _ => IDLE_POLYFILL_DELAY_MS,
        }
    }
}

/// Time budget reported by the timer fallback: whatever is left of a fixed
/// budget counted from the moment the work was scheduled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticDeadline {
    scheduled_at_ms: f64,
}

impl SyntheticDeadline {
    pub fn new(scheduled_at_ms: f64) -> Self {
        Self { scheduled_at_ms }
    }

    pub fn time_remaining(&self, now_ms: f64) -> f64 {
        (IDLE_POLYFILL_BUDGET_MS - (now_ms - self.scheduled_at_ms)).max(0.0)
    }

    #[inline]
    pub fn did_timeout(&self) -> bool {
        false
    }
}
