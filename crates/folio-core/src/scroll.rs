use crate::constants::{SCROLL_BURST_THRESHOLD_PX, SCROLL_COOLDOWN_MS};

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollConfig {
    /// Position delta between two scroll events that starts a burst.
    pub burst_threshold_px: f64,
    /// Quiet time after the last scroll event before a burst ends.
    pub cooldown_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            burst_threshold_px: SCROLL_BURST_THRESHOLD_PX,
            cooldown_ms: SCROLL_COOLDOWN_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Bursting,
}

/// Identifies one arming of the cooldown timer. Only the most recent token
/// can end a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollReaction {
    /// True on the event that moved IDLE -> BURSTING.
    pub entered_burst: bool,
    /// The previous timer must be cleared and a new one armed with this token.
    pub rearm: CooldownToken,
}

#[derive(Clone, Debug)]
pub struct ScrollBurstState {
    config: ScrollConfig,
    phase: ScrollPhase,
    last_scroll_top: f64,
    generation: u64,
}

impl ScrollBurstState {
    pub fn new(config: ScrollConfig, initial_scroll_top: f64) -> Self {
        Self {
            config,
            phase: ScrollPhase::Idle,
            last_scroll_top: initial_scroll_top,
            generation: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    #[inline]
    pub fn is_bursting(&self) -> bool {
        self.phase == ScrollPhase::Bursting
    }

    #[inline]
    pub fn cooldown_ms(&self) -> u32 {
        self.config.cooldown_ms
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> ScrollReaction {
        let delta = (scroll_top - self.last_scroll_top).abs();
        self.last_scroll_top = scroll_top;
        let entered_burst =
            self.phase == ScrollPhase::Idle && delta > self.config.burst_threshold_px;
        if entered_burst {
            self.phase = ScrollPhase::Bursting;
        }
        self.generation = self.generation.wrapping_add(1);
        ScrollReaction {
            entered_burst,
            rearm: CooldownToken(self.generation),
        }
    }

    /// Called when a cooldown timer fires. Returns true exactly once per burst,
    /// on the transition back to IDLE.
    pub fn on_cooldown(&mut self, token: CooldownToken) -> bool {
        if token.0 != self.generation || self.phase != ScrollPhase::Bursting {
            return false;
        }
        self.phase = ScrollPhase::Idle;
        true
    }
}
