use crate::constants::{VISIBILITY_HIDE_RATIO, VISIBILITY_ROOT_MARGIN_PX};

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityConfig {
    /// Grows the viewport so regions report visible slightly early.
    pub root_margin_px: u32,
    /// Below this intersection ratio a visible region flips back to hidden.
    pub hide_ratio: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            root_margin_px: VISIBILITY_ROOT_MARGIN_PX,
            hide_ratio: VISIBILITY_HIDE_RATIO,
        }
    }
}

impl VisibilityConfig {
    /// `rootMargin` string understood by intersection observers.
    pub fn root_margin(&self) -> String {
        root_margin(self.root_margin_px)
    }

    pub fn thresholds(&self) -> [f64; 2] {
        [0.0, self.hide_ratio]
    }
}

#[inline]
pub fn root_margin(px: u32) -> String {
    format!("{}px", px)
}

/// Visibility of one observed region, deduplicating observer callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityState {
    visible: bool,
    hide_ratio: f64,
}

impl VisibilityState {
    pub fn new(config: &VisibilityConfig) -> Self {
        Self {
            visible: false,
            hide_ratio: config.hide_ratio,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Apply one intersection entry. Returns the new visibility only when it
    /// differs from the previous one.
    pub fn apply(&mut self, is_intersecting: bool, ratio: f64) -> Option<bool> {
        let next = if self.visible {
            is_intersecting && ratio >= self.hide_ratio
        } else {
            is_intersecting
        };
        self.set(next)
    }

    /// Force a value, e.g. when observation is unavailable and the region is
    /// assumed visible.
    pub fn set(&mut self, visible: bool) -> Option<bool> {
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}
