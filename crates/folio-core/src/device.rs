//! Device classification and the session-wide performance context.
//!
//! The web layer gathers an [`EnvironmentSnapshot`] from the browser; everything
//! here is pure so the heuristics can be exercised on the host.

use crate::constants::*;

/// Heuristic cut-offs used when classifying a device.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    /// Viewports at or below this width (CSS px) count as mobile.
    pub mobile_max_width: f64,
    /// A heap-size hint below this many bytes marks the device as low performance.
    pub low_heap_limit_bytes: u64,
    /// A one-second sampling period below this rate latches low performance.
    pub low_fps: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mobile_max_width: MOBILE_MAX_VIEWPORT_WIDTH,
            low_heap_limit_bytes: LOW_HEAP_LIMIT_BYTES,
            low_fps: LOW_FPS_THRESHOLD,
        }
    }
}

/// Raw facts read from the runtime. Probes that failed are recorded as absent.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentSnapshot {
    pub viewport_width: f64,
    pub user_agent: String,
    pub device_pixel_ratio: f64,
    pub supports_webgl2: bool,
    pub heap_limit_bytes: Option<u64>,
    pub prefers_reduced_motion: bool,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            user_agent: String::new(),
            device_pixel_ratio: 1.0,
            supports_webgl2: true,
            heap_limit_bytes: None,
            prefers_reduced_motion: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeviceProfile {
    pub is_mobile: bool,
    pub is_low_performance: bool,
    pub device_pixel_ratio: f64,
    pub supports_advanced_graphics: bool,
    pub prefers_reduced_motion: bool,
    pub heap_limit_bytes: Option<u64>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        classify(&EnvironmentSnapshot::default(), &Thresholds::default())
    }
}

/// Value for the `--vh` custom property: 1% of the viewport height in px.
#[inline]
pub fn vh_property_value(inner_height: f64) -> String {
    format!("{}px", inner_height * 0.01)
}

#[inline]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m))
}

pub fn classify(env: &EnvironmentSnapshot, thresholds: &Thresholds) -> DeviceProfile {
    let is_mobile = env.viewport_width <= thresholds.mobile_max_width;
    let low_heap = env
        .heap_limit_bytes
        .map(|limit| limit < thresholds.low_heap_limit_bytes)
        .unwrap_or(false);
    let is_low_performance = (is_mobile && is_mobile_user_agent(&env.user_agent))
        || !env.supports_webgl2
        || low_heap;
    let dpr = env.device_pixel_ratio;
    let device_pixel_ratio = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    DeviceProfile {
        is_mobile,
        is_low_performance,
        device_pixel_ratio,
        supports_advanced_graphics: env.supports_webgl2,
        prefers_reduced_motion: env.prefers_reduced_motion,
        heap_limit_bytes: env.heap_limit_bytes,
    }
}

/// Once tripped, stays tripped for the rest of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerformanceLatch {
    tripped: bool,
}

impl PerformanceLatch {
    #[inline]
    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Returns true only on the call that trips the latch.
    pub fn trip(&mut self) -> bool {
        let first = !self.tripped;
        self.tripped = true;
        first
    }
}

/// Session-scoped device state, created at mount and passed to every consumer.
#[derive(Clone, Debug)]
pub struct DeviceContext {
    thresholds: Thresholds,
    profile: DeviceProfile,
    latch: PerformanceLatch,
    last_fps: Option<u32>,
    supports_webgl2: bool,
}

impl DeviceContext {
    pub fn new(env: &EnvironmentSnapshot, thresholds: Thresholds) -> Self {
        let profile = classify(env, &thresholds);
        Self {
            thresholds,
            profile,
            latch: PerformanceLatch::default(),
            last_fps: None,
            supports_webgl2: env.supports_webgl2,
        }
    }

    #[inline]
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    #[inline]
    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }

    /// WebGL2 support as probed at startup. It cannot change within a
    /// session, so later snapshots skip the probe and reuse this.
    #[inline]
    pub fn supports_webgl2(&self) -> bool {
        self.supports_webgl2
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.latch.is_tripped()
    }

    /// Re-classify after a resize or orientation change. The startup WebGL2
    /// probe wins over the snapshot's, and a tripped latch keeps the profile in
    /// low-performance mode. Returns whether the profile changed.
    pub fn refresh(&mut self, env: &EnvironmentSnapshot) -> bool {
        let env = EnvironmentSnapshot {
            supports_webgl2: self.supports_webgl2,
            ..env.clone()
        };
        let mut next = classify(&env, &self.thresholds);
        next.is_low_performance |= self.latch.is_tripped();
        let changed = next != self.profile;
        self.profile = next;
        changed
    }

    /// Feed one sampling period. `instantaneous` is the raw rate of the period,
    /// `average` the rounded window mean. Returns true when this sample forced
    /// the one-way downgrade.
    pub fn record_fps(&mut self, instantaneous: f64, average: u32) -> bool {
        self.last_fps = Some(average);
        if instantaneous < self.thresholds.low_fps && self.latch.trip() {
            log::warn!(
                "[probe] frame rate {:.1} below {:.0}; latching low performance",
                instantaneous,
                self.thresholds.low_fps
            );
            self.profile.is_low_performance = true;
            return true;
        }
        false
    }
}
