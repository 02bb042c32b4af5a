//! Render parameters for the decorative hero scene.
//!
//! [`derive_quality`] is a pure mapping from the device profile and the hero's
//! visibility to a [`QualityTier`]. [`QualityController`] remembers the last
//! tier so the render loop is told to suspend or resume only on transitions.

use crate::constants::*;
use crate::device::DeviceProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryDetail {
    Low,
    High,
}

impl GeometryDetail {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryDetail::Low => "low",
            GeometryDetail::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderLoop {
    Running,
    Suspended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRatioRange {
    pub min: f64,
    pub max: f64,
}

impl PixelRatioRange {
    #[inline]
    pub fn clamp(&self, dpr: f64) -> f64 {
        dpr.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierKind {
    Paused,
    Low,
    Mobile,
    Full,
}

impl TierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TierKind::Paused => "paused",
            TierKind::Low => "low",
            TierKind::Mobile => "mobile",
            TierKind::Full => "full",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityTier {
    pub kind: TierKind,
    pub particle_scale: f32,
    pub geometry_detail: GeometryDetail,
    pub animation_speed: f32,
    pub pixel_ratio: PixelRatioRange,
    pub render_loop: RenderLoop,
}

impl QualityTier {
    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.render_loop == RenderLoop::Suspended
    }

    /// Particle count for a scene element whose full-quality count is `baseline`.
    pub fn particle_count(&self, baseline: u32) -> u32 {
        if self.is_suspended() || baseline == 0 {
            return 0;
        }
        ((baseline as f32 * self.particle_scale).round() as u32).max(1)
    }
}

fn pixel_range(dpr: f64, cap: f64) -> PixelRatioRange {
    let max = dpr.min(cap).max(MIN_PIXEL_RATIO);
    PixelRatioRange {
        min: MIN_PIXEL_RATIO.min(max),
        max,
    }
}

pub fn derive_quality(profile: &DeviceProfile, visible: bool) -> QualityTier {
    let dpr = profile.device_pixel_ratio;
    let mut tier = if !visible {
        QualityTier {
            kind: TierKind::Paused,
            particle_scale: 0.0,
            geometry_detail: GeometryDetail::Low,
            animation_speed: 0.0,
            pixel_ratio: pixel_range(dpr, LOW_MAX_PIXEL_RATIO),
            render_loop: RenderLoop::Suspended,
        }
    } else if profile.is_low_performance {
        QualityTier {
            kind: TierKind::Low,
            particle_scale: LOW_PARTICLE_SCALE,
            geometry_detail: GeometryDetail::Low,
            animation_speed: LOW_ANIMATION_SPEED,
            pixel_ratio: pixel_range(dpr, LOW_MAX_PIXEL_RATIO),
            render_loop: RenderLoop::Running,
        }
    } else if profile.is_mobile {
        QualityTier {
            kind: TierKind::Mobile,
            particle_scale: MOBILE_PARTICLE_SCALE,
            geometry_detail: GeometryDetail::High,
            animation_speed: MOBILE_ANIMATION_SPEED,
            pixel_ratio: pixel_range(dpr, MOBILE_MAX_PIXEL_RATIO),
            render_loop: RenderLoop::Running,
        }
    } else {
        QualityTier {
            kind: TierKind::Full,
            particle_scale: 1.0,
            geometry_detail: GeometryDetail::High,
            animation_speed: 1.0,
            pixel_ratio: pixel_range(dpr, DESKTOP_MAX_PIXEL_RATIO),
            render_loop: RenderLoop::Running,
        }
    };
    if profile.prefers_reduced_motion && !tier.is_suspended() {
        tier.animation_speed = tier.animation_speed.min(REDUCED_MOTION_SPEED);
    }
    tier
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCommand {
    Suspend,
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityUpdate {
    pub tier: QualityTier,
    pub command: Option<LoopCommand>,
}

/// Tracks the current tier and reports changes.
#[derive(Clone, Debug)]
pub struct QualityController {
    visible: bool,
    current: QualityTier,
}

impl QualityController {
    /// Starts hidden until the first visibility report arrives.
    pub fn new(profile: &DeviceProfile) -> Self {
        Self {
            visible: false,
            current: derive_quality(profile, false),
        }
    }

    #[inline]
    pub fn current(&self) -> &QualityTier {
        &self.current
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, profile: &DeviceProfile, visible: bool) -> Option<QualityUpdate> {
        self.visible = visible;
        self.recompute(profile)
    }

    pub fn profile_changed(&mut self, profile: &DeviceProfile) -> Option<QualityUpdate> {
        self.recompute(profile)
    }

    fn recompute(&mut self, profile: &DeviceProfile) -> Option<QualityUpdate> {
        let next = derive_quality(profile, self.visible);
        if next == self.current {
            return None;
        }
        let command = match (self.current.render_loop, next.render_loop) {
            (RenderLoop::Running, RenderLoop::Suspended) => Some(LoopCommand::Suspend),
            (RenderLoop::Suspended, RenderLoop::Running) => Some(LoopCommand::Resume),
            _ => None,
        };
        self.current = next;
        Some(QualityUpdate {
            tier: next,
            command,
        })
    }
}
