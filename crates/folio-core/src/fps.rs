use crate::constants::{FPS_MAX_PERIOD_MS, FPS_SAMPLE_PERIOD_MS, FPS_WINDOW_LEN};
use smallvec::SmallVec;

/// Rolling window of one-second FPS measurements, oldest evicted first.
#[derive(Clone, Debug, Default)]
pub struct FpsWindow {
    samples: SmallVec<[f64; FPS_WINDOW_LEN]>,
}

impl FpsWindow {
    pub fn push(&mut self, fps: f64) {
        if self.samples.len() == FPS_WINDOW_LEN {
            self.samples.remove(0);
        }
        self.samples.push(fps);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    pub fn rounded_mean(&self) -> Option<u32> {
        self.mean().map(|m| m.round().max(0.0) as u32)
    }
}

/// Result of closing one sampling period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    pub instantaneous: f64,
    pub average: u32,
}

/// Counts rendered frames and closes a period once a full second has elapsed.
///
/// Timestamps are milliseconds from the same monotonic clock (the animation
/// frame timestamp or `performance.now()`). A period longer than
/// `max_period_ms` means frames were not being scheduled at all (hidden tab,
/// suspended device) and is dropped without a sample.
#[derive(Clone, Debug)]
pub struct FrameRateMeter {
    frame_count: u32,
    period_start_ms: f64,
    max_period_ms: f64,
    window: FpsWindow,
}

impl FrameRateMeter {
    pub fn new(now_ms: f64) -> Self {
        Self::with_max_period(now_ms, FPS_MAX_PERIOD_MS)
    }

    pub fn with_max_period(now_ms: f64, max_period_ms: f64) -> Self {
        Self {
            frame_count: 0,
            period_start_ms: now_ms,
            max_period_ms: max_period_ms.max(FPS_SAMPLE_PERIOD_MS),
            window: FpsWindow::default(),
        }
    }

    #[inline]
    pub fn window(&self) -> &FpsWindow {
        &self.window
    }

    /// Start a fresh period, e.g. when frames resume after the page was
    /// hidden. The window keeps its samples.
    pub fn restart(&mut self, now_ms: f64) {
        self.frame_count = 0;
        self.period_start_ms = now_ms;
    }

    /// Register one rendered frame. The frame that closes a period is counted
    /// towards the next one.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<FpsSample> {
        let elapsed = now_ms - self.period_start_ms;
        if elapsed > self.max_period_ms {
            log::debug!("[fps] dropping {:.0}ms period; frames were paused", elapsed);
            self.restart(now_ms);
            self.frame_count = 1;
            return None;
        }
        let mut sample = None;
        if elapsed >= FPS_SAMPLE_PERIOD_MS {
            let instantaneous = self.frame_count as f64 * 1000.0 / elapsed;
            self.window.push(instantaneous);
            let average = self.window.rounded_mean().unwrap_or(0);
            sample = Some(FpsSample {
                instantaneous,
                average,
            });
            self.restart(now_ms);
        }
        self.frame_count += 1;
        sample
    }
}
