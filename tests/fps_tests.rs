// Host-side tests for the rolling frame-rate window and meter.

use folio_core::*;

#[test]
fn window_evicts_oldest_and_averages() {
    let mut w = FpsWindow::default();
    for fps in [60.0, 60.0, 60.0, 60.0, 60.0, 30.0] {
        w.push(fps);
        assert!(w.len() <= 5);
    }
    assert_eq!(w.samples(), &[60.0, 60.0, 60.0, 60.0, 30.0]);
    assert_eq!(w.rounded_mean(), Some(54));
}

#[test]
fn empty_window_has_no_mean() {
    let w = FpsWindow::default();
    assert!(w.is_empty());
    assert_eq!(w.mean(), None);
}

#[test]
fn meter_reports_once_per_second() {
    let mut meter = FrameRateMeter::new(0.0);
    let mut samples = Vec::new();
    // 60 Hz for a little over three seconds
    for i in 1..=190 {
        let t = i as f64 * (1000.0 / 60.0);
        if let Some(s) = meter.on_frame(t) {
            samples.push(s);
        }
    }
    assert_eq!(samples.len(), 3);
    for s in &samples {
        assert!((s.instantaneous - 60.0).abs() < 2.0, "got {}", s.instantaneous);
        assert!((58..=61).contains(&s.average));
    }
}

#[test]
fn meter_uses_elapsed_time_not_nominal_second() {
    let mut meter = FrameRateMeter::new(0.0);
    for i in 1..=10 {
        assert!(meter.on_frame(i as f64 * 100.0 - 1.0).is_none());
    }
    // 10 frames counted, 1250ms elapsed
    let s = meter.on_frame(1250.0).expect("period closes");
    assert!((s.instantaneous - 8.0).abs() < 1e-9);
    assert_eq!(s.average, 8);
}

#[test]
fn closing_frame_counts_towards_next_period() {
    let mut meter = FrameRateMeter::new(0.0);
    assert!(meter.on_frame(1000.0).is_some()); // counts 0 frames, starts next with 1
    let s = meter.on_frame(2000.0).expect("second period");
    assert!((s.instantaneous - 1.0).abs() < 1e-9);
    assert_eq!(meter.window().len(), 2);
}

/// Feed `count` frames at 60 Hz starting after `start_ms`, returning the
/// timestamp of the last frame and every closed sample.
fn run_60hz(meter: &mut FrameRateMeter, start_ms: f64, count: u32) -> (f64, Vec<FpsSample>) {
    let mut samples = Vec::new();
    let mut t = start_ms;
    for _ in 0..count {
        t += 1000.0 / 60.0;
        samples.extend(meter.on_frame(t));
    }
    (t, samples)
}

#[test]
fn paused_frames_do_not_produce_a_sample() {
    let mut meter = FrameRateMeter::new(0.0);
    let (t, before) = run_60hz(&mut meter, 0.0, 210);
    assert_eq!(before.len(), 3);

    // Tab hidden for ten seconds: no frames at all
    assert!(meter.on_frame(t + 10_000.0).is_none());
    assert_eq!(meter.window().len(), 3);

    let (_, after) = run_60hz(&mut meter, t + 10_000.0, 130);
    assert_eq!(after.len(), 2);
    for s in &after {
        assert!(s.instantaneous > 55.0, "got {}", s.instantaneous);
    }
}

#[test]
fn restart_begins_a_fresh_period() {
    let mut meter = FrameRateMeter::new(0.0);
    let (t, _) = run_60hz(&mut meter, 0.0, 30);
    meter.restart(t + 5_000.0);
    let (_, samples) = run_60hz(&mut meter, t + 5_000.0, 61);
    assert_eq!(samples.len(), 1);
    assert!((samples[0].instantaneous - 60.0).abs() < 2.0);
}

#[test]
fn max_period_is_configurable() {
    let mut meter = FrameRateMeter::with_max_period(0.0, 5_000.0);
    meter.on_frame(100.0);
    // 1 frame over 4 seconds is a real (terrible) period under a 5s cap
    let s = meter.on_frame(4_000.0).expect("kept");
    assert!(s.instantaneous < 1.0);
}
