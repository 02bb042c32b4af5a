// Host-side tests for device classification and the performance latch.

use folio_core::*;

const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
const DESKTOP_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36";

fn env(width: f64, ua: &str) -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        viewport_width: width,
        user_agent: ua.to_string(),
        ..EnvironmentSnapshot::default()
    }
}

#[test]
fn mobile_boundary_is_inclusive_at_768() {
    let t = Thresholds::default();
    assert!(classify(&env(768.0, DESKTOP_UA), &t).is_mobile);
    assert!(!classify(&env(769.0, DESKTOP_UA), &t).is_mobile);
    assert!(classify(&env(320.0, DESKTOP_UA), &t).is_mobile);
    assert!(!classify(&env(1920.0, IPHONE_UA), &t).is_mobile);
}

#[test]
fn mobile_user_agent_matching_is_case_insensitive() {
    assert!(is_mobile_user_agent(IPHONE_UA));
    assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; ANDROID 14)"));
    assert!(is_mobile_user_agent("Opera Mini/8.0"));
    assert!(!is_mobile_user_agent(DESKTOP_UA));
    assert!(!is_mobile_user_agent(""));
}

#[test]
fn low_performance_needs_narrow_viewport_and_mobile_os() {
    let t = Thresholds::default();
    assert!(classify(&env(400.0, IPHONE_UA), &t).is_low_performance);
    // Narrow desktop window stays high performance
    assert!(!classify(&env(400.0, DESKTOP_UA), &t).is_low_performance);
    // Tablet-sized viewport with a mobile UA is not narrow enough
    assert!(!classify(&env(1024.0, IPHONE_UA), &t).is_low_performance);
}

#[test]
fn missing_webgl2_or_small_heap_mean_low_performance() {
    let t = Thresholds::default();
    let mut no_gl = env(1440.0, DESKTOP_UA);
    no_gl.supports_webgl2 = false;
    let p = classify(&no_gl, &t);
    assert!(p.is_low_performance);
    assert!(!p.supports_advanced_graphics);

    let mut small_heap = env(1440.0, DESKTOP_UA);
    small_heap.heap_limit_bytes = Some(1024 * 1024 * 1024);
    assert!(classify(&small_heap, &t).is_low_performance);

    let mut big_heap = env(1440.0, DESKTOP_UA);
    big_heap.heap_limit_bytes = Some(4 * 1024 * 1024 * 1024);
    assert!(!classify(&big_heap, &t).is_low_performance);

    // Exactly at the threshold is not "below" it
    let mut at_limit = env(1440.0, DESKTOP_UA);
    at_limit.heap_limit_bytes = Some(t.low_heap_limit_bytes);
    assert!(!classify(&at_limit, &t).is_low_performance);
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    let mut e = env(1440.0, DESKTOP_UA);
    e.device_pixel_ratio = 0.0;
    assert_eq!(classify(&e, &Thresholds::default()).device_pixel_ratio, 1.0);
    e.device_pixel_ratio = f64::NAN;
    assert_eq!(classify(&e, &Thresholds::default()).device_pixel_ratio, 1.0);
}

#[test]
fn thresholds_are_configurable() {
    let t = Thresholds {
        mobile_max_width: 1024.0,
        ..Thresholds::default()
    };
    assert!(classify(&env(1000.0, DESKTOP_UA), &t).is_mobile);
}

#[test]
fn low_fps_latches_for_the_session() {
    let mut ctx = DeviceContext::new(&env(1440.0, DESKTOP_UA), Thresholds::default());
    assert!(!ctx.profile().is_low_performance);

    assert!(!ctx.record_fps(58.0, 58));
    assert!(!ctx.is_degraded());

    assert!(ctx.record_fps(22.0, 50));
    assert!(ctx.is_degraded());
    assert!(ctx.profile().is_low_performance);
    assert_eq!(ctx.last_fps(), Some(50));

    // Recovery does not clear the latch
    assert!(!ctx.record_fps(60.0, 55));
    assert!(ctx.profile().is_low_performance);

    // Neither does a resize to a roomy desktop viewport
    ctx.refresh(&env(1920.0, DESKTOP_UA));
    assert!(ctx.profile().is_low_performance);
}

#[test]
fn exactly_thirty_fps_does_not_latch() {
    let mut ctx = DeviceContext::new(&env(1440.0, DESKTOP_UA), Thresholds::default());
    assert!(!ctx.record_fps(30.0, 30));
    assert!(!ctx.is_degraded());
}

#[test]
fn refresh_reports_changes_only() {
    let mut ctx = DeviceContext::new(&env(1440.0, DESKTOP_UA), Thresholds::default());
    assert!(!ctx.refresh(&env(1440.0, DESKTOP_UA)));
    assert!(ctx.refresh(&env(700.0, DESKTOP_UA)));
    assert!(ctx.profile().is_mobile);
    assert!(!ctx.refresh(&env(700.0, DESKTOP_UA)));
}

#[test]
fn latch_trips_once() {
    let mut latch = PerformanceLatch::default();
    assert!(!latch.is_tripped());
    assert!(latch.trip());
    assert!(!latch.trip());
    assert!(latch.is_tripped());
}

#[test]
fn vh_is_one_percent_of_height() {
    assert_eq!(vh_property_value(800.0), "8px");
    assert_eq!(vh_property_value(650.0), "6.5px");
}

#[test]
fn background_tab_gap_does_not_latch() {
    let mut ctx = DeviceContext::new(&env(1440.0, DESKTOP_UA), Thresholds::default());
    let mut meter = FrameRateMeter::new(0.0);
    let step = 1000.0 / 60.0;
    let mut t = 0.0;
    for _ in 0..210 {
        t += step;
        if let Some(s) = meter.on_frame(t) {
            ctx.record_fps(s.instantaneous, s.average);
        }
    }
    t += 10_000.0;
    for _ in 0..210 {
        if let Some(s) = meter.on_frame(t) {
            ctx.record_fps(s.instantaneous, s.average);
        }
        t += step;
    }
    assert!(!ctx.is_degraded());
    assert!(!ctx.profile().is_low_performance);
    assert!(ctx.last_fps().is_some_and(|fps| fps >= 58));
}

#[test]
fn refresh_reuses_startup_webgl2_probe() {
    let mut no_gl = env(1440.0, DESKTOP_UA);
    no_gl.supports_webgl2 = false;
    let mut ctx = DeviceContext::new(&no_gl, Thresholds::default());
    assert!(!ctx.supports_webgl2());

    // Later snapshots carry a placeholder; the startup answer still holds
    ctx.refresh(&env(1600.0, DESKTOP_UA));
    assert!(!ctx.profile().supports_advanced_graphics);
    assert!(ctx.profile().is_low_performance);
}
