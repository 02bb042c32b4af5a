/// Performance heuristics and cache naming shared by the page and the worker.
///
/// The thresholds below are heuristics without a derivation behind them; they
/// only seed the `Default` impls of the config structs so callers can override
/// them.

// Capability probing
pub const MOBILE_MAX_VIEWPORT_WIDTH: f64 = 768.0; // inclusive
pub const LOW_HEAP_LIMIT_BYTES: u64 = 2 * 1024 * 1024 * 1024; // 2 GiB
pub const MOBILE_UA_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

// Frame-rate sampling
pub const FPS_SAMPLE_PERIOD_MS: f64 = 1000.0;
pub const FPS_WINDOW_LEN: usize = 5;
// Longer periods mean frames were not scheduled at all
pub const FPS_MAX_PERIOD_MS: f64 = 2.0 * FPS_SAMPLE_PERIOD_MS;
pub const LOW_FPS_THRESHOLD: f64 = 30.0;

// Visibility
pub const VISIBILITY_ROOT_MARGIN_PX: u32 = 100;
pub const VISIBILITY_HIDE_RATIO: f64 = 0.01;

// Quality tiers
pub const LOW_PARTICLE_SCALE: f32 = 0.5;
pub const LOW_ANIMATION_SPEED: f32 = 0.5;
pub const LOW_MAX_PIXEL_RATIO: f64 = 1.0;
pub const MOBILE_PARTICLE_SCALE: f32 = 0.75;
pub const MOBILE_ANIMATION_SPEED: f32 = 0.8;
pub const MOBILE_MAX_PIXEL_RATIO: f64 = 1.5;
pub const DESKTOP_MAX_PIXEL_RATIO: f64 = 2.0;
pub const MIN_PIXEL_RATIO: f64 = 1.0;
pub const REDUCED_MOTION_SPEED: f32 = 0.3;

// Scroll bursts
pub const SCROLL_BURST_THRESHOLD_PX: f64 = 50.0;
pub const SCROLL_COOLDOWN_MS: u32 = 200;

// Lazy loading and prefetch
pub const IMAGE_ROOT_MARGIN_PX: u32 = 200;
pub const BACKGROUND_ROOT_MARGIN_PX: u32 = 0;
pub const SECTION_ROOT_MARGIN_PX: u32 = 100;
pub const PREFETCH_FALLBACK_DELAY_MS: u32 = 2000;
pub const SECONDARY_ROUTES: &[&str] = &[
    "/components/Hero",
    "/components/About",
    "/components/Skills",
    "/components/Projects",
    "/components/Experience",
];

// Idle scheduling polyfill
pub const IDLE_POLYFILL_DELAY_MS: u32 = 1;
pub const IDLE_POLYFILL_BUDGET_MS: f64 = 50.0;

// Offline cache
pub const VERSIONED_CACHE_NAME: &str = "portfolio-cache-v1";
pub const RUNTIME_CACHE_NAME: &str = "runtime-cache";
pub const PRECACHE_URLS: &[&str] = &["/", "/index.html", "/app/globals.css", "/favicon.ico"];
pub const EXCLUDED_URL_PREFIXES: &[&str] = &["https://analytics"];
pub const EXCLUDED_URL_FRAGMENTS: &[&str] = &["chrome-extension"];
pub const SYNC_TAG: &str = "sync-data";
pub const PERIODIC_SYNC_MIN_INTERVAL_MS: u64 = 24 * 60 * 60 * 1000;
