/// DOM contract of the page: element ids, selectors and class names the
/// performance layer reads or toggles, plus scene baselines.
// Hero region and its decorative canvas
pub const HERO_ELEMENT_ID: &str = "hero";
pub const HERO_CANVAS_ID: &str = "hero-canvas";

// Full-quality particle counts; tiers scale these down
pub const HERO_PARTICLE_BASELINE: u32 = 30;
pub const HERO_STAR_BASELINE: u32 = 5000;

// Degrees per second of hero rotation at speed multiplier 1.0
pub const HERO_DEGREES_PER_SEC: f64 = 17.2; // ~0.3 rad/s

// Scroll burst classes
pub const SCROLL_ACTIVE_CLASS: &str = "scroll-active"; // on <body>
pub const IS_SCROLLING_CLASS: &str = "is-scrolling"; // on <html>
pub const REDUCE_ANIMATIONS_CLASS: &str = "reduce-animations";
pub const ESSENTIAL_ANIMATIONS_CLASS: &str = "essential-animations";
pub const ESSENTIAL_ANIMATION_SELECTOR: &str =
    ".stars-bg, .particles-container, .aurora-bg, .floating-blob";

// Lazy loading
pub const LAZY_CLASS: &str = "lazy";
pub const LAZY_IMAGE_SELECTOR: &str = "img.lazy";
pub const SECTION_IMAGE_SELECTOR: &str = "img[data-src]";
pub const BACKGROUND_SELECTOR: &str = "[data-background]";
pub const SECTION_SELECTOR: &str = "section";
pub const LINK_SELECTOR: &str = "a[href]";
pub const DATA_SRC_KEY: &str = "src"; // data-src
pub const DATA_BACKGROUND_KEY: &str = "background"; // data-background
pub const IMAGE_VISIBLE_RATIO: f64 = 0.01;

// CSS custom properties
pub const VH_PROPERTY: &str = "--vh";
pub const PARTICLE_SCALE_PROPERTY: &str = "--particle-scale";
pub const ANIMATION_SPEED_PROPERTY: &str = "--animation-speed";
pub const HERO_PHASE_PROPERTY: &str = "--hero-phase";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Service worker registration
pub const SERVICE_WORKER_URL: &str = "/sw.js";
pub const SKIP_SW_HOSTNAME: &str = "localhost";
