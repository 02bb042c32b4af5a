// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust DOM contract directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use folio_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn quality_tiers_are_ordered() {
    // Lower tiers never draw more than higher ones
    assert!(LOW_PARTICLE_SCALE < MOBILE_PARTICLE_SCALE);
    assert!(MOBILE_PARTICLE_SCALE < 1.0);
    assert!(LOW_ANIMATION_SPEED < MOBILE_ANIMATION_SPEED);
    assert!(MOBILE_ANIMATION_SPEED < 1.0);
    assert!(REDUCED_MOTION_SPEED < LOW_ANIMATION_SPEED);

    // Pixel-ratio caps grow with the tier and never drop below 1
    assert!(MIN_PIXEL_RATIO <= LOW_MAX_PIXEL_RATIO);
    assert!(LOW_MAX_PIXEL_RATIO < MOBILE_MAX_PIXEL_RATIO);
    assert!(MOBILE_MAX_PIXEL_RATIO < DESKTOP_MAX_PIXEL_RATIO);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_are_positive() {
    assert!(FPS_SAMPLE_PERIOD_MS > 0.0);
    assert!(FPS_WINDOW_LEN > 0);
    assert!(SCROLL_COOLDOWN_MS > 0);
    assert!(IDLE_POLYFILL_DELAY_MS > 0);
    assert!(IDLE_POLYFILL_BUDGET_MS > 0.0);
    assert!(PREFETCH_FALLBACK_DELAY_MS > IDLE_POLYFILL_DELAY_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn visibility_margins_are_consistent() {
    assert!(VISIBILITY_HIDE_RATIO > 0.0 && VISIBILITY_HIDE_RATIO < 1.0);
    assert!(IMAGE_VISIBLE_RATIO > 0.0 && IMAGE_VISIBLE_RATIO < 1.0);
    // Images start loading before sections resolve
    assert!(IMAGE_ROOT_MARGIN_PX >= SECTION_ROOT_MARGIN_PX);
}

#[test]
fn cache_names_are_distinct() {
    assert_ne!(VERSIONED_CACHE_NAME, RUNTIME_CACHE_NAME);
    assert!(PRECACHE_URLS.contains(&"/"));
    assert!(PRECACHE_URLS.iter().all(|u| u.starts_with('/')));
    assert!(SECONDARY_ROUTES.iter().all(|r| r.starts_with('/') && !r.contains('#')));
}

#[test]
fn dom_contract_is_well_formed() {
    assert!(VH_PROPERTY.starts_with("--"));
    assert!(PARTICLE_SCALE_PROPERTY.starts_with("--"));
    assert!(ANIMATION_SPEED_PROPERTY.starts_with("--"));
    assert!(HERO_PHASE_PROPERTY.starts_with("--"));
    assert!(LAZY_IMAGE_SELECTOR.ends_with(LAZY_CLASS));
    assert!(SERVICE_WORKER_URL.starts_with('/'));
    assert_ne!(SCROLL_ACTIVE_CLASS, IS_SCROLLING_CLASS);
    assert!(HERO_PARTICLE_BASELINE > 0 && HERO_STAR_BASELINE > HERO_PARTICLE_BASELINE);
}

#[test]
fn mobile_markers_are_lowercase() {
    for marker in MOBILE_UA_MARKERS {
        assert_eq!(*marker, marker.to_ascii_lowercase());
    }
}
