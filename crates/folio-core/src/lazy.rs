//! Policies for deferred images, idle prefetch and visible-link prefetch.

use crate::constants::*;
use fnv::FnvHashSet;

#[derive(Clone, Debug, PartialEq)]
pub struct LazyConfig {
    pub image_margin_px: u32,
    pub background_margin_px: u32,
    pub section_margin_px: u32,
    pub prefetch_fallback_delay_ms: u32,
    pub secondary_routes: Vec<String>,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            image_margin_px: IMAGE_ROOT_MARGIN_PX,
            background_margin_px: BACKGROUND_ROOT_MARGIN_PX,
            section_margin_px: SECTION_ROOT_MARGIN_PX,
            prefetch_fallback_delay_ms: PREFETCH_FALLBACK_DELAY_MS,
            secondary_routes: SECONDARY_ROUTES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Only same-site paths without a fragment are worth a prefetch hint.
#[inline]
pub fn is_prefetchable_href(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//") && !href.contains('#')
}

/// CSS value for a deferred background image.
#[inline]
pub fn background_image_value(url: &str) -> String {
    format!("url({})", url)
}

/// Remembers which hrefs already received a prefetch hint.
#[derive(Clone, Debug, Default)]
pub struct PrefetchLedger {
    issued: FnvHashSet<String>,
}

impl PrefetchLedger {
    /// Returns true when `href` is eligible and has not been hinted before.
    pub fn claim(&mut self, href: &str) -> bool {
        if !is_prefetchable_href(href) {
            return false;
        }
        self.issued.insert(href.to_string())
    }

    /// Claim every route of a fixed list, keeping only the new ones.
    pub fn claim_all<'a, I>(&mut self, hrefs: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        hrefs
            .into_iter()
            .filter(|h| self.claim(h))
            .map(str::to_string)
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

/// What to do with a deferred image when its observer reports an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageAction {
    /// Assign this source and stop observing.
    Load(String),
    /// Nothing to load; stop observing.
    Release,
    /// Not intersecting yet.
    Wait,
}

pub fn image_action(
    is_intersecting: bool,
    data_src: Option<&str>,
    current_src: &str,
) -> ImageAction {
    if !is_intersecting {
        return ImageAction::Wait;
    }
    match data_src {
        Some(src) if !src.is_empty() && src != current_src => ImageAction::Load(src.to_string()),
        _ => ImageAction::Release,
    }
}
