use crate::constants::*;

#[derive(Clone, Debug, PartialEq)]
pub struct CacheConfig {
    /// Bump when the precache manifest changes.
    pub versioned_cache: String,
    pub runtime_cache: String,
    pub precache_urls: Vec<String>,
    pub excluded_prefixes: Vec<String>,
    pub excluded_fragments: Vec<String>,
    pub sync_tag: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            versioned_cache: VERSIONED_CACHE_NAME.to_string(),
            runtime_cache: RUNTIME_CACHE_NAME.to_string(),
            precache_urls: owned(PRECACHE_URLS),
            excluded_prefixes: owned(EXCLUDED_URL_PREFIXES),
            excluded_fragments: owned(EXCLUDED_URL_FRAGMENTS),
            sync_tag: SYNC_TAG.to_string(),
        }
    }
}

impl CacheConfig {
    /// Cache names that survive activation.
    pub fn current_caches(&self) -> [&str; 2] {
        [&self.versioned_cache, &self.runtime_cache]
    }

    #[inline]
    pub fn is_current(&self, name: &str) -> bool {
        self.current_caches().contains(&name)
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.excluded_prefixes.iter().any(|p| url.starts_with(p.as_str()))
            || self.excluded_fragments.iter().any(|f| url.contains(f.as_str()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Navigation,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Image,
    Style,
    Script,
    Other,
}

impl Destination {
    #[inline]
    pub fn is_static_asset(self) -> bool {
        matches!(self, Destination::Image | Destination::Style | Destination::Script)
    }
}

/// The parts of a request that routing looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMeta {
    pub url: String,
    pub kind: RequestKind,
    pub destination: Destination,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Leave the request to the browser.
    PassThrough,
    /// Network first, fall back to any cache.
    NetworkFirst,
    /// Serve from the runtime cache, refresh it in the background.
    StaleWhileRevalidate,
}

pub fn route(config: &CacheConfig, meta: &RequestMeta) -> Route {
    if config.is_excluded(&meta.url) {
        return Route::PassThrough;
    }
    if meta.kind == RequestKind::Navigation {
        return Route::NetworkFirst;
    }
    if meta.destination.is_static_asset() {
        return Route::StaleWhileRevalidate;
    }
    Route::NetworkFirst
}

/// Generations to delete on activation.
pub fn stale_caches<'a>(config: &CacheConfig, existing: &'a [String]) -> Vec<&'a str> {
    existing
        .iter()
        .map(String::as_str)
        .filter(|name| !config.is_current(name))
        .collect()
}
