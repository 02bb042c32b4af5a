use super::policy::{self, CacheConfig, RequestMeta, Route};
use crate::error::{CacheError, CacheResult};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Storage and network primitives the cache manager is written against.
///
/// Implementations are cheap handles (clones share the same storage), so
/// background work can own a copy.
#[allow(async_fn_in_trait)]
pub trait CacheBackend: Clone + 'static {
    type Request: Clone + 'static;
    type Response: 'static;

    async fn fetch(&self, request: &Self::Request) -> CacheResult<Self::Response>;

    /// A second, independently consumable copy of a response.
    fn duplicate(&self, response: &Self::Response) -> CacheResult<Self::Response>;

    /// Fetch every URL and store all of them, or none.
    async fn add_all(&self, cache: &str, urls: &[String]) -> CacheResult<()>;

    async fn put(
        &self,
        cache: &str,
        request: &Self::Request,
        response: Self::Response,
    ) -> CacheResult<()>;

    async fn match_in(
        &self,
        cache: &str,
        request: &Self::Request,
    ) -> CacheResult<Option<Self::Response>>;

    /// Look the request up across every cache.
    async fn match_any(&self, request: &Self::Request) -> CacheResult<Option<Self::Response>>;

    async fn cache_names(&self) -> CacheResult<Vec<String>>;

    async fn delete_cache(&self, name: &str) -> CacheResult<bool>;
}

/// Background refresh handed back to the caller, which must keep it alive
/// (the worker passes it to `waitUntil`).
pub type Revalidation = Pin<Box<dyn Future<Output = ()>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
}

pub struct Served<R> {
    pub response: R,
    pub source: ResponseSource,
    pub revalidation: Option<Revalidation>,
}

impl<R> Served<R> {
    fn network(response: R) -> Self {
        Self {
            response,
            source: ResponseSource::Network,
            revalidation: None,
        }
    }

    fn cached(response: R, revalidation: Option<Revalidation>) -> Self {
        Self {
            response,
            source: ResponseSource::Cache,
            revalidation,
        }
    }
}

#[derive(Clone)]
pub struct CacheManager<B: CacheBackend> {
    backend: B,
    config: Rc<CacheConfig>,
}

impl<B: CacheBackend> CacheManager<B> {
    pub fn new(backend: B, config: CacheConfig) -> Self {
        Self {
            backend,
            config: Rc::new(config),
        }
    }

    #[inline]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn route(&self, meta: &RequestMeta) -> Route {
        policy::route(&self.config, meta)
    }

    /// Populate the versioned cache with the precache manifest.
    pub async fn install(&self) -> CacheResult<()> {
        log::info!(
            "[sw] precaching {} resources into {}",
            self.config.precache_urls.len(),
            self.config.versioned_cache
        );
        self.backend
            .add_all(&self.config.versioned_cache, &self.config.precache_urls)
            .await
    }

    /// Delete every cache generation that is no longer current. Returns the
    /// names that were removed.
    pub async fn activate(&self) -> CacheResult<Vec<String>> {
        let existing = self.backend.cache_names().await?;
        let mut removed = Vec::new();
        for name in policy::stale_caches(&self.config, &existing) {
            if self.backend.delete_cache(name).await? {
                log::info!("[sw] deleted stale cache {}", name);
                removed.push(name.to_string());
            }
        }
        Ok(removed)
    }

    pub async fn respond(
        &self,
        route: Route,
        meta: &RequestMeta,
        request: B::Request,
    ) -> CacheResult<Served<B::Response>> {
        match route {
            Route::PassThrough => self.backend.fetch(&request).await.map(Served::network),
            Route::NetworkFirst => self.network_first(meta, request).await,
            Route::StaleWhileRevalidate => self.stale_while_revalidate(meta, request).await,
        }
    }

    /// Returns whether the tag was recognised.
    pub async fn sync(&self, tag: &str) -> bool {
        if tag != self.config.sync_tag {
            log::debug!("[sw] ignoring sync tag {}", tag);
            return false;
        }
        // Placeholder: nothing is queued for background delivery yet.
        log::info!("[sw] syncing data");
        true
    }

    async fn network_first(
        &self,
        meta: &RequestMeta,
        request: B::Request,
    ) -> CacheResult<Served<B::Response>> {
        let err = match self.backend.fetch(&request).await {
            Ok(response) => return Ok(Served::network(response)),
            Err(err) => err,
        };
        log::warn!("[sw] {}; trying cache", err);
        let cached = self.backend.match_any(&request).await.unwrap_or_else(|e| {
            log::warn!("[sw] cache lookup for {} failed: {}", meta.url, e);
            None
        });
        cached
            .map(|response| Served::cached(response, None))
            .ok_or_else(|| CacheError::Offline {
                url: meta.url.clone(),
            })
    }

    async fn stale_while_revalidate(
        &self,
        meta: &RequestMeta,
        request: B::Request,
    ) -> CacheResult<Served<B::Response>> {
        let runtime = &self.config.runtime_cache;
        let cached = self
            .backend
            .match_in(runtime, &request)
            .await
            .unwrap_or_else(|e| {
                log::warn!("[sw] runtime cache lookup for {} failed: {}", meta.url, e);
                None
            });
        if let Some(response) = cached {
            let refresh = self.revalidation(meta.url.clone(), request);
            return Ok(Served::cached(response, Some(refresh)));
        }

        let response = self.backend.fetch(&request).await.map_err(|e| {
            log::warn!("[sw] {}", e);
            CacheError::Offline {
                url: meta.url.clone(),
            }
        })?;
        match self.backend.duplicate(&response) {
            Ok(copy) => {
                if let Err(e) = self.backend.put(runtime, &request, copy).await {
                    log::warn!("[sw] storing {} failed: {}", meta.url, e);
                }
            }
            Err(e) => log::warn!("[sw] could not copy response for {}: {}", meta.url, e),
        }
        Ok(Served::network(response))
    }

    fn revalidation(&self, url: String, request: B::Request) -> Revalidation {
        let backend = self.backend.clone();
        let cache = self.config.runtime_cache.clone();
        Box::pin(async move {
            match backend.fetch(&request).await {
                Ok(fresh) => {
                    if let Err(e) = backend.put(&cache, &request, fresh).await {
                        log::warn!("[sw] refreshing {} failed: {}", url, e);
                    }
                }
                Err(e) => log::debug!("[sw] revalidation skipped: {}", e),
            }
        })
    }
}
