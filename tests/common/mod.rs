// In-memory cache backend for driving the cache manager on the host.
#![allow(dead_code)]

use fnv::FnvHashMap;
use folio_core::cache::CacheBackend;
use folio_core::{CacheError, CacheResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Default)]
struct State {
    caches: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    network: FnvHashMap<String, Vec<u8>>,
    offline: bool,
    fetches: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<State>>,
}

impl MemoryBackend {
    pub fn serve(&self, url: &str, body: &str) {
        self.state
            .borrow_mut()
            .network
            .insert(url.to_string(), body.as_bytes().to_vec());
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    pub fn seed(&self, cache: &str, url: &str, body: &str) {
        self.state
            .borrow_mut()
            .caches
            .entry(cache.to_string())
            .or_default()
            .insert(url.to_string(), body.as_bytes().to_vec());
    }

    pub fn create_cache(&self, cache: &str) {
        self.state
            .borrow_mut()
            .caches
            .entry(cache.to_string())
            .or_default();
    }

    pub fn cached(&self, cache: &str, url: &str) -> Option<Vec<u8>> {
        self.state
            .borrow()
            .caches
            .get(cache)
            .and_then(|c| c.get(url).cloned())
    }

    pub fn names(&self) -> Vec<String> {
        self.state.borrow().caches.keys().cloned().collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.borrow().fetches.len()
    }

    fn network_get(&self, url: &str) -> CacheResult<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        state.fetches.push(url.to_string());
        if state.offline {
            return Err(CacheError::Network {
                url: url.to_string(),
                reason: "offline".into(),
            });
        }
        state.network.get(url).cloned().ok_or_else(|| CacheError::Network {
            url: url.to_string(),
            reason: "404".into(),
        })
    }
}

impl CacheBackend for MemoryBackend {
    type Request = String;
    type Response = Vec<u8>;

    async fn fetch(&self, request: &String) -> CacheResult<Vec<u8>> {
        self.network_get(request)
    }

    fn duplicate(&self, response: &Vec<u8>) -> CacheResult<Vec<u8>> {
        Ok(response.clone())
    }

    async fn add_all(&self, cache: &str, urls: &[String]) -> CacheResult<()> {
        let mut fetched = Vec::with_capacity(urls.len());
        for url in urls {
            fetched.push((url.clone(), self.network_get(url)?));
        }
        let mut state = self.state.borrow_mut();
        let entries = state.caches.entry(cache.to_string()).or_default();
        entries.extend(fetched);
        Ok(())
    }

    async fn put(&self, cache: &str, request: &String, response: Vec<u8>) -> CacheResult<()> {
        self.state
            .borrow_mut()
            .caches
            .entry(cache.to_string())
            .or_default()
            .insert(request.clone(), response);
        Ok(())
    }

    async fn match_in(&self, cache: &str, request: &String) -> CacheResult<Option<Vec<u8>>> {
        Ok(self.cached(cache, request))
    }

    async fn match_any(&self, request: &String) -> CacheResult<Option<Vec<u8>>> {
        Ok(self
            .state
            .borrow()
            .caches
            .values()
            .find_map(|c| c.get(request).cloned()))
    }

    async fn cache_names(&self) -> CacheResult<Vec<String>> {
        Ok(self.names())
    }

    async fn delete_cache(&self, name: &str) -> CacheResult<bool> {
        Ok(self.state.borrow_mut().caches.remove(name).is_some())
    }
}
