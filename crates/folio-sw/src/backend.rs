use folio_core::cache::{CacheBackend, Destination, RequestKind, RequestMeta};
use folio_core::{CacheError, CacheResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[inline]
fn storage(value: JsValue) -> CacheError {
    CacheError::Storage(describe(&value))
}

pub fn request_meta(request: &web::Request) -> RequestMeta {
    let kind = if request.mode() == web::RequestMode::Navigate {
        RequestKind::Navigation
    } else {
        RequestKind::Other
    };
    let destination = match request.destination() {
        web::RequestDestination::Image => Destination::Image,
        web::RequestDestination::Style => Destination::Style,
        web::RequestDestination::Script => Destination::Script,
        _ => Destination::Other,
    };
    RequestMeta {
        url: request.url(),
        kind,
        destination,
    }
}

/// `CacheStorage` and `fetch` of the worker's global scope.
#[derive(Clone)]
pub struct WorkerBackend {
    scope: web::ServiceWorkerGlobalScope,
}

impl WorkerBackend {
    pub fn new(scope: web::ServiceWorkerGlobalScope) -> Self {
        Self { scope }
    }

    fn caches(&self) -> CacheResult<web::CacheStorage> {
        self.scope.caches().map_err(storage)
    }

    async fn open(&self, name: &str) -> CacheResult<web::Cache> {
        let cache = JsFuture::from(self.caches()?.open(name))
            .await
            .map_err(storage)?;
        cache
            .dyn_into::<web::Cache>()
            .map_err(|v| CacheError::Storage(format!("open({}) returned {:?}", name, v)))
    }
}

fn optional_response(value: JsValue) -> CacheResult<Option<web::Response>> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<web::Response>()
        .map(Some)
        .map_err(|v| CacheError::Storage(format!("cache match returned {:?}", v)))
}

impl CacheBackend for WorkerBackend {
    type Request = web::Request;
    type Response = web::Response;

    async fn fetch(&self, request: &web::Request) -> CacheResult<web::Response> {
        let network = |reason: String| CacheError::Network {
            url: request.url(),
            reason,
        };
        let value = JsFuture::from(self.scope.fetch_with_request(request))
            .await
            .map_err(|e| network(describe(&e)))?;
        value
            .dyn_into::<web::Response>()
            .map_err(|v| network(format!("not a response: {:?}", v)))
    }

    fn duplicate(&self, response: &web::Response) -> CacheResult<web::Response> {
        // Inherent `Response.clone()`, which tees the body.
        web::Response::clone(response).map_err(storage)
    }

    async fn add_all(&self, cache: &str, urls: &[String]) -> CacheResult<()> {
        let cache = self.open(cache).await?;
        let urls: js_sys::Array = urls.iter().map(|u| JsValue::from_str(u)).collect();
        JsFuture::from(cache.add_all_with_str_sequence(&urls))
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn put(
        &self,
        cache: &str,
        request: &web::Request,
        response: web::Response,
    ) -> CacheResult<()> {
        let cache = self.open(cache).await?;
        JsFuture::from(cache.put_with_request(request, &response))
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn match_in(
        &self,
        cache: &str,
        request: &web::Request,
    ) -> CacheResult<Option<web::Response>> {
        let cache = self.open(cache).await?;
        let value = JsFuture::from(cache.match_with_request(request))
            .await
            .map_err(storage)?;
        optional_response(value)
    }

    async fn match_any(&self, request: &web::Request) -> CacheResult<Option<web::Response>> {
        let value = JsFuture::from(self.caches()?.match_with_request(request))
            .await
            .map_err(storage)?;
        optional_response(value)
    }

    async fn cache_names(&self) -> CacheResult<Vec<String>> {
        let keys = JsFuture::from(self.caches()?.keys())
            .await
            .map_err(storage)?;
        let keys: js_sys::Array = keys
            .dyn_into()
            .map_err(|v| CacheError::Storage(format!("caches.keys() returned {:?}", v)))?;
        Ok(keys.iter().filter_map(|k| k.as_string()).collect())
    }

    async fn delete_cache(&self, name: &str) -> CacheResult<bool> {
        let deleted = JsFuture::from(self.caches()?.delete(name))
            .await
            .map_err(storage)?;
        Ok(deleted.as_bool().unwrap_or(false))
    }
}
