// Host-side tests for the offline cache manager, driven by an in-memory backend.

mod common;

use common::MemoryBackend;
use folio_core::cache::*;
use folio_core::CacheError;
use pollster::block_on;

const ORIGIN: &str = "https://folio.test";

fn url(path: &str) -> String {
    format!("{}{}", ORIGIN, path)
}

fn manager() -> (MemoryBackend, CacheManager<MemoryBackend>) {
    let backend = MemoryBackend::default();
    let config = CacheConfig {
        precache_urls: vec![url("/"), url("/index.html"), url("/app/globals.css")],
        ..CacheConfig::default()
    };
    (backend.clone(), CacheManager::new(backend, config))
}

fn meta(path: &str, kind: RequestKind, destination: Destination) -> RequestMeta {
    RequestMeta {
        url: url(path),
        kind,
        destination,
    }
}

fn image(path: &str) -> RequestMeta {
    meta(path, RequestKind::Other, Destination::Image)
}

#[test]
fn install_precaches_manifest() {
    let (net, sw) = manager();
    net.serve(&url("/"), "home");
    net.serve(&url("/index.html"), "index");
    net.serve(&url("/app/globals.css"), "css");

    block_on(sw.install()).expect("install");
    assert_eq!(net.cached("portfolio-cache-v1", &url("/")), Some(b"home".to_vec()));
    assert_eq!(
        net.cached("portfolio-cache-v1", &url("/app/globals.css")),
        Some(b"css".to_vec())
    );

    // Offline navigation is answered from the precache
    net.set_offline(true);
    let nav = meta("/", RequestKind::Navigation, Destination::Other);
    let served = block_on(sw.respond(sw.route(&nav), &nav, url("/"))).expect("served");
    assert_eq!(served.response, b"home".to_vec());
    assert_eq!(served.source, ResponseSource::Cache);
}

#[test]
fn install_fails_when_any_resource_fails() {
    let (net, sw) = manager();
    net.serve(&url("/"), "home");
    let err = block_on(sw.install()).unwrap_err();
    assert!(matches!(err, CacheError::Network { .. }));
    assert!(net.cached("portfolio-cache-v1", &url("/")).is_none());
}

#[test]
fn activate_deletes_stale_generations_only() {
    let (net, sw) = manager();
    net.create_cache("portfolio-cache-v0");
    net.create_cache("portfolio-cache-v1");
    net.create_cache("runtime-cache");

    let removed = block_on(sw.activate()).expect("activate");
    assert_eq!(removed, vec!["portfolio-cache-v0".to_string()]);
    assert_eq!(net.names(), vec!["portfolio-cache-v1", "runtime-cache"]);

    assert!(block_on(sw.activate()).expect("second activate").is_empty());
}

#[test]
fn routing_by_request_kind() {
    let (_, sw) = manager();
    let nav = meta("/about", RequestKind::Navigation, Destination::Other);
    assert_eq!(sw.route(&nav), Route::NetworkFirst);
    assert_eq!(sw.route(&image("/me.png")), Route::StaleWhileRevalidate);
    assert_eq!(
        sw.route(&meta("/app.css", RequestKind::Other, Destination::Style)),
        Route::StaleWhileRevalidate
    );
    assert_eq!(
        sw.route(&meta("/api/data.json", RequestKind::Other, Destination::Other)),
        Route::NetworkFirst
    );
}

#[test]
fn excluded_urls_pass_through() {
    let (_, sw) = manager();
    let analytics = RequestMeta {
        url: "https://analytics.example.com/collect".into(),
        kind: RequestKind::Other,
        destination: Destination::Script,
    };
    assert_eq!(sw.route(&analytics), Route::PassThrough);
    let extension = RequestMeta {
        url: "chrome-extension://abc/inject.js".into(),
        kind: RequestKind::Other,
        destination: Destination::Script,
    };
    assert_eq!(sw.route(&extension), Route::PassThrough);
}

#[test]
fn stale_while_revalidate_serves_old_bytes_then_refreshes() {
    let (net, sw) = manager();
    let img = image("/me.png");
    net.seed("runtime-cache", &img.url, "old");
    net.serve(&img.url, "new");

    let served = block_on(sw.respond(Route::StaleWhileRevalidate, &img, img.url.clone()))
        .expect("served");
    assert_eq!(served.response, b"old".to_vec());
    assert_eq!(served.source, ResponseSource::Cache);
    // Nothing changes until the background refresh runs
    assert_eq!(net.cached("runtime-cache", &img.url), Some(b"old".to_vec()));

    block_on(served.revalidation.expect("refresh scheduled"));
    assert_eq!(net.cached("runtime-cache", &img.url), Some(b"new".to_vec()));

    let again = block_on(sw.respond(Route::StaleWhileRevalidate, &img, img.url.clone()))
        .expect("served again");
    assert_eq!(again.response, b"new".to_vec());
}

#[test]
fn stale_while_revalidate_miss_fetches_and_stores() {
    let (net, sw) = manager();
    let img = image("/photo.webp");
    net.serve(&img.url, "pixels");

    let served = block_on(sw.respond(Route::StaleWhileRevalidate, &img, img.url.clone()))
        .expect("served");
    assert_eq!(served.response, b"pixels".to_vec());
    assert_eq!(served.source, ResponseSource::Network);
    assert!(served.revalidation.is_none());
    assert_eq!(net.cached("runtime-cache", &img.url), Some(b"pixels".to_vec()));
}

#[test]
fn stale_while_revalidate_miss_offline_is_an_error() {
    let (net, sw) = manager();
    net.set_offline(true);
    let img = image("/missing.png");
    let err = block_on(sw.respond(Route::StaleWhileRevalidate, &img, img.url.clone()))
        .err()
        .expect("offline");
    assert_eq!(err, CacheError::Offline { url: img.url });
}

#[test]
fn failed_revalidation_keeps_cached_copy() {
    let (net, sw) = manager();
    let img = image("/me.png");
    net.seed("runtime-cache", &img.url, "old");
    net.set_offline(true);

    let served = block_on(sw.respond(Route::StaleWhileRevalidate, &img, img.url.clone()))
        .expect("served");
    block_on(served.revalidation.expect("refresh scheduled"));
    assert_eq!(net.cached("runtime-cache", &img.url), Some(b"old".to_vec()));
}

#[test]
fn network_first_prefers_network_and_does_not_cache() {
    let (net, sw) = manager();
    let api = meta("/api/data.json", RequestKind::Other, Destination::Other);
    net.serve(&api.url, "fresh");
    net.seed("portfolio-cache-v1", &api.url, "stale");

    let served = block_on(sw.respond(Route::NetworkFirst, &api, api.url.clone())).expect("served");
    assert_eq!(served.response, b"fresh".to_vec());
    assert_eq!(served.source, ResponseSource::Network);
    assert_eq!(net.fetch_count(), 1);
    assert!(net.cached("runtime-cache", &api.url).is_none());
}

#[test]
fn network_first_falls_back_to_any_cache() {
    let (net, sw) = manager();
    let api = meta("/api/data.json", RequestKind::Other, Destination::Other);
    net.seed("runtime-cache", &api.url, "cached");
    net.set_offline(true);

    let served = block_on(sw.respond(Route::NetworkFirst, &api, api.url.clone())).expect("served");
    assert_eq!(served.response, b"cached".to_vec());
    assert_eq!(served.source, ResponseSource::Cache);
}

#[test]
fn network_first_offline_miss_is_an_error() {
    let (net, sw) = manager();
    net.set_offline(true);
    let nav = meta("/nowhere", RequestKind::Navigation, Destination::Other);
    let err = block_on(sw.respond(Route::NetworkFirst, &nav, nav.url.clone()))
        .err()
        .expect("offline");
    assert!(matches!(err, CacheError::Offline { .. }));
}

#[test]
fn sync_recognises_its_tag_only() {
    let (_, sw) = manager();
    assert!(block_on(sw.sync("sync-data")));
    assert!(!block_on(sw.sync("other")));
}
