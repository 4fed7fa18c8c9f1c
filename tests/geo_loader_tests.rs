// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Boundary loading tests: local file, remote mirror and caching.

use axum::{http::StatusCode, routing::get, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use travel_atlas::services::{GeoCache, GeoLoadError, GeoLoader};

mod common;

const FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/countries_sample.geojson"
);

/// Mirror that fails its first `failures` requests, then serves the sample.
async fn flaky_mirror(failures: usize) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/countries.geojson",
        get(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < failures {
                    Err(StatusCode::SERVICE_UNAVAILABLE)
                } else {
                    Ok(common::SAMPLE_GEOJSON)
                }
            }
        }),
    );
    let addr = common::spawn_server(router).await;
    (format!("http://{}/countries.geojson", addr), hits)
}

#[tokio::test]
async fn test_local_file_is_preferred() {
    let (url, hits) = flaky_mirror(0).await;
    let loader = GeoLoader::new(FIXTURE_PATH, url).unwrap();

    let dataset = loader.load().await.unwrap();

    assert_eq!(dataset.features().len(), 4);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_falls_back_to_mirror() {
    let (url, hits) = flaky_mirror(0).await;
    let loader = GeoLoader::new("/nonexistent/countries.geojson", url).unwrap();

    let dataset = loader.load().await.unwrap();

    assert!(dataset.feature("JP").is_some());
    assert_eq!(dataset.feature("FR").map(|f| f.name.as_str()), Some("France"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_both_sources_failing_is_unavailable() {
    let (url, _) = flaky_mirror(usize::MAX).await;
    let loader = GeoLoader::new("/nonexistent/countries.geojson", url).unwrap();

    assert!(matches!(
        loader.load().await,
        Err(GeoLoadError::Unavailable { .. })
    ));
}

#[tokio::test]
async fn test_cache_retries_after_failure() {
    let (url, hits) = flaky_mirror(1).await;
    let cache = GeoCache::new(GeoLoader::new("/nonexistent/countries.geojson", url).unwrap());

    assert!(cache.get().await.is_err());
    let first = cache.get().await.unwrap();
    let second = cache.get().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_silent_mirror_times_out_as_unavailable() {
    let addr = common::spawn_silent_server().await;
    let loader = GeoLoader::with_timeout(
        "/nonexistent/countries.geojson",
        format!("http://{}/countries.geojson", addr),
        Duration::from_millis(200),
    )
    .unwrap();
    let cache = GeoCache::new(loader);

    let result = tokio::time::timeout(Duration::from_secs(5), cache.get())
        .await
        .expect("mirror request should time out on its own");
    assert!(matches!(result, Err(GeoLoadError::Unavailable { .. })));
}
