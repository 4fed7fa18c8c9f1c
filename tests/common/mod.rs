// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use travel_atlas::config::Config;
use travel_atlas::models::{GeoDataset, PlaceInput, PlaceStatus};
use travel_atlas::routes::create_router;
use travel_atlas::services::memory_backend::{demo_countries, DEMO_SESSION};
use travel_atlas::services::{GeoCache, GeoLoader, InMemoryBackend, TravelBackend};
use travel_atlas::AppState;

/// Sample boundaries: France, Japan, Kenya and one feature without a code.
#[allow(dead_code)]
pub const SAMPLE_GEOJSON: &str = include_str!("../fixtures/countries_sample.geojson");

#[allow(dead_code)]
pub fn sample_dataset() -> GeoDataset {
    GeoLoader::load_from_json(SAMPLE_GEOJSON).expect("fixture should parse")
}

/// Create a test app backed by the in-memory demo backend.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState<InMemoryBackend>>) {
    let state = Arc::new(AppState::new(
        Config::default(),
        InMemoryBackend::demo(),
        GeoCache::preloaded(sample_dataset()),
    ));
    (create_router(state.clone()), state)
}

/// Cookie header value for the demo user.
#[allow(dead_code)]
pub fn demo_cookie() -> String {
    format!("{}={}", Config::default().session_cookie, DEMO_SESSION)
}

#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Demo country ID for an ISO code.
#[allow(dead_code)]
pub fn country_id(code: &str) -> i64 {
    demo_countries()
        .into_iter()
        .find(|c| c.code == code)
        .map(|c| c.id)
        .unwrap()
}

/// Store a place for the demo user directly in the backend.
#[allow(dead_code)]
pub async fn seed_place(backend: &InMemoryBackend, code: &str, status: PlaceStatus) -> i64 {
    let session = travel_atlas::context::Session::new(DEMO_SESSION);
    let input = PlaceInput {
        country_id: country_id(code),
        city_name: None,
        status,
        visit_date: None,
        notes: None,
        rating: None,
        favorite: false,
    };
    backend.create_place(&session, &input).await.unwrap().id
}

/// Serve `router` on an ephemeral local port.
#[allow(dead_code)]
pub async fn spawn_server(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Accept connections and never answer on them.
#[allow(dead_code)]
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    addr
}
