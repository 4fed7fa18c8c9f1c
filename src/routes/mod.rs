// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod pages;
pub mod places;

use crate::middleware::resolve_session;
use crate::services::TravelBackend;
use crate::AppState;
use axum::{middleware, routing::get, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Latest allowed visit date.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build the complete router with all routes.
pub fn create_router<B: TravelBackend>(state: Arc<AppState<B>>) -> Router {
    // Every page route needs to know who is looking
    let page_routes = Router::new()
        .merge(pages::routes())
        .merge(places::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_session::<B>,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(page_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
