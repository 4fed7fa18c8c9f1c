// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel page and standalone map.

use crate::context::AppContext;
use crate::error::Result;
use crate::services::{TravelBackend, VisitedIndex};
use crate::ui::{MapInteraction, TravelPage};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes<B: TravelBackend>() -> Router<Arc<AppState<B>>> {
    Router::new()
        .route("/travel", get(travel_page::<B>))
        .route("/travel/map.svg", get(map_svg::<B>))
}

/// Query parameters of the travel page.
#[derive(Debug, Default, Deserialize)]
pub struct TravelQuery {
    /// Acts as a click on this country
    pub country: Option<String>,
    /// Open the editor for a new place
    pub new: Option<String>,
    /// Outcome of the previous form post: "saved" or "deleted"
    pub notice: Option<String>,
    /// Country search text for the editor
    pub q: Option<String>,
    /// Continent filter for the editor
    pub continent: Option<String>,
}

/// Render the travel page.
async fn travel_page<B: TravelBackend>(
    State(state): State<Arc<AppState<B>>>,
    Extension(ctx): Extension<AppContext>,
    Query(query): Query<TravelQuery>,
) -> Html<String> {
    let labels = ctx.labels();
    let mut page = TravelPage::new(&state.backend, ctx);
    page.load().await;

    match query.notice.as_deref() {
        Some("saved") => page.toasts_mut().push_success(labels.saved),
        Some("deleted") => page.toasts_mut().push_success(labels.deleted),
        _ => {}
    }

    if let Some(q) = query.q.as_deref() {
        page.selector_mut().set_query(q);
    }
    page.selector_mut().set_continent(query.continent.as_deref());

    if let Some(code) = query.country.as_deref() {
        page.country_clicked(code).await;
    } else if query.new.is_some() {
        page.open_new_place();
    }

    let map = state.map_data().await;
    Html(page.render_html(&state.renderer, &map, super::today()))
}

/// The map alone, as an SVG document.
async fn map_svg<B: TravelBackend>(
    State(state): State<Arc<AppState<B>>>,
    Extension(ctx): Extension<AppContext>,
) -> Result<impl IntoResponse> {
    let index = match ctx.authenticated_session() {
        Some(session) => VisitedIndex::build(&state.backend.list_places(session).await?),
        None => VisitedIndex::default(),
    };

    let map = state.map_data().await;
    let svg = state
        .renderer
        .render_svg(&map, &index, &MapInteraction::new(), &ctx);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
