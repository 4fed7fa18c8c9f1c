// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place form posts: save, favorite, delete.
//!
//! Successful posts redirect back to the travel page. Failures re-render
//! the page with the notification and, for saves, the editor still open.

use crate::context::AppContext;
use crate::error::{AppError, Result};
use crate::models::PlaceStatus;
use crate::services::TravelBackend;
use crate::ui::TravelPage;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::post,
    Extension, Form, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes<B: TravelBackend>() -> Router<Arc<AppState<B>>> {
    Router::new()
        .route("/travel/places", post(save_place::<B>))
        .route("/travel/places/{id}/favorite", post(toggle_favorite::<B>))
        .route("/travel/places/{id}/delete", post(delete_place::<B>))
}

// ─── Save ────────────────────────────────────────────────────

/// Editor form fields. Browsers send empty strings for blank inputs, so
/// everything arrives as text and is parsed here.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceFormFields {
    pub place_id: Option<String>,
    pub country_code: Option<String>,
    pub city_name: Option<String>,
    pub status: Option<String>,
    pub visit_date: Option<String>,
    pub rating: Option<String>,
    pub notes: Option<String>,
    pub favorite: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Create or update a place from the editor form.
async fn save_place<B: TravelBackend>(
    State(state): State<Arc<AppState<B>>>,
    Extension(ctx): Extension<AppContext>,
    Form(fields): Form<PlaceFormFields>,
) -> Result<Response> {
    if ctx.authenticated_session().is_none() {
        return Err(AppError::Unauthorized);
    }
    let today = super::today();

    let place_id = non_empty(&fields.place_id)
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid place id {:?}", id)))
        })
        .transpose()?;
    let status = match non_empty(&fields.status) {
        Some(raw) => PlaceStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status {:?}", raw)))?,
        None => PlaceStatus::default(),
    };
    let visit_date = non_empty(&fields.visit_date)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("Invalid visit date {:?}", raw)))
        })
        .transpose()?;
    let rating = match non_empty(&fields.rating) {
        Some(raw) => raw
            .parse::<u8>()
            .map_err(|_| AppError::BadRequest(format!("Invalid rating {:?}", raw)))?,
        None => 0,
    };

    let mut page = TravelPage::new(&state.backend, ctx);
    page.load().await;

    match place_id {
        Some(id) => {
            let place = page
                .places()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("place {}", id)))?;
            page.editor_mut().open_edit(&place);
        }
        None => page.open_new_place(),
    }

    let country = match non_empty(&fields.country_code) {
        Some(code) => match page.selector().find(code).cloned() {
            Some(country) => Some(country),
            None => state.backend.country_by_code(code).await?,
        },
        None => None,
    };

    let date_result = {
        let form = page.editor_mut().form_mut();
        form.country = country;
        form.city_name = fields.city_name.clone().unwrap_or_default();
        form.status = status;
        form.notes = fields.notes.clone().unwrap_or_default();
        form.favorite = fields.favorite.is_some();
        form.set_rating(rating);
        form.set_visit_date(visit_date, today)
    };

    let outcome = match date_result {
        Ok(()) => page.submit_editor().await.map(|_| ()),
        Err(e) => {
            page.toasts_mut().push_error(e.to_string());
            Err(e)
        }
    };

    match outcome {
        Ok(()) => Ok(Redirect::to("/travel?notice=saved").into_response()),
        Err(e) => {
            tracing::info!(error = %e, "Place form rejected");
            let map = state.map_data().await;
            let html = page.render_html(&state.renderer, &map, today);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

// ─── Favorite ────────────────────────────────────────────────

/// Toggle a place's favorite flag.
async fn toggle_favorite<B: TravelBackend>(
    State(state): State<Arc<AppState<B>>>,
    Extension(ctx): Extension<AppContext>,
    Path(place_id): Path<i64>,
) -> Result<Response> {
    if ctx.authenticated_session().is_none() {
        return Err(AppError::Unauthorized);
    }

    let mut page = TravelPage::new(&state.backend, ctx);
    if page.toggle_favorite(place_id).await {
        return Ok(Redirect::to("/travel").into_response());
    }

    page.load().await;
    let map = state.map_data().await;
    let html = page.render_html(&state.renderer, &map, super::today());
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

// ─── Delete ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DeleteFields {
    pub confirm: Option<String>,
}

/// Delete a place once the user has confirmed; otherwise ask first.
async fn delete_place<B: TravelBackend>(
    State(state): State<Arc<AppState<B>>>,
    Extension(ctx): Extension<AppContext>,
    Path(place_id): Path<i64>,
    Form(fields): Form<DeleteFields>,
) -> Result<Response> {
    if ctx.authenticated_session().is_none() {
        return Err(AppError::Unauthorized);
    }
    let confirmed = fields.confirm.as_deref() == Some("yes");

    let mut page = TravelPage::new(&state.backend, ctx);
    if !confirmed {
        page.load().await;
        if !page.places().iter().any(|p| p.id == place_id) {
            return Err(AppError::NotFound(format!("place {}", place_id)));
        }
        return Ok(Html(page.render_delete_confirmation(place_id)).into_response());
    }

    if page.delete_place(place_id, true).await {
        return Ok(Redirect::to("/travel?notice=deleted").into_response());
    }

    page.load().await;
    let map = state.map_data().await;
    let html = page.render_html(&state.renderer, &map, super::today());
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}
