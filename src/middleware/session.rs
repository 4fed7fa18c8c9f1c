// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session middleware.
//!
//! Resolves who is looking at the page and in which language, and hands
//! the result to handlers as an explicit `AppContext` extension.

use crate::context::{AppContext, Language, Session};
use crate::services::TravelBackend;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie holding the viewer's language tag.
pub const LANGUAGE_COOKIE: &str = "lang";

/// Build the request's `AppContext`. Never rejects: a missing or invalid
/// session simply yields an anonymous viewer.
pub async fn resolve_session<B: TravelBackend>(
    State(state): State<Arc<AppState<B>>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let language = jar
        .get(LANGUAGE_COOKIE)
        .and_then(|c| Language::from_tag(c.value()))
        .unwrap_or(state.config.default_language);

    let session = jar
        .get(&state.config.session_cookie)
        .map(|c| c.value().trim())
        .filter(|token| !token.is_empty())
        .map(Session::new);

    let ctx = match session {
        Some(session) => match state.backend.current_user(&session).await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = user.id, "Resolved session");
                AppContext::signed_in(language, user, session)
            }
            Ok(None) => {
                tracing::debug!("Session not recognized by backend");
                AppContext::anonymous(language)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve session");
                AppContext::anonymous(language)
            }
        },
        None => AppContext::anonymous(language),
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}
