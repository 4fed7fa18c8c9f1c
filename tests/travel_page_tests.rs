// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel page rendering tests.
//!
//! These tests verify that:
//! 1. Visitors who are not signed in see the map with no place data
//! 2. Signed-in users see their places colored on the map
//! 3. Query parameters open the editor and show notifications

use axum::http::{header, StatusCode};
use tower::ServiceExt;
use travel_atlas::models::PlaceStatus;

mod common;

use common::{body_string, create_test_app, demo_cookie, get, seed_place};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#""status":"ok""#));
}

#[tokio::test]
async fn test_anonymous_page_has_map_without_place_data() {
    let (app, state) = create_test_app();

    let response = app.oneshot(get("/travel", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Frame-Options").unwrap(),
        "DENY"
    );
    let body = body_string(response).await;
    assert!(body.contains("Log in or register"));
    assert!(body.contains(r#"data-code="JP""#));
    assert!(!body.contains("<a href=\"/travel?country="));
    assert!(!body.contains("stats-panel"));
    assert_eq!(state.backend.requests(), 0);
}

#[tokio::test]
async fn test_unknown_session_is_treated_as_anonymous() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(get("/travel", Some("session=bogus")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("sign-in-prompt"));
}

#[tokio::test]
async fn test_signed_in_page_colors_visited_countries() {
    let (app, state) = create_test_app();
    seed_place(&state.backend, "FR", PlaceStatus::Visited).await;
    seed_place(&state.backend, "JP", PlaceStatus::Wishlist).await;

    let cookie = demo_cookie();
    let response = app.oneshot(get("/travel", Some(&cookie))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.contains("sign-in-prompt"));
    assert!(body.contains(r##"data-code="FR" fill="#4caf50""##));
    assert!(body.contains(r##"data-code="JP" fill="#ff9800""##));
    assert!(body.contains(r##"data-code="KE" fill="#d5d8dc""##));
    assert!(body.contains(r#"<a href="/travel?country=FR""#));
    // The feature without a code is drawn but never clickable
    assert!(body.contains(r#"data-code="-99""#));
    assert!(!body.contains("country=-99"));
    assert!(body.contains("stats-panel"));
    assert!(body.contains(r#"<section class="places">"#));
}

#[tokio::test]
async fn test_country_query_preselects_country_in_editor() {
    let (app, _) = create_test_app();

    let cookie = demo_cookie();
    let response = app
        .oneshot(get("/travel?country=jp", Some(&cookie)))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(r#"<dialog class="place-editor" open>"#));
    assert!(body.contains(r#"<option value="JP" selected>"#));
}

#[tokio::test]
async fn test_country_query_for_existing_place_opens_edit() {
    let (app, state) = create_test_app();
    let id = seed_place(&state.backend, "KE", PlaceStatus::Lived).await;

    let cookie = demo_cookie();
    let response = app
        .oneshot(get("/travel?country=KE", Some(&cookie)))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(&format!(
        r#"<input type="hidden" name="place_id" value="{}">"#,
        id
    )));
}

#[tokio::test]
async fn test_notice_shows_success_toast() {
    let (app, _) = create_test_app();

    let cookie = demo_cookie();
    let response = app
        .oneshot(get("/travel?notice=saved", Some(&cookie)))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("toast-success"));
    assert!(body.contains("Place saved."));
}

#[tokio::test]
async fn test_language_cookie_selects_french() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(get("/travel", Some("lang=fr-CA")))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(r#"<html lang="fr">"#));
    assert!(body.contains("Ma carte de voyage"));
}

#[tokio::test]
async fn test_map_svg_endpoint() {
    let (app, state) = create_test_app();
    seed_place(&state.backend, "FR", PlaceStatus::Living).await;

    let cookie = demo_cookie();
    let response = app
        .oneshot(get("/travel/map.svg", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/svg+xml"
    );
    let body = body_string(response).await;
    assert!(body.starts_with("<svg"));
    assert!(body.contains(r##"data-code="FR" fill="#9c27b0""##));
}

#[tokio::test]
async fn test_session_lookup_failure_falls_back_to_anonymous() {
    let (app, state) = create_test_app();
    state
        .backend
        .fail_next(travel_atlas::services::BackendError::Transport(
            "connection refused".to_string(),
        ));

    let cookie = demo_cookie();
    let response = app.oneshot(get("/travel", Some(&cookie))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("sign-in-prompt"));
}

#[tokio::test]
async fn test_country_search_filters_editor_list() {
    let (app, _) = create_test_app();

    let cookie = demo_cookie();
    let response = app
        .clone()
        .oneshot(get("/travel?new=1&q=jap", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains(r#"<option value="JP">"#));
    assert!(!body.contains(r#"<option value="FR">"#));
    assert!(body.contains(r#"name="q" value="jap""#));

    let response = app
        .oneshot(get("/travel?new=1&continent=Africa", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains(r#"<option value="KE">"#));
    assert!(!body.contains(r#"<option value="JP">"#));
    assert!(body.contains("<option selected>Africa</option>"));
}

#[tokio::test]
async fn test_search_keeps_edited_country_selected() {
    let (app, state) = create_test_app();
    let place_id = seed_place(&state.backend, "KE", PlaceStatus::Visited).await;

    let cookie = demo_cookie();
    let response = app
        .oneshot(get("/travel?country=KE&q=jap", Some(&cookie)))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(&format!(r#"name="place_id" value="{}""#, place_id)));
    assert!(body.contains(r#"<option value="KE" selected>"#));
    assert!(body.contains(r#"<option value="JP">"#));
}

#[tokio::test]
async fn test_search_form_carries_clicked_country() {
    let (app, _) = create_test_app();

    let cookie = demo_cookie();
    let response = app
        .oneshot(get("/travel?country=JP&continent=Africa", Some(&cookie)))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains(r#"<input type="hidden" name="country" value="JP">"#));
    assert!(!body.contains(r#"<input type="hidden" name="new" value="1">"#));
    assert!(body.contains(r#"<option value="JP" selected>"#));
}
