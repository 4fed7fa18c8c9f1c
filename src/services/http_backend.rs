// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the travel backend.
//!
//! Handles:
//! - Session cookie forwarding
//! - Mapping non-2xx responses to typed errors with the backend's message
//! - Schema validation of every response body

use crate::context::Session;
use crate::models::{Country, CurrentUser, Place, PlaceInput, TravelStats};
use crate::services::backend::{validated, validated_all, BackendError, TravelBackend};
use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Upper bound on one backend request, connect through body.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Travel backend reached over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    cookie_name: String,
}

impl HttpBackend {
    /// Create a client for `base_url`, sending sessions in `cookie_name`.
    pub fn new(
        base_url: impl Into<String>,
        cookie_name: impl Into<String>,
    ) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, cookie_name, DEFAULT_HTTP_TIMEOUT)
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        cookie_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("failed building HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie_name: cookie_name.into(),
        })
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match session {
            Some(session) => builder.header(
                header::COOKIE,
                format!("{}={}", self.cookie_name, session.token()),
            ),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        check_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<T, BackendError> {
        let response = self.send(self.request(Method::GET, path, session)).await?;
        parse_json(response).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        session: &Session,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .send(self.request(method, path, Some(session)).json(body))
            .await?;
        parse_json(response).await
    }
}

impl TravelBackend for HttpBackend {
    async fn current_user(&self, session: &Session) -> Result<Option<CurrentUser>, BackendError> {
        match self.get_json("/api/auth/me", Some(session)).await {
            Ok(user) => Ok(Some(validated(user)?)),
            Err(BackendError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_places(&self, session: &Session) -> Result<Vec<Place>, BackendError> {
        let places = self.get_json("/api/places", Some(session)).await?;
        validated_all(places)
    }

    async fn create_place(
        &self,
        session: &Session,
        input: &PlaceInput,
    ) -> Result<Place, BackendError> {
        let place = self
            .send_json(Method::POST, "/api/places", session, input)
            .await?;
        validated(place)
    }

    async fn update_place(
        &self,
        session: &Session,
        place_id: i64,
        input: &PlaceInput,
    ) -> Result<Place, BackendError> {
        let path = format!("/api/places/{}", place_id);
        let place = self.send_json(Method::PUT, &path, session, input).await?;
        validated(place)
    }

    async fn delete_place(&self, session: &Session, place_id: i64) -> Result<(), BackendError> {
        let path = format!("/api/places/{}", place_id);
        self.send(self.request(Method::DELETE, &path, Some(session)))
            .await?;
        Ok(())
    }

    async fn toggle_favorite(&self, session: &Session, place_id: i64) -> Result<Place, BackendError> {
        let path = format!("/api/places/{}/favorite", place_id);
        let response = self
            .send(self.request(Method::PATCH, &path, Some(session)))
            .await?;
        validated(parse_json(response).await?)
    }

    async fn list_countries(&self) -> Result<Vec<Country>, BackendError> {
        let countries = self.get_json("/api/countries", None).await?;
        validated_all(countries)
    }

    async fn list_continents(&self) -> Result<Vec<String>, BackendError> {
        self.get_json("/api/countries/continents", None).await
    }

    async fn country_by_code(&self, code: &str) -> Result<Option<Country>, BackendError> {
        let path = format!("/api/countries/code/{}", urlencoding::encode(code));
        match self.get_json(&path, None).await {
            Ok(country) => Ok(Some(validated(country)?)),
            Err(BackendError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn travel_stats(&self, session: &Session) -> Result<TravelStats, BackendError> {
        let stats = self.get_json("/api/places/stats", Some(session)).await?;
        validated(stats)
    }
}

/// Check response status and return a typed error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
        StatusCode::NOT_FOUND => Err(BackendError::NotFound(url)),
        _ => {
            tracing::warn!(status = status.as_u16(), path = %url, message = %message, "Backend request failed");
            Err(BackendError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Parse a JSON body into the typed schema.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

/// Pull the user-facing message out of a backend error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message":"City name too long"}"#),
            "City name too long"
        );
        assert_eq!(error_message(r#"{"error":"Bad date"}"#), "Bad date");
        assert_eq!(error_message("<html>oops</html>"), "");
        assert_eq!(error_message(r#"{"status":500}"#), "");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/", "session").unwrap();
        assert_eq!(backend.base_url, "http://localhost:8080");
    }
}
