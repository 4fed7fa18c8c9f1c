// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contract of the external travel backend.
//!
//! The backend owns users, places, countries and statistics. This service
//! only reads the fields it renders and writes `PlaceInput`.

use crate::context::Session;
use crate::models::{Country, CurrentUser, Place, PlaceInput, TravelStats};
use std::future::Future;
use validator::Validate;

/// Operations the travel page needs from the backend.
pub trait TravelBackend: Send + Sync + 'static {
    /// Resolve the user behind a session, `None` if the session is not valid.
    fn current_user(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Option<CurrentUser>, BackendError>> + Send;

    fn list_places(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Place>, BackendError>> + Send;

    fn create_place(
        &self,
        session: &Session,
        input: &PlaceInput,
    ) -> impl Future<Output = Result<Place, BackendError>> + Send;

    fn update_place(
        &self,
        session: &Session,
        place_id: i64,
        input: &PlaceInput,
    ) -> impl Future<Output = Result<Place, BackendError>> + Send;

    fn delete_place(
        &self,
        session: &Session,
        place_id: i64,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn toggle_favorite(
        &self,
        session: &Session,
        place_id: i64,
    ) -> impl Future<Output = Result<Place, BackendError>> + Send;

    fn list_countries(&self) -> impl Future<Output = Result<Vec<Country>, BackendError>> + Send;

    fn list_continents(&self) -> impl Future<Output = Result<Vec<String>, BackendError>> + Send;

    /// Look up a country by ISO code, `None` if the backend has no such country.
    fn country_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Country>, BackendError>> + Send;

    fn travel_stats(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<TravelStats, BackendError>> + Send;
}

/// Errors talking to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Message the backend meant for the user, if it sent one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            BackendError::Status { message, .. } if !message.trim().is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// Reject a parsed response that violates its schema.
pub(crate) fn validated<T: Validate>(value: T) -> Result<T, BackendError> {
    value
        .validate()
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
    Ok(value)
}

/// Like `validated`, for every element of a list.
pub(crate) fn validated_all<T: Validate>(values: Vec<T>) -> Result<Vec<T>, BackendError> {
    for value in &values {
        value
            .validate()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_only_for_backend_messages() {
        let err = BackendError::Status {
            status: 409,
            message: "Place already exists".to_string(),
        };
        assert_eq!(err.user_message(), Some("Place already exists"));

        let blank = BackendError::Status {
            status: 500,
            message: " ".to_string(),
        };
        assert_eq!(blank.user_message(), None);
        assert_eq!(BackendError::Unauthorized.user_message(), None);
        assert_eq!(
            BackendError::Transport("connection refused".to_string()).user_message(),
            None
        );
    }

    #[test]
    fn test_validated_all_rejects_bad_element() {
        let countries: Vec<Country> = serde_json::from_str(
            r#"[{"id":1,"code":"FR","name":"France"},{"id":2,"code":"","name":"Nowhere"}]"#,
        )
        .unwrap();
        assert!(matches!(
            validated_all(countries),
            Err(BackendError::InvalidResponse(_))
        ));
    }
}
