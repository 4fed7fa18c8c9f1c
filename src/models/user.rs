//! Signed-in user as reported by the backend session endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The user owning the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Backend user ID
    pub id: i64,
    /// Display name
    #[validate(length(min = 1))]
    pub username: String,
}
