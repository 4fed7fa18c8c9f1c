// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Country reference data served by the travel backend.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A country as listed by the backend. Read-only in this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    /// ISO 3166-1 alpha-2 code (e.g., "FR")
    #[validate(length(equal = 2))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub continent: String,
    /// Flag emoji or image URL
    #[serde(default)]
    pub flag: Option<String>,
}

impl Country {
    /// Flag to display, falling back to the first letter of the name.
    pub fn flag_or_initial(&self) -> String {
        match self.flag.as_deref() {
            Some(flag) if !flag.trim().is_empty() => flag.to_string(),
            _ => self
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string()),
        }
    }

    /// Whether the flag is an image URL rather than an emoji glyph.
    pub fn flag_is_url(&self) -> bool {
        self.flag
            .as_deref()
            .is_some_and(|f| f.starts_with("http://") || f.starts_with("https://") || f.starts_with('/'))
    }
}
