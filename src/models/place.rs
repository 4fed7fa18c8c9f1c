// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! A user's relationship to a country, and the payload used to write one.

use crate::models::Country;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// How the user relates to a country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceStatus {
    #[default]
    Visited,
    Wishlist,
    Lived,
    Living,
}

impl PlaceStatus {
    /// All statuses in display order.
    pub const ALL: [PlaceStatus; 4] = [
        PlaceStatus::Visited,
        PlaceStatus::Wishlist,
        PlaceStatus::Lived,
        PlaceStatus::Living,
    ];

    /// Wire form (e.g., "VISITED").
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceStatus::Visited => "VISITED",
            PlaceStatus::Wishlist => "WISHLIST",
            PlaceStatus::Lived => "LIVED",
            PlaceStatus::Living => "LIVING",
        }
    }

    /// Parse the wire form, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        PlaceStatus::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Star rating in `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&stars).then_some(Self(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {}", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

/// A place record owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    #[validate(nested)]
    pub country: Country,
    #[serde(default)]
    pub city_name: Option<String>,
    pub status: PlaceStatus,
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

/// Fields written on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInput {
    pub country_id: i64,
    #[validate(length(max = 120))]
    pub city_name: Option<String>,
    pub status: PlaceStatus,
    pub visit_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub rating: Option<Rating>,
    pub favorite: bool,
}
