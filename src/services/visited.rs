// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Country code → status lookup used to color the map.

use crate::models::{Place, PlaceStatus};
use std::collections::HashMap;

/// At most one status per country code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitedIndex {
    statuses: HashMap<String, PlaceStatus>,
}

impl VisitedIndex {
    /// Build the index in one pass. When several places share a country,
    /// the last one in the list wins.
    pub fn build(places: &[Place]) -> Self {
        let mut statuses = HashMap::with_capacity(places.len());
        for place in places {
            statuses.insert(place.country.code.to_uppercase(), place.status);
        }
        Self { statuses }
    }

    pub fn status(&self, code: &str) -> Option<PlaceStatus> {
        self.statuses.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
