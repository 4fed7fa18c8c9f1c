// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod country;
pub mod geo;
pub mod place;
pub mod stats;
pub mod user;

pub use country::Country;
pub use geo::{GeoDataset, GeoFeature};
pub use place::{Place, PlaceInput, PlaceStatus, Rating};
pub use stats::{Badge, ContinentStat, Ranking, TravelStats};
pub use user::CurrentUser;
