// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - geo data, projection and the travel backend.

pub mod backend;
pub mod geo;
pub mod http_backend;
pub mod memory_backend;
pub mod projection;
pub mod visited;

pub use backend::{BackendError, TravelBackend};
pub use geo::{GeoCache, GeoLoadError, GeoLoader};
pub use http_backend::HttpBackend;
pub use memory_backend::InMemoryBackend;
pub use projection::{Canvas, MercatorProjection, PathCache, PathGenerator, PathTable};
pub use visited::VisitedIndex;
