// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mercator projection and SVG path generation for country shapes.

use crate::models::GeoDataset;
use dashmap::DashMap;
use geo::{Coord, MapCoords, MultiPolygon};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_4, TAU};
use std::fmt::Write as _;
use std::sync::Arc;

/// Latitude where Mercator's y reaches ±π (the usual web-map cutoff).
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Fraction of the canvas height where the equator sits. Placed below the
/// middle since most land is in the northern hemisphere.
const EQUATOR_OFFSET: f64 = 0.6;

/// Output canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Spherical Mercator scaled to fit a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    scale: f64,
    translate: (f64, f64),
}

impl MercatorProjection {
    /// Projection where the full longitude range spans the canvas width.
    pub fn fit(canvas: Canvas) -> Self {
        let width = f64::from(canvas.width);
        let height = f64::from(canvas.height);
        Self {
            scale: width / TAU,
            translate: (width / 2.0, height * EQUATOR_OFFSET),
        }
    }

    /// Project a (longitude, latitude) pair in degrees to canvas pixels.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = lon.to_radians();
        let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = self.scale * lambda + self.translate.0;
        let y = self.translate.1 - self.scale * (FRAC_PI_4 + phi / 2.0).tan().ln();
        (x, y)
    }
}

/// Turns geometries into SVG path data for one projection.
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator {
    projection: MercatorProjection,
}

impl PathGenerator {
    pub fn new(projection: MercatorProjection) -> Self {
        Self { projection }
    }

    /// SVG path data: one `M…Z` subpath per ring.
    pub fn path(&self, geometry: &MultiPolygon<f64>) -> String {
        let projected = geometry.map_coords(|Coord { x, y }| {
            let (px, py) = self.projection.project(x, y);
            Coord { x: px, y: py }
        });

        let mut d = String::new();
        for polygon in &projected.0 {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                // Closed rings repeat the first point; `Z` closes the subpath.
                let points = match ring.0.split_last() {
                    Some((last, rest)) if Some(last) == rest.first() => rest,
                    _ => &ring.0[..],
                };
                if points.is_empty() {
                    continue;
                }
                for (i, c) in points.iter().enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(d, "{}{:.1},{:.1}", cmd, c.x, c.y);
                }
                d.push('Z');
            }
        }
        d
    }
}

/// Country code → SVG path table for one canvas.
pub type PathTable = HashMap<String, String>;

/// Memoized path tables, one per canvas size.
#[derive(Default)]
pub struct PathCache {
    tables: DashMap<Canvas, Arc<PathTable>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path table for `canvas`, computed on first request for that size.
    ///
    /// Features sharing a code (e.g., several "-99" entries) are keyed by
    /// their position instead so none is dropped.
    pub fn paths(&self, dataset: &GeoDataset, canvas: Canvas) -> Arc<PathTable> {
        if let Some(table) = self.tables.get(&canvas) {
            return table.clone();
        }

        let generator = PathGenerator::new(MercatorProjection::fit(canvas));
        let mut table = PathTable::with_capacity(dataset.features().len());
        for (i, feature) in dataset.features().iter().enumerate() {
            table.insert(feature_key(i, &feature.code), generator.path(&feature.geometry));
        }

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            count = table.len(),
            "Computed country paths"
        );

        self.tables
            .entry(canvas)
            .or_insert_with(|| Arc::new(table))
            .clone()
    }

    /// Number of canvases with a computed table.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Key for a feature's path in a `PathTable`.
pub fn feature_key(index: usize, code: &str) -> String {
    if crate::models::geo::is_selectable_code(code) {
        code.to_string()
    } else {
        format!("{}#{}", code, index)
    }
}
