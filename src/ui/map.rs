// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! World map rendering and pointer interaction.
//!
//! Countries are drawn as SVG paths colored by the viewer's status for
//! that country. Hover state and the tooltip are tracked in
//! `MapInteraction`, which caps tooltip recomputation to one per frame.

use crate::context::AppContext;
use crate::models::geo::is_selectable_code;
use crate::models::{GeoDataset, PlaceStatus};
use crate::services::projection::{feature_key, Canvas, PathTable};
use crate::services::VisitedIndex;
use crate::ui::html::escape;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Minimum time between tooltip recomputations for the same country.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const OPACITY_ACTIVE: f64 = 1.0;
const OPACITY_IDLE: f64 = 0.7;

/// Fill colors per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPalette {
    pub visited: &'static str,
    pub wishlist: &'static str,
    pub lived: &'static str,
    pub living: &'static str,
    pub unvisited: &'static str,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            visited: "#4caf50",
            wishlist: "#ff9800",
            lived: "#2196f3",
            living: "#9c27b0",
            unvisited: "#d5d8dc",
        }
    }
}

impl StatusPalette {
    pub fn fill(&self, status: Option<PlaceStatus>) -> &'static str {
        match status {
            Some(PlaceStatus::Visited) => self.visited,
            Some(PlaceStatus::Wishlist) => self.wishlist,
            Some(PlaceStatus::Lived) => self.lived,
            Some(PlaceStatus::Living) => self.living,
            None => self.unvisited,
        }
    }
}

/// Floating label next to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Pointer position relative to the map, in pixels
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub status: Option<PlaceStatus>,
}

/// Hover, selection and tooltip state of the map.
#[derive(Debug, Default)]
pub struct MapInteraction {
    hovered: Option<String>,
    selected: Option<String>,
    tooltip: Option<Tooltip>,
    last_update: Option<Instant>,
}

impl MapInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved over `code` at map-local `point`.
    ///
    /// Returns whether the tooltip was recomputed. Moves within one frame
    /// over the same country are dropped; entering a new country always
    /// updates so the label never names the wrong country.
    pub fn pointer_move(
        &mut self,
        code: &str,
        name: &str,
        point: (f64, f64),
        index: &VisitedIndex,
        now: Instant,
    ) -> bool {
        let same_country = self.hovered.as_deref() == Some(code);
        let within_frame = self
            .last_update
            .is_some_and(|last| now.saturating_duration_since(last) < FRAME_INTERVAL);
        if same_country && within_frame {
            return false;
        }

        self.hovered = Some(code.to_string());
        self.tooltip = Some(Tooltip {
            x: point.0,
            y: point.1,
            name: name.to_string(),
            status: index.status(code),
        });
        self.last_update = Some(now);
        true
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        self.tooltip = None;
        self.last_update = None;
    }

    /// Country clicked. Calls `on_select` with the ISO code unless the code
    /// is the "no country" sentinel. Returns whether it was called.
    pub fn click<F: FnOnce(&str)>(&mut self, code: &str, on_select: F) -> bool {
        if !is_selectable_code(code) {
            return false;
        }
        self.selected = Some(code.to_string());
        on_select(code);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }
}

/// What the map has to draw.
#[derive(Debug, Clone)]
pub enum MapData {
    Loading,
    /// Both boundary sources failed
    Unavailable,
    Ready {
        dataset: Arc<GeoDataset>,
        paths: Arc<PathTable>,
    },
}

/// Draws the map as an SVG document fragment.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    canvas: Canvas,
    palette: StatusPalette,
}

impl MapRenderer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            palette: StatusPalette::default(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn palette(&self) -> &StatusPalette {
        &self.palette
    }

    /// Fill opacity for a country.
    pub fn opacity(&self, code: &str, index: &VisitedIndex, interaction: &MapInteraction) -> f64 {
        let active = interaction.hovered() == Some(code)
            || interaction.selected() == Some(code)
            || index.status(code).is_some();
        if active {
            OPACITY_ACTIVE
        } else {
            OPACITY_IDLE
        }
    }

    /// Render the map. Countries link to the editor for signed-in viewers.
    pub fn render_svg(
        &self,
        data: &MapData,
        index: &VisitedIndex,
        interaction: &MapInteraction,
        ctx: &AppContext,
    ) -> String {
        let labels = ctx.labels();
        let Canvas { width, height } = self.canvas;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="travel-map" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{title}">"#,
            w = width,
            h = height,
            title = escape(labels.page_title),
        );
        svg.push_str(&format!(
            r##"<rect width="{}" height="{}" fill="#eaf4fb"/>"##,
            width, height
        ));

        let (dataset, paths) = match data {
            MapData::Ready { dataset, paths } => (dataset, paths),
            MapData::Loading => {
                svg.push_str(&self.centered_text(labels.map_loading, "map-loading"));
                svg.push_str("</svg>");
                return svg;
            }
            MapData::Unavailable => {
                svg.push_str(&self.centered_text(labels.map_unavailable, "map-error"));
                svg.push_str("</svg>");
                return svg;
            }
        };

        let linkable = ctx.user.is_some();
        for (i, feature) in dataset.features().iter().enumerate() {
            let Some(d) = paths.get(&feature_key(i, &feature.code)) else {
                continue;
            };
            let status = index.status(&feature.code);
            let status_label = status.map_or(labels.unvisited, |s| labels.status(s));
            let path = format!(
                r##"<path d="{d}" data-code="{code}" fill="{fill}" fill-opacity="{opacity}" stroke="#ffffff" stroke-width="0.5"><title>{name} ({status})</title></path>"##,
                d = d,
                code = escape(&feature.code),
                fill = self.palette.fill(status),
                opacity = self.opacity(&feature.code, index, interaction),
                name = escape(&feature.name),
                status = escape(status_label),
            );

            if linkable && feature.is_selectable() {
                svg.push_str(&format!(
                    r#"<a href="/travel?country={}" aria-label="{}">{}</a>"#,
                    urlencoding::encode(&feature.code),
                    escape(&feature.name),
                    path
                ));
            } else {
                svg.push_str(&path);
            }
        }

        if let Some(tooltip) = interaction.tooltip() {
            let status_label = tooltip.status.map_or(labels.unvisited, |s| labels.status(s));
            svg.push_str(&format!(
                r##"<g class="tooltip" transform="translate({:.1},{:.1})"><rect width="180" height="40" rx="4" fill="#333333" fill-opacity="0.9"/><text x="8" y="17" fill="#ffffff" font-size="13">{}</text><text x="8" y="33" fill="#dddddd" font-size="11">{}</text></g>"##,
                tooltip.x + 12.0,
                tooltip.y + 12.0,
                escape(&tooltip.name),
                escape(status_label),
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    fn centered_text(&self, text: &str, class: &str) -> String {
        format!(
            r##"<text class="{}" x="{}" y="{}" text-anchor="middle" fill="#555555" font-size="18">{}</text>"##,
            class,
            self.canvas.width / 2,
            self.canvas.height / 2,
            escape(text)
        )
    }

    /// Legend of status colors.
    pub fn render_legend(&self, ctx: &AppContext) -> String {
        let labels = ctx.labels();
        let mut html = String::from(r#"<ul class="map-legend">"#);
        let entries = PlaceStatus::ALL
            .iter()
            .map(|s| (self.palette.fill(Some(*s)), labels.status(*s)))
            .chain(std::iter::once((self.palette.unvisited, labels.unvisited)));
        for (color, label) in entries {
            html.push_str(&format!(
                r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
                color,
                escape(label)
            ));
        }
        html.push_str("</ul>");
        html
    }
}
