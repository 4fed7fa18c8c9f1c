// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel page container.
//!
//! Owns the place list, statistics, visited index, editor, map interaction
//! and notifications. Children only ever see borrows. The list and stats
//! are replaced wholesale after each successful backend round trip.

use crate::context::{AppContext, Session};
use crate::models::{Place, TravelStats};
use crate::services::backend::{BackendError, TravelBackend};
use crate::services::VisitedIndex;
use crate::ui::editor::{CountrySelector, EditorError, PlaceEditor};
use crate::ui::html::escape;
use crate::ui::map::{MapData, MapInteraction, MapRenderer};
use crate::ui::stats_panel;
use crate::ui::toast::Toasts;
use chrono::NaiveDate;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Identifies one reload request. Only the latest issued ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket {
    generation: u64,
}

/// The travel page and everything it owns.
pub struct TravelPage<'a, B> {
    backend: &'a B,
    ctx: AppContext,
    places: Vec<Place>,
    stats: Option<TravelStats>,
    index: VisitedIndex,
    selector: CountrySelector,
    editor: PlaceEditor,
    map: MapInteraction,
    toasts: Toasts,
    issued: u64,
    cancel: CancellationToken,
}

impl<'a, B: TravelBackend> TravelPage<'a, B> {
    pub fn new(backend: &'a B, ctx: AppContext) -> Self {
        Self {
            backend,
            ctx,
            places: Vec::new(),
            stats: None,
            index: VisitedIndex::default(),
            selector: CountrySelector::default(),
            editor: PlaceEditor::new(),
            map: MapInteraction::new(),
            toasts: Toasts::new(),
            issued: 0,
            cancel: CancellationToken::new(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn is_signed_in(&self) -> bool {
        self.ctx.authenticated_session().is_some()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn stats(&self) -> Option<&TravelStats> {
        self.stats.as_ref()
    }

    pub fn index(&self) -> &VisitedIndex {
        &self.index
    }

    pub fn editor(&self) -> &PlaceEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PlaceEditor {
        &mut self.editor
    }

    pub fn selector(&self) -> &CountrySelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut CountrySelector {
        &mut self.selector
    }

    pub fn map_interaction(&self) -> &MapInteraction {
        &self.map
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    // ─── Lifecycle ───────────────────────────────────────────────

    /// Token cancelled when the page is torn down.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tear down; responses arriving afterwards are ignored.
    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    /// Initial load. Viewers who are not signed in trigger no backend
    /// requests at all; the map alone is shown to them.
    pub async fn load(&mut self) {
        if !self.is_signed_in() {
            return;
        }

        match self.backend.list_countries().await {
            Ok(countries) => self.selector = CountrySelector::new(countries),
            Err(e) => tracing::warn!(error = %e, "Failed to load countries"),
        }
        self.reload().await;
    }

    /// Issue a reload ticket; `None` when nobody is signed in.
    pub fn begin_reload(&mut self) -> Option<ReloadTicket> {
        self.ctx.authenticated_session()?;
        self.issued += 1;
        Some(ReloadTicket {
            generation: self.issued,
        })
    }

    /// Apply a reload response. Responses for superseded tickets or after
    /// unmount are dropped. Returns whether state changed.
    pub fn apply_reload(
        &mut self,
        ticket: ReloadTicket,
        result: Result<(Vec<Place>, TravelStats), BackendError>,
    ) -> bool {
        if self.cancel.is_cancelled() {
            tracing::debug!("Dropping reload response after unmount");
            return false;
        }
        if ticket.generation != self.issued {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.issued,
                "Dropping superseded reload response"
            );
            return false;
        }

        match result {
            Ok((places, stats)) => {
                self.index = VisitedIndex::build(&places);
                self.places = places;
                self.stats = Some(stats);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload places");
                self.toasts.push_error(self.ctx.labels().load_failed);
                false
            }
        }
    }

    /// Fetch places and stats together and apply them.
    pub async fn reload(&mut self) -> bool {
        let Some(session) = self.ctx.authenticated_session().cloned() else {
            return false;
        };
        let Some(ticket) = self.begin_reload() else {
            return false;
        };
        let backend = self.backend;
        let cancel = self.cancel.clone();

        let result = tokio::select! {
            _ = cancel.cancelled() => return false,
            result = fetch_places_and_stats(backend, &session) => result,
        };
        self.apply_reload(ticket, result)
    }

    // ─── Map ─────────────────────────────────────────────────────

    /// Pointer moved over a country on the map.
    pub fn pointer_moved(&mut self, code: &str, name: &str, point: (f64, f64), now: Instant) -> bool {
        self.map.pointer_move(code, name, point, &self.index, now)
    }

    pub fn pointer_left(&mut self) {
        self.map.pointer_leave();
    }

    /// Country clicked: edit the existing place for it, or start a new one
    /// with the country preselected.
    pub async fn country_clicked(&mut self, code: &str) -> bool {
        if !self.is_signed_in() {
            return false;
        }

        let mut clicked = None;
        if !self.map.click(code, |c| clicked = Some(c.to_uppercase())) {
            return false;
        }
        let Some(code) = clicked else {
            return false;
        };

        // Same choice as the index when several places share a country.
        if let Some(place) = self.places.iter().rev().find(|p| p.country.code.eq_ignore_ascii_case(&code)) {
            let place = place.clone();
            self.editor.open_edit(&place);
            return true;
        }

        let Some(lookup) = self.editor.open_create(Some(code.as_str())) else {
            return true;
        };
        // Resolve from the already-loaded list when possible.
        if let Some(country) = self.selector.find(&lookup.code).cloned() {
            self.editor.apply_lookup(&lookup, Some(country));
            return true;
        }

        let backend = self.backend;
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            _ = cancel.cancelled() => return true,
            result = self.editor.resolve_preselected(backend) => result,
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, code = %lookup.code, "Country lookup failed");
        }
        true
    }

    // ─── Editor & mutations ──────────────────────────────────────

    /// Open the editor for a new place with no country selected.
    pub fn open_new_place(&mut self) {
        if self.is_signed_in() {
            self.editor.open_create(None);
        }
    }

    /// Close the editor without saving. No backend call is made.
    pub fn close_editor(&mut self) {
        self.editor.close();
        self.map.clear_selection();
    }

    /// Submit the editor; on success reload places and stats.
    pub async fn submit_editor(&mut self) -> Result<Place, EditorError> {
        let session = self.session_or_unauthorized()?;
        let labels = self.ctx.labels();
        let place = self
            .editor
            .submit(self.backend, &session, &mut self.toasts, labels)
            .await?;
        self.map.clear_selection();
        self.reload().await;
        Ok(place)
    }

    /// Flip a place's favorite flag, then reload.
    pub async fn toggle_favorite(&mut self, place_id: i64) -> bool {
        let Ok(session) = self.session_or_unauthorized() else {
            return false;
        };
        match self.backend.toggle_favorite(&session, place_id).await {
            Ok(place) => {
                tracing::info!(place_id, favorite = place.favorite, "Toggled favorite");
                self.reload().await;
                true
            }
            Err(e) => {
                let labels = self.ctx.labels();
                self.toasts
                    .push_error(e.user_message().unwrap_or(labels.save_failed));
                false
            }
        }
    }

    /// Delete a place. Nothing happens unless the user confirmed.
    pub async fn delete_place(&mut self, place_id: i64, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        let Ok(session) = self.session_or_unauthorized() else {
            return false;
        };
        let labels = self.ctx.labels();
        match self.backend.delete_place(&session, place_id).await {
            Ok(()) => {
                tracing::info!(place_id, "Deleted place");
                self.toasts.push_success(labels.deleted);
                self.reload().await;
                true
            }
            Err(e) => {
                self.toasts
                    .push_error(e.user_message().unwrap_or(labels.save_failed));
                false
            }
        }
    }

    fn session_or_unauthorized(&self) -> Result<Session, EditorError> {
        self.ctx
            .authenticated_session()
            .cloned()
            .ok_or(EditorError::Backend(BackendError::Unauthorized))
    }

    // ─── Rendering ───────────────────────────────────────────────

    /// Full page.
    pub fn render_html(&self, renderer: &MapRenderer, map: &MapData, today: NaiveDate) -> String {
        let labels = self.ctx.labels();
        let mut body = String::new();

        body.push_str(&self.toasts.render_html(Instant::now()));
        body.push_str(&format!("<h1>{}</h1>", escape(labels.page_title)));

        if !self.is_signed_in() {
            body.push_str(&format!(
                r#"<p class="sign-in-prompt"><a href="/login">{}</a></p>"#,
                escape(labels.sign_in_prompt)
            ));
        }

        body.push_str(r#"<div class="map-container">"#);
        body.push_str(&renderer.render_svg(map, &self.index, &self.map, &self.ctx));
        body.push_str(&renderer.render_legend(&self.ctx));
        body.push_str("</div>");

        body.push_str(&stats_panel::render(self.stats.as_ref(), &self.ctx));

        if self.is_signed_in() {
            body.push_str(&self.render_place_list());
        }

        body.push_str(&self.editor.render_html(&self.selector, &self.ctx, today));

        format!(
            r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><title>{}</title><style>{}</style></head><body>{}</body></html>"#,
            self.ctx.language.tag(),
            escape(labels.page_title),
            PAGE_STYLE,
            body
        )
    }

    fn render_place_list(&self) -> String {
        let labels = self.ctx.labels();
        let mut html = format!(
            r#"<section class="places"><h2>{}</h2><a class="add-place" href="/travel?new=1">{}</a>"#,
            escape(labels.my_places),
            escape(labels.add_place)
        );

        if self.places.is_empty() {
            html.push_str(&format!("<p>{}</p></section>", escape(labels.no_places)));
            return html;
        }

        html.push_str("<ul>");
        for place in &self.places {
            let country = &place.country;
            let flag = if country.flag_is_url() {
                format!(
                    r#"<img class="flag" src="{}" alt="{}">"#,
                    escape(country.flag.as_deref().unwrap_or_default()),
                    escape(&country.name)
                )
            } else {
                escape(&country.flag_or_initial())
            };
            let city = place
                .city_name
                .as_deref()
                .map(|c| format!(" · {}", escape(c)))
                .unwrap_or_default();
            let stars = place
                .rating
                .map(|r| format!(" {}", "★".repeat(usize::from(r.stars()))))
                .unwrap_or_default();
            let star_toggle = if place.favorite { "♥" } else { "♡" };

            html.push_str(&format!(
                r#"<li class="place status-{status}">{flag} <a href="/travel?country={code}">{name}</a>{city} <em>{status_label}</em>{stars}<form method="post" action="/travel/places/{id}/favorite"><button type="submit" aria-label="{favorite}">{toggle}</button></form><form method="post" action="/travel/places/{id}/delete"><button type="submit">{delete}</button></form></li>"#,
                status = place.status.as_str().to_lowercase(),
                flag = flag,
                code = urlencoding::encode(&country.code),
                name = escape(&country.name),
                city = city,
                status_label = escape(labels.status(place.status)),
                stars = stars,
                id = place.id,
                favorite = escape(labels.favorite),
                toggle = star_toggle,
                delete = escape(labels.delete),
            ));
        }
        html.push_str("</ul></section>");
        html
    }

    /// Confirmation page shown before deleting a place.
    pub fn render_delete_confirmation(&self, place_id: i64) -> String {
        let labels = self.ctx.labels();
        let name = self
            .places
            .iter()
            .find(|p| p.id == place_id)
            .map(|p| p.country.name.clone())
            .unwrap_or_default();
        format!(
            r#"<!DOCTYPE html><html lang="{lang}"><head><meta charset="utf-8"><title>{title}</title></head><body><p>{name}</p><p>{question}</p><form method="post" action="/travel/places/{id}/delete"><input type="hidden" name="confirm" value="yes"><button type="submit">{delete}</button></form><a href="/travel">{cancel}</a></body></html>"#,
            lang = self.ctx.language.tag(),
            title = escape(labels.page_title),
            name = escape(&name),
            question = escape(labels.confirm_delete),
            id = place_id,
            delete = escape(labels.delete),
            cancel = escape(labels.cancel),
        )
    }
}

async fn fetch_places_and_stats<B: TravelBackend>(
    backend: &B,
    session: &Session,
) -> Result<(Vec<Place>, TravelStats), BackendError> {
    tokio::try_join!(backend.list_places(session), backend.travel_stats(session))
}

const PAGE_STYLE: &str = "body{font-family:system-ui,sans-serif;margin:1rem 2rem}\
.map-container{position:relative}.travel-map{max-width:100%;height:auto}\
.map-legend{list-style:none;display:flex;gap:1rem;padding:0}\
.swatch{display:inline-block;width:.8rem;height:.8rem;margin-right:.3rem}\
.toast{padding:.5rem 1rem;margin:.25rem 0;border-radius:4px}\
.toast-error{background:#fdecea}.toast-success{background:#e8f5e9}\
.places form{display:inline}.badge.locked{opacity:.4}\
.place-editor label{display:block;margin:.4rem 0}";
