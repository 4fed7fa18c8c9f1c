// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place editor dialog.
//!
//! State machine:
//! `Closed → Open(Create) | Open(Edit)`, `Open(m) → Submitting(m)`,
//! `Submitting(m) → Open(m)` on failure and `Submitting → Closed` on
//! success. Nothing survives a close.

use crate::context::{AppContext, Labels, Session};
use crate::models::{Country, Place, PlaceInput, PlaceStatus, Rating};
use crate::services::backend::{BackendError, TravelBackend};
use crate::ui::html::escape;
use crate::ui::toast::Toasts;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Whether the dialog creates a new place or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { place_id: i64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Open(EditorMode),
    Submitting(EditorMode),
}

/// Field values of the dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceForm {
    pub country: Option<Country>,
    pub city_name: String,
    pub status: PlaceStatus,
    visit_date: Option<NaiveDate>,
    /// 0 means no rating
    rating: u8,
    pub notes: String,
    pub favorite: bool,
}

impl PlaceForm {
    /// Form seeded from an existing place.
    pub fn from_place(place: &Place) -> Self {
        Self {
            country: Some(place.country.clone()),
            city_name: place.city_name.clone().unwrap_or_default(),
            status: place.status,
            visit_date: place.visit_date,
            rating: place.rating.map_or(0, Rating::stars),
            notes: place.notes.clone().unwrap_or_default(),
            favorite: place.favorite,
        }
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Star clicked: the selected star clears the rating, any other star
    /// replaces it. Out-of-range stars are ignored.
    pub fn toggle_rating(&mut self, star: u8) {
        if !(1..=Rating::MAX).contains(&star) {
            return;
        }
        self.rating = if self.rating == star { 0 } else { star };
    }

    /// Set the rating outright (0 clears it).
    pub fn set_rating(&mut self, stars: u8) {
        self.rating = stars.min(Rating::MAX);
    }

    pub fn visit_date(&self) -> Option<NaiveDate> {
        self.visit_date
    }

    /// Set the visit date; dates after `today` are refused.
    pub fn set_visit_date(
        &mut self,
        date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), EditorError> {
        if date.is_some_and(|d| d > today) {
            return Err(EditorError::FutureDate);
        }
        self.visit_date = date;
        Ok(())
    }

    /// Build the write payload. Only the country is checked here; the
    /// backend validates the rest.
    pub fn to_input(&self) -> Result<PlaceInput, EditorError> {
        let country = self.country.as_ref().ok_or(EditorError::CountryRequired)?;
        Ok(PlaceInput {
            country_id: country.id,
            city_name: non_blank(&self.city_name),
            status: self.status,
            visit_date: self.visit_date,
            notes: non_blank(&self.notes),
            rating: Rating::new(self.rating),
            favorite: self.favorite,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Pending lookup of a preselected country. Stale once the editor is
/// closed or reopened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryLookup {
    seed: u64,
    pub code: String,
}

/// Submission in flight.
#[derive(Debug, Clone)]
pub struct PendingSubmit {
    pub mode: EditorMode,
    pub input: PlaceInput,
}

/// The place editor dialog.
#[derive(Debug, Default)]
pub struct PlaceEditor {
    state: EditorState,
    form: PlaceForm,
    /// Bumped on every open and close
    seed: u64,
    lookup: Option<CountryLookup>,
    error: Option<String>,
}

impl PlaceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    pub fn form(&self) -> &PlaceForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PlaceForm {
        &mut self.form
    }

    /// Inline validation message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open in edit mode with every field taken from `place`.
    pub fn open_edit(&mut self, place: &Place) {
        self.reseed();
        self.form = PlaceForm::from_place(place);
        self.state = EditorState::Open(EditorMode::Edit { place_id: place.id });
    }

    /// Open in create mode. With a preselected code, returns the lookup the
    /// caller must resolve against the backend.
    pub fn open_create(&mut self, preselected_code: Option<&str>) -> Option<CountryLookup> {
        self.reseed();
        self.form = PlaceForm::default();
        self.state = EditorState::Open(EditorMode::Create);
        self.lookup = preselected_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(|code| CountryLookup {
                seed: self.seed,
                code: code.to_uppercase(),
            });
        self.lookup.clone()
    }

    /// Apply a resolved lookup. Ignored when stale, when the editor is not
    /// open, or when the user already picked a country.
    pub fn apply_lookup(&mut self, lookup: &CountryLookup, country: Option<Country>) -> bool {
        let current = self.lookup.as_ref().is_some_and(|l| l == lookup);
        if !current || !matches!(self.state, EditorState::Open(_)) {
            tracing::debug!(code = %lookup.code, "Discarding stale country lookup");
            return false;
        }
        self.lookup = None;
        match country {
            Some(country) if self.form.country.is_none() => {
                self.form.country = Some(country);
                true
            }
            _ => false,
        }
    }

    /// Resolve the pending preselected-country lookup, if any.
    pub async fn resolve_preselected<B: TravelBackend>(
        &mut self,
        backend: &B,
    ) -> Result<bool, BackendError> {
        let Some(lookup) = self.lookup.clone() else {
            return Ok(false);
        };
        let country = backend.country_by_code(&lookup.code).await?;
        Ok(self.apply_lookup(&lookup, country))
    }

    /// Close and discard all edits.
    pub fn close(&mut self) {
        self.reseed();
        self.form = PlaceForm::default();
        self.state = EditorState::Closed;
    }

    fn reseed(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.lookup = None;
        self.error = None;
    }

    /// Validate and move to `Submitting`.
    pub fn begin_submit(&mut self, labels: &Labels) -> Result<PendingSubmit, EditorError> {
        let EditorState::Open(mode) = self.state else {
            return Err(EditorError::NotOpen);
        };
        let input = self.form.to_input().inspect_err(|_| {
            self.error = Some(labels.country_required.to_string());
        })?;
        self.error = None;
        self.state = EditorState::Submitting(mode);
        Ok(PendingSubmit { mode, input })
    }

    /// Finish a submission with the backend's answer.
    ///
    /// Success closes the dialog and returns the saved place. Failure
    /// reopens it with edits intact and queues the backend's message, or
    /// a generic one.
    pub fn finish_submit(
        &mut self,
        result: Result<Place, BackendError>,
        toasts: &mut Toasts,
        labels: &Labels,
    ) -> Result<Place, EditorError> {
        let EditorState::Submitting(mode) = self.state else {
            return Err(EditorError::NotOpen);
        };
        match result {
            Ok(place) => {
                tracing::info!(place_id = place.id, country = %place.country.code, "Place saved");
                toasts.push_success(labels.saved);
                self.close();
                Ok(place)
            }
            Err(e) => {
                toasts.push_error(e.user_message().unwrap_or(labels.save_failed));
                self.state = EditorState::Open(mode);
                Err(EditorError::Backend(e))
            }
        }
    }

    /// Submit the form to the backend.
    pub async fn submit<B: TravelBackend>(
        &mut self,
        backend: &B,
        session: &Session,
        toasts: &mut Toasts,
        labels: &Labels,
    ) -> Result<Place, EditorError> {
        let pending = self.begin_submit(labels)?;
        let result = match pending.mode {
            EditorMode::Create => backend.create_place(session, &pending.input).await,
            EditorMode::Edit { place_id } => {
                backend.update_place(session, place_id, &pending.input).await
            }
        };
        self.finish_submit(result, toasts, labels)
    }

    /// The dialog as an HTML form posting to `/travel/places`.
    pub fn render_html(
        &self,
        selector: &CountrySelector,
        ctx: &AppContext,
        today: NaiveDate,
    ) -> String {
        let mode = match self.state {
            EditorState::Closed => return String::new(),
            EditorState::Open(mode) | EditorState::Submitting(mode) => mode,
        };
        let labels = ctx.labels();
        let form = &self.form;

        let (title, place_id) = match mode {
            EditorMode::Create => (labels.add_place, String::new()),
            EditorMode::Edit { place_id } => (labels.edit_place, place_id.to_string()),
        };

        let mut html = String::from(r#"<dialog class="place-editor" open>"#);
        html.push_str(&self.render_search(selector, ctx));
        html.push_str(&format!(
            r#"<form method="post" action="/travel/places"><h2>{}</h2><input type="hidden" name="place_id" value="{}">"#,
            escape(title),
            place_id
        ));

        if let Some(error) = &self.error {
            html.push_str(&format!(r#"<p class="form-error">{}</p>"#, escape(error)));
        }

        // Country
        let selected_code = form.country.as_ref().map(|c| c.code.as_str());
        html.push_str(&format!(
            r#"<label>{} <select name="country_code" required><option value=""></option>"#,
            escape(labels.country)
        ));
        // The current choice stays selectable when the search hides it.
        let groups = selector.grouped();
        if let Some(country) = &form.country {
            let listed = groups
                .values()
                .flatten()
                .any(|c| c.code.eq_ignore_ascii_case(&country.code));
            if !listed {
                html.push_str(&format!(
                    r#"<option value="{}" selected>{} {}</option>"#,
                    escape(&country.code),
                    escape(&country.flag_or_initial()),
                    escape(&country.name)
                ));
            }
        }
        for (continent, countries) in groups {
            html.push_str(&format!(r#"<optgroup label="{}">"#, escape(continent)));
            for country in countries {
                let selected = if Some(country.code.as_str()) == selected_code {
                    " selected"
                } else {
                    ""
                };
                html.push_str(&format!(
                    r#"<option value="{}"{}>{} {}</option>"#,
                    escape(&country.code),
                    selected,
                    escape(&country.flag_or_initial()),
                    escape(&country.name)
                ));
            }
            html.push_str("</optgroup>");
        }
        html.push_str("</select></label>");

        // City
        html.push_str(&format!(
            r#"<label>{} <input type="text" name="city_name" value="{}" maxlength="120"></label>"#,
            escape(labels.city),
            escape(&form.city_name)
        ));

        // Status
        html.push_str(&format!(
            r#"<fieldset class="status-group"><legend>{}</legend>"#,
            escape(labels.status)
        ));
        for status in PlaceStatus::ALL {
            let checked = if status == form.status { " checked" } else { "" };
            html.push_str(&format!(
                r#"<label><input type="radio" name="status" value="{}"{}> {}</label>"#,
                status.as_str(),
                checked,
                escape(labels.status(status))
            ));
        }
        html.push_str("</fieldset>");

        // Visit date
        let date = form
            .visit_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<label>{} <input type="date" name="visit_date" value="{}" max="{}"></label>"#,
            escape(labels.visit_date),
            date,
            today.format("%Y-%m-%d")
        ));

        // Rating
        html.push_str(&format!(
            r#"<fieldset class="rating"><legend>{}</legend>"#,
            escape(labels.rating)
        ));
        for star in 0..=Rating::MAX {
            let checked = if star == form.rating { " checked" } else { "" };
            let glyph = if star == 0 {
                "–".to_string()
            } else {
                "★".repeat(usize::from(star))
            };
            html.push_str(&format!(
                r#"<label><input type="radio" name="rating" value="{}"{}> {}</label>"#,
                star, checked, glyph
            ));
        }
        html.push_str("</fieldset>");

        // Notes and favorite
        html.push_str(&format!(
            r#"<label>{} <textarea name="notes" maxlength="2000">{}</textarea></label>"#,
            escape(labels.notes),
            escape(&form.notes)
        ));
        let favorite = if form.favorite { " checked" } else { "" };
        html.push_str(&format!(
            r#"<label><input type="checkbox" name="favorite" value="on"{}> {}</label>"#,
            favorite,
            escape(labels.favorite)
        ));

        let disabled = if matches!(self.state, EditorState::Submitting(_)) {
            " disabled"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<div class="actions"><a href="/travel">{}</a><button type="submit"{}>{}</button></div></form></dialog>"#,
            escape(labels.cancel),
            disabled,
            escape(labels.save)
        ));
        html
    }
}

impl PlaceEditor {
    /// Search and continent filter for the country list. Submitting it
    /// reloads the page with the same editor target.
    fn render_search(&self, selector: &CountrySelector, ctx: &AppContext) -> String {
        let labels = ctx.labels();
        let code = self
            .form
            .country
            .as_ref()
            .map(|c| c.code.as_str())
            .or(self.lookup.as_ref().map(|l| l.code.as_str()));
        let target = match code {
            Some(code) => format!(
                r#"<input type="hidden" name="country" value="{}">"#,
                escape(code)
            ),
            None => r#"<input type="hidden" name="new" value="1">"#.to_string(),
        };

        let mut html = format!(
            r#"<form method="get" action="/travel" class="country-search">{}<input type="search" name="q" value="{}" aria-label="{}"><select name="continent"><option value=""></option>"#,
            target,
            escape(selector.query()),
            escape(labels.country)
        );
        for continent in selector.continents() {
            let selected = if selector.continent() == Some(continent) {
                " selected"
            } else {
                ""
            };
            html.push_str(&format!(
                r#"<option{}>{}</option>"#,
                selected,
                escape(continent)
            ));
        }
        html.push_str(r#"</select><button type="submit">🔍</button></form>"#);
        html
    }
}

/// Searchable, continent-filterable country list.
#[derive(Debug, Clone, Default)]
pub struct CountrySelector {
    countries: Vec<Country>,
    query: String,
    continent: Option<String>,
}

impl CountrySelector {
    pub fn new(mut countries: Vec<Country>) -> Self {
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            countries,
            query: String::new(),
            continent: None,
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn continent(&self) -> Option<&str> {
        self.continent.as_deref()
    }

    /// Restrict to one continent; `None` or an empty name shows all.
    pub fn set_continent(&mut self, continent: Option<&str>) {
        self.continent = continent
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);
    }

    /// Countries matching the search text (name or code) and continent.
    pub fn matches(&self) -> Vec<&Country> {
        self.countries
            .iter()
            .filter(|c| {
                self.continent
                    .as_deref()
                    .is_none_or(|continent| c.continent.eq_ignore_ascii_case(continent))
            })
            .filter(|c| {
                self.query.is_empty()
                    || c.name.to_lowercase().contains(&self.query)
                    || c.code.eq_ignore_ascii_case(&self.query)
            })
            .collect()
    }

    /// Matches grouped by continent, both sorted by name.
    pub fn grouped(&self) -> BTreeMap<&str, Vec<&Country>> {
        let mut groups: BTreeMap<&str, Vec<&Country>> = BTreeMap::new();
        for country in self.matches() {
            groups.entry(country.continent.as_str()).or_default().push(country);
        }
        groups
    }

    /// Distinct continents, sorted.
    pub fn continents(&self) -> Vec<&str> {
        let mut continents: Vec<&str> = self.countries.iter().map(|c| c.continent.as_str()).collect();
        continents.sort_unstable();
        continents.dedup();
        continents
    }

    /// Country by ISO code, ignoring filters.
    pub fn find(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Errors from the editor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("A country must be selected")]
    CountryRequired,

    #[error("Visit date cannot be in the future")]
    FutureDate,

    #[error("The editor is not open")]
    NotOpen,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Language;

    fn country(id: i64, code: &str, name: &str, continent: &str) -> Country {
        Country {
            id,
            code: code.to_string(),
            name: name.to_string(),
            capital: None,
            continent: continent.to_string(),
            flag: None,
        }
    }

    fn labels() -> &'static Labels {
        Language::English.labels()
    }

    fn existing_place() -> Place {
        Place {
            id: 42,
            country: country(3, "CL", "Chile", "South America"),
            city_name: Some("Valparaíso".to_string()),
            status: PlaceStatus::Lived,
            visit_date: NaiveDate::from_ymd_opt(2021, 11, 3),
            rating: Rating::new(4),
            notes: Some("Hills and murals".to_string()),
            favorite: true,
        }
    }

    #[test]
    fn test_rating_toggle_clears_and_replaces() {
        let mut form = PlaceForm::default();
        form.toggle_rating(3);
        assert_eq!(form.rating(), 3);
        form.toggle_rating(5);
        assert_eq!(form.rating(), 5);
        form.toggle_rating(5);
        assert_eq!(form.rating(), 0);
        form.toggle_rating(6);
        assert_eq!(form.rating(), 0);
    }

    #[test]
    fn test_future_visit_date_refused() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut form = PlaceForm::default();
        assert_eq!(
            form.set_visit_date(today.succ_opt(), today),
            Err(EditorError::FutureDate)
        );
        assert!(form.visit_date().is_none());
        assert!(form.set_visit_date(Some(today), today).is_ok());
        assert_eq!(form.visit_date(), Some(today));
    }

    #[test]
    fn test_country_only_input_has_defaults() {
        let form = PlaceForm {
            country: Some(country(9, "VN", "Vietnam", "Asia")),
            city_name: "   ".to_string(),
            ..PlaceForm::default()
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.country_id, 9);
        assert_eq!(input.status, PlaceStatus::Visited);
        assert!(input.city_name.is_none());
        assert!(input.visit_date.is_none());
        assert!(input.notes.is_none());
        assert!(input.rating.is_none());
        assert!(!input.favorite);
    }

    #[test]
    fn test_submit_requires_country() {
        let mut editor = PlaceEditor::new();
        editor.open_create(None);
        assert_eq!(
            editor.begin_submit(labels()).unwrap_err(),
            EditorError::CountryRequired
        );
        assert_eq!(editor.state(), EditorState::Open(EditorMode::Create));
        assert_eq!(editor.error(), Some(labels().country_required));
    }

    #[test]
    fn test_open_edit_seeds_every_field() {
        let place = existing_place();
        let mut editor = PlaceEditor::new();
        editor.open_edit(&place);

        assert_eq!(editor.state(), EditorState::Open(EditorMode::Edit { place_id: 42 }));
        let form = editor.form();
        assert_eq!(form.country.as_ref().map(|c| c.code.as_str()), Some("CL"));
        assert_eq!(form.city_name, "Valparaíso");
        assert_eq!(form.status, PlaceStatus::Lived);
        assert_eq!(form.visit_date(), NaiveDate::from_ymd_opt(2021, 11, 3));
        assert_eq!(form.rating(), 4);
        assert_eq!(form.notes, "Hills and murals");
        assert!(form.favorite);
    }

    #[test]
    fn test_failed_submit_reopens_with_edits() {
        let mut editor = PlaceEditor::new();
        let mut toasts = Toasts::new();
        editor.open_edit(&existing_place());
        editor.form_mut().city_name = "Santiago".to_string();

        let pending = editor.begin_submit(labels()).unwrap();
        assert_eq!(pending.mode, EditorMode::Edit { place_id: 42 });
        assert_eq!(editor.state(), EditorState::Submitting(pending.mode));

        let result = editor.finish_submit(
            Err(BackendError::Status {
                status: 400,
                message: "City not found".to_string(),
            }),
            &mut toasts,
            labels(),
        );
        assert!(result.is_err());
        assert_eq!(editor.state(), EditorState::Open(pending.mode));
        assert_eq!(editor.form().city_name, "Santiago");
        assert_eq!(toasts.last().unwrap().message, "City not found");
    }

    #[test]
    fn test_failure_without_message_uses_generic_text() {
        let mut editor = PlaceEditor::new();
        let mut toasts = Toasts::new();
        editor.open_edit(&existing_place());
        editor.begin_submit(labels()).unwrap();
        let _ = editor.finish_submit(
            Err(BackendError::Transport("timeout".to_string())),
            &mut toasts,
            labels(),
        );
        assert_eq!(toasts.last().unwrap().message, labels().save_failed);
    }

    #[test]
    fn test_successful_submit_closes() {
        let mut editor = PlaceEditor::new();
        let mut toasts = Toasts::new();
        editor.open_edit(&existing_place());
        editor.begin_submit(labels()).unwrap();
        let saved = editor
            .finish_submit(Ok(existing_place()), &mut toasts, labels())
            .unwrap();
        assert_eq!(saved.id, 42);
        assert_eq!(editor.state(), EditorState::Closed);
        assert_eq!(editor.form(), &PlaceForm::default());
    }

    #[test]
    fn test_stale_lookup_discarded() {
        let mut editor = PlaceEditor::new();
        let first = editor.open_create(Some("fr")).unwrap();
        assert_eq!(first.code, "FR");

        // Reopened for another country before the first lookup resolved.
        let second = editor.open_create(Some("JP")).unwrap();
        assert!(!editor.apply_lookup(&first, Some(country(1, "FR", "France", "Europe"))));
        assert!(editor.form().country.is_none());

        assert!(editor.apply_lookup(&second, Some(country(2, "JP", "Japan", "Asia"))));
        assert_eq!(editor.form().country.as_ref().unwrap().code, "JP");
    }

    #[test]
    fn test_lookup_after_close_discarded() {
        let mut editor = PlaceEditor::new();
        let lookup = editor.open_create(Some("FR")).unwrap();
        editor.close();
        assert!(!editor.apply_lookup(&lookup, Some(country(1, "FR", "France", "Europe"))));
        assert_eq!(editor.state(), EditorState::Closed);
    }

    #[test]
    fn test_close_discards_edits() {
        let mut editor = PlaceEditor::new();
        editor.open_edit(&existing_place());
        editor.form_mut().notes = "changed".to_string();
        editor.close();
        assert!(!editor.is_open());
        assert_eq!(editor.form(), &PlaceForm::default());
    }

    #[test]
    fn test_selector_search_and_filter() {
        let mut selector = CountrySelector::new(vec![
            country(1, "FR", "France", "Europe"),
            country(2, "FJ", "Fiji", "Oceania"),
            country(3, "DE", "Germany", "Europe"),
        ]);
        assert_eq!(selector.continents(), vec!["Europe", "Oceania"]);

        selector.set_query("f");
        let names: Vec<&str> = selector.matches().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fiji", "France"]);

        selector.set_continent(Some("europe"));
        let names: Vec<&str> = selector.matches().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France"]);

        selector.set_query("de");
        assert_eq!(selector.matches()[0].code, "DE");

        selector.set_continent(Some(""));
        selector.set_query("");
        assert_eq!(selector.matches().len(), 3);
        assert_eq!(selector.find("fj").map(|c| c.id), Some(2));
    }

    #[test]
    fn test_render_closed_is_empty() {
        let editor = PlaceEditor::new();
        let ctx = AppContext::anonymous(Language::English);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(editor.render_html(&CountrySelector::default(), &ctx, today), "");
    }

    #[test]
    fn test_render_edit_form() {
        let mut editor = PlaceEditor::new();
        editor.open_edit(&existing_place());
        let selector = CountrySelector::new(vec![country(3, "CL", "Chile", "South America")]);
        let ctx = AppContext::anonymous(Language::English);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let html = editor.render_html(&selector, &ctx, today);

        assert!(html.contains(r#"name="place_id" value="42""#));
        assert!(html.contains(r#"<option value="CL" selected>"#));
        assert!(html.contains(r#"value="LIVED" checked"#));
        assert!(html.contains(r#"value="4" checked"#));
        assert!(html.contains(r#"max="2026-10-16""#));
        assert!(html.contains(r#"value="2021-11-03""#));
    }

    #[test]
    fn test_filtered_out_country_stays_selected() {
        let mut editor = PlaceEditor::new();
        editor.open_edit(&existing_place());
        let mut selector = CountrySelector::new(vec![
            country(3, "CL", "Chile", "South America"),
            country(2, "JP", "Japan", "Asia"),
        ]);
        selector.set_query("jap");
        let ctx = AppContext::anonymous(Language::English);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let html = editor.render_html(&selector, &ctx, today);

        assert_eq!(html.matches(r#"<option value="CL" selected>"#).count(), 1);
        assert!(html.contains(r#"<option value="JP">"#));
    }

    #[test]
    fn test_search_form_keeps_preselected_country() {
        let mut editor = PlaceEditor::new();
        let lookup = editor.open_create(Some("jp")).unwrap();
        let selector = CountrySelector::default();
        let ctx = AppContext::anonymous(Language::English);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        // Still pending.
        let html = editor.render_html(&selector, &ctx, today);
        assert!(html.contains(r#"<input type="hidden" name="country" value="JP">"#));
        assert!(!html.contains(r#"name="new""#));

        editor.apply_lookup(&lookup, Some(country(2, "JP", "Japan", "Asia")));
        let html = editor.render_html(&selector, &ctx, today);
        assert!(html.contains(r#"<input type="hidden" name="country" value="JP">"#));

        editor.open_create(None);
        let html = editor.render_html(&selector, &ctx, today);
        assert!(html.contains(r#"<input type="hidden" name="new" value="1">"#));
    }
}
