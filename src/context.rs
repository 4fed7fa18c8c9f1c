// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-request application context: viewer, session and language.
//!
//! Built once by the session middleware and handed to every component
//! explicitly.

use crate::models::{CurrentUser, PlaceStatus};
use std::fmt;

/// Opaque backend session token taken from the session cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(..)")
    }
}

/// UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    /// Parse a language tag such as "fr" or "en-US".
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::English),
            "fr" => Some(Language::French),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::French => &FRENCH,
        }
    }
}

/// Translated UI strings.
#[derive(Debug)]
pub struct Labels {
    pub page_title: &'static str,
    pub sign_in_prompt: &'static str,
    pub map_loading: &'static str,
    pub map_unavailable: &'static str,
    pub unvisited: &'static str,
    pub statuses: [&'static str; 4],
    pub stats_title: &'static str,
    pub countries: &'static str,
    pub cities: &'static str,
    pub continents: &'static str,
    pub of_the_world: &'static str,
    pub badges: &'static str,
    pub ranking: &'static str,
    pub my_places: &'static str,
    pub no_places: &'static str,
    pub add_place: &'static str,
    pub edit_place: &'static str,
    pub country: &'static str,
    pub city: &'static str,
    pub status: &'static str,
    pub visit_date: &'static str,
    pub rating: &'static str,
    pub notes: &'static str,
    pub favorite: &'static str,
    pub save: &'static str,
    pub cancel: &'static str,
    pub delete: &'static str,
    pub confirm_delete: &'static str,
    pub country_required: &'static str,
    pub save_failed: &'static str,
    pub load_failed: &'static str,
    pub saved: &'static str,
    pub deleted: &'static str,
}

impl Labels {
    pub fn status(&self, status: PlaceStatus) -> &'static str {
        match status {
            PlaceStatus::Visited => self.statuses[0],
            PlaceStatus::Wishlist => self.statuses[1],
            PlaceStatus::Lived => self.statuses[2],
            PlaceStatus::Living => self.statuses[3],
        }
    }
}

static ENGLISH: Labels = Labels {
    page_title: "My travel map",
    sign_in_prompt: "Log in or register to track the countries you have visited.",
    map_loading: "Loading map…",
    map_unavailable: "The world map could not be loaded. Please try again later.",
    unvisited: "Not visited",
    statuses: ["Visited", "Wishlist", "Lived", "Living"],
    stats_title: "Travel statistics",
    countries: "Countries",
    cities: "Cities",
    continents: "Continents",
    of_the_world: "of the world",
    badges: "Badges",
    ranking: "Ranking",
    my_places: "My places",
    no_places: "No places yet. Click a country on the map to add one.",
    add_place: "Add a place",
    edit_place: "Edit place",
    country: "Country",
    city: "City",
    status: "Status",
    visit_date: "Visit date",
    rating: "Rating",
    notes: "Notes",
    favorite: "Favorite",
    save: "Save",
    cancel: "Cancel",
    delete: "Delete",
    confirm_delete: "Delete this place? This cannot be undone.",
    country_required: "Please select a country.",
    save_failed: "Could not save the place.",
    load_failed: "Could not load your places.",
    saved: "Place saved.",
    deleted: "Place deleted.",
};

static FRENCH: Labels = Labels {
    page_title: "Ma carte de voyage",
    sign_in_prompt: "Connectez-vous ou inscrivez-vous pour suivre les pays visités.",
    map_loading: "Chargement de la carte…",
    map_unavailable: "La carte du monde n'a pas pu être chargée. Réessayez plus tard.",
    unvisited: "Non visité",
    statuses: ["Visité", "Envie", "Vécu", "J'y vis"],
    stats_title: "Statistiques de voyage",
    countries: "Pays",
    cities: "Villes",
    continents: "Continents",
    of_the_world: "du monde",
    badges: "Badges",
    ranking: "Classement",
    my_places: "Mes lieux",
    no_places: "Aucun lieu. Cliquez sur un pays de la carte pour en ajouter un.",
    add_place: "Ajouter un lieu",
    edit_place: "Modifier le lieu",
    country: "Pays",
    city: "Ville",
    status: "Statut",
    visit_date: "Date de visite",
    rating: "Note",
    notes: "Notes",
    favorite: "Favori",
    save: "Enregistrer",
    cancel: "Annuler",
    delete: "Supprimer",
    confirm_delete: "Supprimer ce lieu ? Cette action est irréversible.",
    country_required: "Veuillez choisir un pays.",
    save_failed: "Impossible d'enregistrer le lieu.",
    load_failed: "Impossible de charger vos lieux.",
    saved: "Lieu enregistré.",
    deleted: "Lieu supprimé.",
};

/// Everything a component needs to know about who is looking and how.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub language: Language,
    pub user: Option<CurrentUser>,
    pub session: Option<Session>,
}

impl AppContext {
    /// Context for a viewer who is not signed in.
    pub fn anonymous(language: Language) -> Self {
        Self {
            language,
            user: None,
            session: None,
        }
    }

    /// Context for a signed-in viewer.
    pub fn signed_in(language: Language, user: CurrentUser, session: Session) -> Self {
        Self {
            language,
            user: Some(user),
            session: Some(session),
        }
    }

    /// Session of a signed-in viewer.
    pub fn authenticated_session(&self) -> Option<&Session> {
        self.user.as_ref().and(self.session.as_ref())
    }

    pub fn labels(&self) -> &'static Labels {
        self.language.labels()
    }
}
