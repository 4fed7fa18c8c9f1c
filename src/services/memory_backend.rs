// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process travel backend.
//!
//! Backs the offline demo mode and the test suite. Statistics are derived
//! from the stored places the same way the real backend reports them.

use crate::context::Session;
use crate::models::{
    Badge, ContinentStat, Country, CurrentUser, Place, PlaceInput, PlaceStatus, TravelStats,
};
use crate::services::backend::{BackendError, TravelBackend};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use validator::Validate;

/// Session token accepted by `InMemoryBackend::demo()`.
pub const DEMO_SESSION: &str = "demo-session";

#[derive(Default)]
struct Store {
    countries: Vec<Country>,
    sessions: HashMap<String, CurrentUser>,
    /// Places per user ID
    places: HashMap<i64, Vec<Place>>,
    next_place_id: i64,
    /// Error returned by the next call, then cleared
    fail_next: Option<BackendError>,
}

/// Backend kept entirely in memory.
#[derive(Default)]
pub struct InMemoryBackend {
    store: Mutex<Store>,
    requests: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            store: Mutex::new(Store {
                countries,
                next_place_id: 1,
                ..Store::default()
            }),
            requests: AtomicUsize::new(0),
        }
    }

    /// Backend with a small country list and a demo user on `DEMO_SESSION`.
    pub fn demo() -> Self {
        let backend = Self::new(demo_countries());
        backend.add_session(
            DEMO_SESSION,
            CurrentUser {
                id: 1,
                username: "demo".to_string(),
            },
        );
        backend
    }

    pub fn add_session(&self, token: &str, user: CurrentUser) {
        self.store().sessions.insert(token.to_string(), user);
    }

    /// Make the next backend call fail with `error`.
    pub fn fail_next(&self, error: BackendError) {
        self.store().fail_next = Some(error);
    }

    /// Number of calls served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Snapshot of a user's places, bypassing the request counter.
    pub fn places_of(&self, user_id: i64) -> Vec<Place> {
        self.store().places.get(&user_id).cloned().unwrap_or_default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call, apply a pending failure, and lock the store.
    fn begin(&self) -> Result<MutexGuard<'_, Store>, BackendError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store();
        match store.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(store),
        }
    }
}

impl Store {
    fn user(&self, session: &Session) -> Result<CurrentUser, BackendError> {
        self.sessions
            .get(session.token())
            .cloned()
            .ok_or(BackendError::Unauthorized)
    }

    fn build_place(&self, id: i64, input: &PlaceInput) -> Result<Place, BackendError> {
        input.validate().map_err(|e| BackendError::Status {
            status: 400,
            message: e.to_string(),
        })?;

        let country = self
            .countries
            .iter()
            .find(|c| c.id == input.country_id)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 400,
                message: format!("Unknown country {}", input.country_id),
            })?;

        Ok(Place {
            id,
            country,
            city_name: input.city_name.clone(),
            status: input.status,
            visit_date: input.visit_date,
            rating: input.rating,
            notes: input.notes.clone(),
            favorite: input.favorite,
        })
    }

    fn place_mut(&mut self, user_id: i64, place_id: i64) -> Result<&mut Place, BackendError> {
        self.places
            .get_mut(&user_id)
            .and_then(|places| places.iter_mut().find(|p| p.id == place_id))
            .ok_or_else(|| BackendError::NotFound(format!("place {}", place_id)))
    }

    fn stats(&self, user_id: i64) -> TravelStats {
        let places = self.places.get(&user_id).map(Vec::as_slice).unwrap_or(&[]);
        let been_there: Vec<&Place> = places
            .iter()
            .filter(|p| p.status != PlaceStatus::Wishlist)
            .collect();

        let countries: HashSet<&str> = been_there.iter().map(|p| p.country.code.as_str()).collect();
        let cities: HashSet<String> = been_there
            .iter()
            .filter_map(|p| p.city_name.as_deref())
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        let mut continent_totals: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
        for country in &self.countries {
            continent_totals.entry(country.continent.as_str()).or_default().1 += 1;
        }
        let mut counted = HashSet::new();
        for place in &been_there {
            if counted.insert(place.country.code.as_str()) {
                continent_totals
                    .entry(place.country.continent.as_str())
                    .or_default()
                    .0 += 1;
            }
        }

        let continents: Vec<ContinentStat> = continent_totals
            .into_iter()
            .filter(|(_, (visited, _))| *visited > 0)
            .map(|(name, (visited, total))| ContinentStat {
                name: name.to_string(),
                visited,
                total,
            })
            .collect();

        let total_countries = self.countries.len() as u32;
        let countries_visited = countries.len() as u32;
        let world_percentage = if total_countries == 0 {
            0.0
        } else {
            f64::from(countries_visited) * 100.0 / f64::from(total_countries)
        };

        TravelStats {
            countries_visited,
            cities_visited: cities.len() as u32,
            continents_visited: continents.len() as u32,
            total_countries,
            world_percentage,
            badges: badges(countries_visited, continents.len() as u32),
            continents,
            ranking: None,
        }
    }
}

fn badges(countries: u32, continents: u32) -> Vec<Badge> {
    let badge = |name: &str, description: &str, icon: &str, earned: bool| Badge {
        name: name.to_string(),
        description: description.to_string(),
        icon: Some(icon.to_string()),
        earned,
    };
    vec![
        badge("First Steps", "Visit your first country", "👣", countries >= 1),
        badge("Explorer", "Visit 5 countries", "🧭", countries >= 5),
        badge("Globetrotter", "Visit 20 countries", "✈️", countries >= 20),
        badge("Continental", "Visit 3 continents", "🗺️", continents >= 3),
    ]
}

impl TravelBackend for InMemoryBackend {
    async fn current_user(&self, session: &Session) -> Result<Option<CurrentUser>, BackendError> {
        let store = self.begin()?;
        Ok(store.sessions.get(session.token()).cloned())
    }

    async fn list_places(&self, session: &Session) -> Result<Vec<Place>, BackendError> {
        let store = self.begin()?;
        let user = store.user(session)?;
        Ok(store.places.get(&user.id).cloned().unwrap_or_default())
    }

    async fn create_place(&self, session: &Session, input: &PlaceInput) -> Result<Place, BackendError> {
        let mut store = self.begin()?;
        let user = store.user(session)?;
        let id = store.next_place_id;
        let place = store.build_place(id, input)?;
        store.next_place_id += 1;
        store.places.entry(user.id).or_default().push(place.clone());
        Ok(place)
    }

    async fn update_place(
        &self,
        session: &Session,
        place_id: i64,
        input: &PlaceInput,
    ) -> Result<Place, BackendError> {
        let mut store = self.begin()?;
        let user = store.user(session)?;
        let updated = store.build_place(place_id, input)?;
        let place = store.place_mut(user.id, place_id)?;
        *place = updated.clone();
        Ok(updated)
    }

    async fn delete_place(&self, session: &Session, place_id: i64) -> Result<(), BackendError> {
        let mut store = self.begin()?;
        let user = store.user(session)?;
        let places = store.places.entry(user.id).or_default();
        let before = places.len();
        places.retain(|p| p.id != place_id);
        if places.len() == before {
            return Err(BackendError::NotFound(format!("place {}", place_id)));
        }
        Ok(())
    }

    async fn toggle_favorite(&self, session: &Session, place_id: i64) -> Result<Place, BackendError> {
        let mut store = self.begin()?;
        let user = store.user(session)?;
        let place = store.place_mut(user.id, place_id)?;
        place.favorite = !place.favorite;
        Ok(place.clone())
    }

    async fn list_countries(&self) -> Result<Vec<Country>, BackendError> {
        let store = self.begin()?;
        Ok(store.countries.clone())
    }

    async fn list_continents(&self) -> Result<Vec<String>, BackendError> {
        let store = self.begin()?;
        let mut continents: Vec<String> = store
            .countries
            .iter()
            .map(|c| c.continent.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        continents.sort();
        Ok(continents)
    }

    async fn country_by_code(&self, code: &str) -> Result<Option<Country>, BackendError> {
        let store = self.begin()?;
        Ok(store
            .countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    async fn travel_stats(&self, session: &Session) -> Result<TravelStats, BackendError> {
        let store = self.begin()?;
        let user = store.user(session)?;
        Ok(store.stats(user.id))
    }
}

/// Country list for the offline demo.
pub fn demo_countries() -> Vec<Country> {
    [
        ("AR", "Argentina", "Buenos Aires", "South America", "🇦🇷"),
        ("AU", "Australia", "Canberra", "Oceania", "🇦🇺"),
        ("BR", "Brazil", "Brasília", "South America", "🇧🇷"),
        ("CA", "Canada", "Ottawa", "North America", "🇨🇦"),
        ("CN", "China", "Beijing", "Asia", "🇨🇳"),
        ("DE", "Germany", "Berlin", "Europe", "🇩🇪"),
        ("EG", "Egypt", "Cairo", "Africa", "🇪🇬"),
        ("ES", "Spain", "Madrid", "Europe", "🇪🇸"),
        ("FR", "France", "Paris", "Europe", "🇫🇷"),
        ("GB", "United Kingdom", "London", "Europe", "🇬🇧"),
        ("IN", "India", "New Delhi", "Asia", "🇮🇳"),
        ("IT", "Italy", "Rome", "Europe", "🇮🇹"),
        ("JP", "Japan", "Tokyo", "Asia", "🇯🇵"),
        ("KE", "Kenya", "Nairobi", "Africa", "🇰🇪"),
        ("MA", "Morocco", "Rabat", "Africa", "🇲🇦"),
        ("MX", "Mexico", "Mexico City", "North America", "🇲🇽"),
        ("NO", "Norway", "Oslo", "Europe", "🇳🇴"),
        ("NZ", "New Zealand", "Wellington", "Oceania", "🇳🇿"),
        ("PE", "Peru", "Lima", "South America", "🇵🇪"),
        ("PT", "Portugal", "Lisbon", "Europe", "🇵🇹"),
        ("TH", "Thailand", "Bangkok", "Asia", "🇹🇭"),
        ("US", "United States of America", "Washington, D.C.", "North America", "🇺🇸"),
        ("ZA", "South Africa", "Pretoria", "Africa", "🇿🇦"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (code, name, capital, continent, flag))| Country {
        id: i as i64 + 1,
        code: code.to_string(),
        name: name.to_string(),
        capital: Some(capital.to_string()),
        continent: continent.to_string(),
        flag: Some(flag.to_string()),
    })
    .collect()
}
