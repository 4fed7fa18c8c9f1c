//! Travel statistics aggregates computed by the backend.
//!
//! These are fetched fresh on every page load and never mutated here;
//! the panel only formats them.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Aggregate travel statistics for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TravelStats {
    // ─── Counts ──────────────────────────────────────────────────
    #[serde(default)]
    pub countries_visited: u32,
    #[serde(default)]
    pub cities_visited: u32,
    #[serde(default)]
    pub continents_visited: u32,
    /// Number of countries known to the backend
    #[serde(default)]
    pub total_countries: u32,

    // ─── Coverage ────────────────────────────────────────────────
    /// Share of the world visited, in percent
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub world_percentage: f64,
    /// Per-continent breakdown
    #[serde(default)]
    #[validate(nested)]
    pub continents: Vec<ContinentStat>,

    // ─── Achievements ────────────────────────────────────────────
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub ranking: Option<Ranking>,
}

/// Visited count for one continent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContinentStat {
    #[validate(length(min = 1))]
    pub name: String,
    pub visited: u32,
    #[serde(default)]
    pub total: u32,
}

impl ContinentStat {
    /// Visited share of this continent in percent, 0 when the total is unknown.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.visited) * 100.0 / f64::from(self.total)
        }
    }
}

/// Achievement badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub earned: bool,
}

/// Position among all users by countries visited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub position: u32,
    pub total_users: u32,
}
