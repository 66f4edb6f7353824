use serde::{Deserialize, Serialize};

use crate::status::PlayStatus;

/// Placeholder shown when a game has no resolvable name.
pub const UNKNOWN_NAME: &str = "Nome Indisponível";

/// Placeholder shown when a game has no summary.
pub const UNKNOWN_SUMMARY: &str = "Sem descrição.";

/// Placeholder for unresolvable developer/publisher.
pub const UNKNOWN_COMPANY: &str = "Desconhecido";

/// Canonical, presentation-ready game.
///
/// Produced by [`normalize`](crate::normalize::normalize) from any of the
/// backend's response shapes. The serialized field names are themselves
/// accepted by the normalizer, so a cached record re-normalizes to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Catalog id or IGDB id depending on where the record came from.
    /// Only unique within a single result set. 0 when unresolvable.
    pub id: i64,
    pub name: String,
    pub summary: String,
    /// Absolute HTTPS URL, or empty when the game has no cover.
    pub cover_url: String,
    pub screenshots: Vec<String>,
    pub genres: Vec<String>,
    /// Score in [0, 100]; 0 when unknown.
    pub rating: f64,
    /// Unix timestamp in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<i64>,
    pub developer: String,
    pub publisher: String,
    /// Present only for records that came from a watchlist entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlayStatus>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            id: 0,
            name: UNKNOWN_NAME.to_string(),
            summary: UNKNOWN_SUMMARY.to_string(),
            cover_url: String::new(),
            screenshots: Vec::new(),
            genres: Vec::new(),
            rating: 0.0,
            release_date: None,
            developer: UNKNOWN_COMPANY.to_string(),
            publisher: UNKNOWN_COMPANY.to_string(),
            status: None,
        }
    }
}

impl GameRecord {
    pub fn has_cover(&self) -> bool {
        !self.cover_url.is_empty()
    }

    /// Release year in UTC, if the release date is known and in range.
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        let ts = self.release_date?;
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.year())
    }

    /// Release date formatted as `YYYY-MM-DD`.
    pub fn release_date_string(&self) -> Option<String> {
        let ts = self.release_date?;
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    /// Genres joined for single-line display.
    pub fn genres_label(&self) -> String {
        self.genres.join(", ")
    }
}
