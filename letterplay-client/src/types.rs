use serde::{Deserialize, Serialize};
use serde_json::Value;

use letterplay_core::{GameRecord, extract_list, normalize};

use crate::error::ClientError;

/// Response from `POST /auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Response from `POST /auth/refresh_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPictures {
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub background_pic_url: Option<String>,
}

/// Body of `POST /users/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `PATCH /users/atualizar/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Names under which the favorites list is created.
const FAVORITES_NAMES: &[&str] = &["favoritos", "favorites"];

/// Entry of `GET /watchlists/minhas-watchlists-ids`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchlistSummary {
    #[serde(rename = "id_watchlist", alias = "id")]
    pub id: i64,
    #[serde(rename = "id_user", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "nome", alias = "name", default)]
    pub name: Option<String>,
}

impl WatchlistSummary {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Sem nome")
    }

    /// True for the list the backend uses as the user's favorites.
    pub fn is_favorites(&self) -> bool {
        let name = self.display_name().to_lowercase();
        FAVORITES_NAMES.contains(&name.as_str())
    }
}

/// A watchlist with its games already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Watchlist {
    pub summary: WatchlistSummary,
    pub games: Vec<GameRecord>,
}

impl Watchlist {
    /// Build from a `WatchlistPublic` payload. The entries go through the
    /// normalizer so each game carries its play status.
    pub fn from_value(value: &Value) -> Result<Self, ClientError> {
        let summary = WatchlistSummary::deserialize(value)?;
        let games = extract_list(value).iter().filter_map(normalize).collect();
        Ok(Self { summary, games })
    }

    pub fn id(&self) -> i64 {
        self.summary.id
    }

    pub fn name(&self) -> &str {
        self.summary.display_name()
    }
}

/// Body of `POST /watchlists/games/reviews/{game_id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    #[serde(rename = "nota")]
    pub score: f64,
    #[serde(rename = "comentario")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    #[serde(rename = "id_avaliacao")]
    pub id: i64,
    #[serde(rename = "nota")]
    pub score: f64,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
    #[serde(rename = "id_jogo")]
    pub game_id: i64,
    #[serde(rename = "id_user")]
    pub user_id: i64,
}

/// Response of `GET /watchlists/games/all-reviews/{game_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewList {
    #[serde(default)]
    pub items: Vec<Review>,
    #[serde(rename = "media_nota", default)]
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewedGame {
    #[serde(rename = "id_jogo")]
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
}

/// Entry of `GET /watchlists/minhas-reviews`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MyReview {
    #[serde(rename = "id_avaliacao")]
    pub id: i64,
    #[serde(rename = "nota")]
    pub score: f64,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
    #[serde(rename = "jogo", default)]
    pub game: Option<ReviewedGame>,
}

/// Deserialize every element of a list response, skipping (and logging)
/// elements that don't match `T`.
pub(crate) fn parse_items<T: serde::de::DeserializeOwned>(response: &Value, what: &str) -> Vec<T> {
    extract_list(response)
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Skipping malformed {what}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
