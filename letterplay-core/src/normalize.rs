//! Game record normalization.
//!
//! The backend returns games in several shapes: IGDB search results with
//! English field names, catalog rows with Portuguese field names, watchlist
//! entries that wrap the game under `jogo`, ranking rows with aggregated
//! scores, and records this crate serialized itself. Each canonical field is
//! resolved by walking an ordered list of candidate keys; the first present
//! value wins. "Present" means not `null`, not a blank string, and not an
//! empty array or object.
//!
//! Normalization never fails. A missing or malformed field falls back to the
//! defaults on [`GameRecord`].

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::extract::extract_list;
use crate::image::{ImageSize, image_from_value};
use crate::record::{GameRecord, UNKNOWN_COMPANY, UNKNOWN_NAME, UNKNOWN_SUMMARY};
use crate::status::PlayStatus;

/// Wrapper keys that hold the actual game object.
const WRAPPER_KEYS: &[&str] = &["jogo", "infosGame"];

const ID_KEYS: &[&str] = &["id", "id_jogo"];
const NAME_KEYS: &[&str] = &["name", "titulo", "nome"];
const SUMMARY_KEYS: &[&str] = &["summary", "descricao"];
const RATING_KEYS: &[&str] = &[
    "media_nota_sistema",
    "total_rating",
    "media",
    "rating",
    "metacritic_rating",
    "media_geral",
    "nota_metacritic",
];
const GENRE_KEYS: &[&str] = &["genres", "generos"];
const GENRE_NAME_KEYS: &[&str] = &["name", "nome_genero"];
const SCREENSHOT_KEYS: &[&str] = &["screenshots"];
const COVER_KEYS: &[&str] = &["cover", "cover_url", "capa_url", "url_capa"];
const RELEASE_DATE_KEYS: &[&str] = &["first_release_date", "data_lancamento", "release_date"];
const STATUS_KEYS: &[&str] = &["status_jogo", "status"];

const MAX_RATING: f64 = 100.0;

/// Integral floats outside this range would saturate when cast.
const I64_MIN_F64: f64 = i64::MIN as f64;
const I64_MAX_F64: f64 = i64::MAX as f64;

/// Keys used to resolve one company role (developer or publisher).
struct CompanyRole {
    /// Plain string field (`developer`).
    direct: &'static str,
    /// Catalog relation, either a string or an object with `nome`.
    localized: &'static str,
    /// Flag set on matching `involved_companies` entries.
    flag: &'static str,
}

const DEVELOPER: CompanyRole = CompanyRole {
    direct: "developer",
    localized: "desenvolvedora",
    flag: "developer",
};

const PUBLISHER: CompanyRole = CompanyRole {
    direct: "publisher",
    localized: "publicadora",
    flag: "publisher",
};

/// Normalize one raw game-like value.
///
/// Returns `None` only for JSON `null`.
pub fn normalize(raw: &Value) -> Option<GameRecord> {
    if raw.is_null() {
        return None;
    }

    let (game, wrapped) = unwrap_game(raw);

    Some(GameRecord {
        id: resolve_id(game),
        name: first_string(game, NAME_KEYS).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        summary: first_string(game, SUMMARY_KEYS).unwrap_or_else(|| UNKNOWN_SUMMARY.to_string()),
        cover_url: resolve_cover(game),
        screenshots: resolve_screenshots(game),
        genres: resolve_genres(game),
        rating: resolve_rating(game),
        release_date: resolve_release_date(game),
        developer: resolve_company(game, &DEVELOPER),
        publisher: resolve_company(game, &PUBLISHER),
        status: resolve_status(raw, wrapped.then_some(game)),
    })
}

/// Unwrap a list response and normalize every element.
pub fn normalize_list(response: &Value) -> Vec<GameRecord> {
    extract_list(response).iter().filter_map(normalize).collect()
}

/// Return the game object and whether it came out of a wrapper.
fn unwrap_game(raw: &Value) -> (&Value, bool) {
    WRAPPER_KEYS
        .iter()
        .find_map(|key| raw.get(*key).filter(|v| v.is_object()))
        .map_or((raw, false), |game| (game, true))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn present<'a>(game: &'a Value, key: &str) -> Option<&'a Value> {
    game.get(key).filter(|v| is_present(v))
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_string(game: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| game.get(*key).and_then(non_blank))
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (I64_MIN_F64..I64_MAX_F64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    let f: f64 = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

fn resolve_id(game: &Value) -> i64 {
    ID_KEYS
        .iter()
        .filter_map(|key| present(game, key))
        .find_map(as_i64)
        .unwrap_or(0)
}

/// Non-positive scores fall through: a catalog game with no reviews reports
/// `media_nota_sistema: 0` alongside a real IGDB rating.
fn resolve_rating(game: &Value) -> f64 {
    RATING_KEYS
        .iter()
        .filter_map(|key| present(game, key))
        .filter_map(as_f64)
        .find(|r| *r > 0.0)
        .map_or(0.0, |r| r.min(MAX_RATING))
}

fn resolve_cover(game: &Value) -> String {
    COVER_KEYS
        .iter()
        .filter_map(|key| present(game, key))
        .map(|v| image_from_value(v, ImageSize::CoverBig))
        .find(|url| !url.is_empty())
        .unwrap_or_default()
}

fn resolve_screenshots(game: &Value) -> Vec<String> {
    let Some(items) = first_array(game, SCREENSHOT_KEYS) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|v| image_from_value(v, ImageSize::ScreenshotBig))
        .filter(|url| !url.is_empty())
        .collect()
}

fn resolve_genres(game: &Value) -> Vec<String> {
    let Some(items) = first_array(game, GENRE_KEYS) else {
        return Vec::new();
    };

    let mut genres: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let name = match item {
            Value::String(_) => non_blank(item),
            Value::Object(_) => first_string(item, GENRE_NAME_KEYS),
            _ => None,
        };
        if let Some(name) = name
            && !genres.contains(&name)
        {
            genres.push(name);
        }
    }
    genres
}

fn first_array<'a>(game: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .find_map(|key| present(game, key).and_then(Value::as_array))
}

fn resolve_release_date(game: &Value) -> Option<i64> {
    RELEASE_DATE_KEYS
        .iter()
        .filter_map(|key| present(game, key))
        .find_map(parse_timestamp)
}

/// Accepts Unix seconds (number or numeric string), `YYYY-MM-DD`, or RFC 3339.
fn parse_timestamp(value: &Value) -> Option<i64> {
    if let Some(ts) = as_i64(value) {
        return Some(ts);
    }
    if let Some(f) = value.as_f64().map(f64::trunc) {
        return (I64_MIN_F64..I64_MAX_F64).contains(&f).then_some(f as i64);
    }

    let s = value.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}

/// Resolve a company name.
///
/// Order: plain string field, catalog relation (`nome`), first flagged
/// `involved_companies` entry, then the unknown placeholder.
fn resolve_company(game: &Value, role: &CompanyRole) -> String {
    if let Some(name) = game.get(role.direct).and_then(non_blank) {
        return name;
    }

    let relation = match game.get(role.localized) {
        Some(v @ Value::String(_)) => non_blank(v),
        Some(Value::Object(obj)) => obj.get("nome").and_then(non_blank),
        _ => None,
    };
    if let Some(name) = relation {
        return name;
    }

    if let Some(entries) = game.get("involved_companies").and_then(Value::as_array) {
        let found = entries
            .iter()
            .filter_map(Value::as_object)
            .filter(|entry| entry.get(role.flag).is_some_and(is_truthy))
            .find_map(involved_company_name);
        if let Some(name) = found {
            return name;
        }
    }

    UNKNOWN_COMPANY.to_string()
}

fn involved_company_name(entry: &Map<String, Value>) -> Option<String> {
    entry
        .get("company")
        .and_then(|c| c.get("name"))
        .and_then(non_blank)
        .or_else(|| entry.get("name").and_then(non_blank))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// Status lives on the watchlist entry, so the outer value is checked first;
/// an unwrapped game may carry its own copy.
fn resolve_status(raw: &Value, game: Option<&Value>) -> Option<PlayStatus> {
    std::iter::once(raw)
        .chain(game)
        .flat_map(|source| STATUS_KEYS.iter().filter_map(move |key| source.get(*key)))
        .filter_map(Value::as_str)
        .find_map(|s| match s.parse::<PlayStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                log::debug!("ignoring play status: {e}");
                None
            }
        })
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
