//! Views assembled from several endpoints: favorites, played games and
//! reviewer names.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;

use letterplay_core::{GameRecord, PlayStatus};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{UserProfile, Watchlist, WatchlistSummary};

/// Shown for reviews whose author is not in the user list.
pub const UNKNOWN_REVIEWER: &str = "Usuário";

pub fn find_favorites(lists: &[WatchlistSummary]) -> Option<&WatchlistSummary> {
    lists.iter().find(|l| l.is_favorites())
}

/// The user's favorites list with its games, if it exists yet.
pub async fn favorites(client: &ApiClient) -> Result<Option<Watchlist>, ClientError> {
    let lists = client.my_watchlists().await?;
    match find_favorites(&lists) {
        Some(summary) => Ok(Some(client.watchlist(summary.id).await?)),
        None => Ok(None),
    }
}

/// Games marked as played in any list, deduplicated by id in first-seen order.
pub fn played_games(lists: &[Watchlist]) -> Vec<GameRecord> {
    let mut seen = HashSet::new();
    lists
        .iter()
        .flat_map(|list| list.games.iter())
        .filter(|game| game.status == Some(PlayStatus::Played))
        .filter(|game| seen.insert(game.id))
        .cloned()
        .collect()
}

/// Fetch every list concurrently and collect the played games.
///
/// A list that fails to load is skipped with a warning; failing to load the
/// list index is an error.
pub async fn fetch_played_games(client: &ApiClient) -> Result<Vec<GameRecord>, ClientError> {
    let summaries = client.my_watchlists().await?;
    let results = join_all(summaries.iter().map(|s| client.watchlist(s.id))).await;

    let lists: Vec<Watchlist> = summaries
        .iter()
        .zip(results)
        .filter_map(|(summary, result)| match result {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!("Skipping list '{}': {}", summary.display_name(), e);
                None
            }
        })
        .collect();

    Ok(played_games(&lists))
}

pub fn reviewer_names(users: &[UserProfile]) -> HashMap<i64, String> {
    users.iter().map(|u| (u.id, u.username.clone())).collect()
}

pub fn reviewer_name(names: &HashMap<i64, String>, user_id: i64) -> &str {
    names
        .get(&user_id)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_REVIEWER)
}
