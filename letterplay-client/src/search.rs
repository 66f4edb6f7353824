//! Search-as-you-type with a quiet window.
//!
//! Every call to [`SearchDebouncer::run`] takes a new generation number.
//! A call only delivers results if its generation is still the latest,
//! both after the quiet window and after the search itself resolves.
//! Older calls are not cancelled, they just report [`SearchOutcome::Superseded`].

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::time::{Duration, sleep};

use letterplay_core::GameRecord;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<GameRecord>),
    /// A newer query was issued; these results must not be shown.
    Superseded,
}

#[derive(Debug)]
pub struct SearchDebouncer {
    generation: AtomicU64,
    window: Duration,
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    pub async fn run<F, Fut>(&self, query: &str, search: F) -> SearchOutcome
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Vec<GameRecord>, ClientError>>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Results(Vec::new());
        }

        sleep(self.window).await;
        if !self.is_current(ticket) {
            log::debug!("search '{query}' superseded before dispatch");
            return SearchOutcome::Superseded;
        }

        let result = search(query.to_string()).await;
        if !self.is_current(ticket) {
            log::debug!("discarding stale results for '{query}'");
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(games) => SearchOutcome::Results(games),
            Err(e) => {
                log::warn!("Search for '{query}' failed: {e}");
                SearchOutcome::Results(Vec::new())
            }
        }
    }
}

/// The visible result list. Only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    query: String,
    games: Vec<GameRecord>,
}

impl SearchResults {
    /// Replace the list with `outcome`'s results. Returns `false` (leaving
    /// the list untouched) for a superseded outcome.
    pub fn apply(&mut self, query: &str, outcome: SearchOutcome) -> bool {
        match outcome {
            SearchOutcome::Results(games) => {
                self.query = query.trim().to_string();
                self.games = games;
                true
            }
            SearchOutcome::Superseded => false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
