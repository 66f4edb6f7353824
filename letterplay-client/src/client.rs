use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tokio::time::Duration;

use letterplay_core::{GameRecord, PlayStatus, normalize, normalize_list};

use crate::error::ClientError;
use crate::session::{Session, SessionStore};
use crate::settings::Settings;
use crate::types::{
    AccessToken, MyReview, NewUser, Review, ReviewList, TokenPair, UserPictures, UserProfile,
    UserUpdate, Watchlist, WatchlistSummary, parse_items,
};
use crate::validate;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// The backend rejects `limit` above this.
const MAX_PAGE_LIMIT: u32 = 50;
const ERROR_PREVIEW_CHARS: usize = 200;

/// Which token, if any, a request must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Send the access token when there is one.
    Optional,
    /// Fail with `NotLoggedIn` before sending if there is no access token.
    Required,
    /// Send the refresh token instead of the access token.
    Refresh,
}

/// Async client for the LetterPlay REST API.
///
/// Owns the [`Session`]: it is restored from the store on construction,
/// replaced on login, and cleared on logout. Every game payload is passed
/// through the normalizer before it is returned.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    page_limit: u32,
    store: SessionStore,
    session: Arc<Mutex<Session>>,
}

impl ApiClient {
    pub fn new(settings: &Settings, store: SessionStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_http(settings, store, http)
    }

    /// Like [`new`](Self::new), with a caller-configured HTTP client
    /// (proxy, TLS roots, timeouts).
    pub fn with_http(
        settings: &Settings,
        store: SessionStore,
        http: reqwest::Client,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(&settings.base_url).map_err(|e| {
            ClientError::config(format!("Invalid API base URL '{}': {e}", settings.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "API base URL '{}' cannot have a path",
                settings.base_url
            )));
        }

        let session = store.load();
        if let Some(name) = session.username.as_deref().filter(|_| session.is_logged_in()) {
            log::debug!("restored session for {name}");
        }

        Ok(Self {
            http,
            base,
            page_limit: settings.page_limit.clamp(1, MAX_PAGE_LIMIT),
            store,
            session: Arc::new(Mutex::new(session)),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.lock().await.is_logged_in()
    }

    // -- auth ---------------------------------------------------------------

    /// Exchange credentials for tokens and persist the new session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let url = self.endpoint(&["auth", "token"])?;
        log::debug!("POST {url}");
        let req = self
            .http
            .post(url)
            .form(&[("username", username), ("password", password)]);
        let tokens: TokenPair = serde_json::from_value(self.send(req).await?)?;

        let mut session = Session {
            access_token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token,
            user_id: None,
            username: Some(username.to_string()),
        };
        *self.session.lock().await = session.clone();

        match self.me().await {
            Ok(user) => {
                session.user_id = Some(user.id);
                session.username = Some(user.username);
            }
            Err(e) => log::warn!("Logged in, but the profile could not be loaded: {e}"),
        }

        *self.session.lock().await = session.clone();
        self.store.save(&session)?;
        Ok(session)
    }

    /// Trade the refresh token for a new access token.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, &["auth", "refresh_token"], Auth::Refresh)
            .await?;
        let token: AccessToken = serde_json::from_value(self.send(req).await?)?;

        let session = {
            let mut session = self.session.lock().await;
            session.access_token = Some(token.access_token);
            session.clone()
        };
        self.store.save(&session)
    }

    /// Forget the session in memory and on disk.
    pub async fn logout(&self) -> Result<(), ClientError> {
        *self.session.lock().await = Session::default();
        self.store.clear()
    }

    // -- users --------------------------------------------------------------

    pub async fn register(&self, user: &NewUser) -> Result<UserProfile, ClientError> {
        let value = self
            .send_json(Method::POST, &["users", ""], user, Auth::Optional)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let value = self.get(&["users", "me"], &[], Auth::Required).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn my_pictures(&self) -> Result<UserPictures, ClientError> {
        let value = self
            .get(&["users", "me", "pictures"], &[], Auth::Required)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Edit a user's account. When the edited user is the logged-in one,
    /// the new username is written to the session.
    pub async fn update_user(
        &self,
        user_id: i64,
        update: &UserUpdate,
    ) -> Result<UserProfile, ClientError> {
        if update.is_empty() {
            return Err(ClientError::validation("Nothing to update"));
        }
        let id = user_id.to_string();
        let value = self
            .send_json(Method::PATCH, &["users", "atualizar", &id], update, Auth::Required)
            .await?;
        let profile: UserProfile = serde_json::from_value(value)?;

        let renamed = {
            let mut session = self.session.lock().await;
            if session.user_id == Some(profile.id)
                && session.username.as_deref() != Some(profile.username.as_str())
            {
                session.username = Some(profile.username.clone());
                Some(session.clone())
            } else {
                None
            }
        };
        if let Some(session) = renamed {
            self.store.save(&session)?;
        }
        Ok(profile)
    }

    /// Id of the logged-in user, asking the backend when the session
    /// doesn't carry it.
    pub async fn current_user_id(&self) -> Result<i64, ClientError> {
        if let Some(id) = self.session.lock().await.user_id {
            return Ok(id);
        }
        Ok(self.me().await?.id)
    }

    pub async fn all_users(&self) -> Result<Vec<UserProfile>, ClientError> {
        let value = self.get(&["users", "todos"], &[], Auth::Optional).await?;
        Ok(parse_items(&value, "user"))
    }

    // -- games --------------------------------------------------------------

    pub async fn search_games(&self, query: &str, page: u32) -> Result<Vec<GameRecord>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut params = vec![("query", query.to_string())];
        params.extend(self.page_params(page));
        let value = self
            .get(&["watchlists", "pesquisar-jogos-igdb"], &params, Auth::Optional)
            .await?;
        Ok(normalize_list(&value))
    }

    pub async fn game_by_igdb_id(&self, igdb_id: i64) -> Result<Option<GameRecord>, ClientError> {
        let id = igdb_id.to_string();
        let value = self
            .get(&["watchlists", "pesquisar-jogo-id-igdb", &id], &[], Auth::Optional)
            .await?;
        Ok(normalize(&value))
    }

    /// Popular games of a genre. The backend answers 404 when page 1 is
    /// empty; that is reported as an empty list.
    pub async fn games_by_genre(&self, genre: &str, page: u32) -> Result<Vec<GameRecord>, ClientError> {
        let params = self.page_params(page);
        match self
            .get(&["watchlists", "games", "por-genero", genre.trim()], &params, Auth::Optional)
            .await
        {
            Ok(value) => Ok(normalize_list(&value)),
            Err(ClientError::NotFound(msg)) => {
                log::debug!("no games for genre '{genre}': {msg}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn global_ranking(&self, page: u32) -> Result<Vec<GameRecord>, ClientError> {
        let params = self.page_params(page);
        let value = self
            .get(&["watchlists", "games", "ranking-global-igdb"], &params, Auth::Optional)
            .await?;
        Ok(normalize_list(&value))
    }

    /// Top games by the average of LetterPlay users' reviews.
    pub async fn weekly_ranking(&self) -> Result<Vec<GameRecord>, ClientError> {
        let value = self
            .get(&["watchlists", "ranking", "top-melhores"], &[], Auth::Optional)
            .await?;
        Ok(normalize_list(&value))
    }

    // -- watchlists ---------------------------------------------------------

    pub async fn create_watchlist(&self, name: &str) -> Result<Watchlist, ClientError> {
        let name = validate::watchlist_name(name)?;
        let value = self
            .send_json(
                Method::POST,
                &["watchlists", "criar-watchlist", ""],
                &json!({ "nome": name }),
                Auth::Required,
            )
            .await?;
        Watchlist::from_value(&value)
    }

    pub async fn my_watchlists(&self) -> Result<Vec<WatchlistSummary>, ClientError> {
        let value = self
            .get(&["watchlists", "minhas-watchlists-ids"], &[], Auth::Required)
            .await?;
        Ok(parse_items(&value, "watchlist"))
    }

    pub async fn watchlist(&self, watchlist_id: i64) -> Result<Watchlist, ClientError> {
        let id = watchlist_id.to_string();
        let value = self
            .get(&["watchlists", "todas-informacoes-watchlist", &id], &[], Auth::Required)
            .await?;
        Watchlist::from_value(&value)
    }

    pub async fn delete_watchlist(&self, watchlist_id: i64) -> Result<(), ClientError> {
        let id = watchlist_id.to_string();
        self.delete(&["watchlists", &id]).await
    }

    /// Add an IGDB game to a list. A game already in the list is reported
    /// as [`ClientError::Conflict`].
    pub async fn add_game(&self, watchlist_id: i64, igdb_game_id: i64) -> Result<Watchlist, ClientError> {
        let id = watchlist_id.to_string();
        let value = self
            .send_json(
                Method::POST,
                &["watchlists", "games", "adicionar", &id],
                &json!({ "igdb_game_id": igdb_game_id }),
                Auth::Required,
            )
            .await?;
        Watchlist::from_value(&value)
    }

    pub async fn remove_game(&self, watchlist_id: i64, game_id: i64) -> Result<(), ClientError> {
        let list = watchlist_id.to_string();
        let game = game_id.to_string();
        self.delete(&["watchlists", &list, "games", &game]).await
    }

    pub async fn update_status(
        &self,
        watchlist_id: i64,
        game_id: i64,
        status: PlayStatus,
    ) -> Result<Watchlist, ClientError> {
        let list = watchlist_id.to_string();
        let game = game_id.to_string();
        let value = self
            .send_json(
                Method::PATCH,
                &["watchlists", &list, "games", &game, "status"],
                &json!({ "new_status": status }),
                Auth::Required,
            )
            .await?;
        Watchlist::from_value(&value)
    }

    pub async fn add_favorite(&self, igdb_game_id: i64) -> Result<Watchlist, ClientError> {
        let value = self
            .send_json(
                Method::POST,
                &["watchlists", "favoritos", "adicionar-jogo"],
                &json!({ "igdb_game_id": igdb_game_id }),
                Auth::Required,
            )
            .await?;
        Watchlist::from_value(&value)
    }

    pub async fn remove_favorite(&self, game_id: i64) -> Result<(), ClientError> {
        let game = game_id.to_string();
        self.delete(&["watchlists", "favoritos", "remover-jogo", &game])
            .await
    }

    // -- reviews ------------------------------------------------------------

    pub async fn my_reviews(&self) -> Result<Vec<MyReview>, ClientError> {
        let value = self
            .get(&["watchlists", "minhas-reviews"], &[], Auth::Required)
            .await?;
        Ok(parse_items(&value, "review"))
    }

    /// Validates score and text locally before sending.
    pub async fn add_review(&self, game_id: i64, score: f64, comment: &str) -> Result<Review, ClientError> {
        let body = validate::review(score, comment)?;
        let game = game_id.to_string();
        let value = self
            .send_json(
                Method::POST,
                &["watchlists", "games", "reviews", &game],
                &body,
                Auth::Required,
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn game_reviews(&self, game_id: i64) -> Result<ReviewList, ClientError> {
        let game = game_id.to_string();
        let value = self
            .get(&["watchlists", "games", "all-reviews", &game], &[], Auth::Optional)
            .await?;
        if value.is_object() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(ReviewList {
                items: parse_items(&value, "review"),
                average: None,
            })
        }
    }

    pub async fn delete_review(&self, game_id: i64, review_id: i64) -> Result<(), ClientError> {
        let game = game_id.to_string();
        let review = review_id.to_string();
        self.delete(&["watchlists", "games", &game, "reviews", &review])
            .await
    }

    // -- plumbing -----------------------------------------------------------

    fn page_params(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("page", page.max(1).to_string()),
            ("limit", self.page_limit.to_string()),
        ]
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    /// A trailing `""` segment yields a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::config("API base URL cannot have a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        segments: &[&str],
        auth: Auth,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        log::debug!("{method} {url}");

        let session = self.session.lock().await;
        let token = match auth {
            Auth::Refresh => session.refresh_token.as_deref(),
            Auth::Optional | Auth::Required => session.bearer(),
        };

        let req = self.http.request(method, url);
        match token {
            Some(token) => Ok(req.bearer_auth(token)),
            None if auth == Auth::Optional => Ok(req),
            None => Err(ClientError::NotLoggedIn),
        }
    }

    async fn get(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
        auth: Auth,
    ) -> Result<Value, ClientError> {
        let req = self.request(Method::GET, segments, auth).await?.query(params);
        self.send(req).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        auth: Auth,
    ) -> Result<Value, ClientError> {
        let req = self.request(method, segments, auth).await?.json(body);
        self.send(req).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, segments, Auth::Required).await?;
        self.send(req).await.map(|_| ())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Value, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        check_response(status, &text)
    }
}

/// Map an HTTP status and body to a JSON value or a typed error.
///
/// Success with an empty body is `Value::Null`. Error bodies are expected in
/// FastAPI's `{"detail": ...}` shape.
pub(crate) fn check_response(status: StatusCode, body: &str) -> Result<Value, ClientError> {
    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(body).map_err(|e| {
            ClientError::Api(format!(
                "Failed to parse response: {e}. Response: {}",
                preview(body)
            ))
        });
    }

    let message = error_detail(body);
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            // Request validation errors: [{"loc": [...], "msg": "...", ...}]
            Some(Value::Array(errors)) => {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }

    let text = preview(body);
    if text.is_empty() {
        "no details".to_string()
    } else {
        text
    }
}

fn preview(body: &str) -> String {
    body.trim().chars().take(ERROR_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
