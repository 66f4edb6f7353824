//! Async client for the LetterPlay REST backend.
//!
//! [`ApiClient`] wraps the HTTP endpoints and returns games already passed
//! through [`letterplay_core::normalize`]. The logged-in identity lives in an
//! explicit [`Session`] persisted by a [`SessionStore`].

pub mod client;
pub mod error;
pub mod library;
pub mod search;
pub mod session;
pub mod settings;
pub mod types;
pub mod validate;

pub use client::ApiClient;
pub use error::ClientError;
pub use search::{SearchDebouncer, SearchOutcome, SearchResults};
pub use session::{Session, SessionStore};
pub use settings::{SettingSource, Settings};
pub use types::{
    MyReview, NewReview, NewUser, Review, ReviewList, UserPictures, UserProfile, UserUpdate,
    Watchlist, WatchlistSummary,
};
