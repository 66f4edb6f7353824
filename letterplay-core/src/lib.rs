//! Core data layer for LetterPlay.
//!
//! Turns the backend's loosely-shaped game payloads into [`GameRecord`]s.
//! Everything here is pure: no network, no filesystem.

pub mod extract;
pub mod image;
pub mod normalize;
pub mod record;
pub mod status;

pub use extract::{LIST_KEYS, extract_list};
pub use image::{ImageSize, canonicalize_image_url};
pub use normalize::{normalize, normalize_list};
pub use record::{GameRecord, UNKNOWN_COMPANY, UNKNOWN_NAME, UNKNOWN_SUMMARY};
pub use status::{PlayStatus, StatusParseError};
