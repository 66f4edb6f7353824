use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Play status of a game inside a watchlist entry.
///
/// The backend stores these as Portuguese upper-case strings; `wire_name()`
/// is the exact value sent and received, and `aliases()` covers the
/// friendlier spellings accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayStatus {
    NotPlayed,
    Played,
    Dropped,
}

const ALL_STATUSES: &[PlayStatus] = &[
    PlayStatus::NotPlayed,
    PlayStatus::Played,
    PlayStatus::Dropped,
];

impl PlayStatus {
    /// Value used by the REST API (`status_jogo`, `new_status`).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::NotPlayed => "AINDA NAO JOGADO",
            Self::Played => "JOGADO",
            Self::Dropped => "DROPADO",
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NotPlayed => "Not played yet",
            Self::Played => "Played",
            Self::Dropped => "Dropped",
        }
    }

    /// All accepted names for this status (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::NotPlayed => &[
                "ainda nao jogado",
                "ainda não jogado",
                "ainda_nao_jogado",
                "not-played",
                "not_played",
                "notplayed",
                "backlog",
                "todo",
            ],
            Self::Played => &["jogado", "played", "completed", "done"],
            Self::Dropped => &["dropado", "dropped", "abandoned"],
        }
    }

    pub fn all() -> &'static [PlayStatus] {
        ALL_STATUSES
    }
}

impl std::fmt::Display for PlayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string is not a recognized play status.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown play status: '{0}'")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for PlayStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        for &status in ALL_STATUSES {
            if status.wire_name().to_lowercase() == lower {
                return Ok(status);
            }
            if status.aliases().contains(&lower.as_str()) {
                return Ok(status);
            }
        }
        Err(StatusParseError(s.to_string()))
    }
}

impl Serialize for PlayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for PlayStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
