//! CLI type definitions: command enums and argument structs.

use clap::{Args, Parser, Subcommand};

use letterplay_core::PlayStatus;

#[derive(Parser)]
#[command(name = "letterplay")]
#[command(about = "Track, rate and discover video games on LetterPlay", long_about = None)]
pub(crate) struct Cli {
    /// API base URL (overrides $LETTERPLAY_API_URL and settings.toml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paging arguments shared by list endpoints.
#[derive(Args, Clone, Debug)]
pub(crate) struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page (1-50, default from settings.toml)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sign in and store the session
    Login {
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Create a new account
    Register {
        username: String,

        #[arg(long)]
        email: String,
    },

    /// Show the logged-in user
    Whoami,

    /// Renew the access token using the stored refresh token
    Refresh,

    /// List registered users
    Users,

    /// Manage your account
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Search games on IGDB
    Search {
        /// Search terms
        #[arg(required_unless_present = "watch")]
        query: Vec<String>,

        /// Read queries line by line from stdin, searching as you type
        #[arg(long)]
        watch: bool,

        #[command(flatten)]
        pages: PageArgs,
    },

    /// Show a game's details and reviews
    Game {
        /// IGDB game id
        igdb_id: i64,
    },

    /// Show the global IGDB ranking or the weekly LetterPlay top list
    Ranking {
        /// Top games by LetterPlay reviews instead of IGDB rating
        #[arg(long)]
        weekly: bool,

        #[command(flatten)]
        pages: PageArgs,
    },

    /// Browse popular games of a genre
    Genre {
        /// Genre name as IGDB spells it (e.g. "Role-playing (RPG)")
        name: String,

        #[command(flatten)]
        pages: PageArgs,
    },

    /// List your watchlists
    Lists,

    /// Manage a single watchlist
    List {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Show or edit your favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Games marked as played in any of your lists
    Played,

    /// Write, delete or read reviews of a game
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Your own reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },

    /// Manage client settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// A `--limit` given on the command line, if this command pages.
    pub(crate) fn page_limit(&self) -> Option<u32> {
        match self {
            Self::Search { pages, .. } | Self::Ranking { pages, .. } | Self::Genre { pages, .. } => {
                pages.limit
            }
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ProfileAction {
    /// Change your username, email or password
    Edit {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ListAction {
    /// Show a list and its games
    Show { list_id: i64 },

    /// Create a new list
    Create {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Delete a list
    Delete { list_id: i64 },

    /// Add an IGDB game to a list
    Add { list_id: i64, igdb_id: i64 },

    /// Remove a game from a list
    Remove { list_id: i64, game_id: i64 },

    /// Change a game's play status (not-played, played, dropped)
    Status {
        list_id: i64,
        game_id: i64,
        status: PlayStatus,
    },
}

#[derive(Subcommand)]
pub(crate) enum FavoritesAction {
    /// Add an IGDB game to favorites
    Add { igdb_id: i64 },

    /// Remove a game from favorites
    Remove { game_id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum ReviewAction {
    /// Review a game with a 0-10 score
    Add {
        game_id: i64,
        score: f64,
        #[arg(required = true)]
        comment: Vec<String>,
    },

    /// Delete one of your reviews
    Delete { game_id: i64, review_id: i64 },

    /// Show all reviews of a game
    List { game_id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum ReviewsAction {
    /// List reviews you have written
    Mine,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they came from
    Show,

    /// Print the settings file path
    Path,

    /// Save the API base URL to settings.toml
    SetUrl {
        /// New base URL
        #[arg(required_unless_present = "clear")]
        url: Option<String>,

        /// Remove the saved URL and fall back to the default
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },
}
