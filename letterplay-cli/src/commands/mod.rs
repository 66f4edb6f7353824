pub(crate) mod auth;
pub(crate) mod config;
pub(crate) mod games;
pub(crate) mod lists;
pub(crate) mod reviews;

use std::io::Write;

use letterplay_client::{ApiClient, Settings};

use crate::cli_types::{Commands, ProfileAction, ReviewsAction};
use crate::error::CliError;

/// Everything a networked command needs.
pub(crate) struct Ctx {
    pub client: ApiClient,
    pub settings: Settings,
    pub quiet: bool,
}

pub(crate) async fn dispatch(ctx: &Ctx, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Login { username, password } => auth::run_login(ctx, &username, password).await,
        Commands::Logout => auth::run_logout(ctx).await,
        Commands::Register { username, email } => auth::run_register(ctx, &username, &email).await,
        Commands::Whoami => auth::run_whoami(ctx).await,
        Commands::Refresh => auth::run_refresh(ctx).await,
        Commands::Users => auth::run_users(ctx).await,
        Commands::Profile {
            action:
                ProfileAction::Edit {
                    username,
                    email,
                    password,
                },
        } => auth::run_profile_edit(ctx, username, email, password).await,
        Commands::Search {
            query,
            watch,
            pages,
        } => {
            if watch {
                games::run_search_watch(ctx).await
            } else {
                games::run_search(ctx, &query.join(" "), pages.page).await
            }
        }
        Commands::Game { igdb_id } => games::run_game(ctx, igdb_id).await,
        Commands::Ranking { weekly, pages } => games::run_ranking(ctx, weekly, pages.page).await,
        Commands::Genre { name, pages } => games::run_genre(ctx, &name, pages.page).await,
        Commands::Lists => lists::run_lists(ctx).await,
        Commands::List { action } => lists::run_list_action(ctx, action).await,
        Commands::Favorites { action } => lists::run_favorites(ctx, action).await,
        Commands::Played => lists::run_played(ctx).await,
        Commands::Review { action } => reviews::run_review_action(ctx, action).await,
        Commands::Reviews {
            action: ReviewsAction::Mine,
        } => reviews::run_my_reviews(ctx).await,
        // Handled before the client is built
        Commands::Config { .. } => Ok(()),
    }
}

/// Print `prompt` and read one trimmed line from stdin.
pub(crate) fn read_line(prompt: &str) -> Result<String, CliError> {
    print!("  {}: ", prompt);
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
