use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use letterplay_client::{ClientError, library};

use super::Ctx;
use crate::cli_types::{FavoritesAction, ListAction};
use crate::display::{print_game_list, print_watchlist, success};
use crate::error::CliError;
use crate::spinner::with_spinner;

pub(crate) async fn run_lists(ctx: &Ctx) -> Result<(), CliError> {
    let lists = with_spinner(ctx.quiet, "Loading lists...", ctx.client.my_watchlists()).await?;
    if lists.is_empty() {
        log::info!("You have no lists yet. Create one with 'letterplay list create <name>'.");
        return Ok(());
    }

    log::info!("{}", "Your lists".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    for list in &lists {
        log::info!(
            "  {:>5}  {}{}",
            list.id,
            list.display_name(),
            if list.is_favorites() {
                format!(" {}", "\u{2605}".if_supports_color(Stdout, |t| t.yellow()))
            } else {
                String::new()
            },
        );
    }
    Ok(())
}

pub(crate) async fn run_list_action(ctx: &Ctx, action: ListAction) -> Result<(), CliError> {
    match action {
        ListAction::Show { list_id } => {
            let list = with_spinner(ctx.quiet, "Loading list...", ctx.client.watchlist(list_id)).await?;
            print_watchlist(&list);
        }
        ListAction::Create { name } => {
            let list = ctx.client.create_watchlist(&name.join(" ")).await?;
            success(&format!("Created list '{}' [list {}]", list.name(), list.id()));
        }
        ListAction::Delete { list_id } => {
            ctx.client.delete_watchlist(list_id).await?;
            success(&format!("Deleted list {}", list_id));
        }
        ListAction::Add { list_id, igdb_id } => {
            match with_spinner(ctx.quiet, "Adding game...", ctx.client.add_game(list_id, igdb_id)).await {
                Ok(list) => success(&format!("Added to '{}'", list.name())),
                Err(ClientError::Conflict(_)) => {
                    log::warn!("That game is already in list {}.", list_id);
                }
                Err(e) => return Err(e.into()),
            }
        }
        ListAction::Remove { list_id, game_id } => {
            ctx.client.remove_game(list_id, game_id).await?;
            success(&format!("Removed game {} from list {}", game_id, list_id));
        }
        ListAction::Status {
            list_id,
            game_id,
            status,
        } => {
            let list = ctx.client.update_status(list_id, game_id, status).await?;
            success(&format!(
                "Marked as {} in '{}'",
                status.display_name().if_supports_color(Stdout, |t| t.cyan()),
                list.name()
            ));
        }
    }
    Ok(())
}

pub(crate) async fn run_favorites(ctx: &Ctx, action: Option<FavoritesAction>) -> Result<(), CliError> {
    match action {
        None => {
            let favorites =
                with_spinner(ctx.quiet, "Loading favorites...", library::favorites(&ctx.client)).await?;
            match favorites {
                Some(list) => print_watchlist(&list),
                None => log::info!("No favorites yet. Add one with 'letterplay favorites add <igdb-id>'."),
            }
        }
        Some(FavoritesAction::Add { igdb_id }) => {
            match ctx.client.add_favorite(igdb_id).await {
                Ok(_) => success("Added to favorites"),
                Err(ClientError::Conflict(_)) => log::warn!("That game is already a favorite."),
                Err(e) => return Err(e.into()),
            }
        }
        Some(FavoritesAction::Remove { game_id }) => {
            ctx.client.remove_favorite(game_id).await?;
            success("Removed from favorites");
        }
    }
    Ok(())
}

pub(crate) async fn run_played(ctx: &Ctx) -> Result<(), CliError> {
    let games = with_spinner(
        ctx.quiet,
        "Collecting played games...",
        library::fetch_played_games(&ctx.client),
    )
    .await?;

    log::info!(
        "{} {}",
        "Played games".if_supports_color(Stdout, |t| t.bold()),
        format!("({})", games.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();
    print_game_list(&games, 1);
    Ok(())
}
