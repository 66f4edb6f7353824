use futures::StreamExt;
use futures::stream::FuturesUnordered;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::sync::mpsc;

use letterplay_client::library::{reviewer_name, reviewer_names};
use letterplay_client::{ClientError, SearchDebouncer, SearchResults};

use super::Ctx;
use crate::display::{print_game_detail, print_game_list, print_review};
use crate::error::CliError;
use crate::spinner::with_spinner;

/// Rank of the first entry on `page`.
fn first_rank(ctx: &Ctx, page: u32) -> usize {
    (page.max(1) as usize - 1) * ctx.client.page_limit() as usize + 1
}

pub(crate) async fn run_search(ctx: &Ctx, query: &str, page: u32) -> Result<(), CliError> {
    let games = with_spinner(
        ctx.quiet,
        format!("Searching for '{}'...", query.trim()),
        ctx.client.search_games(query, page),
    )
    .await?;

    log::info!(
        "Results for '{}':",
        query.trim().if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    print_game_list(&games, first_rank(ctx, page));
    Ok(())
}

/// Search as you type: every stdin line is a new query. Only the results of
/// the latest query are printed.
pub(crate) async fn run_search_watch(ctx: &Ctx) -> Result<(), CliError> {
    log::info!(
        "{}",
        "Type a query and press Enter (Ctrl-D to stop)."
            .if_supports_color(Stdout, |t| t.dimmed()),
    );

    let (tx, mut rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    let debouncer = SearchDebouncer::new(ctx.settings.debounce);
    let debouncer = &debouncer;
    let mut pending = FuturesUnordered::new();
    let mut results = SearchResults::default();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = rx.recv(), if input_open => match line {
                Some(query) => pending.push(async move {
                    let outcome = debouncer
                        .run(&query, |q| async move { ctx.client.search_games(&q, 1).await })
                        .await;
                    (query, outcome)
                }),
                None => input_open = false,
            },
            Some((query, outcome)) = pending.next(), if !pending.is_empty() => {
                if results.apply(&query, outcome) {
                    crate::log_blank();
                    if results.query().is_empty() {
                        log::info!("{}", "(cleared)".if_supports_color(Stdout, |t| t.dimmed()));
                    } else {
                        log::info!(
                            "Results for '{}':",
                            results.query().if_supports_color(Stdout, |t| t.bold()),
                        );
                        print_game_list(results.games(), 1);
                    }
                }
            }
            else => break,
        }
    }
    Ok(())
}

pub(crate) async fn run_game(ctx: &Ctx, igdb_id: i64) -> Result<(), CliError> {
    let (game, reviews, users) = with_spinner(ctx.quiet, "Loading game...", async {
        tokio::join!(
            ctx.client.game_by_igdb_id(igdb_id),
            ctx.client.game_reviews(igdb_id),
            ctx.client.all_users(),
        )
    })
    .await;

    let game = match game {
        Ok(Some(game)) => game,
        Ok(None) | Err(ClientError::NotFound(_)) => {
            return Err(CliError::input(format!("No game with IGDB id {}", igdb_id)));
        }
        Err(e) => return Err(e.into()),
    };
    print_game_detail(&game);
    crate::log_blank();

    // Reviews are secondary; the detail view still renders without them.
    let reviews = match reviews {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Could not load reviews: {}", e);
            return Ok(());
        }
    };
    let names = match users {
        Ok(users) => reviewer_names(&users),
        Err(e) => {
            log::debug!("reviewer names unavailable: {e}");
            Default::default()
        }
    };

    match reviews.average.filter(|_| !reviews.items.is_empty()) {
        Some(avg) => log::info!(
            "{} {}",
            format!("Reviews ({})", reviews.items.len()).if_supports_color(Stdout, |t| t.bold()),
            format!("average {:.1}/10", avg).if_supports_color(Stdout, |t| t.yellow()),
        ),
        None => log::info!("{}", "Reviews".if_supports_color(Stdout, |t| t.bold())),
    }
    if reviews.items.is_empty() {
        log::info!("  {}", "No reviews yet.".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for review in &reviews.items {
        print_review(review, reviewer_name(&names, review.user_id));
    }
    Ok(())
}

pub(crate) async fn run_ranking(ctx: &Ctx, weekly: bool, page: u32) -> Result<(), CliError> {
    let (title, games, first) = if weekly {
        let games = with_spinner(ctx.quiet, "Loading weekly top...", ctx.client.weekly_ranking()).await?;
        ("Top of the week on LetterPlay", games, 1)
    } else {
        let games = with_spinner(
            ctx.quiet,
            "Loading ranking...",
            ctx.client.global_ranking(page),
        )
        .await?;
        ("Best rated games", games, first_rank(ctx, page))
    };

    log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    print_game_list(&games, first);
    Ok(())
}

pub(crate) async fn run_genre(ctx: &Ctx, genre: &str, page: u32) -> Result<(), CliError> {
    let games = with_spinner(
        ctx.quiet,
        format!("Loading {} games...", genre),
        ctx.client.games_by_genre(genre, page),
    )
    .await?;

    log::info!("{}", genre.if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    print_game_list(&games, first_rank(ctx, page));
    Ok(())
}
