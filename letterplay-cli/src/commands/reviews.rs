use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use letterplay_client::library::{reviewer_name, reviewer_names};

use super::Ctx;
use crate::cli_types::ReviewAction;
use crate::display::{print_my_review, print_review, success};
use crate::error::CliError;
use crate::spinner::with_spinner;

pub(crate) async fn run_review_action(ctx: &Ctx, action: ReviewAction) -> Result<(), CliError> {
    match action {
        ReviewAction::Add {
            game_id,
            score,
            comment,
        } => {
            let review = with_spinner(
                ctx.quiet,
                "Publishing review...",
                ctx.client.add_review(game_id, score, &comment.join(" ")),
            )
            .await?;
            success(&format!("Review published [review {}]", review.id));
        }
        ReviewAction::Delete { game_id, review_id } => {
            ctx.client.delete_review(game_id, review_id).await?;
            success("Review deleted");
        }
        ReviewAction::List { game_id } => {
            let (reviews, users) = with_spinner(ctx.quiet, "Loading reviews...", async {
                tokio::join!(ctx.client.game_reviews(game_id), ctx.client.all_users())
            })
            .await;
            let reviews = reviews?;
            let names = users.map(|u| reviewer_names(&u)).unwrap_or_default();

            if reviews.items.is_empty() {
                log::info!("No reviews for game {} yet.", game_id);
                return Ok(());
            }
            if let Some(avg) = reviews.average {
                log::info!(
                    "Average: {}",
                    format!("{:.1}/10", avg).if_supports_color(Stdout, |t| t.yellow()),
                );
                crate::log_blank();
            }
            for review in &reviews.items {
                print_review(review, reviewer_name(&names, review.user_id));
            }
        }
    }
    Ok(())
}

pub(crate) async fn run_my_reviews(ctx: &Ctx) -> Result<(), CliError> {
    let reviews = with_spinner(ctx.quiet, "Loading your reviews...", ctx.client.my_reviews()).await?;
    if reviews.is_empty() {
        log::info!("You haven't reviewed any games yet.");
        return Ok(());
    }
    log::info!(
        "{} {}",
        "Your reviews".if_supports_color(Stdout, |t| t.bold()),
        format!("({})", reviews.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();
    for review in &reviews {
        print_my_review(review);
    }
    Ok(())
}
