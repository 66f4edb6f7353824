//! Terminal rendering of games, lists and reviews.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use letterplay_client::{MyReview, Review, Watchlist};
use letterplay_core::{GameRecord, PlayStatus, UNKNOWN_COMPANY};

const SUMMARY_WIDTH: usize = 280;

/// `87/100`, or `unrated` when the game has no score.
pub(crate) fn rating_label(rating: f64) -> String {
    if rating > 0.0 {
        format!("{:.0}/100", rating)
    } else {
        "unrated".to_string()
    }
}

pub(crate) fn status_label(status: Option<PlayStatus>) -> &'static str {
    status.map(|s| s.display_name()).unwrap_or("")
}

/// Shorten to `max` chars, ending with `...` when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// One-line summary without colors: `Name (Year)`.
pub(crate) fn title_with_year(game: &GameRecord) -> String {
    match game.release_year() {
        Some(year) => format!("{} ({})", game.name, year),
        None => game.name.clone(),
    }
}

pub(crate) fn print_game_list(games: &[GameRecord], first_rank: usize) {
    if games.is_empty() {
        log::info!("  {}", "No games found.".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }

    let width = (first_rank + games.len()).to_string().len();
    for (i, game) in games.iter().enumerate() {
        let status = status_label(game.status);
        log::info!(
            "  {:>width$}. {}  {}  {}{}",
            first_rank + i,
            title_with_year(game).if_supports_color(Stdout, |t| t.bold()),
            rating_label(game.rating).if_supports_color(Stdout, |t| t.yellow()),
            format!("[id {}]", game.id).if_supports_color(Stdout, |t| t.dimmed()),
            if status.is_empty() {
                String::new()
            } else {
                format!("  {}", status.if_supports_color(Stdout, |t| t.cyan()))
            },
        );
        if !game.genres.is_empty() {
            log::info!(
                "  {:>width$}  {}",
                "",
                game.genres_label().if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

pub(crate) fn print_game_detail(game: &GameRecord) {
    log::info!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("");
    log::info!("  IGDB id:    {}", game.id);
    log::info!(
        "  Rating:     {}",
        rating_label(game.rating).if_supports_color(Stdout, |t| t.yellow()),
    );
    if let Some(date) = game.release_date_string() {
        log::info!("  Released:   {}", date);
    }
    if !game.genres.is_empty() {
        log::info!("  Genres:     {}", game.genres_label());
    }
    log::info!("  Developer:  {}", company(&game.developer));
    log::info!("  Publisher:  {}", company(&game.publisher));
    if game.has_cover() {
        log::info!(
            "  Cover:      {}",
            game.cover_url.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    if !game.screenshots.is_empty() {
        log::info!("  Screenshots: {}", game.screenshots.len());
    }
    log::info!("");
    log::info!("  {}", truncate(&game.summary, SUMMARY_WIDTH));
}

fn company(name: &str) -> String {
    if name == UNKNOWN_COMPANY {
        name.if_supports_color(Stdout, |t| t.dimmed()).to_string()
    } else {
        name.to_string()
    }
}

pub(crate) fn print_watchlist(list: &Watchlist) {
    log::info!(
        "{} {}",
        list.name().if_supports_color(Stdout, |t| t.bold()),
        format!("[list {}]", list.id()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();
    print_game_list(&list.games, 1);
}

pub(crate) fn print_review(review: &Review, author: &str) {
    log::info!(
        "  {} {}  {}",
        author.if_supports_color(Stdout, |t| t.bold()),
        format!("[review {}]", review.id).if_supports_color(Stdout, |t| t.dimmed()),
        format!("{:.1}/10", review.score).if_supports_color(Stdout, |t| t.yellow()),
    );
    if let Some(comment) = review.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        log::info!("    {}", comment.trim());
    }
}

pub(crate) fn print_my_review(review: &MyReview) {
    let title = review
        .game
        .as_ref()
        .map(|g| format!("{} [game {}]", g.title, g.id))
        .unwrap_or_else(|| "Unknown game".to_string());
    log::info!(
        "  {}  {}  {}",
        title.if_supports_color(Stdout, |t| t.bold()),
        format!("{:.1}/10", review.score).if_supports_color(Stdout, |t| t.yellow()),
        format!("[review {}]", review.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if let Some(comment) = review.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        log::info!("    {}", comment.trim());
    }
}

/// Check mark line for a completed action.
pub(crate) fn success(msg: &str) {
    log::info!("{} {}", "\u{2714}".if_supports_color(Stdout, |t| t.green()), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_labels() {
        assert_eq!(rating_label(87.4), "87/100");
        assert_eq!(rating_label(0.0), "unrated");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("curto", 10), "curto");
        assert_eq!(truncate("ação ação ação", 8), "ação...");
    }

    #[test]
    fn title_includes_year_when_known() {
        let game = GameRecord {
            name: "Hades".to_string(),
            release_date: Some(1_600_387_200),
            ..Default::default()
        };
        assert_eq!(title_with_year(&game), "Hades (2020)");

        let undated = GameRecord {
            name: "Hades".to_string(),
            ..Default::default()
        };
        assert_eq!(title_with_year(&undated), "Hades");
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(Some(PlayStatus::Dropped)), "Dropped");
        assert_eq!(status_label(None), "");
    }
}
