//! Input checks done before a request is sent.

use crate::error::ClientError;
use crate::types::{NewReview, NewUser, UserUpdate};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
pub const MAX_COMMENT_CHARS: usize = 1000;

pub fn review(score: f64, comment: &str) -> Result<NewReview, ClientError> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ClientError::validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(ClientError::validation("Review text cannot be empty"));
    }
    if comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(ClientError::validation(format!(
            "Review text is limited to {MAX_COMMENT_CHARS} characters"
        )));
    }
    Ok(NewReview {
        score,
        comment: comment.to_string(),
    })
}

pub fn registration(
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<NewUser, ClientError> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() {
        return Err(ClientError::validation("Username is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ClientError::validation("A valid email is required"));
    }
    if password.is_empty() {
        return Err(ClientError::validation("Password is required"));
    }
    if password != confirmation {
        return Err(ClientError::validation("Passwords do not match"));
    }
    Ok(NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn password_change(password: &str, confirmation: &str) -> Result<String, ClientError> {
    if password.is_empty() {
        return Err(ClientError::validation("Password is required"));
    }
    if password != confirmation {
        return Err(ClientError::validation("Passwords do not match"));
    }
    Ok(password.to_string())
}

/// Build a profile edit. Blank username or email are errors rather than
/// silently skipped.
pub fn user_update(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<String>,
) -> Result<UserUpdate, ClientError> {
    let username = username.map(str::trim);
    if username.is_some_and(str::is_empty) {
        return Err(ClientError::validation("Username cannot be empty"));
    }
    let email = email.map(str::trim);
    if email.is_some_and(|e| e.is_empty() || !e.contains('@')) {
        return Err(ClientError::validation("A valid email is required"));
    }

    let update = UserUpdate {
        username: username.map(str::to_string),
        email: email.map(str::to_string),
        password,
    };
    if update.is_empty() {
        return Err(ClientError::validation(
            "Nothing to update (use --username, --email or --password)",
        ));
    }
    Ok(update)
}

pub fn watchlist_name(name: &str) -> Result<String, ClientError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::validation("List name cannot be empty"));
    }
    Ok(name.to_string())
}
