use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use letterplay_client::validate;

use super::{Ctx, read_line};
use crate::display::success;
use crate::error::CliError;
use crate::spinner::with_spinner;

pub(crate) async fn run_login(
    ctx: &Ctx,
    username: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = match password {
        Some(p) => p,
        None => read_line("Password")?,
    };
    if password.is_empty() {
        return Err(CliError::input("Password cannot be empty"));
    }

    let session = with_spinner(ctx.quiet, "Signing in...", ctx.client.login(username, &password)).await?;
    success(&format!(
        "Logged in as {}",
        session
            .username
            .as_deref()
            .unwrap_or(username)
            .if_supports_color(Stdout, |t| t.bold()),
    ));
    Ok(())
}

pub(crate) async fn run_logout(ctx: &Ctx) -> Result<(), CliError> {
    let was_logged_in = ctx.client.is_logged_in().await;
    ctx.client.logout().await?;
    if was_logged_in {
        success("Logged out");
    } else {
        log::info!("Not logged in.");
    }
    Ok(())
}

pub(crate) async fn run_register(ctx: &Ctx, username: &str, email: &str) -> Result<(), CliError> {
    let password = read_line("Password")?;
    let confirmation = read_line("Confirm password")?;
    let new_user = validate::registration(username, email, &password, &confirmation)?;

    let user = with_spinner(ctx.quiet, "Creating account...", ctx.client.register(&new_user)).await?;
    success(&format!(
        "Account '{}' created. Run 'letterplay login {}' to sign in.",
        user.username, user.username
    ));
    Ok(())
}

pub(crate) async fn run_whoami(ctx: &Ctx) -> Result<(), CliError> {
    let user = with_spinner(ctx.quiet, "Loading profile...", ctx.client.me()).await?;

    log::info!("{}", user.username.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Id:    {}", user.id);
    if let Some(email) = &user.email {
        log::info!("  Email: {}", email);
    }
    if user.admin {
        log::info!("  {}", "admin".if_supports_color(Stdout, |t| t.yellow()));
    }

    match ctx.client.my_pictures().await {
        Ok(pics) => {
            if let Some(url) = &pics.profile_pic_url {
                log::info!("  Profile picture:    {}", url.if_supports_color(Stdout, |t| t.cyan()));
            }
            if let Some(url) = &pics.background_pic_url {
                log::info!("  Background picture: {}", url.if_supports_color(Stdout, |t| t.cyan()));
            }
        }
        Err(e) => log::debug!("no pictures: {e}"),
    }
    Ok(())
}

pub(crate) async fn run_refresh(ctx: &Ctx) -> Result<(), CliError> {
    with_spinner(ctx.quiet, "Refreshing session...", ctx.client.refresh()).await?;
    success("Session renewed");
    Ok(())
}

pub(crate) async fn run_users(ctx: &Ctx) -> Result<(), CliError> {
    let users = with_spinner(ctx.quiet, "Loading users...", ctx.client.all_users()).await?;
    if users.is_empty() {
        log::info!("No users.");
        return Ok(());
    }
    for user in &users {
        log::info!(
            "  {:>5}  {}{}",
            user.id,
            user.username,
            if user.admin {
                format!(" {}", "(admin)".if_supports_color(Stdout, |t| t.yellow()))
            } else {
                String::new()
            },
        );
    }
    Ok(())
}

pub(crate) async fn run_profile_edit(
    ctx: &Ctx,
    username: Option<String>,
    email: Option<String>,
    change_password: bool,
) -> Result<(), CliError> {
    let password = if change_password {
        let password = read_line("New password")?;
        let confirmation = read_line("Confirm password")?;
        Some(validate::password_change(&password, &confirmation)?)
    } else {
        None
    };
    let update = validate::user_update(username.as_deref(), email.as_deref(), password)?;

    let user_id = ctx.client.current_user_id().await?;
    let user = with_spinner(
        ctx.quiet,
        "Saving profile...",
        ctx.client.update_user(user_id, &update),
    )
    .await?;

    success(&format!(
        "Profile updated for {}",
        user.username.if_supports_color(Stdout, |t| t.bold())
    ));
    if let Some(email) = &user.email {
        log::info!("  Email: {}", email);
    }
    Ok(())
}
