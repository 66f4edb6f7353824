//! letterplay CLI
//!
//! Terminal front end for the LetterPlay game tracker: search, rankings,
//! watchlists, favorites and reviews.

mod cli_types;
mod commands;
mod display;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use letterplay_client::{ApiClient, SessionStore, Settings};

use cli_types::{Cli, Commands};
use commands::Ctx;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        if let Some(hint) = e.hint() {
            log::error!("  {}", hint.if_supports_color(Stdout, |t| t.dimmed()));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands never touch the network
    if let Commands::Config { action } = &cli.command {
        return commands::config::run(action, cli.api_url);
    }

    let mut settings = Settings::load().with_base_url(cli.api_url);
    if let Some(limit) = cli.command.page_limit() {
        settings.page_limit = limit;
    }

    let client = ApiClient::new(&settings, SessionStore::default_location())?;
    let ctx = Ctx {
        client,
        settings,
        quiet: cli.quiet,
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;
    rt.block_on(commands::dispatch(&ctx, cli.command))
}

/// Route `log` output to stdout.
///
/// Info lines are printed bare so commands can use `log::info!` as their
/// output channel. `--verbose` adds timestamps and debug records from the
/// letterplay crates; `--quiet` keeps only warnings and errors. `RUST_LOG`
/// still applies on top.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("letterplay", level)
        .target(env_logger::Target::Stdout)
        .parse_default_env()
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.args()
                )
            } else if record.level() <= Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "[{}] {}", record.target(), record.args())
            }
        });
    builder.init();
}

/// Print an empty info line.
pub(crate) fn log_blank() {
    log::info!("");
}
