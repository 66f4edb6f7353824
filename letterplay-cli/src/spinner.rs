//! Loading indicator shown while a request is in flight.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A ticking spinner with `msg`, or a hidden bar when `quiet`.
pub(crate) fn spinner(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("/-\\|");
    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Await `fut` behind a spinner, clearing it before returning.
pub(crate) async fn with_spinner<F: Future>(quiet: bool, msg: impl Into<String>, fut: F) -> F::Output {
    let pb = spinner(quiet, msg);
    let out = fut.await;
    pb.finish_and_clear();
    out
}
