//! Statistics command.

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::PomoError;
use crate::features::focus::{SessionStore, SessionTracker};
use crate::output::format_stats;

/// Show full-history stats for the owner.
///
/// # Errors
///
/// Returns an error if the sessions cannot be read.
pub fn stats<S: SessionStore, C: Clock>(
    tracker: &SessionTracker<S, C>,
    owner: Option<&str>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let stats = tracker.compute_stats(owner)?;
    format_stats(&stats, format)
}
