//! Command implementations for pomo.
//!
//! Each command drives the session tracker and renders its result in the
//! requested output format.

mod session;
mod stats;

pub use session::{create, list, show, transition};
pub use stats::stats;

use crate::cli::args::{Commands, OutputFormat};
use crate::core::Clock;
use crate::error::PomoError;
use crate::features::focus::{SessionStore, SessionTracker, Transition};

/// Execute a parsed command
///
/// # Errors
///
/// Returns an error if the tracker rejects the operation or output
/// formatting fails.
pub fn execute<S: SessionStore, C: Clock>(
    tracker: &SessionTracker<S, C>,
    command: Commands,
    owner: Option<&str>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match command {
        Commands::Create { name, duration } => {
            create(tracker, owner, name.as_deref(), duration.as_deref(), format)
        }
        Commands::Start { id } => transition(tracker, id, Transition::Start, format),
        Commands::Pause { id } => transition(tracker, id, Transition::Pause, format),
        Commands::Resume { id } => transition(tracker, id, Transition::Resume, format),
        Commands::Complete { id } => transition(tracker, id, Transition::Complete, format),
        Commands::Abandon { id } => transition(tracker, id, Transition::Abandon, format),
        Commands::Show { id } => show(tracker, id, format),
        Commands::List { limit } => list(tracker, owner, limit, format),
        Commands::Stats => stats(tracker, owner, format),
    }
}
