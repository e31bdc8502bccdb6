//! Session state machine.
//!
//! ```text
//! Planned -> Working <-> Paused
//!               |          |
//!               v          v
//!        Completed | Abandoned   (terminal)
//! ```
//!
//! `Abandon` is also legal straight from `Planned`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::{Session, Status};
use crate::error::PomoError;

/// An action that moves a session between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Begin work
    Start,
    /// Step away
    Pause,
    /// Come back from a pause
    Resume,
    /// Finish successfully
    Complete,
    /// Give up
    Abandon,
}

impl Transition {
    /// Lowercase verb, as used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Complete => "complete",
            Self::Abandon => "abandon",
        }
    }

    /// Whether this transition may be taken from `from`.
    #[must_use]
    pub const fn permits(&self, from: Status) -> bool {
        match self {
            Self::Start => matches!(from, Status::Planned),
            Self::Pause => matches!(from, Status::Working),
            Self::Resume => matches!(from, Status::Paused),
            Self::Complete => matches!(from, Status::Working | Status::Paused),
            Self::Abandon => !from.is_terminal(),
        }
    }

    /// Status a session is in after this transition.
    #[must_use]
    pub const fn target(&self) -> Status {
        match self {
            Self::Start | Self::Resume => Status::Working,
            Self::Pause => Status::Paused,
            Self::Complete => Status::Completed,
            Self::Abandon => Status::Abandoned,
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply `transition` to `session` at instant `now`.
///
/// On failure the session is left untouched.
///
/// Completing a session with an open pause closes the pause at `now`, so
/// the recorded effective time stops at completion.
///
/// # Errors
///
/// Returns `PomoError::InvalidTransition` if the session's status does not
/// permit the transition.
pub fn apply(
    session: &mut Session,
    transition: Transition,
    now: DateTime<Utc>,
) -> Result<(), PomoError> {
    let from = session.status;
    if !transition.permits(from) {
        return Err(PomoError::InvalidTransition {
            action: transition,
            status: from,
        });
    }

    match transition {
        Transition::Start => session.work_start_at = Some(now),
        Transition::Pause => {
            session.leave_start_at = Some(now);
            session.leave_end_at = None;
        }
        Transition::Resume => session.leave_end_at = Some(now),
        Transition::Complete => {
            session.work_end_at = Some(now);
            if session.has_open_pause() {
                session.leave_end_at = Some(now);
            }
        }
        Transition::Abandon => {}
    }

    session.status = transition.target();
    session.updated_at = session.updated_at.max(now);
    Ok(())
}
