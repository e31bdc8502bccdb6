//! Metric calculations for statistics.
//!
//! All derived values are recomputed against the supplied `now`, since
//! in-progress sessions keep accumulating effective time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::round1;
use crate::features::focus::{Session, Status};

/// Full-history summary for one owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Number of sessions
    pub total_count: usize,
    /// Sessions that completed
    pub completed_count: usize,
    /// Sessions that were abandoned
    pub abandoned_count: usize,
    /// Unrounded sum of effective work seconds
    pub total_effective_seconds: f64,
    /// Total effective work in minutes, one decimal
    pub total_effective_minutes: f64,
    /// Total effective work in hours, one decimal (derived from minutes)
    pub total_effective_hours: f64,
    /// Minutes per completed session; 0 when none completed
    pub avg_effective_minutes: f64,
    /// Completed share of all sessions, in percent; 0 when empty
    pub success_rate: f64,
}

impl SessionStats {
    /// Calculate stats over `sessions` at instant `now`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate(sessions: &[Session], now: DateTime<Utc>) -> Self {
        let total_count = sessions.len();
        let completed_count = count_status(sessions, Status::Completed);
        let abandoned_count = count_status(sessions, Status::Abandoned);

        let total_effective_seconds = sessions
            .iter()
            .fold(0.0, |acc, s| acc + s.effective_work_seconds(now));
        let total_effective_minutes = round1(total_effective_seconds / 60.0);
        let total_effective_hours = round1(total_effective_minutes / 60.0);

        let avg_effective_minutes = if completed_count > 0 {
            round1(total_effective_minutes / completed_count as f64)
        } else {
            0.0
        };

        let success_rate = if total_count > 0 {
            round1(completed_count as f64 / total_count as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            total_count,
            completed_count,
            abandoned_count,
            total_effective_seconds,
            total_effective_minutes,
            total_effective_hours,
            avg_effective_minutes,
            success_rate,
        }
    }

    /// Sessions neither completed nor abandoned.
    #[must_use]
    pub const fn unfinished_count(&self) -> usize {
        self.total_count - self.completed_count - self.abandoned_count
    }
}

/// Summary of a single page of a session listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListStats {
    /// Sessions on the page
    pub total_count: usize,
    /// Completed sessions on the page
    pub completed_count: usize,
    /// Sum of each session's rounded effective minutes
    pub total_effective_minutes: f64,
}

impl ListStats {
    /// Calculate stats over an already-limited page of sessions.
    #[must_use]
    pub fn calculate(sessions: &[Session], now: DateTime<Utc>) -> Self {
        let minutes = sessions
            .iter()
            .fold(0.0, |acc, s| acc + s.effective_work_minutes(now));

        Self {
            total_count: sessions.len(),
            completed_count: count_status(sessions, Status::Completed),
            total_effective_minutes: round1(minutes),
        }
    }
}

fn count_status(sessions: &[Session], status: Status) -> usize {
    sessions.iter().filter(|s| s.status == status).count()
}
