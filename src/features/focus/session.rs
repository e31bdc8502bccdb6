//! Pomodoro session entity.
//!
//! A session records when work started and ended and the most recent
//! "away" interval. Effective work time is derived from those timestamps
//! against a caller-supplied `now` and is never cached.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::round1;
use crate::error::PomoError;

/// Store-assigned session identifier.
pub type SessionId = i64;

/// Name used when a session is created without one.
pub const DEFAULT_SESSION_NAME: &str = "Focus task";

/// Planned duration in minutes used when none (or an invalid one) is given.
pub const DEFAULT_PLANNED_MINUTES: u32 = 25;

/// Longest accepted session name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Created, not started yet
    Planned,
    /// Work in progress
    Working,
    /// Away from work (open pause)
    Paused,
    /// Finished successfully
    Completed,
    /// Given up
    Abandoned,
}

impl Status {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Planned,
        Self::Working,
        Self::Paused,
        Self::Completed,
        Self::Abandoned,
    ];

    /// Wire name, as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Working => "working",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Working => "In progress",
            Self::Paused => "Paused (away)",
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
        }
    }

    /// No further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }

    /// Work has started and not yet concluded.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Working | Self::Paused)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = PomoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| PomoError::Parse(format!("unknown session status '{s}'")))
    }
}

/// A tracked focus attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Store-assigned id (0 until the session is first persisted)
    pub id: SessionId,
    /// Owning user; `None` for anonymous sessions
    pub owner: Option<String>,
    /// Display label
    pub name: String,
    /// Intended length in minutes (informational)
    pub planned_duration: u32,
    /// Current status
    pub status: Status,
    /// When work began
    pub work_start_at: Option<DateTime<Utc>>,
    /// When work concluded
    pub work_end_at: Option<DateTime<Utc>>,
    /// Start of the current or most recent pause
    pub leave_start_at: Option<DateTime<Utc>>,
    /// End of the most recent pause
    pub leave_end_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last transition
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new planned session.
    ///
    /// The id is left at 0; the store assigns the real one.
    #[must_use]
    pub fn new(
        owner: Option<String>,
        name: impl Into<String>,
        planned_duration: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            owner,
            name: name.into(),
            planned_duration,
            status: Status::Planned,
            work_start_at: None,
            work_end_at: None,
            leave_start_at: None,
            leave_end_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A pause has started and not been closed.
    #[must_use]
    pub const fn has_open_pause(&self) -> bool {
        self.leave_start_at.is_some() && self.leave_end_at.is_none()
    }

    /// Effective (pause-excluded) work time in seconds, measured at `now`.
    ///
    /// Sessions that never started count as zero. Unfinished sessions are
    /// measured up to `now`, and an open pause is deducted up to `now`.
    /// The result is clamped at zero so skewed timestamps cannot make it
    /// negative.
    #[must_use]
    pub fn effective_work_seconds(&self, now: DateTime<Utc>) -> f64 {
        let Some(start) = self.work_start_at else {
            return 0.0;
        };

        let end = self.work_end_at.unwrap_or(now);
        let total = seconds_between(start, end);
        let away = match (self.leave_start_at, self.leave_end_at) {
            (Some(leave_start), Some(leave_end)) => seconds_between(leave_start, leave_end),
            (Some(leave_start), None) => seconds_between(leave_start, now),
            _ => 0.0,
        };

        (total - away).max(0.0)
    }

    /// Effective work time in minutes, rounded to one decimal.
    #[must_use]
    pub fn effective_work_minutes(&self, now: DateTime<Utc>) -> f64 {
        round1(self.effective_work_seconds(now) / 60.0)
    }

    /// Length of the retained pause interval in seconds.
    ///
    /// An open pause is measured up to `now`.
    #[must_use]
    pub fn last_pause_seconds(&self, now: DateTime<Utc>) -> f64 {
        self.leave_start_at.map_or(0.0, |leave_start| {
            let leave_end = self.leave_end_at.unwrap_or(now);
            seconds_between(leave_start, leave_end).max(0.0)
        })
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owner = self.owner.as_deref().unwrap_or("anonymous");
        write!(
            f,
            "{owner} - {} ({})",
            self.name,
            self.status.display_name()
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(secs)
    }

    fn started(secs: i64) -> Session {
        let mut session = Session::new(None, DEFAULT_SESSION_NAME, 25, t0());
        session.status = Status::Working;
        session.work_start_at = Some(at(secs));
        session
    }

    #[test]
    fn test_new_session_is_planned() {
        let session = Session::new(Some("alice".to_string()), "Write report", 30, t0());

        assert_eq!(session.status, Status::Planned);
        assert_eq!(session.planned_duration, 30);
        assert_eq!(session.created_at, t0());
        assert_eq!(session.updated_at, t0());
        assert!(session.work_start_at.is_none());
        assert!(session.work_end_at.is_none());
        assert!(session.leave_start_at.is_none());
        assert!(session.leave_end_at.is_none());
    }

    #[test]
    fn test_effective_time_not_started() {
        let session = Session::new(None, DEFAULT_SESSION_NAME, 25, t0());
        assert!(session.effective_work_seconds(at(1000)).abs() < f64::EPSILON);
        assert!(session.effective_work_minutes(at(1000)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_time_in_progress_uses_now() {
        let session = started(0);
        assert!((session.effective_work_seconds(at(90)) - 90.0).abs() < f64::EPSILON);
        assert!((session.effective_work_seconds(at(120)) - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_time_completed_ignores_now() {
        let mut session = started(0);
        session.status = Status::Completed;
        session.work_end_at = Some(at(1500));

        assert!((session.effective_work_seconds(at(1500)) - 1500.0).abs() < f64::EPSILON);
        assert!((session.effective_work_seconds(at(9000)) - 1500.0).abs() < f64::EPSILON);
        assert!((session.effective_work_minutes(at(9000)) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_time_closed_pause() {
        let mut session = started(0);
        session.leave_start_at = Some(at(300));
        session.leave_end_at = Some(at(600));
        session.work_end_at = Some(at(900));

        assert!((session.effective_work_seconds(at(5000)) - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_time_open_pause() {
        let mut session = started(0);
        session.status = Status::Paused;
        session.leave_start_at = Some(at(100));

        assert!((session.effective_work_seconds(at(400)) - 100.0).abs() < f64::EPSILON);
        // Stays flat while the pause remains open
        assert!((session.effective_work_seconds(at(1000)) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_time_never_negative() {
        // End before start
        let mut session = started(500);
        session.work_end_at = Some(at(100));
        assert!(session.effective_work_seconds(at(0)) >= 0.0);

        // Pause longer than the work span
        let mut session = started(0);
        session.leave_start_at = Some(at(0));
        session.leave_end_at = Some(at(10_000));
        session.work_end_at = Some(at(60));
        assert!(session.effective_work_seconds(at(60)).abs() < f64::EPSILON);

        // `now` earlier than work start
        let session = started(1000);
        assert!(session.effective_work_seconds(at(0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_minutes_rounding() {
        let mut session = started(0);
        session.work_end_at = Some(at(100));
        // 100s = 1.666.. minutes
        assert!((session.effective_work_minutes(at(100)) - 1.7).abs() < f64::EPSILON);

        session.work_end_at = Some(at(63));
        // 63s = 1.05 minutes, half rounds up
        assert!((session.effective_work_minutes(at(63)) - 1.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_seconds_fractional() {
        let mut session = started(0);
        session.work_end_at = Some(at(10) + Duration::milliseconds(500));
        assert!((session.effective_work_seconds(at(20)) - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_last_pause_seconds() {
        let mut session = started(0);
        assert!(session.last_pause_seconds(at(50)).abs() < f64::EPSILON);

        session.leave_start_at = Some(at(100));
        assert!((session.last_pause_seconds(at(160)) - 60.0).abs() < f64::EPSILON);

        session.leave_end_at = Some(at(130));
        assert!((session.last_pause_seconds(at(999)) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_has_open_pause() {
        let mut session = started(0);
        assert!(!session.has_open_pause());
        session.leave_start_at = Some(at(10));
        assert!(session.has_open_pause());
        session.leave_end_at = Some(at(20));
        assert!(!session.has_open_pause());
    }

    #[test]
    fn test_status_parse_roundtrip_names() {
        assert_eq!("planned".parse::<Status>().unwrap(), Status::Planned);
        assert_eq!("paused".parse::<Status>().unwrap(), Status::Paused);
        assert!("running".parse::<Status>().is_err());
        assert!("Completed".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_flags() {
        assert!(Status::Completed.is_terminal());
        assert!(Status::Abandoned.is_terminal());
        assert!(!Status::Paused.is_terminal());
        assert!(Status::Working.is_active());
        assert!(Status::Paused.is_active());
        assert!(!Status::Planned.is_active());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Abandoned).unwrap(), "\"abandoned\"");
    }

    #[test]
    fn test_session_display() {
        let mut session = Session::new(Some("bob".to_string()), "Reading", 25, t0());
        session.status = Status::Paused;
        assert_eq!(session.to_string(), "bob - Reading (Paused (away))");

        let anon = Session::new(None, "Reading", 25, t0());
        assert_eq!(anon.to_string(), "anonymous - Reading (Planned)");
    }
}
