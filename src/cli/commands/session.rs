//! Session lifecycle commands.

use crate::cli::args::OutputFormat;
use crate::core::{parse_duration, Clock};
use crate::error::PomoError;
use crate::features::focus::{SessionId, SessionStore, SessionTracker, Transition};
use crate::output::{format_page, format_session, format_transition};

/// Create a new planned session.
///
/// An unparseable duration falls back to the configured default.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create<S: SessionStore, C: Clock>(
    tracker: &SessionTracker<S, C>,
    owner: Option<&str>,
    name: Option<&str>,
    duration: Option<&str>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let planned = duration.and_then(|d| {
        let parsed = parse_duration(d).map(|dur| dur.num_minutes());
        if parsed.is_none() {
            log::warn!("could not parse duration '{d}', using default");
        }
        parsed
    });

    let session = tracker.create_session(owner, name, planned)?;
    let created_at = session.created_at;
    format_transition(&session, None, created_at, format)
}

/// Apply a lifecycle transition.
///
/// # Errors
///
/// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
pub fn transition<S: SessionStore, C: Clock>(
    tracker: &SessionTracker<S, C>,
    id: SessionId,
    action: Transition,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let (session, at) = tracker.apply_transition(id, action)?;
    format_transition(&session, Some(action), at, format)
}

/// Show a single session.
///
/// # Errors
///
/// Returns `PomoError::NotFound` if the id is unknown.
pub fn show<S: SessionStore, C: Clock>(
    tracker: &SessionTracker<S, C>,
    id: SessionId,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let session = tracker.get_session(id)?;
    format_session(&session, tracker.now(), format)
}

/// List the owner's most recent sessions.
///
/// # Errors
///
/// Returns an error if the sessions cannot be read.
pub fn list<S: SessionStore, C: Clock>(
    tracker: &SessionTracker<S, C>,
    owner: Option<&str>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    if owner.is_none() {
        log::info!("no owner given, listing is empty");
    }
    let page = tracker.list_sessions(owner, limit)?;
    format_page(&page, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::focus::MemorySessionStore;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::Value;

    /// Moves forward a minute every time it is read.
    struct SteppingClock(ManualClock);

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.0.now();
            self.0.advance_secs(60);
            now
        }
    }

    fn tracker() -> SessionTracker<MemorySessionStore, ManualClock> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        SessionTracker::new(MemorySessionStore::new(), ManualClock::new(start))
    }

    fn json(out: &str) -> Value {
        serde_json::from_str(out).unwrap()
    }

    #[test]
    fn test_create_parses_duration() {
        let tracker = tracker();
        let out = create(&tracker, Some("alice"), None, Some("1h30m"), OutputFormat::Json).unwrap();
        assert_eq!(json(&out)["session"]["planned_duration"], 90);
    }

    #[test]
    fn test_create_bad_duration_uses_default() {
        let tracker = tracker();
        let out = create(&tracker, None, Some("Read"), Some("soon"), OutputFormat::Json).unwrap();
        let value = json(&out);
        assert_eq!(value["session"]["planned_duration"], 25);
        assert_eq!(value["session"]["name"], "Read");
    }

    #[test]
    fn test_transition_outputs_status() {
        let tracker = tracker();
        let id = tracker.create_session(None, None, None).unwrap().id;

        let out = transition(&tracker, id, Transition::Start, OutputFormat::Json).unwrap();
        let value = json(&out);
        assert_eq!(value["action"], "start");
        assert_eq!(value["session"]["status"], "working");
    }

    #[test]
    fn test_transition_error_propagates() {
        let tracker = tracker();
        let id = tracker.create_session(None, None, None).unwrap().id;

        let err = transition(&tracker, id, Transition::Resume, OutputFormat::Json).unwrap_err();
        assert_eq!(err.to_string(), "cannot resume session: status is planned");
    }

    #[test]
    fn test_list_anonymous_is_empty() {
        let tracker = tracker();
        tracker.create_session(None, None, None).unwrap();

        let out = list(&tracker, None, None, OutputFormat::Json).unwrap();
        let value = json(&out);
        assert_eq!(value["sessions"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["stats"]["total_count"], 0);
    }

    #[test]
    fn test_list_rows_agree_with_stats() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let tracker =
            SessionTracker::new(MemorySessionStore::new(), SteppingClock(ManualClock::new(start)));
        let id = tracker.create_session(Some("alice"), None, None).unwrap().id;
        tracker.start_session(id).unwrap();

        let value = json(&list(&tracker, Some("alice"), None, OutputFormat::Json).unwrap());
        assert_eq!(
            value["sessions"][0]["effective_work_minutes"],
            value["stats"]["total_effective_minutes"]
        );
        assert_eq!(value["stats"]["total_effective_minutes"], 1.0);
    }

    #[test]
    fn test_transition_renders_at_stamped_instant() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let tracker =
            SessionTracker::new(MemorySessionStore::new(), SteppingClock(ManualClock::new(start)));
        let id = tracker.create_session(None, None, None).unwrap().id;

        let value = json(&create(&tracker, None, None, None, OutputFormat::Json).unwrap());
        assert_eq!(value["session"]["effective_work_seconds"], 0.0);

        let value = json(&transition(&tracker, id, Transition::Start, OutputFormat::Json).unwrap());
        assert_eq!(value["session"]["effective_work_seconds"], 0.0);

        let value = json(&transition(&tracker, id, Transition::Pause, OutputFormat::Json).unwrap());
        assert_eq!(value["session"]["effective_work_seconds"], 60.0);
        assert_eq!(value["session"]["updated_at"], value["session"]["leave_start_at"]);
    }

    #[test]
    fn test_create_huge_duration_uses_default() {
        let tracker = tracker();
        for duration in ["9999999999999999h", "99999999999999999"] {
            let out = create(&tracker, None, None, Some(duration), OutputFormat::Json).unwrap();
            assert_eq!(json(&out)["session"]["planned_duration"], 25);
        }
    }

    #[test]
    fn test_show_missing() {
        let tracker = tracker();
        assert!(show(&tracker, 5, OutputFormat::Pretty).unwrap_err().is_not_found());
    }
}
