//! JSON output formatting for pomo.
//!
//! Views carry the effective time computed at a single instant, so every
//! number in one response agrees with the others.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::error::PomoError;
use crate::features::focus::{Session, SessionId, SessionPage, Status, Transition};
use crate::features::stats::SessionStats;

/// Full session detail.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail<'a> {
    pub id: SessionId,
    pub owner: Option<&'a str>,
    pub name: &'a str,
    pub planned_duration: u32,
    pub status: Status,
    pub status_display: &'static str,
    pub work_start_at: Option<DateTime<Utc>>,
    pub work_end_at: Option<DateTime<Utc>>,
    pub leave_start_at: Option<DateTime<Utc>>,
    pub leave_end_at: Option<DateTime<Utc>>,
    pub effective_work_seconds: f64,
    pub effective_work_minutes: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> SessionDetail<'a> {
    /// Build the detail view of `session` measured at `now`.
    #[must_use]
    pub fn new(session: &'a Session, now: DateTime<Utc>) -> Self {
        Self {
            id: session.id,
            owner: session.owner.as_deref(),
            name: &session.name,
            planned_duration: session.planned_duration,
            status: session.status,
            status_display: session.status.display_name(),
            work_start_at: session.work_start_at,
            work_end_at: session.work_end_at,
            leave_start_at: session.leave_start_at,
            leave_end_at: session.leave_end_at,
            effective_work_seconds: session.effective_work_seconds(now),
            effective_work_minutes: session.effective_work_minutes(now),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Compact session summary used in listings.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListItem<'a> {
    pub id: SessionId,
    pub name: &'a str,
    pub planned_duration: u32,
    pub status: Status,
    pub status_display: &'static str,
    pub effective_work_minutes: f64,
    pub created_at: DateTime<Utc>,
}

impl<'a> SessionListItem<'a> {
    /// Build the list view of `session` measured at `now`.
    #[must_use]
    pub fn new(session: &'a Session, now: DateTime<Utc>) -> Self {
        Self {
            id: session.id,
            name: &session.name,
            planned_duration: session.planned_duration,
            status: session.status,
            status_display: session.status.display_name(),
            effective_work_minutes: session.effective_work_minutes(now),
            created_at: session.created_at,
        }
    }
}

/// Format a session as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_session_json(session: &Session, now: DateTime<Utc>) -> Result<String, PomoError> {
    let output = json!({ "session": SessionDetail::new(session, now) });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the outcome of a lifecycle action as JSON
///
/// Resuming also reports the length of the pause that just ended.
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_transition_json(
    session: &Session,
    action: Option<Transition>,
    now: DateTime<Utc>,
) -> Result<String, PomoError> {
    let mut output = json!({
        "action": action.map_or("create", |a| a.as_str()),
        "session": SessionDetail::new(session, now),
    });
    if action == Some(Transition::Resume) {
        output["leave_duration_seconds"] = json!(session.last_pause_seconds(now));
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a page of sessions as JSON, measured at the page's own instant
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_page_json(page: &SessionPage) -> Result<String, PomoError> {
    let items: Vec<_> = page
        .sessions
        .iter()
        .map(|s| SessionListItem::new(s, page.as_of))
        .collect();
    let output = json!({
        "sessions": items,
        "stats": page.stats,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format full-history stats as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_stats_json(stats: &SessionStats) -> Result<String, PomoError> {
    let output = json!({ "stats": stats });
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stats::ListStats;
    use chrono::{Duration, TimeZone};
    use serde_json::Value;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn resumed_session() -> Session {
        let mut session = Session::new(Some("alice".to_string()), "Write", 25, t0());
        session.id = 4;
        session.status = Status::Working;
        session.work_start_at = Some(t0());
        session.leave_start_at = Some(t0() + Duration::seconds(60));
        session.leave_end_at = Some(t0() + Duration::seconds(90));
        session
    }

    #[test]
    fn test_session_json_fields() {
        let session = resumed_session();
        let now = t0() + Duration::seconds(150);
        let value: Value = serde_json::from_str(&format_session_json(&session, now).unwrap()).unwrap();
        let detail = &value["session"];

        assert_eq!(detail["id"], 4);
        assert_eq!(detail["owner"], "alice");
        assert_eq!(detail["status"], "working");
        assert_eq!(detail["status_display"], "In progress");
        assert_eq!(detail["effective_work_seconds"], 120.0);
        assert_eq!(detail["effective_work_minutes"], 2.0);
        assert!(detail["work_end_at"].is_null());
        assert!(detail["leave_start_at"].is_string());
    }

    #[test]
    fn test_transition_json_resume_reports_pause() {
        let session = resumed_session();
        let now = t0() + Duration::seconds(90);
        let out = format_transition_json(&session, Some(Transition::Resume), now).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["action"], "resume");
        assert_eq!(value["leave_duration_seconds"], 30.0);

        let out = format_transition_json(&session, Some(Transition::Start), now).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("leave_duration_seconds").is_none());

        let out = format_transition_json(&session, None, now).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["action"], "create");
    }

    #[test]
    fn test_page_json_shape() {
        let session = resumed_session();
        let now = t0() + Duration::seconds(150);
        let page = SessionPage {
            stats: ListStats::calculate(std::slice::from_ref(&session), now),
            sessions: vec![session],
            as_of: now,
        };

        let value: Value = serde_json::from_str(&format_page_json(&page).unwrap()).unwrap();
        let item = &value["sessions"][0];
        assert_eq!(item["name"], "Write");
        assert!(item.get("owner").is_none());
        assert_eq!(value["stats"]["total_count"], 1);
        assert_eq!(value["stats"]["total_effective_minutes"], 2.0);
    }

    #[test]
    fn test_stats_json_shape() {
        let value: Value =
            serde_json::from_str(&format_stats_json(&SessionStats::default()).unwrap()).unwrap();
        assert_eq!(value["stats"]["success_rate"], 0.0);
        assert_eq!(value["stats"]["avg_effective_minutes"], 0.0);
    }
}
