use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};

use crate::core::format_seconds;
use crate::features::focus::{Session, SessionPage, Status, Transition};
use crate::features::stats::{render_bar_chart, render_progress_bar, SessionStats};

fn status_icon(status: Status) -> ColoredString {
    match status {
        Status::Planned => "[ ]".white(),
        Status::Working => "[>]".cyan(),
        Status::Paused => "[=]".yellow(),
        Status::Completed => "[x]".green(),
        Status::Abandoned => "[-]".red(),
    }
}

fn local_time(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a single session with all its timestamps
pub fn format_session_pretty(session: &Session, now: DateTime<Utc>) -> String {
    let name = match session.status {
        Status::Abandoned => session.name.strikethrough().to_string(),
        _ => session.name.bold().to_string(),
    };

    let mut output = format!("{} {}\n", status_icon(session.status), name);
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), session.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Status".dimmed(),
        session.status.display_name()
    ));
    if let Some(owner) = &session.owner {
        output.push_str(&format!("  {}: {}\n", "Owner".dimmed(), owner));
    }
    output.push_str(&format!(
        "  {}: {} min\n",
        "Planned".dimmed(),
        session.planned_duration
    ));

    let timestamps = [
        ("Started", session.work_start_at),
        ("Away since", session.leave_start_at),
        ("Back at", session.leave_end_at),
        ("Ended", session.work_end_at),
    ];
    for (label, value) in timestamps {
        if let Some(t) = value {
            output.push_str(&format!("  {}: {}\n", label.dimmed(), local_time(t)));
        }
    }

    output.push_str(&format!(
        "  {}: {} ({} min)\n",
        "Effective".dimmed(),
        format_seconds(session.effective_work_seconds(now)).green(),
        session.effective_work_minutes(now)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        local_time(session.created_at)
    ));

    output
}

/// Format the outcome of a lifecycle action
///
/// `action` is `None` for a freshly created session.
pub fn format_transition_pretty(
    session: &Session,
    action: Option<Transition>,
    now: DateTime<Utc>,
) -> String {
    let headline = match action {
        None => format!("Session {} created: {}", session.id, session.name).green(),
        Some(Transition::Start) => format!("Session {} started", session.id).green(),
        Some(Transition::Pause) => format!("Session {} paused (away)", session.id).yellow(),
        Some(Transition::Resume) => format!("Session {} resumed", session.id).green(),
        Some(Transition::Complete) => format!("Session {} completed", session.id).green(),
        Some(Transition::Abandon) => format!("Session {} abandoned", session.id).red(),
    };

    let mut output = vec![headline.to_string()];

    match action {
        None => {
            output.push(format!("   Planned: {} min", session.planned_duration));
            output.push(String::new());
            output.push(
                format!("   Use 'pomo start {}' to begin", session.id)
                    .dimmed()
                    .to_string(),
            );
        }
        Some(Transition::Resume) => {
            output.push(format!(
                "   Away for: {}",
                format_seconds(session.last_pause_seconds(now))
            ));
        }
        Some(Transition::Complete) => {
            output.push(format!(
                "   Effective: {} ({} min)",
                format_seconds(session.effective_work_seconds(now)),
                session.effective_work_minutes(now)
            ));
        }
        _ => {}
    }

    output.join("\n")
}

/// Format a page of sessions as a table with a stats footer
pub fn format_page_pretty(page: &SessionPage) -> String {
    let title = "Sessions";
    if page.sessions.is_empty() {
        return format!("{title} (0 items)\n  No sessions");
    }

    let mut output = format!("{title} ({} items)\n", page.sessions.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for session in &page.sessions {
        let line = format!(
            "{} {:>5}  {}  {}  {}",
            status_icon(session.status),
            session.id,
            session.name.bold(),
            format!("{} min", session.effective_work_minutes(page.as_of)).green(),
            local_time(session.created_at).dimmed()
        );
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{} completed of {} · {} effective min\n",
        page.stats.completed_count, page.stats.total_count, page.stats.total_effective_minutes
    ));

    output
}

/// Format full-history stats
pub fn format_stats_pretty(stats: &SessionStats) -> String {
    let mut output = format!("{}\n", "Focus statistics".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    output.push_str(&format!("  {}: {}\n", "Sessions".dimmed(), stats.total_count));
    output.push_str(&format!(
        "  {}: {} min ({} h)\n",
        "Effective".dimmed(),
        stats.total_effective_minutes,
        stats.total_effective_hours
    ));
    output.push_str(&format!(
        "  {}: {} min\n",
        "Average".dimmed(),
        stats.avg_effective_minutes
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Success".dimmed(),
        render_progress_bar(stats.success_rate, 20)
    ));

    if stats.total_count > 0 {
        let breakdown = vec![
            ("Completed".to_string(), stats.completed_count),
            ("Abandoned".to_string(), stats.abandoned_count),
            ("Unfinished".to_string(), stats.unfinished_count()),
        ];
        output.push('\n');
        output.push_str(&render_bar_chart(&breakdown, 10, 20));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn completed() -> Session {
        let mut session = Session::new(Some("alice".to_string()), "Write", 25, t0());
        session.id = 3;
        session.status = Status::Completed;
        session.work_start_at = Some(t0());
        session.work_end_at = Some(t0() + Duration::seconds(1500));
        session
    }

    #[test]
    fn test_format_session_pretty() {
        colored::control::set_override(false);
        let out = format_session_pretty(&completed(), t0());

        assert!(out.contains("[x] Write"));
        assert!(out.contains("Owner: alice"));
        assert!(out.contains("Effective: 25 minutes (25 min)"));
        assert!(!out.contains("Away since"));
    }

    #[test]
    fn test_format_transition_pretty_complete() {
        colored::control::set_override(false);
        let out = format_transition_pretty(&completed(), Some(Transition::Complete), t0());

        assert!(out.starts_with("Session 3 completed"));
        assert!(out.contains("25 minutes"));
    }

    #[test]
    fn test_format_page_pretty_empty() {
        let page = SessionPage {
            sessions: Vec::new(),
            stats: crate::features::stats::ListStats::default(),
            as_of: t0(),
        };
        assert!(format_page_pretty(&page).contains("No sessions"));
    }

    #[test]
    fn test_format_stats_pretty() {
        colored::control::set_override(false);
        let stats = SessionStats::calculate(&[completed()], t0());
        let out = format_stats_pretty(&stats);

        assert!(out.contains("Sessions: 1"));
        assert!(out.contains("100.0%"));
        assert!(out.contains("Completed "));
    }
}
