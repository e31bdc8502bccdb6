//! Output formatting for pomo.
//!
//! This module renders sessions, listings and stats in each output format.

mod json;
mod pretty;

use chrono::{DateTime, Utc};

use crate::cli::args::OutputFormat;
use crate::error::PomoError;
use crate::features::focus::{Session, SessionPage, Transition};
use crate::features::stats::SessionStats;

pub use json::*;
pub use pretty::*;

/// Format a single session based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_session(
    session: &Session,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session, now)),
        OutputFormat::Json => format_session_json(session, now),
    }
}

/// Format the result of creating (`action == None`) or transitioning a session
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_transition(
    session: &Session,
    action: Option<Transition>,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_transition_pretty(session, action, now)),
        OutputFormat::Json => format_transition_json(session, action, now),
    }
}

/// Format a page of sessions based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_page(page: &SessionPage, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_page_pretty(page)),
        OutputFormat::Json => format_page_json(page),
    }
}

/// Format full-history stats based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &SessionStats, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => format_stats_json(stats),
    }
}
