//! Session statistics.
//!
//! Aggregates over a collection of sessions:
//! - Tallies by status
//! - Total and average effective work time
//! - Success rate
//! - Terminal charts for the pretty output

pub mod metrics;
pub mod visualization;

pub use metrics::{ListStats, SessionStats};
pub use visualization::{render_bar_chart, render_progress_bar};
