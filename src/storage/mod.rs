//! Storage layer for pomo.
//!
//! SQLite-based persistence for pomodoro sessions.

mod database;
mod migrations;

pub use database::Database;
