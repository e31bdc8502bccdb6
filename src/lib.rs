//! pomo - a pomodoro session tracker
//!
//! Sessions move through a small lifecycle (planned, working, paused,
//! completed, abandoned). Effective work time is the span between start and
//! end minus the time spent away, and is always derived from the stored
//! timestamps rather than kept as a running counter.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomoError;
pub use features::focus::{Session, SessionStore, SessionTracker, SqliteSessionStore, Status};
