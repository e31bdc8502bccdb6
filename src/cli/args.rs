use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "pomo")]
#[command(about = "Track pomodoro focus sessions and the time you actually spent working")]
#[command(long_about = "pomo - pomodoro session tracker

Create a session, start it, pause it while you are away, resume it, and
complete or abandon it. Effective work time excludes the time spent away.

QUICK START:
  pomo create --name \"Write report\"   Plan a 25-minute session
  pomo start 1                        Begin working
  pomo pause 1                        Step away
  pomo resume 1                       Come back
  pomo complete 1                     Finish and see effective time
  pomo stats                          Summary of all your sessions

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config value.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Owner the sessions belong to
    ///
    /// Sessions created without an owner are anonymous and never show up in
    /// `list` or `stats`.
    #[arg(long, env = "POMO_OWNER", global = true)]
    pub owner: Option<String>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan a new session
    ///
    /// Examples:
    ///   pomo create
    ///   pomo create --name "Deep work" --duration 50
    ///   pomo create -d 1h
    #[command(alias = "new")]
    Create {
        /// Session name
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Planned duration (e.g., 25, 25m, 1h30m)
        #[arg(long, short = 'd', allow_hyphen_values = true)]
        duration: Option<String>,
    },

    /// Start a planned session
    Start {
        /// Session ID
        id: i64,
    },

    /// Pause a working session (start an away interval)
    Pause {
        /// Session ID
        id: i64,
    },

    /// Resume a paused session (end the away interval)
    Resume {
        /// Session ID
        id: i64,
    },

    /// Complete a working or paused session
    #[command(alias = "done")]
    Complete {
        /// Session ID
        id: i64,
    },

    /// Abandon a session that has not finished
    Abandon {
        /// Session ID
        id: i64,
    },

    /// Show a session with its effective work time
    Show {
        /// Session ID
        id: i64,
    },

    /// List your most recent sessions
    #[command(alias = "ls")]
    List {
        /// Number of sessions to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Summary statistics over all your sessions
    Stats,
}
