use clap::Parser;
use colored::Colorize;

use pomo::cli::args::Cli;
use pomo::cli::commands;
use pomo::config::{ColorSetting, Config};
use pomo::core::SystemClock;
use pomo::error::PomoError;
use pomo::features::focus::{SessionTracker, SqliteSessionStore};
use pomo::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomoError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let owner = cli.owner.or(config.general.owner);

    let tracker = SessionTracker::with_defaults(
        SqliteSessionStore::new()?,
        SystemClock,
        config.session.to_defaults(),
    );

    let output = commands::execute(&tracker, cli.command, owner.as_deref(), format)?;
    println!("{output}");
    Ok(())
}
