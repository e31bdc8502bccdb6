//! Logging setup.
//!
//! Log lines go to stderr so JSON on stdout stays parseable. `RUST_LOG`
//! overrides the level chosen from the `--verbose` flag.

use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "pomo=debug"
    } else {
        "warn"
    }
}

/// Initialize the global logger.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let _ = Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
