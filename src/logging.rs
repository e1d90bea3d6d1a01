//! Logger setup for the simulation binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Maps a `-v` count onto a level filter.
///
/// # Examples
/// ```
/// use log::LevelFilter;
/// use swarmblade::logging::level_for;
/// assert_eq!(level_for(0), LevelFilter::Info);
/// assert_eq!(level_for(1), LevelFilter::Debug);
/// assert_eq!(level_for(5), LevelFilter::Trace);
/// ```
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` still wins over the level derived from `verbosity`, so a
/// single module can be traced without flooding the rest.
pub fn init(verbosity: u8) {
    let env = Env::default().default_filter_or(level_for(verbosity).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    if builder.try_init().is_err() {
        log::debug!("logger already installed; keeping it");
    }
}
