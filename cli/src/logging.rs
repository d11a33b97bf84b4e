//! Log setup.
//!
//! `DIE_LOG` takes an `EnvFilter` directive; without it the level follows
//! the number of `-v` flags. Logs go to stderr so reports on stdout stay
//! clean.

use tracing_subscriber::EnvFilter;

pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("DIE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
