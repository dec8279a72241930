//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with command output. The filter comes
//! from `STRONGBOX_LOG` when set, otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,strongbox=info,strongbox_core=info",
        2 => "warn,strongbox=debug,strongbox_core=debug",
        _ => "trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .without_time()
        .try_init();
}
