//! File-backed tracing setup
//!
//! The terminal belongs to the TUI, so log output only goes to a file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber. Does nothing when no log file is configured.
pub fn init(config: &Config) -> io::Result<()> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| io::Error::other(format!("logging setup failed: {err}")))
}
