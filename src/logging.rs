//! Log setup.
//!
//! The survey owns the terminal, so logs go to `<data-root>/tastecheck.log`.
//! The filter comes from `TASTECHECK_LOG` and defaults to `tastecheck=info`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "tastecheck.log";
const FILTER_ENV: &str = "TASTECHECK_LOG";
const DEFAULT_FILTER: &str = "tastecheck=info";

/// Install the global subscriber, appending to the log file in `data_root`.
///
/// Returns the log file path.
pub fn init(data_root: &Path) -> Result<PathBuf, String> {
    fs::create_dir_all(data_root)
        .map_err(|e| format!("failed to create {}: {e}", data_root.display()))?;

    let path = data_root.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("failed to install logger: {e}"))?;

    Ok(path)
}
