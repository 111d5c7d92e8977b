//! Log file setup
//!
//! The terminal belongs to the TUI, so tracing output goes to a file. The
//! default location is the platform data directory
//! (`~/.local/share/cityweather/cityweather.log` on Linux). `RUST_LOG`
//! overrides the default `info` filter.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// File name used inside the data directory
const LOG_FILE_NAME: &str = "cityweather.log";

/// Default log file path, or `None` if no home directory can be determined
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "cityweather")?;
    Some(project_dirs.data_dir().join(LOG_FILE_NAME))
}

/// Opens a log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global tracing subscriber writing to `path` or the default location.
///
/// # Returns
/// * `Ok(Some(path))` - the file logs are written to
/// * `Ok(None)` - no log location could be determined; logging is disabled
/// * `Err` - the log file could not be opened
pub fn init(path: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(None);
    };

    let file = open_log_file(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Another subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(Some(path))
}
