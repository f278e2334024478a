//! Log collection: takes a stable snapshot of the active log file.
//!
//! The host process usually still holds the log open for writing, so the file
//! is first copied to a private temporary location and the copy is read
//! instead. The temporary file is removed when the handle drops, on success
//! and failure paths alike.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

/// Header line prepended to the collected log text.
pub const LOG_HEADER: &str = "Log file contents:\n";

#[derive(Debug)]
pub enum CollectError {
    /// The resolver yielded no path, or the path does not exist on disk.
    NotFound(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Yields the filesystem path of the active log file, or `None` to signal
/// that no log is available. Implemented by the host integration and by
/// fixed-path sources in tests and the CLI.
pub trait LogPathResolver: Send + Sync {
    fn log_file_path(&self) -> Option<PathBuf>;
}

/// Resolver over a fixed, optional path (CLI and test usage).
pub struct FileLogSource {
    path: Option<PathBuf>,
}

impl FileLogSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl LogPathResolver for FileLogSource {
    fn log_file_path(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}

/// Resolves the log path and collects its contents.
pub fn collect_from(resolver: &dyn LogPathResolver) -> Result<String, CollectError> {
    let path = match resolver.log_file_path() {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            error!("Log path resolver yielded no path");
            return Err(CollectError::NotFound("no log file path".to_string()));
        }
    };
    collect_log_contents(&path)
}

/// Returns the full text of the log file at `path`, prefixed with
/// [`LOG_HEADER`]. The file is copied to a temporary location first so the
/// read never races an active writer holding the original open.
pub fn collect_log_contents(path: &Path) -> Result<String, CollectError> {
    if !path.exists() {
        error!(path = %path.display(), "Log file not found");
        return Err(CollectError::NotFound(format!(
            "log file not found: {}",
            path.display()
        )));
    }
    let snapshot = tempfile::NamedTempFile::new()?;
    let copied = fs::copy(path, snapshot.path())?;
    debug!(
        path = %path.display(),
        bytes = copied,
        "Copied log file to temporary snapshot"
    );
    let contents = fs::read_to_string(snapshot.path())?;
    info!(path = %path.display(), len = contents.len(), "Collected log file contents");
    Ok(format!("{LOG_HEADER}{contents}"))
}
