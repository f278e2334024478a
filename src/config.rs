//! Runtime configuration for the publisher.

use std::path::PathBuf;

use tracing::info;

use crate::manifest::ComponentDescriptor;

/// Fully merged runtime configuration (static file + environment secrets).
#[derive(Debug)]
pub struct PublisherConfig {
    pub log: LogSettings,
    pub upload: UploadSettings,
    pub components: Vec<ComponentDescriptor>,
}

impl PublisherConfig {
    pub fn trace_loaded(&self) {
        info!(
            components_count = self.components.len(),
            "Loaded PublisherConfig"
        );
        self.log.trace_loaded();
        self.upload.trace_loaded();
    }
}

/// Where the log lives and which installation path to redact from it.
#[derive(Debug)]
pub struct LogSettings {
    /// Path of the active log file; `None` signals "no log available".
    pub file_path: Option<PathBuf>,
    /// Absolute installation directory, redacted from published logs.
    pub install_dir: PathBuf,
}

impl LogSettings {
    pub fn trace_loaded(&self) {
        info!(
            file_path = ?self.file_path,
            install_dir = %self.install_dir.display(),
            "Loaded LogSettings"
        );
    }
}

/// Upload endpoint and credentials. The token value itself is never logged.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub api_url: String,
    pub auth_token: String,
    /// Disables TLS certificate validation for the upload request. Off by
    /// default; only for hosts with broken certificate stores.
    pub insecure_skip_verify: bool,
}

impl UploadSettings {
    pub fn trace_loaded(&self) {
        info!(
            api_url = %self.api_url,
            auth_token_len = self.auth_token.len(),
            insecure_skip_verify = self.insecure_skip_verify,
            "Loaded UploadSettings"
        );
    }
}
