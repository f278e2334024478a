//! Assembly of the publishable log bundle: upload timestamp, component
//! manifest and the redacted log body.

use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::collect::{collect_from, CollectError, LogPathResolver};
use crate::manifest::{render_manifest, ComponentDescriptor};
use crate::redact::redact_all;

/// The composed unit submitted for upload. Created fresh per publish attempt,
/// discarded after payload encoding.
#[derive(Debug, Clone)]
pub struct LogBundle {
    pub timestamp: String,
    pub active_components: String,
    pub log_body: String,
}

impl LogBundle {
    /// Collects the log, runs the redaction passes and renders the component
    /// manifest. Any collection failure propagates; the publish pipeline
    /// converts it into an error status.
    pub fn assemble(
        resolver: &dyn LogPathResolver,
        components: &[ComponentDescriptor],
        install_dir: &Path,
    ) -> Result<LogBundle, CollectError> {
        let raw = match collect_from(resolver) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = ?e, "Log collection failed during bundle assembly");
                return Err(e);
            }
        };
        let log_body = redact_all(&raw, install_dir);
        let active_components = render_manifest(components);
        let bundle = LogBundle {
            timestamp: make_log_timestamp(Local::now()),
            active_components,
            log_body,
        };
        info!(
            components = components.len(),
            log_len = bundle.log_body.len(),
            "Assembled log bundle"
        );
        Ok(bundle)
    }

    /// Flattens the bundle into the single text document that becomes the
    /// gist file content.
    pub fn into_text(self) -> String {
        format!(
            "{}{}\n{}",
            self.timestamp, self.active_components, self.log_body
        )
    }
}

/// Human-readable upload timestamp line, e.g.
/// `Log uploaded on Friday, August 29, 2025, 14:03:55`.
pub fn make_log_timestamp(now: DateTime<Local>) -> String {
    format!("Log uploaded on {}\n", now.format("%A, %B %-d, %Y, %H:%M:%S"))
}
