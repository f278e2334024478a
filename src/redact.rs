//! Privacy redaction passes applied to collected log text before upload.
//!
//! Each rule is a pure transform over the log text. Rules are stateless and
//! idempotent on their own output: a redacted span contains the replacement
//! token rather than the original marker, so a second pass matches nothing.
//! `redact_all` applies the rules in their fixed order.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

pub const INSTALL_DIR_REPLACEMENT: &str = "[Install_dir]";
pub const HOME_DIR_REPLACEMENT: &str = "[Home_dir]";
pub const RENDERER_INFO_REPLACEMENT: &str = "[Renderer information redacted]";
pub const CONNECT_INFO_REPLACEMENT: &str = "[PlayerConnect information redacted]";
pub const HOST_ID_REPLACEMENT: &str = "[Steam Id redacted]";

/// Matches the host-identifier log line up to end of line, or end of content
/// when the line is unterminated.
static HOST_ID_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new("Steam_SetMinidumpSteamID.+").expect("valid host id pattern"));

/// Applies every redaction rule in the fixed order: installation paths,
/// home directory, renderer info, player-connect info, host identifiers.
/// The home directory rule is skipped entirely on Windows, where logs do not
/// contain home paths.
pub fn redact_all(log: &str, install_dir: &Path) -> String {
    let log = redact_install_paths(log, install_dir);
    let log = if cfg!(windows) {
        log
    } else {
        redact_home_paths(&log, std::env::var("HOME").ok().as_deref())
    };
    let log = redact_renderer_info(&log);
    let log = redact_connect_info(&log);
    let log = redact_host_ids(&log);
    debug!(len = log.len(), "Redaction passes complete");
    log
}

/// Replaces every occurrence of the installation directory path. Logs can mix
/// platform-native and forward-slash separators, so on platforms where the
/// native separator is not `/` the forward-slash spelling of the same path is
/// replaced as well.
pub fn redact_install_paths(log: &str, install_dir: &Path) -> String {
    let native = install_dir.to_string_lossy();
    if native.is_empty() {
        return log.to_string();
    }
    let mut result = log.replace(native.as_ref(), INSTALL_DIR_REPLACEMENT);
    if std::path::MAIN_SEPARATOR != '/' {
        let forward = native.replace(std::path::MAIN_SEPARATOR, "/");
        result = result.replace(&forward, INSTALL_DIR_REPLACEMENT);
    }
    result
}

/// Replaces every occurrence of the home directory value. A no-op when the
/// home directory is unknown; the Windows gate lives in `redact_all`.
pub fn redact_home_paths(log: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if !home.is_empty() => log.replace(home, HOME_DIR_REPLACEMENT),
        _ => log.to_string(),
    }
}

/// Redacts the renderer/GPU information block emitted at engine startup.
pub fn redact_renderer_info(log: &str) -> String {
    redact_span(
        log,
        "GfxDevice: ",
        "\nBegin MonoManager",
        RENDERER_INFO_REPLACEMENT,
    )
}

/// Redacts the player-connection block, which carries local network details.
pub fn redact_connect_info(log: &str) -> String {
    redact_span(
        log,
        "PlayerConnection ",
        "\nInitialize engine",
        CONNECT_INFO_REPLACEMENT,
    )
}

/// Replaces host-identifier log lines. The match runs to end of line; when
/// the identifier line is the last line of the log and unterminated it
/// consumes to end of content.
pub fn redact_host_ids(log: &str) -> String {
    HOST_ID_LINE.replace_all(log, HOST_ID_REPLACEMENT).into_owned()
}

/// Replaces everything between `start_marker` and the next occurrence of
/// `end_marker` with `replacement`. Both marker literals are preserved in the
/// output. When either marker is absent the input is returned verbatim; there
/// is no partial redaction.
pub fn redact_span(text: &str, start_marker: &str, end_marker: &str, replacement: &str) -> String {
    let Some(start) = text.find(start_marker) else {
        return text.to_string();
    };
    let keep_to = start + start_marker.len();
    let Some(end_rel) = text[keep_to..].find(end_marker) else {
        return text.to_string();
    };
    let end = keep_to + end_rel;
    let mut result = String::with_capacity(keep_to + replacement.len() + (text.len() - end));
    result.push_str(&text[..keep_to]);
    result.push_str(replacement);
    result.push_str(&text[end..]);
    result
}
