use std::path::Path;

use gist_publisher::redact::{
    redact_all, redact_connect_info, redact_home_paths, redact_host_ids, redact_install_paths,
    redact_renderer_info, redact_span, CONNECT_INFO_REPLACEMENT, HOME_DIR_REPLACEMENT,
    HOST_ID_REPLACEMENT, INSTALL_DIR_REPLACEMENT, RENDERER_INFO_REPLACEMENT,
};

#[test]
fn renderer_redaction_is_identity_without_markers() {
    let log = "plain log line\nanother line\n";
    assert_eq!(redact_renderer_info(log), log);
}

#[test]
fn connect_redaction_is_identity_without_markers() {
    let log = "no network info here\n";
    assert_eq!(redact_connect_info(log), log);
}

#[test]
fn span_redaction_preserves_markers_and_removes_content() {
    let input = "START GfxDevice: NVIDIA GeForce, driver 535.1\nBegin MonoManager END";
    let result = redact_renderer_info(input);
    assert_eq!(
        result,
        format!("START GfxDevice: {RENDERER_INFO_REPLACEMENT}\nBegin MonoManager END")
    );
    assert!(!result.contains("NVIDIA"));
}

#[test]
fn span_redaction_with_missing_end_marker_leaves_input_verbatim() {
    let input = "GfxDevice: secret card info with no end marker";
    assert_eq!(redact_renderer_info(input), input);
}

#[test]
fn span_redaction_ignores_end_marker_before_start_marker() {
    let input = "tail END early\nstart HERE more text";
    assert_eq!(redact_span(input, "HERE", "END", "[x]"), input);
}

#[test]
fn connect_redaction_replaces_span() {
    let input = "boot\nPlayerConnection initialized port 55000 guid 12345\nInitialize engine v1\n";
    let result = redact_connect_info(input);
    assert_eq!(
        result,
        format!("boot\nPlayerConnection {CONNECT_INFO_REPLACEMENT}\nInitialize engine v1\n")
    );
}

#[test]
fn install_path_redaction_replaces_every_occurrence() {
    let install_dir = Path::new("/opt/app");
    let log = "loading /opt/app/Data/core.bin\ncache at /opt/app/cache\n";
    let result = redact_install_paths(log, install_dir);
    assert_eq!(
        result,
        format!(
            "loading {INSTALL_DIR_REPLACEMENT}/Data/core.bin\ncache at {INSTALL_DIR_REPLACEMENT}/cache\n"
        )
    );
}

#[test]
fn install_path_redaction_is_idempotent() {
    let install_dir = Path::new("/opt/app");
    let log = "loading /opt/app/Data/core.bin\n";
    let once = redact_install_paths(log, install_dir);
    let twice = redact_install_paths(&once, install_dir);
    assert_eq!(once, twice);
}

#[test]
fn install_path_redaction_with_empty_path_is_identity() {
    let log = "nothing to see\n";
    assert_eq!(redact_install_paths(log, Path::new("")), log);
}

#[test]
fn home_path_redaction_replaces_value_when_set() {
    let log = "reading /home/alice/.config/app/settings\n";
    let result = redact_home_paths(log, Some("/home/alice"));
    assert_eq!(
        result,
        format!("reading {HOME_DIR_REPLACEMENT}/.config/app/settings\n")
    );
}

#[test]
fn home_path_redaction_is_noop_when_unset() {
    let log = "reading /home/alice/.config\n";
    assert_eq!(redact_home_paths(log, None), log);
}

#[test]
fn host_id_redaction_stops_at_line_end() {
    let log = "Steam_SetMinidumpSteamID(76561198000000000)\nnext line survives\n";
    let result = redact_host_ids(log);
    assert_eq!(result, format!("{HOST_ID_REPLACEMENT}\nnext line survives\n"));
}

#[test]
fn host_id_redaction_consumes_unterminated_final_line() {
    let log = "prelude\nSteam_SetMinidumpSteamID(76561198000000000) trailing";
    let result = redact_host_ids(log);
    assert_eq!(result, format!("prelude\n{HOST_ID_REPLACEMENT}"));
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(redact_all("", Path::new("/opt/app")), "");
}

#[test]
fn redact_all_applies_every_rule() {
    let log = "app at /opt/app/Data\n\
               GfxDevice: secret GPU\nBegin MonoManager\n\
               PlayerConnection port 55000\nInitialize engine\n\
               Steam_SetMinidumpSteamID(123)\n";
    let result = redact_all(log, Path::new("/opt/app"));
    assert!(result.contains(INSTALL_DIR_REPLACEMENT));
    assert!(result.contains(RENDERER_INFO_REPLACEMENT));
    assert!(result.contains(CONNECT_INFO_REPLACEMENT));
    assert!(result.contains(HOST_ID_REPLACEMENT));
    assert!(!result.contains("secret GPU"));
    assert!(!result.contains("port 55000"));
    assert!(!result.contains("/opt/app"));
}
