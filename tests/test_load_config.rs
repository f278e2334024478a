use std::env;
use std::fs::write;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::NamedTempFile;

use gist_publisher::load_config::{load_config, AUTH_TOKEN_ENV_VAR};
use gist_publisher::transport::GIST_API_URL;

/// A static config plus the required env var produces a fully merged
/// PublisherConfig.
#[test]
#[serial]
fn load_config_success_injects_env_token() {
    let config_yaml = r#"
log:
  file_path: /var/log/app/Player.log
  install_dir: /opt/app
upload:
  api_url: https://gist.example.com/api
  insecure_skip_verify: true
components:
  - name: ModName
    override_version: "1.2"
  - name: CoreLib
    assemblies:
      - name: CoreLib
        version: 1.0.0.0
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write config");

    env::set_var(AUTH_TOKEN_ENV_VAR, "top-secret-test-token");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(
        config.log.file_path,
        Some(PathBuf::from("/var/log/app/Player.log"))
    );
    assert_eq!(config.log.install_dir, PathBuf::from("/opt/app"));
    assert_eq!(config.upload.api_url, "https://gist.example.com/api");
    assert!(config.upload.insecure_skip_verify);
    assert_eq!(config.upload.auth_token, "top-secret-test-token");

    assert_eq!(config.components.len(), 2);
    assert_eq!(config.components[0].name, "ModName");
    assert_eq!(config.components[0].override_version.as_deref(), Some("1.2"));
    assert!(config.components[0].assemblies.is_empty());
    assert_eq!(config.components[1].assemblies.len(), 1);
    assert_eq!(config.components[1].assemblies[0].version, "1.0.0.0");
}

/// Omitted upload section falls back to the public gist endpoint with
/// certificate validation enabled.
#[test]
#[serial]
fn load_config_defaults_upload_section() {
    let config_yaml = r#"
log:
  install_dir: /opt/app
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write config");

    env::set_var(AUTH_TOKEN_ENV_VAR, "token");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.log.file_path, None);
    assert_eq!(config.upload.api_url, GIST_API_URL);
    assert!(!config.upload.insecure_skip_verify);
    assert!(config.components.is_empty());
}

/// A missing credential env var makes the loader fail.
#[test]
#[serial]
fn load_config_errors_on_missing_env() {
    let config_yaml = r#"
log:
  install_dir: /opt/app
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write config");

    env::remove_var(AUTH_TOKEN_ENV_VAR);

    let result = load_config(config_file.path());
    assert!(result.is_err());
    let message = format!("{}", result.err().expect("error"));
    assert!(message.contains(AUTH_TOKEN_ENV_VAR));
}

#[test]
#[serial]
fn load_config_errors_on_missing_file() {
    env::set_var(AUTH_TOKEN_ENV_VAR, "token");
    let result = load_config("/nonexistent/config.yaml");
    assert!(result.is_err());
}

#[test]
#[serial]
fn load_config_errors_on_invalid_yaml() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "log: [not: a mapping").expect("write config");

    env::set_var(AUTH_TOKEN_ENV_VAR, "token");

    let result = load_config(config_file.path());
    assert!(result.is_err());
}
