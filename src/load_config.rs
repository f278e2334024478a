//! Loads the static YAML config file (no secrets) and merges the required
//! environment variables for secrets into a full [`PublisherConfig`].

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::{LogSettings, PublisherConfig, UploadSettings};
use crate::manifest::ComponentDescriptor;
use crate::transport::GIST_API_URL;

/// Environment variable carrying the gist API credential.
pub const AUTH_TOKEN_ENV_VAR: &str = "GIST_AUTH_TOKEN";

#[derive(Deserialize)]
struct StaticConfig {
    log: LogSection,
    #[serde(default)]
    upload: UploadSection,
    #[serde(default)]
    components: Vec<ComponentDescriptor>,
}

#[derive(Deserialize)]
struct LogSection {
    #[serde(default)]
    file_path: Option<std::path::PathBuf>,
    install_dir: std::path::PathBuf,
}

#[derive(Deserialize, Default)]
struct UploadSection {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    insecure_skip_verify: bool,
}

/// Loads a static YAML config file and injects the auth token from the
/// environment. Returns a fully merged PublisherConfig or an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PublisherConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let auth_token = match std::env::var(AUTH_TOKEN_ENV_VAR) {
        Ok(token) if !token.is_empty() => {
            info!("{AUTH_TOKEN_ENV_VAR} found in env");
            token
        }
        Ok(_) => {
            error!("{AUTH_TOKEN_ENV_VAR} environment variable is empty");
            anyhow::bail!("{AUTH_TOKEN_ENV_VAR} environment variable is empty");
        }
        Err(e) => {
            error!(error = ?e, "{AUTH_TOKEN_ENV_VAR} environment variable not set");
            anyhow::bail!("{AUTH_TOKEN_ENV_VAR} environment variable not set: {e}");
        }
    };

    let config = PublisherConfig {
        log: LogSettings {
            file_path: static_conf.log.file_path,
            install_dir: static_conf.log.install_dir,
        },
        upload: UploadSettings {
            api_url: static_conf
                .upload
                .api_url
                .unwrap_or_else(|| GIST_API_URL.to_string()),
            auth_token,
            insecure_skip_verify: static_conf.upload.insecure_skip_verify,
        },
        components: static_conf.components,
    };
    config.trace_loaded();
    Ok(config)
}
