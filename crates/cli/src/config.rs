//! User configuration file
//!
//! Read from `$TRPRUNE_CONFIG`, or `<config dir>/trprune/config.toml`.
//! A missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TRPRUNE_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unsupported tekton.dev api_version {0:?} (expected one of: v1, v1beta1)")]
    ApiVersion(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub delete: DeleteConfig,
}

/// Cluster connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub namespace: Option<String>,
    /// `tekton.dev` API version serving TaskRuns
    pub api_version: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            namespace: None,
            api_version: "v1".to_string(),
        }
    }
}

/// Delete command defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteConfig {
    /// Skip the confirmation prompt
    pub force: bool,
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !tr_kube::API_VERSIONS.contains(&self.cluster.api_version.as_str()) {
            return Err(ConfigError::ApiVersion(self.cluster.api_version.clone()));
        }
        Ok(())
    }
}

/// Location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("trprune").join("config.toml"))
}

/// Load the config file, falling back to defaults when it does not exist
pub fn load() -> Result<Config, ConfigError> {
    match config_file_path() {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load and validate a specific config file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}

/// Commented example configuration
pub fn example_config() -> &'static str {
    r#"# trprune configuration

[cluster]
# Kubeconfig file (default: $KUBECONFIG or ~/.kube/config)
# kubeconfig = "/home/me/.kube/config"

# Kubeconfig context (default: current context)
# context = "kind-tekton"

# Namespace used when -n is not given (default: the context's namespace)
# namespace = "ci"

# tekton.dev API version serving TaskRuns: v1 or v1beta1
api_version = "v1"

[delete]
# Skip the confirmation prompt
force = false
"#
}
