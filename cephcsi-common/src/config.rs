use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config root that selects the Kubernetes-objects backend instead of files.
pub const K8S_OBJECTS_ROOT: &str = "k8s_objects";

pub const DEFAULT_CONFIG_ROOT: &str = "/etc/csi-config";

/// How cluster ids and keys are checked before they become path segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPolicy {
    /// Reject empty values, separators, NUL and `.`/`..`.
    #[default]
    Strict,
    /// Interpolate values verbatim; traversal is resolved lexically.
    Permissive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub config_root: PathBuf,
    pub path_policy: PathPolicy,
    pub log_level: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from(DEFAULT_CONFIG_ROOT),
            path_policy: PathPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn validate(&self) -> Result<()> {
        if self.config_root.as_os_str().is_empty() {
            return Err(ConfigError::Config("config_root must not be empty".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Config("log_level must not be empty".into()));
        }
        Ok(())
    }

    /// True when the config root names the Kubernetes-objects backend.
    pub fn uses_k8s_objects(&self) -> bool {
        self.config_root == Path::new(K8S_OBJECTS_ROOT)
    }
}

/// Loads store settings from a JSON file. Missing fields take their defaults.
pub fn load_settings(path: impl AsRef<Path>) -> Result<StoreSettings> {
    let data = fs::read_to_string(path)?;
    let settings: StoreSettings = serde_json::from_str(&data)?;
    settings.validate()?;
    Ok(settings)
}
