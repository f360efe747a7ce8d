use crate::file_config::{clean_path, FileConfig};
use cephcsi_common::config::{StoreSettings, K8S_OBJECTS_ROOT};
use cephcsi_common::error::{ConfigError, Result};
use cephcsi_common::types::ConfigKey;
use tracing::info;

/// A source of per-cluster configuration values (local files, k8s objects, ...).
pub trait StoreReader: Send + Sync {
    /// Returns the value stored under `key` for the cluster `cluster_id`.
    fn data_for_key(&self, cluster_id: &str, key: &str) -> Result<String>;
}

/// Typed access to cluster configuration on top of a pluggable reader.
pub struct ConfigStore {
    reader: Box<dyn StoreReader>,
}

impl ConfigStore {
    pub fn new(reader: Box<dyn StoreReader>) -> Self {
        Self { reader }
    }

    /// Builds the store selected by `settings.config_root`.
    pub fn from_settings(settings: &StoreSettings) -> Result<Self> {
        if settings.uses_k8s_objects() {
            return Err(ConfigError::UnsupportedBackend(K8S_OBJECTS_ROOT.to_string()));
        }

        let reader = FileConfig::new(clean_path(&settings.config_root))
            .with_path_policy(settings.path_policy);
        info!(
            config_root = %reader.base_path().display(),
            path_policy = ?reader.path_policy(),
            "using file configuration store"
        );

        Ok(Self::new(Box::new(reader)))
    }

    fn value(&self, cluster_id: &str, key: ConfigKey) -> Result<String> {
        self.reader.data_for_key(cluster_id, key.as_str())
    }

    /// Comma separated monitor list.
    pub fn mons(&self, cluster_id: &str) -> Result<String> {
        self.value(cluster_id, ConfigKey::Monitors)
    }

    pub fn pools(&self, cluster_id: &str) -> Result<Vec<String>> {
        let content = self.value(cluster_id, ConfigKey::Pools)?;
        Ok(content.split(',').map(str::to_string).collect())
    }

    pub fn admin_id(&self, cluster_id: &str) -> Result<String> {
        self.value(cluster_id, ConfigKey::AdminId)
    }

    pub fn user_id(&self, cluster_id: &str) -> Result<String> {
        self.value(cluster_id, ConfigKey::UserId)
    }

    /// Returns the key of `user`, who must be either the admin or the user
    /// configured for the cluster.
    pub fn key_for_user(&self, cluster_id: &str, user: &str) -> Result<String> {
        let fetch_key = if self.admin_id(cluster_id)? == user {
            ConfigKey::AdminKey
        } else if self.user_id(cluster_id)? == user {
            ConfigKey::UserKey
        } else {
            return Err(ConfigError::UserNotFound {
                user: user.to_string(),
                cluster_id: cluster_id.to_string(),
            });
        };

        self.value(cluster_id, fetch_key)
    }
}

impl StoreReader for ConfigStore {
    fn data_for_key(&self, cluster_id: &str, key: &str) -> Result<String> {
        self.reader.data_for_key(cluster_id, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cephcsi_common::config::PathPolicy;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    /// In-memory reader keyed by (cluster id, key).
    #[derive(Default)]
    struct MemoryReader {
        data: HashMap<(String, String), String>,
    }

    impl MemoryReader {
        fn with(mut self, cluster_id: &str, key: ConfigKey, value: &str) -> Self {
            self.data
                .insert((cluster_id.into(), key.as_str().into()), value.into());
            self
        }
    }

    impl StoreReader for MemoryReader {
        fn data_for_key(&self, cluster_id: &str, key: &str) -> Result<String> {
            self.data
                .get(&(cluster_id.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| ConfigError::Unavailable {
                    cluster_id: cluster_id.to_string(),
                    source: None,
                })
        }
    }

    fn store() -> ConfigStore {
        let reader = MemoryReader::default()
            .with("fsid-1", ConfigKey::Monitors, "10.0.0.1:6789,10.0.0.2:6789")
            .with("fsid-1", ConfigKey::Pools, "rbd,replicapool")
            .with("fsid-1", ConfigKey::AdminId, "admin")
            .with("fsid-1", ConfigKey::AdminKey, "AQAadminkey==")
            .with("fsid-1", ConfigKey::UserId, "csi-user")
            .with("fsid-1", ConfigKey::UserKey, "AQAuserkey==");
        ConfigStore::new(Box::new(reader))
    }

    #[test]
    fn test_typed_accessors() {
        let store = store();

        assert_eq!(store.mons("fsid-1").unwrap(), "10.0.0.1:6789,10.0.0.2:6789");
        assert_eq!(store.pools("fsid-1").unwrap(), vec!["rbd", "replicapool"]);
        assert_eq!(store.admin_id("fsid-1").unwrap(), "admin");
        assert_eq!(store.user_id("fsid-1").unwrap(), "csi-user");
    }

    #[test]
    fn test_key_for_user() {
        let store = store();

        assert_eq!(store.key_for_user("fsid-1", "admin").unwrap(), "AQAadminkey==");
        assert_eq!(store.key_for_user("fsid-1", "csi-user").unwrap(), "AQAuserkey==");

        let err = store.key_for_user("fsid-1", "intruder").unwrap_err();
        assert!(matches!(err, ConfigError::UserNotFound { .. }));
        assert!(err.to_string().contains("intruder"));
        assert!(err.to_string().contains("fsid-1"));
    }

    #[test]
    fn test_lookup_errors_propagate() {
        let store = store();

        let err = store.key_for_user("fsid-2", "admin").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Unavailable { ref cluster_id, .. } if cluster_id == "fsid-2"
        ));
        assert!(store.pools("fsid-2").is_err());
    }

    #[test]
    fn test_from_settings_rejects_k8s_objects() {
        let settings = StoreSettings {
            config_root: PathBuf::from(K8S_OBJECTS_ROOT),
            ..StoreSettings::default()
        };

        let err = ConfigStore::from_settings(&settings).err().unwrap();
        assert!(matches!(err, ConfigError::UnsupportedBackend(_)));
    }

    #[test]
    fn test_from_settings_reads_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cluster_dir = temp_dir.path().join("ceph-cluster-fsid-1");
        fs::create_dir_all(&cluster_dir).unwrap();
        fs::write(cluster_dir.join("monitors"), "10.0.0.1:6789").unwrap();
        fs::write(cluster_dir.join("pools"), "rbd").unwrap();

        let settings = StoreSettings {
            config_root: temp_dir.path().join("./nested/.."),
            path_policy: PathPolicy::Strict,
            ..StoreSettings::default()
        };
        let store = ConfigStore::from_settings(&settings).unwrap();

        assert_eq!(store.mons("fsid-1").unwrap(), "10.0.0.1:6789");
        assert_eq!(store.pools("fsid-1").unwrap(), vec!["rbd"]);
        assert_eq!(store.data_for_key("fsid-1", "pools").unwrap(), "rbd");
        assert!(matches!(
            store.data_for_key("fsid-1", "../pools"),
            Err(ConfigError::InvalidIdentifier { .. })
        ));
    }
}
