use serde::{Deserialize, Serialize};
use std::fmt;

pub type ClusterId = String;
pub type UserId = String;

/// Well-known configuration entries stored per cluster.
///
/// Each variant names a file under the cluster's configuration directory:
/// - `Monitors`: monitor list, comma separated
/// - `AdminId` / `AdminKey`: identity and key used for provisioning
/// - `UserId` / `UserKey`: identity and key used for publishing
/// - `Pools`: pool list, comma separated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKey {
    Monitors,
    AdminId,
    UserId,
    AdminKey,
    UserKey,
    Pools,
}

impl ConfigKey {
    /// File name the key is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Monitors => "monitors",
            ConfigKey::AdminId => "adminid",
            ConfigKey::UserId => "userid",
            ConfigKey::AdminKey => "adminkey",
            ConfigKey::UserKey => "userkey",
            ConfigKey::Pools => "pools",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
