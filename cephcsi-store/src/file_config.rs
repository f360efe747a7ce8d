use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::store::StoreReader;
use cephcsi_common::config::PathPolicy;
use cephcsi_common::error::{ConfigError, Result};
use tracing::debug;

/// Directory name prefix for a cluster's configuration, followed by its fsid.
pub const CLUSTER_DIR_PREFIX: &str = "ceph-cluster-";

/// Reads cluster configuration from files.
///
/// Each cluster's configuration is stored under `<base_path>/ceph-cluster-<fsid>`,
/// where `<fsid>` is the cluster fsid. Inside that directory every file is named
/// after a configuration key and its whole content is the value.
#[derive(Debug, Clone)]
pub struct FileConfig {
    base_path: PathBuf,
    path_policy: PathPolicy,
}

impl FileConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            path_policy: PathPolicy::default(),
        }
    }

    pub fn with_path_policy(mut self, path_policy: PathPolicy) -> Self {
        self.path_policy = path_policy;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn path_policy(&self) -> PathPolicy {
        self.path_policy
    }

    /// Resolves the file holding `key` for `cluster_id`.
    pub fn path_for_key(&self, cluster_id: &str, key: &str) -> Result<PathBuf> {
        if self.path_policy == PathPolicy::Strict {
            check_segment("cluster ID", cluster_id)?;
            check_segment("key", key)?;
        }

        let cluster_dir = format!("{CLUSTER_DIR_PREFIX}{cluster_id}");
        Ok(join_clean(&self.base_path, &[&cluster_dir, key]))
    }
}

impl StoreReader for FileConfig {
    /// Reads the file named by `key` and returns its contents.
    ///
    /// A read failure and an empty file are reported the same way.
    fn data_for_key(&self, cluster_id: &str, key: &str) -> Result<String> {
        let path = self.path_for_key(cluster_id, key)?;

        let data = match fs::read_to_string(&path) {
            Ok(content) if !content.is_empty() => content,
            Ok(_) => return Err(unavailable(cluster_id, None)),
            Err(err) => return Err(unavailable(cluster_id, Some(err))),
        };

        debug!(%data, key, cluster_id, "returning configuration data");
        Ok(data)
    }
}

fn unavailable(cluster_id: &str, source: Option<io::Error>) -> ConfigError {
    ConfigError::Unavailable {
        cluster_id: cluster_id.to_string(),
        source,
    }
}

fn check_segment(field: &'static str, value: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);

    if invalid {
        return Err(ConfigError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Lexically cleans `path`: drops `.`, folds `..` into its parent.
pub(crate) fn clean_path(path: &Path) -> PathBuf {
    join_clean(path, &[])
}

// Segments are joined as relative parts even when they start with a separator,
// and `..` never climbs above a root.
fn join_clean(base: &Path, segments: &[&str]) -> PathBuf {
    let mut out = PathBuf::new();

    for component in base.components() {
        push_component(&mut out, component);
    }

    for segment in segments {
        for component in Path::new(segment).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {}
                other => push_component(&mut out, other),
            }
        }
    }

    out
}

fn push_component(out: &mut PathBuf, component: Component<'_>) {
    match component {
        Component::CurDir => {}
        Component::ParentDir => match out.components().next_back() {
            Some(Component::Normal(_)) => {
                out.pop();
            }
            Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
            _ => out.push(".."),
        },
        other => out.push(other.as_os_str()),
    }
}
