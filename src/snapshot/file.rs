use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::SnapshotSource;
use crate::config::SnapshotConfig;
use crate::error::{SnapshotError, SnapshotResult};
use crate::taxonomy::{FolderNode, TestAsset};

/// Folder export shape: either a list of roots or a single root object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FolderSnapshot {
    Forest(Vec<FolderNode>),
    Root(FolderNode),
}

impl FolderSnapshot {
    /// Normalize to a list of roots.
    pub fn into_roots(self) -> Vec<FolderNode> {
        match self {
            FolderSnapshot::Forest(roots) => roots,
            FolderSnapshot::Root(root) => vec![root],
        }
    }
}

/// Reads snapshots from JSON files.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    folders_path: PathBuf,
    assets_path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(folders_path: impl Into<PathBuf>, assets_path: impl Into<PathBuf>) -> Self {
        Self {
            folders_path: folders_path.into(),
            assets_path: assets_path.into(),
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(config.folders_path.clone(), config.assets_path.clone())
    }

    pub fn folders_path(&self) -> &Path {
        &self.folders_path
    }

    pub fn assets_path(&self) -> &Path {
        &self.assets_path
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn folder_tree(&self) -> SnapshotResult<Vec<FolderNode>> {
        let snapshot: FolderSnapshot = read_json(&self.folders_path).await?;
        Ok(snapshot.into_roots())
    }

    async fn test_assets(&self) -> SnapshotResult<Vec<TestAsset>> {
        read_json(&self.assets_path).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> SnapshotResult<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = raw.len(), "Snapshot read");
    serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
