//! Snapshot sources for folder trees and test assets.
//!
//! The resolver never fetches anything itself. A [`SnapshotSource`] stands
//! in for the backend's read-only "list folder tree" and "list test
//! assets" calls; [`FileSnapshotSource`] reads exported JSON from disk.

mod file;

pub use file::{FileSnapshotSource, FolderSnapshot};

use async_trait::async_trait;

use crate::error::SnapshotResult;
use crate::taxonomy::{FolderNode, TestAsset};

/// Read-only provider of dashboard snapshots.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the folder forest.
    async fn folder_tree(&self) -> SnapshotResult<Vec<FolderNode>>;

    /// Fetch the flat asset list.
    async fn test_assets(&self) -> SnapshotResult<Vec<TestAsset>>;
}
