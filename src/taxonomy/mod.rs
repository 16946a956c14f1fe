//! Taxonomy data model for test assets.
//!
//! Test assets are scoped by a four-level folder hierarchy:
//!
//! ```text
//! project → environment → deployment_date → feature
//! ```
//!
//! Both the folder tree and the asset list arrive as read-only snapshots
//! from the backend. Folder types and result statuses are modelled as
//! closed enums so every branch over them is an exhaustive match.

mod index;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use index::{FolderScope, FolderTreeIndex, IndexedFolder};

use serde::{Deserialize, Serialize};

/// Level of a folder within the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderType {
    /// Top-level project folder.
    Project,
    /// Environment under a project (e.g. staging, production).
    Environment,
    /// Deployment date under an environment.
    DeploymentDate,
    /// Feature folder, the leaf level assets attach to.
    Feature,
}

impl std::fmt::Display for FolderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FolderType::Project => write!(f, "project"),
            FolderType::Environment => write!(f, "environment"),
            FolderType::DeploymentDate => write!(f, "deployment_date"),
            FolderType::Feature => write!(f, "feature"),
        }
    }
}

/// A folder in the taxonomy tree, as returned by the folder-tree fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder identifier, unique across the whole tree.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Taxonomy level.
    #[serde(rename = "type")]
    pub folder_type: FolderType,
    /// Parent folder, `None` for roots.
    #[serde(default)]
    pub parent_folder_id: Option<i64>,
    /// Child folders in display order.
    #[serde(default)]
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Create a childless folder.
    pub fn new(id: i64, name: impl Into<String>, folder_type: FolderType) -> Self {
        Self {
            id,
            name: name.into(),
            folder_type,
            parent_folder_id: None,
            children: Vec::new(),
        }
    }

    /// Append a child, setting its parent reference to this folder.
    pub fn with_child(mut self, mut child: FolderNode) -> Self {
        child.parent_folder_id = Some(self.id);
        self.children.push(child);
        self
    }
}

/// Bucket a test result falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Pass,
    Fail,
    Block,
    /// Not tested: the bucket for missing or unrecognized statuses.
    NotTested,
    /// Not applicable.
    NotApplicable,
}

impl ResultStatus {
    /// Classify a raw backend status string.
    ///
    /// Matching is case-insensitive. `n/a` and `na` map to
    /// [`ResultStatus::NotApplicable`]; anything else that is not
    /// pass/fail/block, including `None` and the empty string, is
    /// [`ResultStatus::NotTested`].
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ResultStatus::NotTested;
        };
        match raw.to_lowercase().as_str() {
            "pass" => ResultStatus::Pass,
            "fail" => ResultStatus::Fail,
            "block" => ResultStatus::Block,
            "n/a" | "na" => ResultStatus::NotApplicable,
            _ => ResultStatus::NotTested,
        }
    }

    /// Short label used in tables and chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            ResultStatus::Pass => "Pass",
            ResultStatus::Fail => "Fail",
            ResultStatus::Block => "Block",
            ResultStatus::NotTested => "N/T",
            ResultStatus::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A test asset snapshot row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAsset {
    /// Asset identifier.
    pub id: i64,
    /// Folder the asset is attached to (any taxonomy level).
    #[serde(default)]
    pub folder_id: Option<i64>,
    /// Raw result status (expected Pass/Fail/Block/N/T/N/A).
    #[serde(default)]
    pub result_status: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub main_category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub detail_category: Option<String>,
    /// Free text describing the expected outcome.
    #[serde(default)]
    pub expected_result: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub assignee_name: Option<String>,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the backend.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TestAsset {
    /// Create an asset with only an id set.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Set the folder reference.
    pub fn with_folder(mut self, folder_id: i64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    /// Set the raw result status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.result_status = Some(status.into());
        self
    }

    /// Set the environment name.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set main/sub/detail categories; empty strings leave a level unset.
    pub fn with_categories(mut self, main: &str, sub: &str, detail: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        self.main_category = non_empty(main);
        self.sub_category = non_empty(sub);
        self.detail_category = non_empty(detail);
        self
    }

    /// Set the creator name.
    pub fn with_creator(mut self, name: impl Into<String>) -> Self {
        self.creator_name = Some(name.into());
        self
    }

    /// Set the assignee name.
    pub fn with_assignee(mut self, name: impl Into<String>) -> Self {
        self.assignee_name = Some(name.into());
        self
    }

    /// Set both timestamps.
    pub fn with_timestamps(mut self, created_at: &str, updated_at: &str) -> Self {
        self.created_at = Some(created_at.to_string());
        self.updated_at = Some(updated_at.to_string());
        self
    }

    /// Classified result bucket.
    pub fn status(&self) -> ResultStatus {
        ResultStatus::classify(self.result_status.as_deref())
    }
}
