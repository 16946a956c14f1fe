use serde::Serialize;

use super::{AggregationResult, StatusAggregator};
use crate::taxonomy::{FolderTreeIndex, TestAsset};

/// Aggregation for one environment folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSummary {
    pub folder_id: i64,
    pub name: String,
    /// Folder names from the root to the environment.
    pub path: Vec<String>,
    pub aggregation: AggregationResult,
}

/// Summarize every environment folder in tree order.
///
/// Each environment is scoped the same way a folder selection is, so the
/// numbers match what the dashboard shows after clicking the folder.
pub fn summarize_environments(index: &FolderTreeIndex, assets: &[TestAsset]) -> Vec<EnvironmentSummary> {
    index
        .environments()
        .map(|env| {
            let scope = index.collect_descendant_leaf_ids(env.id);
            let aggregation =
                StatusAggregator::compute(assets.iter().filter(|a| scope.contains(a.folder_id)));
            EnvironmentSummary {
                folder_id: env.id,
                name: env.name.clone(),
                path: index.path(env.id).into_iter().map(str::to_string).collect(),
                aggregation,
            }
        })
        .collect()
}
