//! Shared taxonomy resolver.
//!
//! Every dashboard area (asset table, KPI tiles, status chart,
//! per-environment summary) reads through this one type so folder
//! scoping, filtering and aggregation cannot drift between call sites.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{PieChartLayout, Segment};
use crate::filter::{Facets, FilterCriteria, FilterPipeline, SortSpec};
use crate::stats::{summarize_environments, AggregationResult, EnvironmentSummary, StatusAggregator};
use crate::taxonomy::{FolderNode, FolderTreeIndex, TestAsset};

/// Everything that determines a dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    pub selected_folder_id: Option<i64>,
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
}

impl ViewQuery {
    /// Query scoped to one folder with no other filtering.
    pub fn for_folder(folder_id: i64) -> Self {
        Self {
            selected_folder_id: Some(folder_id),
            ..Default::default()
        }
    }
}

/// Table rows, statistics and chart segments for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Breadcrumb of the selected folder, root first.
    pub folder_path: Vec<String>,
    pub assets: Vec<TestAsset>,
    pub aggregation: AggregationResult,
    pub segments: Vec<Segment>,
}

/// Owns the current snapshots and answers view queries.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyResolver {
    tree: Vec<FolderNode>,
    index: FolderTreeIndex,
    assets: Vec<TestAsset>,
    layout: PieChartLayout,
    last_view: Option<(ViewQuery, Arc<DashboardView>)>,
}

impl TaxonomyResolver {
    /// Create a resolver over the given snapshots.
    pub fn new(tree: Vec<FolderNode>, assets: Vec<TestAsset>, layout: PieChartLayout) -> Self {
        let index = FolderTreeIndex::build(&tree);
        Self {
            tree,
            index,
            assets,
            layout,
            last_view: None,
        }
    }

    /// Swap in a new folder tree. The index is rebuilt only if the tree
    /// differs from the current one. Returns whether it changed.
    pub fn replace_tree(&mut self, tree: Vec<FolderNode>) -> bool {
        if tree == self.tree {
            return false;
        }
        self.index = FolderTreeIndex::build(&tree);
        self.tree = tree;
        self.last_view = None;
        true
    }

    /// Swap in a new asset snapshot. Returns whether it changed.
    pub fn replace_assets(&mut self, assets: Vec<TestAsset>) -> bool {
        if assets == self.assets {
            return false;
        }
        self.assets = assets;
        self.last_view = None;
        true
    }

    pub fn tree(&self) -> &[FolderNode] {
        &self.tree
    }

    pub fn index(&self) -> &FolderTreeIndex {
        &self.index
    }

    pub fn assets(&self) -> &[TestAsset] {
        &self.assets
    }

    /// Filtered and sorted assets, borrowed from the snapshot.
    pub fn filter(&self, query: &ViewQuery) -> Vec<&TestAsset> {
        FilterPipeline::new(&self.index).apply(
            &self.assets,
            query.selected_folder_id,
            &query.criteria,
            &query.sort,
        )
    }

    /// Compute a view, reusing the previous result when the query repeats.
    pub fn view(&mut self, query: &ViewQuery) -> Arc<DashboardView> {
        if let Some((cached_query, view)) = &self.last_view {
            if cached_query == query {
                debug!("Dashboard view served from cache");
                return Arc::clone(view);
            }
        }
        let view = Arc::new(self.compute_view(query));
        self.last_view = Some((query.clone(), Arc::clone(&view)));
        view
    }

    /// Compute a view without touching the cache.
    pub fn compute_view(&self, query: &ViewQuery) -> DashboardView {
        let filtered = self.filter(query);
        let aggregation = StatusAggregator::compute(filtered.iter().copied());
        let segments = self.layout.build(&aggregation);
        DashboardView {
            folder_path: query
                .selected_folder_id
                .map(|id| self.breadcrumb(id))
                .unwrap_or_default(),
            assets: filtered.into_iter().cloned().collect(),
            aggregation,
            segments,
        }
    }

    /// Dropdown options over the full snapshot.
    pub fn facets(&self) -> Facets {
        Facets::collect(&self.assets)
    }

    /// Aggregation per environment folder.
    pub fn environment_summaries(&self) -> Vec<EnvironmentSummary> {
        summarize_environments(&self.index, &self.assets)
    }

    /// Folder names from the root down to `folder_id`.
    pub fn breadcrumb(&self, folder_id: i64) -> Vec<String> {
        self.index
            .path(folder_id)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
