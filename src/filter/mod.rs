//! Filtering pipeline over test-asset snapshots.
//!
//! The pipeline is a pure function of its inputs, executed as ordered
//! stages:
//!
//! ```text
//! &[TestAsset]
//!      │
//!      ├─→ folder scope     ← selected folder + FolderTreeIndex
//!      ├─→ free-text search ← search term
//!      ├─→ categorical      ← status / environment / creator / assignee
//!      ├─→ category path    ← "main > sub > detail"
//!      └─→ stable sort      ← SortSpec
//!      │
//!      ▼
//! Vec<&TestAsset>
//! ```
//!
//! With no folder selected, every criterion at "all", an empty search and
//! no sort key, the output is the input in original order.

mod facets;
mod sort;

pub use facets::Facets;
pub use sort::{parse_timestamp_millis, SortDirection, SortKey, SortSpec};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::taxonomy::{FolderScope, FolderTreeIndex, TestAsset};

/// Literal the UI sends for "no filter".
pub const ALL: &str = "all";

/// Separator between category levels in a composite category string.
///
/// Category names that themselves contain it cannot be addressed by path.
pub const CATEGORY_SEPARATOR: &str = " > ";

/// A dropdown selection: either everything or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Parse a UI value; the exact literal `"all"` means no filter.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    /// Whether a field value passes this selection.
    ///
    /// A missing field never matches a concrete value.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => value == Some(expected.as_str()),
        }
    }

    /// Whether this selection filters anything.
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        if value == ALL {
            Choice::All
        } else {
            Choice::Only(value)
        }
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::All => ALL.to_string(),
            Choice::Only(value) => value,
        }
    }
}

/// A category selection in `main[ > sub[ > detail]]` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryChoice {
    #[default]
    All,
    /// Category levels, outermost first.
    Path(Vec<String>),
}

impl CategoryChoice {
    /// Parse a composite category string.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            CategoryChoice::All
        } else {
            CategoryChoice::Path(value.split(CATEGORY_SEPARATOR).map(str::to_string).collect())
        }
    }

    /// Whether an asset's categories match this selection.
    ///
    /// One, two or three levels compare against main, main+sub and
    /// main+sub+detail exactly; deeper paths match nothing.
    pub fn matches(&self, asset: &TestAsset) -> bool {
        let parts = match self {
            CategoryChoice::All => return true,
            CategoryChoice::Path(parts) => parts,
        };
        let main = asset.main_category.as_deref();
        let sub = asset.sub_category.as_deref();
        let detail = asset.detail_category.as_deref();

        match parts.as_slice() {
            [m] => main == Some(m.as_str()),
            [m, s] => main == Some(m.as_str()) && sub == Some(s.as_str()),
            [m, s, d] => {
                main == Some(m.as_str()) && sub == Some(s.as_str()) && detail == Some(d.as_str())
            }
            _ => false,
        }
    }

    /// Whether this selection filters anything.
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryChoice::All)
    }
}

impl From<String> for CategoryChoice {
    fn from(value: String) -> Self {
        CategoryChoice::parse(&value)
    }
}

impl From<CategoryChoice> for String {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::All => ALL.to_string(),
            CategoryChoice::Path(parts) => parts.join(CATEGORY_SEPARATOR),
        }
    }
}

/// Filter controls as supplied by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Free-text search; blank means no search.
    pub search_term: String,
    pub status: Choice,
    pub environment: Choice,
    pub category: CategoryChoice,
    pub creator: Choice,
    pub assignee: Choice,
}

impl FilterCriteria {
    /// Whether these criteria let every asset through.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.status.is_all()
            && self.environment.is_all()
            && self.category.is_all()
            && self.creator.is_all()
            && self.assignee.is_all()
    }
}

/// Runs the filter stages against a folder index.
#[derive(Debug, Clone, Copy)]
pub struct FilterPipeline<'i> {
    index: &'i FolderTreeIndex,
}

impl<'i> FilterPipeline<'i> {
    /// Create a pipeline over a folder index.
    pub fn new(index: &'i FolderTreeIndex) -> Self {
        Self { index }
    }

    /// Filter and sort `assets`, returning references in output order.
    ///
    /// `assets` is never mutated.
    pub fn apply<'a>(
        &self,
        assets: &'a [TestAsset],
        selected_folder_id: Option<i64>,
        criteria: &FilterCriteria,
        sort: &SortSpec,
    ) -> Vec<&'a TestAsset> {
        // Stage 1: folder scope
        let scope = self.folder_scope(selected_folder_id);
        let scoped: Vec<&TestAsset> = assets
            .iter()
            .filter(|asset| scope.contains(asset.folder_id))
            .collect();
        let scoped_count = scoped.len();

        // Stage 2: free-text search
        let searched = search_stage(scoped, &criteria.search_term);

        // Stages 3 + 4: categorical and category-path filters
        let mut filtered = categorical_stage(searched, criteria);

        // Stage 5: sort
        sort::sort_assets(&mut filtered, sort);

        debug!(
            input = assets.len(),
            scoped = scoped_count,
            output = filtered.len(),
            folder_id = ?selected_folder_id,
            folder_type = %selected_folder_id
                .and_then(|id| self.index.resolve_type(id))
                .map_or_else(|| "none".to_string(), |ty| ty.to_string()),
            "Filter pipeline applied"
        );
        filtered
    }

    /// Folder scope for a selection.
    ///
    /// No selection is unrestricted. A feature keeps its exact id, an
    /// environment or deployment date keeps its leaf set, a project passes
    /// everything, and an id missing from the tree keeps nothing.
    pub fn folder_scope(&self, selected_folder_id: Option<i64>) -> FolderScope {
        match selected_folder_id {
            None => FolderScope::All,
            Some(id) => self.index.collect_descendant_leaf_ids(id),
        }
    }
}

// ============================================================================
// STAGE 2: SEARCH
// ============================================================================

fn search_stage<'a>(assets: Vec<&'a TestAsset>, search_term: &str) -> Vec<&'a TestAsset> {
    let term = search_term.trim();
    if term.is_empty() {
        return assets;
    }
    let needle = term.to_lowercase();
    assets
        .into_iter()
        .filter(|asset| matches_search(asset, &needle))
        .collect()
}

/// Whether any searchable text field contains `needle` (already lower-cased).
fn matches_search(asset: &TestAsset, needle: &str) -> bool {
    [
        &asset.main_category,
        &asset.sub_category,
        &asset.detail_category,
        &asset.expected_result,
        &asset.remark,
        &asset.creator_name,
        &asset.assignee_name,
    ]
    .into_iter()
    .filter_map(|field| field.as_deref())
    .any(|text| text.to_lowercase().contains(needle))
}

// ============================================================================
// STAGES 3-4: CATEGORICAL FILTERS
// ============================================================================

fn categorical_stage<'a>(assets: Vec<&'a TestAsset>, criteria: &FilterCriteria) -> Vec<&'a TestAsset> {
    if criteria.status.is_all()
        && criteria.environment.is_all()
        && criteria.creator.is_all()
        && criteria.assignee.is_all()
        && criteria.category.is_all()
    {
        return assets;
    }
    assets
        .into_iter()
        .filter(|asset| {
            criteria.status.matches(asset.result_status.as_deref())
                && criteria.environment.matches(asset.environment.as_deref())
                && criteria.creator.matches(asset.creator_name.as_deref())
                && criteria.assignee.matches(asset.assignee_name.as_deref())
                && criteria.category.matches(asset)
        })
        .collect()
}
