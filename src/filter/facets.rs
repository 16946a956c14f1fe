//! Dropdown options derived from the loaded assets.

use std::collections::BTreeSet;

use serde::Serialize;

use super::CATEGORY_SEPARATOR;
use crate::taxonomy::TestAsset;

/// Distinct, sorted values for each filter dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub statuses: Vec<String>,
    pub environments: Vec<String>,
    /// Every observed category prefix in composite form.
    pub categories: Vec<String>,
    pub creators: Vec<String>,
    pub assignees: Vec<String>,
}

impl Facets {
    /// Collect facet values. Empty strings are not offered as options.
    ///
    /// A category level whose name contains the separator cannot be
    /// selected by path, so neither it nor its deeper levels are offered.
    pub fn collect<'a, I>(assets: I) -> Self
    where
        I: IntoIterator<Item = &'a TestAsset>,
    {
        let mut statuses = BTreeSet::new();
        let mut environments = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut creators = BTreeSet::new();
        let mut assignees = BTreeSet::new();

        for asset in assets {
            insert_non_empty(&mut statuses, &asset.result_status);
            insert_non_empty(&mut environments, &asset.environment);
            insert_non_empty(&mut creators, &asset.creator_name);
            insert_non_empty(&mut assignees, &asset.assignee_name);

            let levels = [
                &asset.main_category,
                &asset.sub_category,
                &asset.detail_category,
            ];
            let mut path: Vec<&str> = Vec::with_capacity(3);
            for level in levels {
                match level.as_deref() {
                    Some(name) if !name.is_empty() && !name.contains(CATEGORY_SEPARATOR) => {
                        path.push(name);
                        categories.insert(path.join(CATEGORY_SEPARATOR));
                    }
                    _ => break,
                }
            }
        }

        Self {
            statuses: statuses.into_iter().collect(),
            environments: environments.into_iter().collect(),
            categories: categories.into_iter().collect(),
            creators: creators.into_iter().collect(),
            assignees: assignees.into_iter().collect(),
        }
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        set.insert(value.to_string());
    }
}
