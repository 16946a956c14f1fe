//! Dashboard service: keeps a [`TaxonomyResolver`] in sync with a
//! [`SnapshotSource`].

use tracing::{debug, info};

use crate::chart::PieChartLayout;
use crate::error::SnapshotResult;
use crate::resolver::TaxonomyResolver;
use crate::snapshot::SnapshotSource;

/// What a refresh changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub tree_changed: bool,
    pub assets_changed: bool,
}

/// Resolver plus the source it is refreshed from.
pub struct DashboardService<S: SnapshotSource> {
    source: S,
    resolver: TaxonomyResolver,
}

impl<S: SnapshotSource> DashboardService<S> {
    /// Fetch both snapshots and build the initial resolver.
    pub async fn load(source: S, layout: PieChartLayout) -> SnapshotResult<Self> {
        let tree = source.folder_tree().await?;
        let assets = source.test_assets().await?;
        info!(roots = tree.len(), assets = assets.len(), "Dashboard snapshots loaded");
        Ok(Self {
            source,
            resolver: TaxonomyResolver::new(tree, assets, layout),
        })
    }

    /// Re-fetch both snapshots. The folder index is only rebuilt when the
    /// tree actually changed.
    pub async fn refresh(&mut self) -> SnapshotResult<RefreshOutcome> {
        let tree = self.source.folder_tree().await?;
        let assets = self.source.test_assets().await?;
        let outcome = RefreshOutcome {
            tree_changed: self.resolver.replace_tree(tree),
            assets_changed: self.resolver.replace_assets(assets),
        };
        debug!(
            tree_changed = outcome.tree_changed,
            assets_changed = outcome.assets_changed,
            "Dashboard snapshots refreshed"
        );
        Ok(outcome)
    }

    pub fn resolver(&self) -> &TaxonomyResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut TaxonomyResolver {
        &mut self.resolver
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
