//! # Taxonomy Resolver
//!
//! Folder-taxonomy scoping, filtering, status aggregation and pie-chart
//! layout for test-asset dashboards.
//!
//! ## Features
//!
//! - **Folder Index**: Flattens the project → environment → deployment
//!   date → feature tree and resolves the leaf folders under any node
//! - **Filter Pipeline**: Folder scope, free-text search, dropdown filters
//!   and a stable column sort
//! - **Status Aggregation**: Pass/Fail/Block/N/T/N/A buckets with
//!   zero-guarded rates and percentages
//! - **Pie Chart Layout**: Ordered angular segments with wedge geometry
//! - **Shared Resolver**: One memoized entry point for every dashboard area
//!
//! ## Architecture
//!
//! ```text
//! SnapshotSource → TaxonomyResolver
//!                       │
//!   FolderTreeIndex → FilterPipeline → StatusAggregator → PieChartLayout
//! ```
//!
//! ## Example
//!
//! ```
//! use taxonomy_resolver::chart::PieChartLayout;
//! use taxonomy_resolver::resolver::{TaxonomyResolver, ViewQuery};
//! use taxonomy_resolver::taxonomy::{FolderNode, FolderType, TestAsset};
//!
//! let tree = vec![FolderNode::new(1, "Shop", FolderType::Project)
//!     .with_child(FolderNode::new(2, "Login", FolderType::Feature))];
//! let assets = vec![
//!     TestAsset::new(1).with_folder(2).with_status("Pass"),
//!     TestAsset::new(2).with_folder(2).with_status("Fail"),
//! ];
//!
//! let resolver = TaxonomyResolver::new(tree, assets, PieChartLayout::default());
//! let view = resolver.compute_view(&ViewQuery::for_folder(2));
//! assert_eq!(view.aggregation.pass_rate, 50);
//! assert_eq!(view.segments.len(), 2);
//! ```

#![warn(missing_docs)]

/// Chart segment layout and wedge geometry.
pub mod chart;
/// Command-line interface.
pub mod cli;
/// Configuration loaded from the environment.
pub mod config;
/// Error types and result aliases.
pub mod error;
/// Filter criteria, sort specs and the filter pipeline.
pub mod filter;
/// Shared resolver that runs the whole pipeline per query.
pub mod resolver;
/// Async service that refreshes a resolver from a snapshot source.
pub mod service;
/// Snapshot sources for folder trees and assets.
pub mod snapshot;
/// Status aggregation.
pub mod stats;
/// Folder and asset model plus the folder index.
pub mod taxonomy;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use resolver::{DashboardView, TaxonomyResolver, ViewQuery};
