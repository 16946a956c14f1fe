//! Command-line interface over JSON snapshot exports.
//!
//! Loads a folder tree and asset list, runs one query through the
//! resolver and prints the requested projection as pretty JSON.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::chart::{ChartGeometry, PieChartLayout, Segment, SegmentShape};
use crate::config::{Config, SnapshotConfig};
use crate::error::AppResult;
use crate::filter::{CategoryChoice, Choice, FilterCriteria, SortDirection, SortSpec};
use crate::resolver::ViewQuery;
use crate::service::DashboardService;
use crate::snapshot::FileSnapshotSource;

/// Test-asset taxonomy resolver.
#[derive(Parser, Debug, Clone)]
#[command(name = "taxonomy-resolver", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Snapshot file locations; fall back to configuration when omitted.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Folder tree JSON export
    #[arg(long)]
    pub folders: Option<PathBuf>,

    /// Test asset JSON export
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

/// Folder selection, filters and sort.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Selected folder id
    #[arg(long)]
    pub folder: Option<i64>,

    /// Free-text search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Exact result status, or "all"
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Exact environment, or "all"
    #[arg(long, default_value = "all")]
    pub environment: String,

    /// Category path "main > sub > detail", or "all"
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Exact creator name, or "all"
    #[arg(long, default_value = "all")]
    pub creator: String,

    /// Exact assignee name, or "all"
    #[arg(long, default_value = "all")]
    pub assignee: String,

    /// Sort column: id, category, status, assignee, creator, environment, created_at, updated_at
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl QueryArgs {
    /// Convert to a resolver query.
    pub fn to_query(&self) -> ViewQuery {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        ViewQuery {
            selected_folder_id: self.folder,
            criteria: FilterCriteria {
                search_term: self.search.clone(),
                status: Choice::parse(&self.status),
                environment: Choice::parse(&self.environment),
                category: CategoryChoice::parse(&self.category),
                creator: Choice::parse(&self.creator),
                assignee: Choice::parse(&self.assignee),
            },
            sort: self
                .sort
                .as_deref()
                .map(|key| SortSpec::parse(key, direction))
                .unwrap_or_default(),
        }
    }
}

/// Output projections.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Filtered table rows with statistics and chart segments
    View,

    /// Status aggregation for the filtered assets
    Summary,

    /// Chart segments with SVG paths
    Chart,

    /// Aggregation per environment folder (ignores filters)
    Environments,

    /// Dropdown options over all assets
    Facets,
}

/// Result of CLI command execution.
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Output message
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: message.into(),
        }
    }
}

/// A chart segment with its drawable outline.
#[derive(Debug, Serialize)]
struct ChartEntry {
    #[serde(flatten)]
    segment: Segment,
    shape: SegmentShape,
    path: String,
}

#[derive(Debug, Serialize)]
struct ChartOutput {
    geometry: ChartGeometry,
    segments: Vec<ChartEntry>,
}

/// Execute a CLI invocation.
pub async fn execute_command(cli: Cli, config: &Config) -> CliResult {
    match run(cli, config).await {
        Ok(output) => CliResult::success(output),
        Err(e) => CliResult::error(format!("Error: {}", e)),
    }
}

async fn run(cli: Cli, config: &Config) -> AppResult<String> {
    let snapshots = SnapshotConfig {
        folders_path: cli
            .snapshots
            .folders
            .unwrap_or_else(|| config.snapshots.folders_path.clone()),
        assets_path: cli
            .snapshots
            .assets
            .unwrap_or_else(|| config.snapshots.assets_path.clone()),
    };
    let source = FileSnapshotSource::from_config(&snapshots);
    let layout = PieChartLayout::new(config.chart.palette.clone());
    let mut service = DashboardService::load(source, layout).await?;
    debug!(
        folders = %service.source().folders_path().display(),
        assets = %service.source().assets_path().display(),
        "Snapshot files"
    );
    let query = cli.query.to_query();
    let resolver = service.resolver_mut();

    let output = match cli.command {
        Commands::View => serde_json::to_string_pretty(&*resolver.view(&query))?,
        Commands::Summary => serde_json::to_string_pretty(&resolver.view(&query).aggregation)?,
        Commands::Chart => {
            let geometry = ChartGeometry::from(&config.chart);
            let view = resolver.view(&query);
            let segments = view
                .segments
                .iter()
                .map(|segment| {
                    let shape = segment.shape(&geometry);
                    ChartEntry {
                        segment: segment.clone(),
                        path: shape.to_svg(),
                        shape,
                    }
                })
                .collect();
            serde_json::to_string_pretty(&ChartOutput { geometry, segments })?
        }
        Commands::Environments => serde_json::to_string_pretty(&resolver.environment_summaries())?,
        Commands::Facets => serde_json::to_string_pretty(&resolver.facets())?,
    };
    Ok(output)
}
