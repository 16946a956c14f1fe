use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub snapshots: SnapshotConfig,
    pub chart: ChartConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Default locations of the JSON snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub folders_path: PathBuf,
    pub assets_path: PathBuf,
}

/// Pie chart canvas and palette
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub palette: ChartPalette,
}

/// Colors for each chart bucket, as CSS color strings
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPalette {
    pub pass: String,
    pub block: String,
    pub fail: String,
    pub not_tested: String,
    pub empty: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let snapshots = SnapshotConfig {
            folders_path: PathBuf::from(
                env::var("FOLDERS_SNAPSHOT_PATH")
                    .unwrap_or_else(|_| "./data/folders.json".to_string()),
            ),
            assets_path: PathBuf::from(
                env::var("ASSETS_SNAPSHOT_PATH")
                    .unwrap_or_else(|_| "./data/test_assets.json".to_string()),
            ),
        };

        let defaults = ChartConfig::default();
        let radius = match env::var("CHART_RADIUS") {
            Ok(raw) => match raw.parse::<f64>() {
                Ok(r) if r.is_finite() && r > 0.0 => r,
                _ => {
                    return Err(AppError::Config {
                        message: format!("CHART_RADIUS must be a positive number, got '{}'", raw),
                    })
                }
            },
            Err(_) => defaults.radius,
        };

        let chart = ChartConfig {
            center_x: env_f64("CHART_CENTER_X").unwrap_or(defaults.center_x),
            center_y: env_f64("CHART_CENTER_Y").unwrap_or(defaults.center_y),
            radius,
            palette: ChartPalette {
                pass: env::var("CHART_COLOR_PASS").unwrap_or(defaults.palette.pass),
                block: env::var("CHART_COLOR_BLOCK").unwrap_or(defaults.palette.block),
                fail: env::var("CHART_COLOR_FAIL").unwrap_or(defaults.palette.fail),
                not_tested: env::var("CHART_COLOR_NT").unwrap_or(defaults.palette.not_tested),
                empty: env::var("CHART_COLOR_EMPTY").unwrap_or(defaults.palette.empty),
            },
        };

        Ok(Config {
            logging,
            snapshots,
            chart,
        })
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            center_x: 100.0,
            center_y: 100.0,
            radius: 80.0,
            palette: ChartPalette::default(),
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            pass: "#22c55e".to_string(),
            block: "#f59e0b".to_string(),
            fail: "#ef4444".to_string(),
            not_tested: "#94a3b8".to_string(),
            empty: "#e5e7eb".to_string(),
        }
    }
}
