//! Result-status aggregation.
//!
//! Reduces an asset list into five status buckets plus the derived rates
//! shown on KPI tiles and summary tables. Every division is zero-guarded,
//! so results never contain NaN or infinity.

mod environment;

pub use environment::{summarize_environments, EnvironmentSummary};

use serde::{Deserialize, Serialize};

use crate::taxonomy::{ResultStatus, TestAsset};

/// Bucket counts and derived percentages for a set of assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationResult {
    pub pass: usize,
    pub fail: usize,
    pub block: usize,
    /// Not tested, including missing and unrecognized statuses.
    pub nt: usize,
    /// Not applicable.
    pub na: usize,
    pub total: usize,
    /// `total - nt`.
    ///
    /// Only `nt` is excluded, so N/A results count as tested for the pass
    /// rate even though tables show them inside [`Self::nt_combined`].
    pub tested: usize,
    /// `pass / tested` as a rounded percentage.
    pub pass_rate: u32,
    pub percent_pass: u32,
    pub percent_fail: u32,
    pub percent_block: u32,
    /// Remainder so the four displayed percentages sum to exactly 100.
    pub percent_nt: u32,
    /// `nt + na`, the value shown in the N/T column and chart slice.
    pub nt_combined: usize,
}

impl AggregationResult {
    /// Count for a single bucket.
    pub fn count(&self, status: ResultStatus) -> usize {
        match status {
            ResultStatus::Pass => self.pass,
            ResultStatus::Fail => self.fail,
            ResultStatus::Block => self.block,
            ResultStatus::NotTested => self.nt,
            ResultStatus::NotApplicable => self.na,
        }
    }

    /// Whether the aggregation covers no assets.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Computes [`AggregationResult`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAggregator;

impl StatusAggregator {
    /// Aggregate result statuses in a single pass.
    pub fn compute<'a, I>(assets: I) -> AggregationResult
    where
        I: IntoIterator<Item = &'a TestAsset>,
    {
        let mut result = AggregationResult::default();
        for asset in assets {
            match asset.status() {
                ResultStatus::Pass => result.pass += 1,
                ResultStatus::Fail => result.fail += 1,
                ResultStatus::Block => result.block += 1,
                ResultStatus::NotTested => result.nt += 1,
                ResultStatus::NotApplicable => result.na += 1,
            }
            result.total += 1;
        }

        result.tested = result.total.saturating_sub(result.nt);
        result.pass_rate = rounded_percent(result.pass, result.tested);
        result.percent_pass = rounded_percent(result.pass, result.total);
        result.percent_fail = rounded_percent(result.fail, result.total);
        result.percent_block = rounded_percent(result.block, result.total);
        result.percent_nt = 100u32
            .saturating_sub(result.percent_pass)
            .saturating_sub(result.percent_fail)
            .saturating_sub(result.percent_block);
        result.nt_combined = result.nt + result.na;
        result
    }
}

/// `round(part / whole * 100)`, or 0 when `whole` is 0.
pub(crate) fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
