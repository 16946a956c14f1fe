//! Pie chart layout for the status distribution.
//!
//! Turns an [`AggregationResult`] into ordered angular segments. Drawing
//! is left to whatever renders the output; [`geometry`] only describes
//! the outlines.

pub mod geometry;

pub use geometry::{ChartGeometry, Point, SegmentShape, WedgePath};

use serde::Serialize;

use crate::config::ChartPalette;
use crate::stats::{rounded_percent, AggregationResult};

/// Which bucket a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKey {
    Pass,
    Block,
    Fail,
    /// N/T plus N/A.
    NotTested,
    /// Placeholder when there is nothing to chart.
    Empty,
}

impl SegmentKey {
    /// Legend label.
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKey::Pass => "Pass",
            SegmentKey::Block => "Block",
            SegmentKey::Fail => "Fail",
            SegmentKey::NotTested => "N/T",
            SegmentKey::Empty => "No data",
        }
    }
}

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub key: SegmentKey,
    pub label: String,
    pub value: usize,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub percent: u32,
}

impl Segment {
    fn full_circle(key: SegmentKey, value: usize, color: &str, percent: u32) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            value,
            color: color.to_string(),
            start_angle: 0.0,
            end_angle: 360.0,
            percent,
        }
    }

    /// Whether this segment is the "no data" placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.key == SegmentKey::Empty
    }

    /// Angular span in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the segment covers the whole circle.
    pub fn is_full_circle(&self) -> bool {
        self.sweep() >= 360.0
    }

    /// Outline of this segment on a concrete canvas.
    pub fn shape(&self, geometry: &ChartGeometry) -> SegmentShape {
        if self.is_full_circle() {
            SegmentShape::Circle {
                center: geometry.center,
                radius: geometry.radius,
            }
        } else {
            SegmentShape::Wedge(geometry.wedge(self.start_angle, self.end_angle))
        }
    }
}

/// Lays out pie segments with a fixed palette.
#[derive(Debug, Clone, Default)]
pub struct PieChartLayout {
    palette: ChartPalette,
}

impl PieChartLayout {
    pub fn new(palette: ChartPalette) -> Self {
        Self { palette }
    }

    /// Build segments in pass, block, fail, N/T order, skipping empty buckets.
    ///
    /// No data yields a single placeholder circle; a single non-empty
    /// bucket yields one full circle in that bucket's color. Otherwise
    /// the segments tile `[0, 360)` without gaps.
    pub fn build(&self, aggregation: &AggregationResult) -> Vec<Segment> {
        let total = aggregation.total;
        if total == 0 {
            return vec![Segment::full_circle(
                SegmentKey::Empty,
                0,
                &self.palette.empty,
                0,
            )];
        }

        let buckets: Vec<(SegmentKey, usize)> = [
            (SegmentKey::Pass, aggregation.pass),
            (SegmentKey::Block, aggregation.block),
            (SegmentKey::Fail, aggregation.fail),
            (SegmentKey::NotTested, aggregation.nt_combined),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .collect();

        if let [(key, value)] = buckets.as_slice() {
            return vec![Segment::full_circle(*key, *value, self.color(*key), 100)];
        }

        let mut start_angle = 0.0;
        buckets
            .into_iter()
            .map(|(key, value)| {
                let end_angle = start_angle + value as f64 / total as f64 * 360.0;
                let segment = Segment {
                    key,
                    label: key.label().to_string(),
                    value,
                    color: self.color(key).to_string(),
                    start_angle,
                    end_angle,
                    percent: rounded_percent(value, total),
                };
                start_angle = end_angle;
                segment
            })
            .collect()
    }

    fn color(&self, key: SegmentKey) -> &str {
        match key {
            SegmentKey::Pass => &self.palette.pass,
            SegmentKey::Block => &self.palette.block,
            SegmentKey::Fail => &self.palette.fail,
            SegmentKey::NotTested => &self.palette.not_tested,
            SegmentKey::Empty => &self.palette.empty,
        }
    }
}
