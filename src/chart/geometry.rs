//! Device-independent pie wedge geometry.
//!
//! Angles are in degrees, 0° at 12 o'clock, increasing clockwise in
//! screen coordinates (y grows downwards).

use serde::Serialize;

use crate::config::ChartConfig;

/// A point on the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Center and radius of the pie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub center: Point,
    pub radius: f64,
}

impl ChartGeometry {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: Point { x: cx, y: cy },
            radius,
        }
    }

    /// Point on the rim at `angle` degrees.
    pub fn point_at(&self, angle: f64) -> Point {
        let radians = (angle - 90.0).to_radians();
        Point {
            x: self.center.x + self.radius * radians.cos(),
            y: self.center.y + self.radius * radians.sin(),
        }
    }

    /// Wedge between two angles.
    ///
    /// Path order is center → rim at `end_angle` → arc back to rim at
    /// `start_angle` with sweep flag 0, then close.
    pub fn wedge(&self, start_angle: f64, end_angle: f64) -> WedgePath {
        WedgePath {
            center: self.center,
            end: self.point_at(end_angle),
            radius: self.radius,
            large_arc: end_angle - start_angle > 180.0,
            start: self.point_at(start_angle),
        }
    }
}

impl From<&ChartConfig> for ChartGeometry {
    fn from(config: &ChartConfig) -> Self {
        Self::new(config.center_x, config.center_y, config.radius)
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

/// Closed wedge outline: move, line, arc, close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WedgePath {
    pub center: Point,
    /// Rim point at the segment's end angle; the line target.
    pub end: Point,
    pub radius: f64,
    pub large_arc: bool,
    /// Rim point at the segment's start angle; the arc target.
    pub start: Point,
}

impl WedgePath {
    /// Render as an SVG path `d` attribute.
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} L {} {} A {} {} 0 {} 0 {} {} Z",
            coord(self.center.x),
            coord(self.center.y),
            coord(self.end.x),
            coord(self.end.y),
            coord(self.radius),
            coord(self.radius),
            u8::from(self.large_arc),
            coord(self.start.x),
            coord(self.start.y),
        )
    }
}

/// Drawable outline of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum SegmentShape {
    /// Full 360° segment; an arc cannot describe it.
    Circle { center: Point, radius: f64 },
    Wedge(WedgePath),
}

impl SegmentShape {
    /// SVG path `d` attribute; circles are drawn as two half arcs.
    pub fn to_svg(&self) -> String {
        match self {
            SegmentShape::Wedge(path) => path.to_svg(),
            SegmentShape::Circle { center, radius } => format!(
                "M {} {} A {} {} 0 1 0 {} {} A {} {} 0 1 0 {} {} Z",
                coord(center.x),
                coord(center.y - radius),
                coord(*radius),
                coord(*radius),
                coord(center.x),
                coord(center.y + radius),
                coord(*radius),
                coord(*radius),
                coord(center.x),
                coord(center.y - radius),
            ),
        }
    }
}

/// Round to 4 decimals so float noise does not leak into path strings.
fn coord(value: f64) -> f64 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
