//! Multi-lane road geometry.

use geo::{Line, coord};

use super::geometric_utils::lerp;

/// Stand-in for an unbounded road length in the travel direction.
pub const ROAD_EXTENT: f32 = 1_000_000.0;

/// A straight vertical road split into equal-width lanes.
///
/// Immutable once built. The two borders run from `-ROAD_EXTENT` to
/// `ROAD_EXTENT` along y at the left and right edges.
#[derive(Debug, Clone)]
pub struct Road {
    /// Center x-coordinate.
    pub x: f32,
    /// Total width across all lanes.
    pub width: f32,
    /// Number of lanes.
    pub lane_count: usize,
    /// Left edge x-coordinate.
    pub left: f32,
    /// Right edge x-coordinate.
    pub right: f32,
    /// Top end of the borders (negative y is "ahead").
    pub top: f32,
    /// Bottom end of the borders.
    pub bottom: f32,
    borders: Vec<Line<f32>>,
}

impl Road {
    /// Creates a road centred on `x`.
    ///
    /// # Arguments
    ///
    /// * `x` - Center x-coordinate
    /// * `width` - Total road width
    /// * `lane_count` - Number of lanes, at least one
    pub fn new(x: f32, width: f32, lane_count: usize) -> Self {
        assert!(lane_count > 0, "a road needs at least one lane");

        let left = x - width / 2.0;
        let right = x + width / 2.0;
        let top = -ROAD_EXTENT;
        let bottom = ROAD_EXTENT;

        let borders = vec![
            Line::new(coord! { x: left, y: top }, coord! { x: left, y: bottom }),
            Line::new(coord! { x: right, y: top }, coord! { x: right, y: bottom }),
        ];

        Self {
            x,
            width,
            lane_count,
            left,
            right,
            top,
            bottom,
            borders,
        }
    }

    /// Creates a road with the usual three lanes.
    pub fn with_default_lanes(x: f32, width: f32) -> Self {
        Self::new(x, width, 3)
    }

    /// Left and right border segments.
    pub fn borders(&self) -> &[Line<f32>] {
        &self.borders
    }

    /// Width of a single lane.
    pub fn lane_width(&self) -> f32 {
        self.width / self.lane_count as f32
    }

    /// Center x-coordinate of a lane. Indices past the last lane are clamped to it.
    pub fn lane_center(&self, lane_index: usize) -> f32 {
        let lane_width = self.lane_width();
        let lane = lane_index.min(self.lane_count - 1);
        self.left + lane_width / 2.0 + lane as f32 * lane_width
    }

    /// X-coordinates of the dashed dividers between lanes.
    pub fn lane_dividers(&self) -> Vec<f32> {
        (1..self.lane_count)
            .map(|i| lerp(self.left, self.right, i as f32 / self.lane_count as f32))
            .collect()
    }
}
