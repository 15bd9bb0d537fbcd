//! Geometric primitives for ray casting and collision checks.
//!
//! All tests are plain floating point with no tolerance: parallel or collinear
//! segments never intersect, and touching exactly at an endpoint counts as a hit.

use geo::{Coord, Line};

/// Closed polygon as an ordered list of corners.
pub type Polygon = Vec<Coord<f32>>;

/// An intersection point together with its fractional position along the
/// first segment of the test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Where the two segments cross.
    pub point: Coord<f32>,
    /// Fraction of the way from the first segment's start to its end, in `[0, 1]`.
    pub offset: f32,
}

/// Linear interpolation between `a` and `b`.
///
/// `t = 0` yields `a`, `t = 1` yields `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Intersects segment `AB` with segment `CD`.
///
/// Solves the parametric form `A + t(B - A) = C + u(D - C)` with cross products.
/// The hit is accepted only when both `t` and `u` lie in `[0, 1]` (inclusive)
/// and the direction vectors are not parallel.
///
/// # Returns
///
/// The crossing point with `offset = t`, or `None`.
pub fn segment_intersection(
    a: Coord<f32>,
    b: Coord<f32>,
    c: Coord<f32>,
    d: Coord<f32>,
) -> Option<Touch> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom == 0.0 {
        return None;
    }

    let t = t_top / bottom;
    let u = u_top / bottom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Touch {
            point: Coord {
                x: lerp(a.x, b.x, t),
                y: lerp(a.y, b.y, t),
            },
            offset: t,
        })
    } else {
        None
    }
}

/// [`segment_intersection`] for two [`Line`]s; the offset is measured along `first`.
#[inline]
pub fn line_intersection(first: &Line<f32>, second: &Line<f32>) -> Option<Touch> {
    segment_intersection(first.start, first.end, second.start, second.end)
}

/// Iterates the edges of a polygon, closing it from the last point back to the first.
pub fn polygon_edges(polygon: &[Coord<f32>]) -> impl Iterator<Item = Line<f32>> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(start, end)| Line::new(*start, *end))
}

/// Checks whether any edge of `first` crosses any edge of `second`.
///
/// A polygon fully contained in the other without crossing edges is not
/// reported; only edge crossings count.
pub fn polygons_intersect(first: &[Coord<f32>], second: &[Coord<f32>]) -> bool {
    polygon_edges(first).any(|edge| {
        polygon_edges(second).any(|other| line_intersection(&edge, &other).is_some())
    })
}

/// Checks whether a single segment crosses any edge of a polygon.
pub fn segment_hits_polygon(segment: &Line<f32>, polygon: &[Coord<f32>]) -> bool {
    polygon_edges(polygon).any(|edge| line_intersection(segment, &edge).is_some())
}
