#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use geo::{Line, coord};
use selfdrive::simulation::geometric_utils::{
    lerp, line_intersection, polygon_edges, polygons_intersect, segment_hits_polygon,
    segment_intersection,
};

fn square(x: f32, y: f32, size: f32) -> Vec<geo::Coord<f32>> {
    vec![
        coord! { x: x, y: y },
        coord! { x: x + size, y: y },
        coord! { x: x + size, y: y + size },
        coord! { x: x, y: y + size },
    ]
}

#[test]
fn test_lerp() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    assert_eq!(lerp(1.0, -1.0, 0.5), 0.0);
}

#[test]
fn test_crossing_segments() {
    let touch = segment_intersection(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 5.0, y: -5.0 },
        coord! { x: 5.0, y: 5.0 },
    )
    .expect("segments cross");

    assert!((touch.point.x - 5.0).abs() < 1e-6);
    assert!(touch.point.y.abs() < 1e-6);
    assert!((touch.offset - 0.5).abs() < 1e-6);
}

#[test]
fn test_offset_is_measured_along_first_segment() {
    let a = coord! { x: 0.0, y: 0.0 };
    let b = coord! { x: 4.0, y: 0.0 };
    let c = coord! { x: 1.0, y: -1.0 };
    let d = coord! { x: 1.0, y: 1.0 };

    let along_ab = segment_intersection(a, b, c, d).expect("segments cross");
    let along_cd = segment_intersection(c, d, a, b).expect("segments cross");

    assert!((along_ab.offset - 0.25).abs() < 1e-6);
    assert!((along_cd.offset - 0.5).abs() < 1e-6);
    assert!((along_ab.point.x - along_cd.point.x).abs() < 1e-6);
    assert!((along_ab.point.y - along_cd.point.y).abs() < 1e-6);
}

#[test]
fn test_parallel_segments_do_not_intersect() {
    let parallel = segment_intersection(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 0.0, y: 1.0 },
        coord! { x: 10.0, y: 1.0 },
    );
    assert!(parallel.is_none());

    // Overlapping collinear segments are treated as parallel too
    let collinear = segment_intersection(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 5.0, y: 0.0 },
        coord! { x: 15.0, y: 0.0 },
    );
    assert!(collinear.is_none());
}

#[test]
fn test_endpoint_touch_counts() {
    let end_of_first = segment_intersection(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 10.0, y: -5.0 },
        coord! { x: 10.0, y: 5.0 },
    )
    .expect("touch at B counts");
    assert_eq!(end_of_first.offset, 1.0);

    let start_of_second = segment_intersection(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 5.0, y: 0.0 },
        coord! { x: 5.0, y: 5.0 },
    )
    .expect("touch at C counts");
    assert_eq!(start_of_second.offset, 0.5);
}

#[test]
fn test_segments_that_would_cross_if_extended() {
    let touch = segment_intersection(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 15.0, y: -5.0 },
        coord! { x: 15.0, y: 5.0 },
    );
    assert!(touch.is_none());
}

#[test]
fn test_line_intersection_matches_points() {
    let first = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 });
    let second = Line::new(coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 0.0 });

    let touch = line_intersection(&first, &second).expect("diagonals cross");
    assert!((touch.point.x - 5.0).abs() < 1e-5);
    assert!((touch.point.y - 5.0).abs() < 1e-5);
    assert!((touch.offset - 0.5).abs() < 1e-6);
}

#[test]
fn test_polygon_edges_close_the_cycle() {
    let polygon = square(0.0, 0.0, 1.0);
    let edges: Vec<Line<f32>> = polygon_edges(&polygon).collect();

    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].start, polygon[3]);
    assert_eq!(edges[3].end, polygon[0]);
}

#[test]
fn test_separate_polygons_do_not_intersect() {
    assert!(!polygons_intersect(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0)));
}

#[test]
fn test_overlapping_polygons_intersect() {
    let first = square(0.0, 0.0, 2.0);
    let second = square(1.0, 1.0, 2.0);
    assert!(polygons_intersect(&first, &second));
    assert!(polygons_intersect(&second, &first));
}

#[test]
fn test_contained_polygon_without_crossing_edges() {
    // Only edge crossings are reported
    assert!(!polygons_intersect(&square(0.0, 0.0, 10.0), &square(4.0, 4.0, 1.0)));
}

#[test]
fn test_segment_hits_polygon() {
    let polygon = square(0.0, 0.0, 2.0);
    let through = Line::new(coord! { x: -1.0, y: 1.0 }, coord! { x: 3.0, y: 1.0 });
    let beside = Line::new(coord! { x: -1.0, y: 5.0 }, coord! { x: 3.0, y: 6.0 });

    assert!(segment_hits_polygon(&through, &polygon));
    assert!(!segment_hits_polygon(&beside, &polygon));
}
