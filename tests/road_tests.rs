#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use selfdrive::simulation::road::{ROAD_EXTENT, Road};

#[test]
fn test_road_edges() {
    let road = Road::new(100.0, 180.0, 3);
    assert_eq!(road.left, 10.0);
    assert_eq!(road.right, 190.0);
    assert_eq!(road.lane_width(), 60.0);
}

#[test]
fn test_default_lane_count() {
    let road = Road::with_default_lanes(0.0, 90.0);
    assert_eq!(road.lane_count, 3);
}

#[test]
fn test_lane_centers() {
    let road = Road::new(100.0, 180.0, 3);
    assert_eq!(road.lane_center(0), 40.0);
    assert_eq!(road.lane_center(1), 100.0);
    assert_eq!(road.lane_center(2), 160.0);
}

#[test]
fn test_lane_centers_are_evenly_spaced() {
    let width = 200.0;
    let lanes = 4;
    let road = Road::new(0.0, width, lanes);
    let lane_width = width / lanes as f32;

    assert!((road.lane_center(0) - road.left - lane_width / 2.0).abs() < 1e-4);
    assert!((road.right - road.lane_center(lanes - 1) - lane_width / 2.0).abs() < 1e-4);
    for i in 1..lanes {
        let spacing = road.lane_center(i) - road.lane_center(i - 1);
        assert!((spacing - lane_width).abs() < 1e-4);
    }
}

#[test]
fn test_lane_index_is_clamped() {
    let road = Road::new(100.0, 180.0, 3);
    assert_eq!(road.lane_center(3), road.lane_center(2));
    assert_eq!(road.lane_center(100), road.lane_center(2));
}

#[test]
fn test_borders_run_along_the_edges() {
    let road = Road::new(100.0, 180.0, 3);
    let borders = road.borders();

    assert_eq!(borders.len(), 2);
    assert_eq!(borders[0].start.x, road.left);
    assert_eq!(borders[0].end.x, road.left);
    assert_eq!(borders[1].start.x, road.right);
    assert_eq!(borders[1].start.y, -ROAD_EXTENT);
    assert_eq!(borders[1].end.y, ROAD_EXTENT);
}

#[test]
fn test_lane_dividers() {
    let road = Road::new(100.0, 180.0, 3);
    let dividers = road.lane_dividers();

    assert_eq!(dividers.len(), 2);
    assert!((dividers[0] - 70.0).abs() < 1e-3);
    assert!((dividers[1] - 130.0).abs() < 1e-3);
}

#[test]
#[should_panic(expected = "at least one lane")]
fn test_road_without_lanes_panics() {
    let _ = Road::new(0.0, 100.0, 0);
}
