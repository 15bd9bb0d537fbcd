#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f32::consts::FRAC_PI_2;

use geo::coord;
use selfdrive::simulation::car::Pose;
use selfdrive::simulation::params::Params;
use selfdrive::simulation::road::Road;
use selfdrive::simulation::sensor::Sensor;

fn pose(x: f32, y: f32, angle: f32) -> Pose {
    Pose {
        x,
        y,
        angle,
        speed: 0.0,
    }
}

/// Square outline centred on (`x`, `y`).
fn block(x: f32, y: f32, half: f32) -> Vec<geo::Coord<f32>> {
    vec![
        coord! { x: x - half, y: y - half },
        coord! { x: x + half, y: y - half },
        coord! { x: x + half, y: y + half },
        coord! { x: x - half, y: y + half },
    ]
}

#[test]
fn test_sensor_from_params() {
    let params = Params::default();
    let sensor = Sensor::from_params(&params);

    assert_eq!(sensor.ray_count, 5);
    assert_eq!(sensor.ray_length, 150.0);
    assert_eq!(sensor.ray_spread, FRAC_PI_2);
    assert!(sensor.rays().is_empty());
    assert!(sensor.readings().is_empty());
}

#[test]
fn test_single_ray_points_along_heading() {
    for angle in [0.0_f32, 0.3, -1.2] {
        let mut sensor = Sensor::new(1, 150.0, FRAC_PI_2);
        sensor.update(&pose(10.0, 20.0, angle), &[], &[]);

        assert_eq!(sensor.rays().len(), 1);
        let ray = sensor.rays()[0];
        assert_eq!(ray.start, coord! { x: 10.0, y: 20.0 });
        assert!((ray.end.x - (10.0 - angle.sin() * 150.0)).abs() < 1e-3);
        assert!((ray.end.y - (20.0 - angle.cos() * 150.0)).abs() < 1e-3);
    }
}

#[test]
fn test_ray_fan_runs_left_to_right() {
    let mut sensor = Sensor::new(5, 100.0, FRAC_PI_2);
    sensor.update(&pose(0.0, 0.0, 0.0), &[], &[]);

    let rays = sensor.rays();
    assert_eq!(rays.len(), 5);

    // Leftmost ray at +45 degrees, middle ray straight ahead, rightmost at -45
    let diagonal = 100.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!((rays[0].end.x + diagonal).abs() < 1e-3);
    assert!((rays[0].end.y + diagonal).abs() < 1e-3);
    assert!(rays[2].end.x.abs() < 1e-3);
    assert!((rays[2].end.y + 100.0).abs() < 1e-3);
    assert!((rays[4].end.x - diagonal).abs() < 1e-3);

    for pair in rays.windows(2) {
        assert!(pair[0].end.x < pair[1].end.x);
    }
}

#[test]
fn test_nothing_in_range_reads_none() {
    let road = Road::new(100.0, 180.0, 3);
    let mut sensor = Sensor::new(5, 150.0, FRAC_PI_2);

    // Far outside the road, facing away from everything
    sensor.update(&pose(1000.0, 0.0, 0.0), road.borders(), &[block(1000.0, 500.0, 10.0)]);

    assert_eq!(sensor.readings().len(), 5);
    assert!(sensor.readings().iter().all(Option::is_none));
    assert!(sensor.activations().iter().all(|&v| v == 0.0));
}

#[test]
fn test_border_reading() {
    let road = Road::new(100.0, 180.0, 3);
    let mut sensor = Sensor::new(5, 150.0, FRAC_PI_2);
    sensor.update(&pose(100.0, 0.0, 0.0), road.borders(), &[]);

    let readings = sensor.readings();
    // The straight-ahead ray runs parallel to the borders
    assert!(readings[2].is_none());

    // The leftmost ray reaches the left border at x = 10, 90 units across
    let touch = readings[0].expect("left border in range");
    let expected_offset = 90.0 / (150.0 * std::f32::consts::FRAC_1_SQRT_2);
    assert!((touch.point.x - 10.0).abs() < 1e-3);
    assert!((touch.offset - expected_offset).abs() < 1e-4);
    assert!((sensor.activations()[0] - (1.0 - expected_offset)).abs() < 1e-4);

    assert!(readings[4].is_some());
}

#[test]
fn test_nearest_edge_wins() {
    let mut sensor = Sensor::new(5, 150.0, FRAC_PI_2);
    let traffic = vec![block(100.0, -50.0, 10.0), block(100.0, -120.0, 10.0)];
    sensor.update(&pose(100.0, 0.0, 0.0), &[], &traffic);

    let touch = sensor.readings()[2].expect("car ahead");
    assert!((touch.point.y + 40.0).abs() < 1e-3);
    assert!((touch.offset - 40.0 / 150.0).abs() < 1e-5);
    assert!((sensor.activations()[2] - (1.0 - 40.0 / 150.0)).abs() < 1e-5);
}

#[test]
fn test_readings_follow_pose() {
    let mut sensor = Sensor::new(3, 150.0, FRAC_PI_2);
    let traffic = vec![block(100.0, -50.0, 10.0)];

    sensor.update(&pose(100.0, 0.0, 0.0), &[], &traffic);
    assert!(sensor.readings()[1].is_some());

    // Moving past the block clears the reading
    sensor.update(&pose(100.0, -200.0, 0.0), &[], &traffic);
    assert!(sensor.readings().iter().all(Option::is_none));
}

#[test]
#[should_panic(expected = "at least one ray")]
fn test_zero_rays_panics() {
    let _ = Sensor::new(0, 150.0, FRAC_PI_2);
}
