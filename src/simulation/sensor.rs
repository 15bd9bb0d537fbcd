//! Ray-casting distance sensor.
//!
//! A fan of rays is cast from the car's position. Each ray reports the nearest
//! point where it crosses a road border or another car's outline.

use geo::{Coord, Line};
use ndarray::Array1;

use super::car::Pose;
use super::geometric_utils::{Polygon, Touch, lerp, line_intersection, polygon_edges};
use super::params::Params;

/// Distance sensor mounted on a single car.
#[derive(Debug, Clone)]
pub struct Sensor {
    /// Number of rays in the fan.
    pub ray_count: usize,
    /// Length of each ray.
    pub ray_length: f32,
    /// Angle covered by the fan, centred on the heading (radians).
    pub ray_spread: f32,
    rays: Vec<Line<f32>>,
    readings: Vec<Option<Touch>>,
}

impl Sensor {
    /// Creates a sensor with no rays cast yet.
    pub fn new(ray_count: usize, ray_length: f32, ray_spread: f32) -> Self {
        assert!(ray_count > 0, "a sensor needs at least one ray");
        Self {
            ray_count,
            ray_length,
            ray_spread,
            rays: Vec::with_capacity(ray_count),
            readings: Vec::with_capacity(ray_count),
        }
    }

    /// Creates a sensor from the ray settings in `params`.
    pub fn from_params(params: &Params) -> Self {
        Self::new(params.ray_count, params.ray_length, params.ray_spread)
    }

    /// Recasts the rays from `pose` and takes one reading per ray.
    ///
    /// # Arguments
    ///
    /// * `pose` - Pose of the car carrying the sensor
    /// * `road_borders` - Border segments of the road
    /// * `traffic` - Outlines of every other car the sensor can see
    pub fn update(&mut self, pose: &Pose, road_borders: &[Line<f32>], traffic: &[Polygon]) {
        self.scan(pose, road_borders, traffic.iter().map(Vec::as_slice));
    }

    /// Same as [`Sensor::update`], for outlines that are not stored contiguously.
    pub(crate) fn scan<'a, I>(&mut self, pose: &Pose, road_borders: &[Line<f32>], traffic: I)
    where
        I: Iterator<Item = &'a [Coord<f32>]> + Clone,
    {
        self.cast_rays(pose);
        self.readings = self
            .rays
            .iter()
            .map(|ray| nearest_touch(ray, road_borders, traffic.clone()))
            .collect();
    }

    /// Rays from the last update, leftmost first.
    pub fn rays(&self) -> &[Line<f32>] {
        &self.rays
    }

    /// One reading per ray, in the same order as [`Sensor::rays`]. `None` means nothing in range.
    pub fn readings(&self) -> &[Option<Touch>] {
        &self.readings
    }

    /// Brain inputs derived from the readings: `1 - offset` per hit, `0` when nothing is seen.
    pub fn activations(&self) -> Array1<f32> {
        let mut inputs = Array1::zeros(self.ray_count);
        for (input, reading) in inputs.iter_mut().zip(&self.readings) {
            if let Some(touch) = reading {
                *input = 1.0 - touch.offset;
            }
        }
        inputs
    }

    fn cast_rays(&mut self, pose: &Pose) {
        self.rays.clear();
        for i in 0..self.ray_count {
            let t = if self.ray_count == 1 {
                0.5
            } else {
                i as f32 / (self.ray_count - 1) as f32
            };
            let angle = lerp(self.ray_spread / 2.0, -self.ray_spread / 2.0, t) + pose.angle;

            let start = Coord { x: pose.x, y: pose.y };
            let end = Coord {
                x: pose.x - angle.sin() * self.ray_length,
                y: pose.y - angle.cos() * self.ray_length,
            };
            self.rays.push(Line::new(start, end));
        }
    }
}

/// Closest hit along `ray`; on equal offsets the first one found wins.
fn nearest_touch<'a>(
    ray: &Line<f32>,
    road_borders: &[Line<f32>],
    traffic: impl Iterator<Item = &'a [Coord<f32>]>,
) -> Option<Touch> {
    let border_touches = road_borders
        .iter()
        .filter_map(|border| line_intersection(ray, border));
    let traffic_touches = traffic
        .flat_map(polygon_edges)
        .filter_map(|edge| line_intersection(ray, &edge));

    border_touches
        .chain(traffic_touches)
        .min_by(|a, b| a.offset.total_cmp(&b.offset))
}
