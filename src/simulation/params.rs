//! Simulation parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, SimError};

/// Number of control intents a car brain must produce: forward, left, right, reverse.
pub const CONTROL_OUTPUTS: usize = 4;

/// Simulation parameters that control road, car, sensor and population behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Car body width.
    pub car_width: f32,
    /// Car body length along the heading.
    pub car_height: f32,
    /// Speed gained per tick while accelerating.
    pub acceleration: f32,
    /// Speed lost per tick to friction.
    pub friction: f32,
    /// Heading change per tick while steering (radians).
    pub turn_rate: f32,
    /// Top speed of AI and keyboard cars.
    pub max_speed: f32,
    /// Top speed of traffic cars.
    pub traffic_max_speed: f32,
    /// Number of sensor rays per car.
    pub ray_count: usize,
    /// Length of each sensor ray.
    pub ray_length: f32,
    /// Angle covered by the ray fan (radians).
    pub ray_spread: f32,
    /// Hidden layer sizes of the car brain.
    pub hidden_layers: Vec<usize>,
    /// Road center x-coordinate.
    pub road_x: f32,
    /// Road width.
    pub road_width: f32,
    /// Number of lanes.
    pub lane_count: usize,
    /// Number of AI cars per generation.
    pub n_cars: usize,
    /// Blend factor used when mutating the stored best brain.
    pub mutation_amount: f32,
    /// Maximum number of traffic cars alive at once.
    pub max_traffic: usize,
    /// Ticks between traffic spawns.
    pub traffic_spawn_interval: u32,
    /// How far ahead of the best car new traffic appears.
    pub traffic_spawn_distance: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            car_width: 30.0,
            car_height: 50.0,
            acceleration: 0.2,
            friction: 0.05,
            turn_rate: 0.03,
            max_speed: 3.0,
            traffic_max_speed: 2.0,
            ray_count: 5,
            ray_length: 150.0,
            ray_spread: std::f32::consts::FRAC_PI_2,
            hidden_layers: vec![6],
            road_x: 100.0,
            road_width: 180.0,
            lane_count: 3,
            n_cars: 100,
            mutation_amount: 0.1,
            max_traffic: 6,
            traffic_spawn_interval: 60,
            traffic_spawn_distance: 700.0,
        }
    }
}

impl Params {
    /// Network topology for a car brain: `[ray_count, hidden..., 4]`.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.ray_count);
        sizes.extend(self.hidden_layers.iter().copied());
        sizes.push(CONTROL_OUTPUTS);
        sizes
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), "saved params");
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields take their default.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        tracing::info!(path = %path.as_ref().display(), "loaded params");
        Ok(params)
    }

    /// Checks that the parameters describe a road, cars and brains that can be simulated.
    ///
    /// # Returns
    ///
    /// `Ok(())` when every value is usable, otherwise a [`SimError::Validation`]
    /// describing the first failure.
    pub fn validate(&self) -> Result<()> {
        ensure(self.lane_count > 0, "Lane count must be positive")?;
        ensure(self.ray_count > 0, "Ray count must be positive")?;
        ensure(
            self.hidden_layers.iter().all(|&size| size > 0),
            "Hidden layer sizes must be positive",
        )?;
        ensure(
            is_non_negative(self.max_speed),
            "Max speed must be finite and non-negative",
        )?;
        ensure(
            is_non_negative(self.traffic_max_speed),
            "Traffic max speed must be finite and non-negative",
        )?;
        ensure(
            is_non_negative(self.friction),
            "Friction must be finite and non-negative",
        )?;
        ensure(
            is_non_negative(self.acceleration),
            "Acceleration must be finite and non-negative",
        )?;
        ensure(self.turn_rate.is_finite(), "Turn rate must be finite")?;
        ensure(
            self.car_width > 0.0 && self.car_height > 0.0,
            "Car size must be positive",
        )?;
        ensure(
            is_non_negative(self.ray_length) && is_non_negative(self.ray_spread),
            "Ray length and spread must be finite and non-negative",
        )?;
        ensure(
            self.road_x.is_finite() && self.road_width > 0.0 && self.road_width.is_finite(),
            "Road must have a finite position and positive width",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.mutation_amount),
            "Mutation amount must be in [0.0, 1.0]",
        )?;
        ensure(
            is_non_negative(self.traffic_spawn_distance),
            "Traffic spawn distance must be finite and non-negative",
        )
    }
}

fn ensure(condition: bool, msg: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SimError::validation(msg))
    }
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}
