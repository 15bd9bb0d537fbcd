//! Car kinematics, collision outline and damage.
//!
//! Heading `0` points toward decreasing y ("up" on screen) and positive
//! angles turn to the left. Position integrates as
//! `x -= sin(angle) * speed`, `y -= cos(angle) * speed`.

use geo::{Coord, Line};
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::brain::Brain;
use super::controls::{ControlType, Controls};
use super::error::{Result, SimError};
use super::geometric_utils::{Polygon, polygons_intersect, segment_hits_polygon};
use super::params::{CONTROL_OUTPUTS, Params};
use super::sensor::Sensor;

/// Position, heading and speed of a car.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X-coordinate of the car's center.
    pub x: f32,
    /// Y-coordinate of the car's center.
    pub y: f32,
    /// Heading in radians.
    pub angle: f32,
    /// Signed speed; negative while reversing.
    pub speed: f32,
}

/// A simulated car.
///
/// Once damaged, a car stops moving until [`Car::reset`] is called. Its sensor
/// and brain keep being evaluated so the readings stay live.
#[derive(Debug, Clone)]
pub struct Car {
    /// Current pose.
    pub pose: Pose,
    /// Body width.
    pub width: f32,
    /// Body length along the heading.
    pub height: f32,
    /// Speed gained per tick while accelerating.
    pub acceleration: f32,
    /// Top forward speed; reverse is capped at half of it.
    pub max_speed: f32,
    /// Speed lost per tick.
    pub friction: f32,
    /// Heading change per tick while steering.
    pub turn_rate: f32,
    /// Who drives this car.
    pub control_type: ControlType,
    /// Intents applied on the next tick.
    pub controls: Controls,
    damaged: bool,
    sensor: Option<Sensor>,
    brain: Option<Brain>,
    polygon: Polygon,
    last_inputs: Option<Array1<f32>>,
}

impl Car {
    /// Creates a car. Keyboard and AI cars get a sensor and a random brain sized
    /// by [`Params::layer_sizes`]; dummy cars get neither.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Starting position
    /// * `control_type` - Who drives the car
    /// * `max_speed` - Top forward speed
    /// * `params` - Body, kinematic and sensor settings
    /// * `rng` - Source of the brain's initial weights
    pub fn new<R: Rng>(
        x: f32,
        y: f32,
        control_type: ControlType,
        max_speed: f32,
        params: &Params,
        rng: &mut R,
    ) -> Self {
        let mut car = Self::body(x, y, control_type, max_speed, params);
        if control_type != ControlType::Dummy {
            car.sensor = Some(Sensor::from_params(params));
            car.brain = Some(Brain::new(&params.layer_sizes(), rng));
        }
        car
    }

    /// Creates a dummy traffic car that always drives forward.
    pub fn traffic(x: f32, y: f32, max_speed: f32, params: &Params) -> Self {
        Self::body(x, y, ControlType::Dummy, max_speed, params)
    }

    fn body(x: f32, y: f32, control_type: ControlType, max_speed: f32, params: &Params) -> Self {
        let mut car = Self {
            pose: Pose {
                x,
                y,
                ..Pose::default()
            },
            width: params.car_width,
            height: params.car_height,
            acceleration: params.acceleration,
            max_speed,
            friction: params.friction,
            turn_rate: params.turn_rate,
            control_type,
            controls: Controls::new(control_type),
            damaged: false,
            sensor: None,
            brain: None,
            polygon: Vec::new(),
            last_inputs: None,
        };
        car.polygon = car.create_polygon();
        car
    }

    /// Whether the car has crashed.
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Four-corner collision outline for the current pose.
    pub fn polygon(&self) -> &[Coord<f32>] {
        &self.polygon
    }

    /// The car's sensor, if it has one.
    pub fn sensor(&self) -> Option<&Sensor> {
        self.sensor.as_ref()
    }

    /// The car's brain, if it has one.
    pub fn brain(&self) -> Option<&Brain> {
        self.brain.as_ref()
    }

    /// Brain inputs computed on the last update.
    pub fn last_inputs(&self) -> Option<&Array1<f32>> {
        self.last_inputs.as_ref()
    }

    /// Replaces the brain. It must accept one input per sensor ray and produce four outputs.
    pub fn set_brain(&mut self, brain: Brain) -> Result<()> {
        let Some(sensor) = &self.sensor else {
            return Err(SimError::topology("car has no sensor to feed a brain"));
        };
        if brain.input_count() != sensor.ray_count || brain.output_count() != CONTROL_OUTPUTS {
            tracing::warn!(
                layers = ?brain.layer_sizes(),
                rays = sensor.ray_count,
                "brain does not fit this car"
            );
            return Err(SimError::topology(format!(
                "brain {:?} does not fit {} rays and {} controls",
                brain.layer_sizes(),
                sensor.ray_count,
                CONTROL_OUTPUTS
            )));
        }
        self.brain = Some(brain);
        Ok(())
    }

    /// Mutable access to the brain, for mutation by the caller.
    pub fn brain_mut(&mut self) -> Option<&mut Brain> {
        self.brain.as_mut()
    }

    /// Puts the car back on the road, undamaged and at rest.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.pose = Pose {
            x,
            y,
            ..Pose::default()
        };
        self.damaged = false;
        self.controls = Controls::new(self.control_type);
        self.polygon = self.create_polygon();
    }

    /// Advances the car by one tick.
    ///
    /// Moves the car (unless damaged), rebuilds its outline, checks it against
    /// the road borders and `traffic`, then runs the sensor and brain. AI cars
    /// take their next controls from the brain output.
    ///
    /// # Arguments
    ///
    /// * `road_borders` - Border segments of the road
    /// * `traffic` - Outlines of every other active car this car can hit or see
    pub fn update(&mut self, road_borders: &[Line<f32>], traffic: &[Polygon]) {
        self.update_among(road_borders, traffic.iter().map(Vec::as_slice));
    }

    /// Same as [`Car::update`], for outlines that are not stored contiguously.
    pub(crate) fn update_among<'a, I>(&mut self, road_borders: &[Line<f32>], traffic: I)
    where
        I: Iterator<Item = &'a [Coord<f32>]> + Clone,
    {
        if !self.damaged {
            self.move_car();
            self.polygon = self.create_polygon();
            self.damaged = self.assess_damage(road_borders, traffic.clone());
            if self.damaged {
                tracing::debug!(x = self.pose.x, y = self.pose.y, "car damaged");
            }
        }

        if let Some(sensor) = &mut self.sensor {
            sensor.scan(&self.pose, road_borders, traffic);
            let inputs = sensor.activations();
            if let Some(brain) = &self.brain {
                let outputs = brain.feed_forward(&inputs);
                if self.control_type == ControlType::Ai {
                    self.controls = Controls::from_outputs(&outputs);
                }
            }
            self.last_inputs = Some(inputs);
        }
    }

    fn move_car(&mut self) {
        let pose = &mut self.pose;

        if self.controls.forward {
            pose.speed += self.acceleration;
        }
        if self.controls.reverse {
            pose.speed -= self.acceleration;
        }
        pose.speed = pose.speed.clamp(-self.max_speed / 2.0, self.max_speed);

        if pose.speed > 0.0 {
            pose.speed -= self.friction;
        } else if pose.speed < 0.0 {
            pose.speed += self.friction;
        }
        if pose.speed.abs() < self.friction {
            pose.speed = 0.0;
        }

        if pose.speed != 0.0 {
            // steering inverts while reversing
            let flip = if pose.speed > 0.0 { 1.0 } else { -1.0 };
            if self.controls.left {
                pose.angle += self.turn_rate * flip;
            }
            if self.controls.right {
                pose.angle -= self.turn_rate * flip;
            }
        }

        pose.x -= pose.angle.sin() * pose.speed;
        pose.y -= pose.angle.cos() * pose.speed;
    }

    fn create_polygon(&self) -> Polygon {
        let radius = self.width.hypot(self.height) / 2.0;
        let alpha = self.width.atan2(self.height);
        let Pose { x, y, angle, .. } = self.pose;

        [
            angle - alpha,
            angle + alpha,
            std::f32::consts::PI + angle - alpha,
            std::f32::consts::PI + angle + alpha,
        ]
        .iter()
        .map(|corner| Coord {
            x: x - corner.sin() * radius,
            y: y - corner.cos() * radius,
        })
        .collect()
    }

    fn assess_damage<'a>(
        &self,
        road_borders: &[Line<f32>],
        mut traffic: impl Iterator<Item = &'a [Coord<f32>]>,
    ) -> bool {
        road_borders
            .iter()
            .any(|border| segment_hits_polygon(border, &self.polygon))
            || traffic.any(|other| polygons_intersect(&self.polygon, other))
    }
}
