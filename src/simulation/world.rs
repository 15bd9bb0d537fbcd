//! The road plus every car on it, advanced one tick at a time.
//!
//! A tick first moves all traffic, each traffic car checking for collisions
//! against the other traffic cars' outlines from the previous tick. Then every
//! controlled car moves against the freshly updated traffic. Controlled cars
//! never see or hit each other, and damaged traffic is out of play for both
//! collisions and sensing.

use rand::Rng;

use super::car::Car;
use super::controls::{ControlType, Controls};
use super::evolution;
use super::geometric_utils::Polygon;
use super::params::Params;
use super::road::Road;

/// Starting lane and y-coordinate of the traffic placed on a fresh road.
const INITIAL_TRAFFIC: [(usize, f32); 7] = [
    (1, -100.0),
    (0, -300.0),
    (2, -300.0),
    (0, -500.0),
    (1, -500.0),
    (1, -700.0),
    (2, -700.0),
];

/// Y-coordinate where controlled cars start.
const START_Y: f32 = 100.0;

/// Complete simulation state.
#[derive(Debug, Clone)]
pub struct World {
    /// The road all cars drive on.
    pub road: Road,
    /// Dummy traffic cars.
    pub traffic: Vec<Car>,
    /// Controlled cars (AI population or a single keyboard car).
    pub cars: Vec<Car>,
    /// Number of ticks simulated so far.
    pub tick: u64,
}

impl World {
    /// Creates a road with the initial traffic layout and controlled cars in the middle lane.
    ///
    /// # Arguments
    ///
    /// * `params` - Simulation parameters
    /// * `control_type` - `Ai` for a population of `n_cars`, `Keys` for one keyboard car
    /// * `rng` - Source of the brains' initial weights
    pub fn new<R: Rng>(params: &Params, control_type: ControlType, rng: &mut R) -> Self {
        let mut world = Self::empty(Road::new(params.road_x, params.road_width, params.lane_count));

        let n_cars = match control_type {
            ControlType::Ai => params.n_cars,
            ControlType::Keys | ControlType::Dummy => 1,
        };
        let start_x = world.road.lane_center(1);
        for _ in 0..n_cars {
            let car = Car::new(start_x, START_Y, control_type, params.max_speed, params, rng);
            world.cars.push(car);
        }

        for (lane, y) in INITIAL_TRAFFIC {
            world.spawn_traffic(lane, y, params.traffic_max_speed, params);
        }

        world
    }

    /// Creates a world with no cars on `road`.
    pub fn empty(road: Road) -> Self {
        Self {
            road,
            traffic: Vec::new(),
            cars: Vec::new(),
            tick: 0,
        }
    }

    /// Adds a dummy traffic car at the center of `lane`. Returns its index.
    pub fn spawn_traffic(&mut self, lane: usize, y: f32, max_speed: f32, params: &Params) -> usize {
        let x = self.road.lane_center(lane);
        self.traffic.push(Car::traffic(x, y, max_speed, params));
        tracing::debug!(lane, y, "spawned traffic");
        self.traffic.len() - 1
    }

    /// Spawns a traffic car in a random lane `traffic_spawn_distance` ahead of
    /// the best car, unless `max_traffic` cars already exist.
    ///
    /// # Returns
    ///
    /// Index of the new traffic car, if one was spawned.
    pub fn spawn_ahead<R: Rng>(&mut self, params: &Params, rng: &mut R) -> Option<usize> {
        if self.traffic.len() >= params.max_traffic {
            return None;
        }
        let lead_y = self.best_car().map_or(START_Y, |car| car.pose.y);
        let lane = rng.random_range(0..self.road.lane_count);
        Some(self.spawn_traffic(
            lane,
            lead_y - params.traffic_spawn_distance,
            params.traffic_max_speed,
            params,
        ))
    }

    /// Drops traffic more than `distance` behind the best car.
    pub fn cull_traffic(&mut self, distance: f32) {
        let Some(lead_y) = self.best_car().map(|car| car.pose.y) else {
            return;
        };
        self.traffic.retain(|car| car.pose.y <= lead_y + distance);
    }

    /// Sets the intents of every keyboard-driven car.
    pub fn set_player_controls(&mut self, controls: Controls) {
        for car in &mut self.cars {
            if car.control_type == ControlType::Keys {
                car.controls = controls;
            }
        }
    }

    /// The car furthest along the road.
    pub fn best_car(&self) -> Option<&Car> {
        evolution::best_car_index(&self.cars).map(|i| &self.cars[i])
    }

    /// Outlines of the traffic cars that are still active.
    pub fn active_traffic_polygons(&self) -> Vec<Polygon> {
        self.traffic
            .iter()
            .filter(|car| !car.is_damaged())
            .map(|car| car.polygon().to_vec())
            .collect()
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        let previous: Vec<Option<Polygon>> = self
            .traffic
            .iter()
            .map(|car| (!car.is_damaged()).then(|| car.polygon().to_vec()))
            .collect();
        for (i, car) in self.traffic.iter_mut().enumerate() {
            let others = previous
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(_, outline)| outline.as_deref());
            car.update_among(self.road.borders(), others);
        }

        let traffic = self.active_traffic_polygons();
        for car in &mut self.cars {
            car.update(self.road.borders(), &traffic);
        }

        self.tick += 1;
    }
}
