//! # Selfdrive - Neural Cars on a Multi-Lane Road
//!
//! Cars drive along a straight road, steered either by the keyboard or by a
//! small feed-forward network fed from a ray-casting distance sensor. A car
//! that touches a road border or another car is damaged and stops.
//!
//! ## Features
//!
//! - Ray-casting sensor against road borders and traffic outlines
//! - Threshold-unit neural network with mutation-based learning
//! - Kinematic car model with friction, reverse and steering
//! - Segment and polygon intersection tests for collisions
//! - JSON persistence for the best brain and the parameters
//!
//! ## Core Modules
//!
//! - [`simulation::geometric_utils`] - Intersection primitives
//! - [`simulation::road`] - Lane geometry and borders
//! - [`simulation::sensor`] - Ray casting and readings
//! - [`simulation::brain`] - Neural network and mutation
//! - [`simulation::car`] - Car dynamics and damage
//! - [`simulation::world`] - Per-tick update ordering

/// Core simulation logic and data structures.
pub mod simulation {
    /// Neural network controlling AI cars.
    pub mod brain;
    /// Car kinematics, outline and damage.
    pub mod car;
    /// Control intents and control types.
    pub mod controls;
    /// Error types for I/O and topology validation.
    pub mod error;
    /// Best-car selection and generation seeding.
    pub mod evolution;
    /// Segment and polygon intersection primitives.
    pub mod geometric_utils;
    /// Simulation parameters.
    pub mod params;
    /// Road and lane geometry.
    pub mod road;
    /// Ray-casting distance sensor.
    pub mod sensor;
    /// Simulation state and tick ordering.
    pub mod world;
}
