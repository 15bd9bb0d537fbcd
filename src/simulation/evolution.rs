//! Selection and mutation across a population of AI cars.

use rand::Rng;

use super::brain::Brain;
use super::car::Car;
use super::controls::ControlType;
use super::error::Result;

/// Index of the car furthest along the road (smallest y). Ties go to the lowest index.
pub fn best_car_index(cars: &[Car]) -> Option<usize> {
    cars.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.pose.y.total_cmp(&b.pose.y))
        .map(|(i, _)| i)
}

/// Starts a new generation from a stored brain.
///
/// Every AI car gets a copy of `best`. All copies except the first are then
/// mutated by `amount`, so the best brain so far is always kept unchanged.
///
/// # Arguments
///
/// * `cars` - The population to seed
/// * `best` - Brain to copy
/// * `amount` - Mutation blend factor in `[0, 1]`
/// * `rng` - Source of the mutation noise
pub fn seed_generation<R: Rng>(
    cars: &mut [Car],
    best: &Brain,
    amount: f32,
    rng: &mut R,
) -> Result<()> {
    let mut ai_cars = cars
        .iter_mut()
        .filter(|car| car.control_type == ControlType::Ai);

    if let Some(first) = ai_cars.next() {
        first.set_brain(best.clone())?;
    }
    for car in ai_cars {
        let mut brain = best.clone();
        brain.mutate(amount, rng);
        car.set_brain(brain)?;
    }

    tracing::info!(amount, "seeded generation from stored brain");
    Ok(())
}
