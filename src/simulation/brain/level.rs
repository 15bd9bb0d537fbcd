//! A single layer of binary threshold units.

use ndarray::{Array1, Array2, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::super::geometric_utils::lerp;

/// One fully connected layer of a car brain.
///
/// Unit `j` fires (outputs `1.0`) when `Σ_i input[i] * weights[[i, j]]` is
/// strictly greater than `biases[j]`, and outputs `0.0` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Weight matrix (`input_count` × `output_count`), values in `[-1, 1]`.
    pub weights: Array2<f32>,
    /// Threshold per output unit, values in `[-1, 1]`.
    pub biases: Array1<f32>,
}

impl Level {
    /// Creates a new level with weights and biases drawn uniformly from `[-1, 1]`.
    pub fn new_random<R: Rng>(input_count: usize, output_count: usize, rng: &mut R) -> Self {
        let weights = Array2::from_shape_fn((input_count, output_count), |_| {
            rng.random_range(-1.0..=1.0)
        });
        let biases = Array1::from_shape_fn(output_count, |_| rng.random_range(-1.0..=1.0));
        Self { weights, biases }
    }

    /// Number of inputs this level accepts.
    pub fn input_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of units in this level.
    pub fn output_count(&self) -> usize {
        self.weights.ncols()
    }

    /// Performs a forward pass with a hard threshold.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let sums = inputs.dot(&self.weights);
        Zip::from(&sums)
            .and(&self.biases)
            .map_collect(|&sum, &bias| if sum > bias { 1.0 } else { 0.0 })
    }

    /// Blends every weight and bias toward a fresh uniform sample in `[-1, 1]`.
    ///
    /// `amount = 0` keeps the level as is, `amount = 1` replaces it.
    pub fn mutate<R: Rng>(&mut self, amount: f32, rng: &mut R) {
        self.biases
            .mapv_inplace(|bias| lerp(bias, rng.random_range(-1.0..=1.0), amount));
        self.weights
            .mapv_inplace(|weight| lerp(weight, rng.random_range(-1.0..=1.0), amount));
    }
}
