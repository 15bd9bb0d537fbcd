//! Feed-forward car brain built from threshold levels.
//!
//! There is no gradient training. A brain improves only by being copied from a
//! well-performing car and mutated (see [`Brain::mutate`]).

use std::path::Path;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{Result, SimError};

pub mod level;

pub use level::Level;

/// Layered network of binary threshold units.
///
/// The levels always chain: the output count of each level equals the input
/// count of the next. This is checked on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBrain")]
pub struct Brain {
    levels: Vec<Level>,
}

#[derive(Deserialize)]
struct RawBrain {
    levels: Vec<Level>,
}

impl TryFrom<RawBrain> for Brain {
    type Error = SimError;

    fn try_from(raw: RawBrain) -> Result<Self> {
        Brain::from_levels(raw.levels)
    }
}

impl Brain {
    /// Creates a new brain with random weights, one level per consecutive pair of sizes.
    ///
    /// # Arguments
    ///
    /// * `layer_sizes` - Neuron counts from input to output, e.g. `[5, 6, 4]`
    /// * `rng` - Source of the initial weights
    pub fn new<R: Rng>(layer_sizes: &[usize], rng: &mut R) -> Self {
        assert!(
            layer_sizes.len() >= 2,
            "a brain needs at least an input and an output layer, got {:?}",
            layer_sizes
        );
        assert!(
            layer_sizes.iter().all(|&size| size > 0),
            "layer sizes must be non-zero, got {:?}",
            layer_sizes
        );

        let levels = layer_sizes
            .windows(2)
            .map(|pair| Level::new_random(pair[0], pair[1], rng))
            .collect();

        Self { levels }
    }

    /// Assembles a brain from existing levels, checking that they chain.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self> {
        if levels.is_empty() {
            return Err(SimError::topology("a brain needs at least one level"));
        }

        for (i, level) in levels.iter().enumerate() {
            if level.biases.len() != level.output_count() {
                return Err(SimError::topology(format!(
                    "level {} has {} biases for {} outputs",
                    i,
                    level.biases.len(),
                    level.output_count()
                )));
            }
            if level.input_count() == 0 || level.output_count() == 0 {
                return Err(SimError::topology(format!("level {} is empty", i)));
            }
        }

        for (i, pair) in levels.windows(2).enumerate() {
            if pair[0].output_count() != pair[1].input_count() {
                return Err(SimError::topology(format!(
                    "level {} outputs {} values but level {} expects {}",
                    i,
                    pair[0].output_count(),
                    i + 1,
                    pair[1].input_count()
                )));
            }
        }

        Ok(Self { levels })
    }

    /// Ordered levels from input to output.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Neuron counts from input to output, e.g. `[5, 6, 4]`.
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_count())
            .chain(self.levels.iter().map(Level::output_count))
            .collect()
    }

    /// Length of the input vector the brain accepts.
    pub fn input_count(&self) -> usize {
        self.levels[0].input_count()
    }

    /// Length of the output vector the brain produces.
    pub fn output_count(&self) -> usize {
        self.levels[self.levels.len() - 1].output_count()
    }

    /// Runs a forward pass through every level.
    ///
    /// Every output is exactly `0.0` or `1.0`.
    #[inline]
    pub fn feed_forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self.check_inputs(inputs);
        self.levels
            .iter()
            .fold(inputs.clone(), |signal, level| level.forward(&signal))
    }

    /// Activations at every layer, the input vector first and the output last.
    ///
    /// Used to draw the live state of the network.
    pub fn activations(&self, inputs: &Array1<f32>) -> Vec<Array1<f32>> {
        self.check_inputs(inputs);
        let mut layers = Vec::with_capacity(self.levels.len() + 1);
        layers.push(inputs.clone());
        for level in &self.levels {
            let next = level.forward(&layers[layers.len() - 1]);
            layers.push(next);
        }
        layers
    }

    /// Mutates all levels by blending every parameter toward a random value.
    ///
    /// # Arguments
    ///
    /// * `amount` - Blend factor in `[0, 1]`; `0` is a no-op, `1` fully re-randomizes
    /// * `rng` - Source of the random targets
    pub fn mutate<R: Rng>(&mut self, amount: f32, rng: &mut R) {
        for level in &mut self.levels {
            level.mutate(amount, rng);
        }
    }

    /// Serializes the brain to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a brain from a JSON string, validating its topology.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Saves the brain to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            layers = ?self.layer_sizes(),
            "saved brain"
        );
        Ok(())
    }

    /// Loads a brain from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let brain = Self::from_json(&json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            layers = ?brain.layer_sizes(),
            "loaded brain"
        );
        Ok(brain)
    }

    fn check_inputs(&self, inputs: &Array1<f32>) {
        assert_eq!(
            inputs.len(),
            self.input_count(),
            "brain expects {} inputs",
            self.input_count()
        );
    }
}
