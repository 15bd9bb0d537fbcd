//! Control intents and who supplies them.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Who drives a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlType {
    /// Driven by an external input source (keyboard).
    Keys,
    /// Driven by its own brain.
    Ai,
    /// Traffic: always accelerating forward, no sensor or brain.
    Dummy,
}

/// The four independent driving intents applied on each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    /// Accelerate forward.
    pub forward: bool,
    /// Steer left.
    pub left: bool,
    /// Steer right.
    pub right: bool,
    /// Accelerate in reverse.
    pub reverse: bool,
}

impl Controls {
    /// Initial intents for a control type. Dummy cars start (and stay) on the throttle.
    pub fn new(control_type: ControlType) -> Self {
        Self {
            forward: control_type == ControlType::Dummy,
            ..Self::default()
        }
    }

    /// Reads intents from a brain output vector laid out as `[forward, left, right, reverse]`.
    ///
    /// A unit counts as on when its output exceeds `0.5`.
    pub fn from_outputs(outputs: &Array1<f32>) -> Self {
        let on = |i: usize| outputs.get(i).is_some_and(|&value| value > 0.5);
        Self {
            forward: on(0),
            left: on(1),
            right: on(2),
            reverse: on(3),
        }
    }
}
