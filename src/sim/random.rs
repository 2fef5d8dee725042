//! Injectable randomness for spawn decisions

use rand::{Rng, RngCore};

/// Uniform source of values in `[0, 1)`
///
/// Every `rand` generator is a source; tests can script exact values.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, max)`
    fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Largest `f32` below 1.0
const UNIT_MAX: f32 = 1.0 - f32::EPSILON / 2.0;

/// Replays a fixed list of unit values, cycling when exhausted
///
/// Values are clamped into `[0, 1)`, so a scripted 1.0 comes back just under it.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, UNIT_MAX)
    }
}
