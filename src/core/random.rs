//! Core domain: the single injectable source of randomness for behaviors.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[min, max)`. Returns `min` for an empty range.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Rolls a probability tuned for a single 60 Hz frame over `frames`
    /// elapsed frames, so the expected frequency does not depend on the
    /// tick rate.
    fn chance_per_frame(&mut self, per_frame: f32, frames: f32) -> bool {
        let per_frame = per_frame.clamp(0.0, 1.0);
        let probability = 1.0 - (1.0 - per_frame).powf(frames.max(0.0));
        self.chance(probability)
    }

    /// `-1.0` or `1.0` with equal probability.
    fn sign(&mut self) -> f32 {
        if self.next_f32() < 0.5 { -1.0 } else { 1.0 }
    }
}

/// Seeded ChaCha stream used by the running game.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 0.999_999)
    }
}
