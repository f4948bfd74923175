use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Source of uniform samples in `[0, 1)` used for lazy mine placement.
///
/// Every [`rand::Rng`] is a source, so a seeded generator gives reproducible games. Tests can use
/// [`ScriptedSource`] to decide each placement explicitly.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: rand::Rng + ?Sized> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed sequence of samples, then repeats `fallback` forever.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    script: VecDeque<f64>,
    fallback: f64,
    draws: usize,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
            draws: 0,
        }
    }

    /// Every sample is `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(Vec::new(), value)
    }

    /// Samples that can never be below any density, so no mine is ever placed.
    pub fn never() -> Self {
        Self::constant(1.0)
    }

    /// Samples below every non-zero density, so every eligible cell becomes a mine.
    pub fn always() -> Self {
        Self::constant(0.0)
    }

    /// How many samples have been taken so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        self.draws += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
