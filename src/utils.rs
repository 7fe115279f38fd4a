//! Utility functions and types used accross the library
use crate::{Point, Scalar};

/// Restrict value to a certain interval
#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Very basic random number generator
///
/// Deterministic so that generated strokes are reproducible in tests and benches.
#[derive(Debug, Default, Clone)]
pub struct Rnd {
    state: u32,
}

impl Rnd {
    /// Create new random number generator with seed `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new random number generator with provided `seed` value
    pub fn with_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(214_013).wrapping_add(2_531_011) & 0x7fffffff;
        self.state >> 16
    }

    /// Sample `u32` from uniform distributes
    pub fn uniform_u32(&mut self) -> u32 {
        ((self.step() & 0xffff) << 16) | (self.step() & 0xffff)
    }

    /// Sample `u64` from uniform distributes
    pub fn uniform_u64(&mut self) -> u64 {
        ((self.uniform_u32() as u64) << 32) | (self.uniform_u32() as u64)
    }

    /// Sample f64 from `Uniform([0, 1])`
    pub fn uniform(&mut self) -> Scalar {
        let bpr_recip: f64 = (2.0f64).powi(-53);
        (self.uniform_u64() >> 10) as f64 * bpr_recip
    }

    /// Generate random `Point(U([0, 1]), U([0, 1]))`
    pub fn point(&mut self) -> Point {
        Point::new(self.uniform(), self.uniform())
    }

    /// Random walk of `count` points starting at `start`, each step at most `step` long
    ///
    /// Resembles the samples produced by a pointer drag.
    pub fn walk(&mut self, start: Point, count: usize, step: Scalar) -> Vec<Point> {
        let mut points = Vec::with_capacity(count);
        let mut current = start;
        for _ in 0..count {
            points.push(current);
            let delta = self.point() - Point::new(0.5, 0.5);
            current = current + 2.0 * step * delta;
        }
        points
    }
}
