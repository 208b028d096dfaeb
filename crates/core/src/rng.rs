//! RNG module - uniform random shape selection
//!
//! Shapes are drawn independently and uniformly from the seven identities
//! (no bag). The generator is a small LCG so that a seed fully determines a
//! session's piece sequence, which keeps tests and benches reproducible.

use crate::types::Shape;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Source of upcoming shapes for the engine
pub trait ShapeSource {
    /// Produce the next shape
    fn next_shape(&mut self) -> Shape;
}

/// Uniform random shapes from a seeded [`SimpleRng`]
#[derive(Debug, Clone)]
pub struct UniformShapes {
    rng: SimpleRng,
    seed: u32,
}

impl UniformShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for UniformShapes {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for UniformShapes {
    fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.rng.next_range(Shape::ALL.len() as u32) as usize]
    }
}

/// Fixed shape sequence, repeated once exhausted.
///
/// Useful for deterministic tests and benchmarks.
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    shapes: Vec<Shape>,
    index: usize,
}

impl ScriptedShapes {
    /// Panics if `shapes` is empty
    pub fn new(shapes: Vec<Shape>) -> Self {
        assert!(!shapes.is_empty(), "scripted shape sequence must not be empty");
        Self { shapes, index: 0 }
    }

    /// Always the same shape
    pub fn repeat(shape: Shape) -> Self {
        Self::new(vec![shape])
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}
