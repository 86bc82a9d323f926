//! RNG module - deterministic random number generation
//!
//! Provides a simple LCG so seeded games replay identically on every platform,
//! plus the "7-bag" shape queue: each bag holds one of each shape, shuffled,
//! and is drawn until empty before a new bag is generated.

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Pick one element uniformly
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx).copied()
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag shape generator
#[derive(Debug, Clone)]
pub struct ShapeBag {
    /// Current bag of shapes
    bag: [Shape; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl ShapeBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: Shape::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag = Shape::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next shape without removing it
    pub fn peek(&self) -> Shape {
        if self.bag_index < self.bag.len() {
            return self.bag[self.bag_index];
        }

        // Preview the next bag from a copy of the RNG so the following draw()
        // produces exactly this shape.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = Shape::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> Shape {
        if self.bag_index >= self.bag.len() {
            self.refill();
        }

        let shape = self.bag[self.bag_index];
        self.bag_index += 1;
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_choose_covers_every_shape() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let shape = rng.choose(&Shape::ALL).unwrap();
            seen[Shape::ALL.iter().position(|&s| s == shape).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(rng.choose::<Shape>(&[]), None);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = ShapeBag::new(1);

        let mut drawn: Vec<Shape> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort();
        assert_eq!(drawn, Shape::ALL.to_vec());
    }

    #[test]
    fn test_bag_peek_matches_draw_across_refill() {
        let mut bag = ShapeBag::new(1);

        for _ in 0..7 {
            let _ = bag.draw();
        }

        let peeked = bag.peek();
        assert_eq!(bag.draw(), peeked);
    }
}
