//! A small, deterministic pseudo-random number generation library.
//!
//! Everything in here is a pure function of the seed it was given. The same seed produces the
//! same stream on every platform and across process restarts, which is what lets a world be
//! regenerated bit-for-bit.

pub mod utility;

mod mixer;
pub use mixer::*;

pub mod rngs;
pub mod system;

pub use pc_rng_derive::FromRng;

/// The default pseudo-random number generator.
///
/// This general purpose RNG should be sufficient in a vast majority of cases.
pub type DefaultRng = rngs::Xoshiro256PlusPlus;

/// A seeded pseudo-random number generator.
pub trait Rng {
    /// Creates a new [`Rng`] instance from the provided seed.
    fn from_seed(seed: u64) -> Self
    where
        Self: Sized;

    /// Generates a pseudo-random `u64` value.
    fn next_u64(&mut self) -> u64;

    /// Generates a random `u32` value.
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generates a random `f32` value in the range `[0.0, 1.0)`.
    #[inline(always)]
    fn next_f32_01(&mut self) -> f32 {
        utility::f32_from_u32_01(self.next_u32())
    }

    /// Generates a random boolean, with even odds.
    #[inline(always)]
    fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 != 0
    }

    /// Returns `true` with probability `p`.
    #[inline]
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32_01() < p
    }

    /// Generates a random value in `0..n`.
    #[inline]
    fn next_below(&mut self, n: u64) -> u64 {
        utility::u64_below(self.next_u64(), n)
    }

    /// Generates a random `i32` value in `lo..=hi`.
    #[inline]
    fn next_i32_in(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi);
        lo + self.next_below((hi - lo) as u64 + 1) as i32
    }

    /// Generates a random non-zero `u64` value.
    fn next_nonzero_u64(&mut self) -> u64 {
        loop {
            let ret = self.next_u64();
            if ret != 0 {
                return ret;
            }
        }
    }

    /// Picks one element of the provided slice.
    ///
    /// # Panics
    ///
    /// This function panics if the slice is empty.
    #[track_caller]
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        assert!(!items.is_empty(), "cannot pick from an empty slice");
        &items[self.next_below(items.len() as u64) as usize]
    }
}

/// A trait for types that can be generated from a random number generator.
pub trait FromRng {
    /// Generates a new instance of `Self` from the provided random number generator.
    fn from_rng(rng: &mut impl Rng) -> Self;
}

impl FromRng for u32 {
    #[inline]
    fn from_rng(rng: &mut impl Rng) -> Self {
        rng.next_u32()
    }
}

impl FromRng for u64 {
    #[inline]
    fn from_rng(rng: &mut impl Rng) -> Self {
        rng.next_u64()
    }
}

impl FromRng for f32 {
    #[inline]
    fn from_rng(rng: &mut impl Rng) -> Self {
        rng.next_f32_01()
    }
}

impl<T: FromRng, const N: usize> FromRng for [T; N] {
    fn from_rng(rng: &mut impl Rng) -> Self {
        std::array::from_fn(|_| T::from_rng(rng))
    }
}

/// A trait for types that can map an input to a pseudorandom output.
pub trait Noise<I> {
    /// The output of this noise.
    type Output;

    /// Samples the provided input.
    fn sample(&self, input: I) -> Self::Output;
}
