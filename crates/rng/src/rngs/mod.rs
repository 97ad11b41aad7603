//! Concrete [`Rng`](crate::Rng) implementations.

mod xoshiro256plusplus;
pub use xoshiro256plusplus::*;
