//! Utility functions to work with random numbers.

mod splitmix64;
pub use splitmix64::*;

mod convert;
pub use convert::*;
