use std::ops::BitXor;

use crate::{FromRng, Noise, Rng};

/// Hashes `N` integers into a single pseudo-random `u64`.
///
/// A [`Mixer`] is built once from a seeded stream; sampling it is then a pure function of the
/// input, which makes it suitable for deriving per-position seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mixer<const N: usize> {
    /// The initial value used to hash the input numbers.
    pub init: u64,
    /// Odd multipliers, one per input number.
    pub factors: [u64; N],
}

impl<const N: usize> FromRng for Mixer<N> {
    fn from_rng(rng: &mut impl Rng) -> Self {
        Self {
            init: rng.next_u64(),
            factors: std::array::from_fn(|_| rng.next_u64() | 1),
        }
    }
}

impl<const N: usize> Mixer<N> {
    /// Mixes the provided signed inputs into a single number.
    #[inline]
    pub fn mix_i32(&self, input: [i32; N]) -> u64 {
        self.sample(input.map(|x| x as u32 as u64))
    }
}

impl<const N: usize> Noise<[u64; N]> for Mixer<N> {
    type Output = u64;

    fn sample(&self, input: [u64; N]) -> Self::Output {
        let mut ret = self.init;
        for (t, p) in input.into_iter().zip(self.factors) {
            ret = ret.rotate_left(5).bitxor(t).wrapping_mul(p);
        }
        // A final avalanche so that neighboring inputs land far apart.
        crate::utility::splitmix64(ret)
    }
}
