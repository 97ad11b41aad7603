use crate::{utility, Rng};

/// A general-purpose pseudo-random number generator.
///
/// This number generator is based on the [xoshiro256++][source] algorithm. Its state is seeded
/// by running [`splitmix64`](utility::splitmix64) over the provided seed, which guarantees that
/// the state is never all zeros.
///
/// [source]: https://prng.di.unimi.it/xoshiro256plusplus.c
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoshiro256PlusPlus {
    s: [u64; 4],
}

impl Rng for Xoshiro256PlusPlus {
    fn from_seed(seed: u64) -> Self
    where
        Self: Sized,
    {
        let mut st = seed;
        let s = std::array::from_fn(|_| {
            st = st.wrapping_add(0x9e3779b97f4a7c15);
            utility::splitmix64(st)
        });

        Self { s }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let [a, b, c, d] = &mut self.s;

        let ret = a.wrapping_add(*d).rotate_left(23).wrapping_add(*a);
        let t = *b << 17;

        *c ^= *a;
        *d ^= *b;
        *b ^= *c;
        *a ^= *d;

        *c ^= t;
        *d = d.rotate_left(45);

        ret
    }
}
