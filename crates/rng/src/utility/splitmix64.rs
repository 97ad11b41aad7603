/// One step of the [SplitMix64] generator, taking the current state and returning the next
/// output.
///
/// This is mainly used to stretch a single 64-bit seed into the four words of state needed by
/// the main random number generator, and to derive independent seeds from one another.
///
/// [SplitMix64]: http://prng.di.unimi.it/splitmix64.c
#[inline]
pub fn splitmix64(st: u64) -> u64 {
    let mut t = st.wrapping_add(0x9e3779b97f4a7c15);
    t = (t ^ (t >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    t = (t ^ (t >> 27)).wrapping_mul(0x94d049bb133111eb);
    t ^ (t >> 31)
}
