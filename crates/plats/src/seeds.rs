use pc_rng::{FromRng, Mixer};

/// The hashing tables derived from the world seed.
///
/// Field order matters: every table is drawn from the same stream, in declaration order.
#[derive(Debug, Clone, FromRng)]
pub struct PlatSeeds {
    /// Hashes a plat position into the seed of its lot's random stream.
    pub lot: Mixer<2>,
    /// Hashes a parcel anchor into its land-use roll.
    pub land_use: Mixer<2>,
}
