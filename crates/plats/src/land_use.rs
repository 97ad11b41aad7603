//! Decides what kind of lot each plat holds.

use pc_core::PlatPos;
use pc_rng::{Mixer, Noise};

use crate::WorldSettings;

/// The kind of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LotKind {
    Park,
    Street,
    Building,
    Empty,
}

impl LotKind {
    /// A one-character symbol for the kind, used when printing maps.
    pub fn symbol(self) -> char {
        match self {
            Self::Park => 'P',
            Self::Street => '#',
            Self::Building => 'B',
            Self::Empty => '.',
        }
    }
}

/// A land-use policy.
///
/// The policy is consulted exactly once per plat, the first time the plat is looked up in the
/// [`PlatMap`](crate::PlatMap). It must be a pure function of the plat position.
pub trait LandUse: Send + Sync {
    /// Returns the kind of lot that should be built at `pos`.
    fn lot_kind(&self, pos: PlatPos) -> LotKind;

    /// Returns the plat that leads the parcel `pos` belongs to.
    ///
    /// Lots of the same parcel are wired to the anchor's lot when they are created, so that they
    /// share its connectivity key and style. The anchor of an anchor must be itself.
    fn parcel_anchor(&self, pos: PlatPos) -> PlatPos {
        pos
    }
}

impl<F> LandUse for F
where
    F: Fn(PlatPos) -> LotKind + Send + Sync,
{
    #[inline]
    fn lot_kind(&self, pos: PlatPos) -> LotKind {
        self(pos)
    }
}

/// The default [`LandUse`] implementation.
///
/// Every `street_spacing`-th row and column of plats is a street. The plats enclosed between
/// streets are grouped in parcels of at most 2x2 plats, and each parcel rolls its kind once.
pub struct DistrictPolicy {
    street_spacing: i32,
    park_odds: f32,
    empty_odds: f32,
    include_parks: bool,
    include_buildings: bool,
    /// Hashes a parcel anchor into its land-use roll.
    noise: Mixer<2>,
}

impl DistrictPolicy {
    /// Creates a new [`DistrictPolicy`] from the provided settings and noise.
    pub fn new(settings: &WorldSettings, noise: Mixer<2>) -> Self {
        Self {
            street_spacing: settings.street_spacing,
            park_odds: settings.park_odds,
            empty_odds: settings.empty_odds,
            include_parks: settings.include_parks,
            include_buildings: settings.include_buildings,
            noise,
        }
    }

    /// Returns whether the provided coordinate lies on a street row or column.
    #[inline]
    fn is_street(&self, c: i32) -> bool {
        c.rem_euclid(self.street_spacing) == 0
    }

    /// Returns the coordinate of the parcel anchor along one axis.
    #[inline]
    fn anchor_coord(&self, c: i32) -> i32 {
        let block = c - c.rem_euclid(self.street_spacing);
        let local = c.rem_euclid(self.street_spacing) - 1;
        block + 1 + local - local % 2
    }
}

impl LandUse for DistrictPolicy {
    fn lot_kind(&self, pos: PlatPos) -> LotKind {
        if self.is_street(pos.x) || self.is_street(pos.z) {
            return LotKind::Street;
        }

        let anchor = self.parcel_anchor(pos);
        let hash = self.noise.sample(anchor.to_u64s());
        let roll = pc_rng::utility::f32_from_u32_01((hash >> 32) as u32);

        if roll < self.park_odds {
            if self.include_parks {
                LotKind::Park
            } else {
                LotKind::Empty
            }
        } else if roll < self.park_odds + self.empty_odds || !self.include_buildings {
            LotKind::Empty
        } else {
            LotKind::Building
        }
    }

    fn parcel_anchor(&self, pos: PlatPos) -> PlatPos {
        if self.is_street(pos.x) || self.is_street(pos.z) {
            return pos;
        }

        PlatPos::new(self.anchor_coord(pos.x), self.anchor_coord(pos.z))
    }
}
