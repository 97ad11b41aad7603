//! The lot variants, and the generation contract they share.

use parking_lot::Mutex;
use pc_core::{Material, PlatPos, VoxelChunk};
use pc_rng::{DefaultRng, Rng};
use pc_worldgen_core::TreeKind;

use crate::{Connectivity, ConnectivityKey, DecoratedChunk, LotKind, PlatMap, WorldSettings};

mod building;
mod empty;
mod park;
mod street;

pub use building::Building;
pub use empty::Empty;
pub use park::Park;
pub use street::Street;

/// The generation contract shared by every lot variant.
///
/// # Determinism
///
/// A variant may only read its own attributes, the world settings, and the connectivity of its
/// neighbors. Randomness comes exclusively from the lot's own stream, and only during phase 2.
pub trait LotGen {
    /// Writes the material content of the lot into `chunk`.
    ///
    /// This is phase 1. It never touches the random stream of the lot, which means that it can
    /// run any number of times and always produce the same buffer.
    fn generate_chunk(&self, lot: &Lot, map: &PlatMap, chunk: &mut VoxelChunk);

    /// Places the decorations of the lot.
    ///
    /// This is phase 2. `rng` is the lot's own stream, picking up where construction left it.
    fn generate_blocks(
        &self,
        lot: &Lot,
        map: &PlatMap,
        chunk: &mut DecoratedChunk,
        rng: &mut DefaultRng,
    );

    /// Coordinates this variant with a related lot, after the base state was copied.
    ///
    /// The default implementation adds nothing.
    fn make_connected(&mut self, rng: &mut DefaultRng, relative: &Lot) {
        let _ = (rng, relative);
    }
}

/// The attributes specific to each kind of lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotVariant {
    Park(Park),
    Street(Street),
    Building(Building),
    Empty(Empty),
}

impl LotVariant {
    /// Returns the [`LotGen`] implementation of the variant.
    #[inline]
    fn as_gen(&self) -> &dyn LotGen {
        match self {
            Self::Park(v) => v,
            Self::Street(v) => v,
            Self::Building(v) => v,
            Self::Empty(v) => v,
        }
    }

    #[inline]
    fn as_gen_mut(&mut self) -> &mut dyn LotGen {
        match self {
            Self::Park(v) => v,
            Self::Street(v) => v,
            Self::Building(v) => v,
            Self::Empty(v) => v,
        }
    }
}

/// The content of one plat.
pub struct Lot {
    pos: PlatPos,
    kind: LotKind,
    key: ConnectivityKey,
    variant: LotVariant,
    /// The random stream of the lot.
    ///
    /// It is consumed by construction, then by phase 2, and by nothing else.
    rng: Mutex<DefaultRng>,
}

impl Lot {
    /// Creates a new lot at the provided position.
    ///
    /// Every lot draws a connectivity key candidate first, whether it ends up using it or not,
    /// and then its variant attributes.
    pub fn new(
        pos: PlatPos,
        kind: LotKind,
        mut rng: DefaultRng,
        settings: &WorldSettings,
        connectivity: &Connectivity,
    ) -> Self {
        let candidate = rng.next_nonzero_u64();
        let key = match kind {
            LotKind::Park | LotKind::Street => connectivity
                .shared_key(kind, candidate)
                .unwrap_or(ConnectivityKey::NONE),
            LotKind::Building => ConnectivityKey::new(candidate),
            LotKind::Empty => ConnectivityKey::NONE,
        };

        let variant = match kind {
            LotKind::Park => LotVariant::Park(Park::new(&mut rng)),
            LotKind::Street => LotVariant::Street(Street::new(&mut rng)),
            LotKind::Building => LotVariant::Building(Building::new(&mut rng, settings)),
            LotKind::Empty => LotVariant::Empty(Empty),
        };

        Self {
            pos,
            kind,
            key,
            variant,
            rng: Mutex::new(rng),
        }
    }

    /// The plat this lot is bound to.
    #[inline]
    pub fn pos(&self) -> PlatPos {
        self.pos
    }

    /// The kind of the lot.
    #[inline]
    pub fn kind(&self) -> LotKind {
        self.kind
    }

    /// The connectivity key of the lot.
    #[inline]
    pub fn key(&self) -> ConnectivityKey {
        self.key
    }

    /// The variant-specific attributes of the lot.
    #[inline]
    pub fn variant(&self) -> &LotVariant {
        &self.variant
    }

    /// Wires this lot to a related lot, so that they can share edge features.
    ///
    /// The connectivity key of `relative` is copied, and the variant may copy more of its
    /// attributes. This is only done while the lot is being constructed.
    pub fn make_connected(&mut self, relative: &Lot) {
        self.key = relative.key;
        self.variant
            .as_gen_mut()
            .make_connected(self.rng.get_mut(), relative);
    }

    /// Runs phase 1 of the lot into `chunk`.
    #[profiling::function]
    pub fn generate_chunk(&self, map: &PlatMap, chunk: &mut VoxelChunk) {
        self.variant.as_gen().generate_chunk(self, map, chunk);
    }

    /// Runs phase 2 of the lot into `chunk`.
    ///
    /// This consumes the random stream of the lot. Running it twice does not produce the same
    /// decorations.
    #[profiling::function]
    pub fn generate_blocks(&self, map: &PlatMap, chunk: &mut DecoratedChunk) {
        let mut rng = self.rng.lock();
        self.variant
            .as_gen()
            .generate_blocks(self, map, chunk, &mut rng);
    }
}

impl std::fmt::Debug for Lot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lot")
            .field("pos", &self.pos)
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

/// Tree species grown alone at the center of a circle-style park.
pub const LARGE_TREES: [TreeKind; 2] = [TreeKind::BigTree, TreeKind::TallRedwood];

/// Tree species of cross-style parks and vacant lots.
pub const SMALL_TREES: [TreeKind; 2] = [TreeKind::Birch, TreeKind::Tree];

/// The Y coordinate at which surface features are placed, one voxel above the ground cover.
#[inline]
pub fn surface_y(map: &PlatMap) -> i32 {
    map.street_level() + 2
}

/// Lays the foundation every lot stands on: a bedrock layer at the bottom of the world, and
/// stone from there up to `upto_y` (excluded).
pub fn generate_bedrock(chunk: &mut VoxelChunk, upto_y: i32) {
    chunk.set_layer(0, Material::Bedrock);
    chunk.set_blocks(
        0,
        VoxelChunk::WIDTH,
        1,
        upto_y,
        0,
        VoxelChunk::WIDTH,
        Material::Stone,
    );
}
