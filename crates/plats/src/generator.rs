use std::fmt::Write;

use pc_core::{PlatPos, VoxelChunk};
use pc_rng::{DefaultRng, FromRng, Rng};
use pc_worldgen_core::{DecorationHost, FinishedChunk, WorldGenerator};

use crate::{
    ConfigError, DecoratedChunk, DistrictPolicy, GenerateError, LandUse, LotKind, LotState,
    Neighbors, PlatMap, PlatSeeds, WorldSettings,
};

/// The city [`WorldGenerator`].
///
/// Every plat is produced at most once during the lifetime of a generator.
#[derive(Debug)]
pub struct CityGenerator {
    map: PlatMap,
}

impl CityGenerator {
    /// Creates a new [`CityGenerator`] using the default [`DistrictPolicy`].
    pub fn new(settings: WorldSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seeds = PlatSeeds::from_rng(&mut DefaultRng::from_seed(settings.seed));
        let policy = DistrictPolicy::new(&settings, seeds.land_use.clone());
        Ok(Self {
            map: PlatMap::new(settings, seeds, Box::new(policy)),
        })
    }

    /// Creates a new [`CityGenerator`] that decides land use with the provided policy.
    pub fn with_policy(
        settings: WorldSettings,
        land_use: impl LandUse + 'static,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seeds = PlatSeeds::from_rng(&mut DefaultRng::from_seed(settings.seed));
        Ok(Self {
            map: PlatMap::new(settings, seeds, Box::new(land_use)),
        })
    }

    /// The plat map of the generator.
    #[inline]
    pub fn map(&self) -> &PlatMap {
        &self.map
    }

    /// The settings of the world.
    #[inline]
    pub fn settings(&self) -> &WorldSettings {
        self.map.settings()
    }

    /// Produces the chunk at the provided chunk coordinates.
    ///
    /// Both generation phases run on the plat covering the chunk. Decorations are issued against
    /// `host` during phase 2; those it refuses are skipped and counted.
    ///
    /// # Errors
    ///
    /// A plat can only be produced once. Asking for it again, even while the first call is still
    /// running, fails with [`GenerateError::AlreadyProduced`].
    #[profiling::function]
    pub fn produce(
        &self,
        chunk_x: i32,
        chunk_z: i32,
        host: &mut dyn DecorationHost,
    ) -> Result<FinishedChunk, GenerateError> {
        let pos = PlatPos::new(chunk_x, chunk_z);
        let lot = self.map.lookup(pos);
        let slot = self.map.slot(pos);

        // Claims the plat until both phases are done.
        let Some(mut state) = slot.state.try_lock() else {
            return Err(GenerateError::AlreadyProduced(pos));
        };
        if *state != LotState::Materialized {
            return Err(GenerateError::AlreadyProduced(pos));
        }

        let mut voxels = VoxelChunk::new();
        lot.generate_chunk(&self.map, &mut voxels);
        *state = LotState::Phase1Done;
        log::debug!("plat {pos:?} ({:?}): phase 1 done", lot.kind());

        let mut chunk = DecoratedChunk::new(pos, &mut voxels, host);
        lot.generate_blocks(&self.map, &mut chunk);
        let (fixtures, skipped_decorations) = chunk.finish();
        *state = LotState::Phase2Done;
        log::debug!(
            "plat {pos:?} ({:?}): phase 2 done, {} fixtures, {skipped_decorations} skipped",
            lot.kind(),
            fixtures.len(),
        );

        Ok(FinishedChunk {
            pos,
            voxels,
            fixtures,
            skipped_decorations,
        })
    }
}

/// Produces a single chunk of the world with the provided seed, using default settings.
///
/// This is a stateless convenience for one-off generation and tests. Every call builds a fresh
/// generator, so calling it twice with the same arguments runs both phases twice and yields the
/// same chunk. Nothing is remembered between calls: the exactly-once guarantee only holds
/// within one [`CityGenerator`], which is what hosts should keep around and call
/// [`CityGenerator::produce`] on.
pub fn produce_seeded(
    world_seed: u64,
    chunk_x: i32,
    chunk_z: i32,
    host: &mut dyn DecorationHost,
) -> Result<FinishedChunk, GenerateError> {
    let settings = WorldSettings {
        seed: world_seed,
        ..WorldSettings::default()
    };
    CityGenerator::new(settings)?.produce(chunk_x, chunk_z, host)
}

impl WorldGenerator for CityGenerator {
    type Error = GenerateError;

    fn generate(
        &self,
        pos: PlatPos,
        host: &mut dyn DecorationHost,
    ) -> Result<FinishedChunk, Self::Error> {
        self.produce(pos.x, pos.z, host)
    }

    fn debug_info(&self, buf: &mut String, pos: PlatPos) {
        let lot = self.map.lookup(pos);
        let _ = writeln!(buf, "Plat: {pos:?}");
        let _ = writeln!(buf, "Lot: {:?} (key {:#018x})", lot.kind(), lot.key().raw());
        let _ = writeln!(buf, "Variant: {:?}", lot.variant());
        let _ = writeln!(buf, "Connected: {:?}", Neighbors::of(&self.map, &lot).sides());
        if let Some(state) = self.map.state(pos) {
            let _ = writeln!(buf, "State: {state:?}");
        }

        let connectivity = self.map.connectivity();
        for kind in [LotKind::Park, LotKind::Street] {
            if let Some(key) = connectivity.get(kind) {
                let _ = writeln!(buf, "{kind:?} region: {:#018x}", key.raw());
            }
        }
    }
}
