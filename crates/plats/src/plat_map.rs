use std::hash::BuildHasherDefault;
use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};
use pc_core::PlatPos;
use pc_rng::{DefaultRng, Rng};
use rustc_hash::FxHasher;

use crate::{Connectivity, LandUse, Lot, PlatSeeds, WorldSettings};

/// The generation progress of a materialized lot.
///
/// A plat that was never looked up has no state at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LotState {
    /// The lot exists, but none of its content was generated yet.
    Materialized,
    /// The voxel content of the lot was committed.
    Phase1Done,
    /// The decorations of the lot were committed. The lot is finished.
    Phase2Done,
}

/// One entry of the [`PlatMap`].
#[derive(Debug)]
pub(crate) struct Slot {
    /// The lot of the plat, constructed by the first thread that asks for it.
    lot: OnceLock<Arc<Lot>>,
    /// The progress of the plat.
    ///
    /// This lock is held for the whole duration of a `produce` call.
    pub(crate) state: Mutex<LotState>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            lot: OnceLock::new(),
            state: Mutex::new(LotState::Materialized),
        }
    }
}

/// The grid of plats.
///
/// Lots are materialized lazily, the first time their plat is looked up, and are kept for the
/// lifetime of the map.
///
/// # Concurrency
///
/// The map lock is only held long enough to find or insert the slot of a plat. The lot itself is
/// constructed outside of it, which means that materializing a lot never blocks lookups of other
/// plats, while concurrent lookups of the same plat still construct a single lot.
pub struct PlatMap {
    settings: WorldSettings,
    seeds: PlatSeeds,
    land_use: Box<dyn LandUse>,
    connectivity: Connectivity,
    slots: RwLock<HashMap<PlatPos, Arc<Slot>, BuildHasherDefault<FxHasher>>>,
}

impl PlatMap {
    /// Creates a new, empty [`PlatMap`].
    ///
    /// The settings are expected to be valid.
    pub fn new(settings: WorldSettings, seeds: PlatSeeds, land_use: Box<dyn LandUse>) -> Self {
        Self {
            settings,
            seeds,
            land_use,
            connectivity: Connectivity::default(),
            slots: RwLock::default(),
        }
    }

    /// The settings of the world.
    #[inline]
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// The world-space Y coordinate of the nominal ground plane.
    #[inline]
    pub fn street_level(&self) -> i32 {
        self.settings.street_level
    }

    /// The vertical spacing between two structural floors.
    #[inline]
    pub fn floor_height(&self) -> i32 {
        self.settings.floor_height
    }

    /// The connectivity keys decided so far.
    #[inline]
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Returns the number of plats that have a slot in the map.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns whether no plat was looked up yet.
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Returns the lot at the provided position, materializing it if needed.
    ///
    /// Materializing a lot may look up other plats (its parcel anchor), but a lot never looks
    /// itself up while being constructed.
    #[profiling::function]
    pub fn lookup(&self, pos: PlatPos) -> Arc<Lot> {
        self.slot(pos)
            .lot
            .get_or_init(|| Arc::new(self.materialize(pos)))
            .clone()
    }

    /// Returns the lot at the provided position, if it was already materialized.
    pub fn get(&self, pos: PlatPos) -> Option<Arc<Lot>> {
        self.slots.read().get(&pos)?.lot.get().cloned()
    }

    /// Returns the generation state of the plat at the provided position.
    ///
    /// `None` is returned when the lot was never materialized.
    pub fn state(&self, pos: PlatPos) -> Option<LotState> {
        let slot = self.slots.read().get(&pos)?.clone();
        slot.lot.get()?;
        let state = *slot.state.lock();
        Some(state)
    }

    /// Returns the slot of the provided plat, creating an empty one if needed.
    pub(crate) fn slot(&self, pos: PlatPos) -> Arc<Slot> {
        let lock = self.slots.read();

        if let Some(slot) = lock.get(&pos) {
            return slot.clone();
        }

        drop(lock);

        // We might have raced with another thread to create the slot.
        self.slots.write().entry(pos).or_default().clone()
    }

    /// Constructs the lot of the provided plat.
    fn materialize(&self, pos: PlatPos) -> Lot {
        let kind = self.land_use.lot_kind(pos);
        let rng = DefaultRng::from_seed(self.seeds.lot.mix_i32([pos.x, pos.z]));
        let mut lot = Lot::new(pos, kind, rng, &self.settings, &self.connectivity);

        let anchor = self.land_use.parcel_anchor(pos);
        if anchor != pos {
            let relative = self.lookup(anchor);
            if relative.kind() == kind {
                lot.make_connected(&relative);
            }
        }

        log::trace!("materialized {kind:?} lot at {pos:?}");
        lot
    }
}

impl std::fmt::Debug for PlatMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatMap")
            .field("settings", &self.settings)
            .field("plats", &self.len())
            .finish_non_exhaustive()
    }
}
