//! The plat engine of Plat City.
//!
//! The world is cut into a grid of plats, each one covering the footprint of a single chunk.
//! Every plat holds a [`Lot`] (a park, a street, a building...), decided by a [`LandUse`]
//! policy the first time the plat is looked up in the [`PlatMap`].
//!
//! Producing a chunk happens in two phases:
//!
//! 1. [`Lot::generate_chunk`] writes raw materials into a [`VoxelChunk`](pc_core::VoxelChunk).
//!    This phase only depends on the lot and its neighbors, never on the host.
//! 2. [`Lot::generate_blocks`] places what cannot be expressed as raw materials (fixtures,
//!    trees) through a [`DecoratedChunk`].
//!
//! [`CityGenerator`] drives both phases and makes sure each plat is produced exactly once.

mod connectivity;
mod decorated;
mod error;
mod generator;
mod land_use;
mod neighbors;
mod plat_map;
mod seeds;

pub mod lots;
pub mod settings;

pub use self::connectivity::*;
pub use self::decorated::*;
pub use self::error::*;
pub use self::generator::*;
pub use self::land_use::*;
pub use self::lots::{Lot, LotVariant};
pub use self::neighbors::*;
pub use self::plat_map::*;
pub use self::seeds::*;
pub use self::settings::WorldSettings;
