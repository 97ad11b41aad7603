//! This crate defines the seams between a world generator and the host that embeds it: the
//! [`WorldGenerator`] trait, the chunk that is handed back, and the [`DecorationHost`] used
//! for engine-level decorations.

use std::hash::BuildHasherDefault;

use glam::IVec3;
use hashbrown::HashSet;
use pc_core::{Direction, PlatPos, VoxelChunk};
use rustc_hash::FxHasher;

/// Describes how to generate new chunks for a world.
pub trait WorldGenerator: Send + Sync {
    /// The error returned when a chunk cannot be delivered.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generates the chunk at the provided position.
    ///
    /// Engine-level decorations are issued against `host` while the chunk is being generated.
    ///
    /// # Purity
    ///
    /// The material content of the returned chunk is expected to only depend on the world
    /// seed and `pos`.
    fn generate(
        &self,
        pos: PlatPos,
        host: &mut dyn DecorationHost,
    ) -> Result<FinishedChunk, Self::Error>;

    /// Prints debug information about the provided position using the provided buffer.
    fn debug_info(&self, buf: &mut String, pos: PlatPos);
}

/// A chunk that went through every generation phase and can be handed back to the host.
#[derive(Debug, Clone)]
pub struct FinishedChunk {
    /// The position of the chunk.
    pub pos: PlatPos,
    /// The material content of the chunk.
    pub voxels: VoxelChunk,
    /// The functional fixtures placed in the chunk, in placement order.
    pub fixtures: Vec<Fixture>,
    /// The number of decorations the host refused to place.
    pub skipped_decorations: u32,
}

/// A functional fixture that needs more than a material ID to be represented (it has an
/// orientation, or behavior attached to it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    /// The world-space position of the fixture.
    pub pos: IVec3,
    /// What was placed there.
    pub kind: FixtureKind,
}

/// The kind of a [`Fixture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    /// A climbable ladder, attached to the wall on the `facing` side of its voxel.
    Ladder { facing: Direction },
    /// A hinged hatch that opens toward `facing`.
    TrapDoor { facing: Direction },
    /// A light source.
    Lamp,
}

/// A species of tree the host knows how to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    BigTree,
    TallRedwood,
    Birch,
    Tree,
}

/// An error reported by a [`DecorationHost`] when it could not place a decoration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecorationError {
    /// Something is already in the way at the requested position.
    #[error("decoration at {at} is obstructed")]
    Obstructed { at: IVec3 },
    /// The requested position is outside of the world.
    #[error("decoration at {at} is outside of the world")]
    OutsideWorld { at: IVec3 },
}

/// The engine-level side of a world: whatever can place decorations that are more than raw
/// materials.
pub trait DecorationHost {
    /// Grows a tree of the provided kind with its base at `at` (world-space).
    fn generate_tree(&mut self, at: IVec3, kind: TreeKind) -> Result<(), DecorationError>;
}

/// A tree placement that was accepted by a [`TreeLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreePlacement {
    /// The base of the tree (world-space).
    pub at: IVec3,
    /// The species of the tree.
    pub kind: TreeKind,
}

/// A [`DecorationHost`] that simply records the trees it is asked to grow.
///
/// Positions can be marked as obstructed to simulate a host that refuses some placements.
#[derive(Debug, Default)]
pub struct TreeLog {
    /// The trees that were accepted so far.
    placed: Vec<TreePlacement>,
    /// Positions at which placements are refused.
    obstructed: HashSet<IVec3, BuildHasherDefault<FxHasher>>,
    /// When set, every placement is refused.
    refuse_all: bool,
}

impl TreeLog {
    /// Creates a new, empty [`TreeLog`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`TreeLog`] that refuses every placement.
    pub fn refusing() -> Self {
        Self {
            refuse_all: true,
            ..Self::default()
        }
    }

    /// Marks the provided position as obstructed.
    pub fn obstruct(&mut self, at: IVec3) {
        self.obstructed.insert(at);
    }

    /// Returns the trees that were accepted so far.
    #[inline]
    pub fn trees(&self) -> &[TreePlacement] {
        &self.placed
    }

    /// Removes and returns the trees that were accepted so far.
    pub fn take(&mut self) -> Vec<TreePlacement> {
        std::mem::take(&mut self.placed)
    }
}

impl DecorationHost for TreeLog {
    fn generate_tree(&mut self, at: IVec3, kind: TreeKind) -> Result<(), DecorationError> {
        if !(0..VoxelChunk::HEIGHT).contains(&at.y) {
            return Err(DecorationError::OutsideWorld { at });
        }

        if self.refuse_all || self.obstructed.contains(&at) {
            return Err(DecorationError::Obstructed { at });
        }

        self.placed.push(TreePlacement { at, kind });
        Ok(())
    }
}
