use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use glam::{IVec2, IVec3};

use crate::VoxelChunk;

/// The position of a plat in the infinite plat grid.
///
/// A plat covers exactly the horizontal footprint of one chunk, meaning that plat coordinates
/// and chunk coordinates are the same thing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatPos {
    /// The X coordinate of the plat.
    pub x: i32,
    /// The Z coordinate of the plat.
    pub z: i32,
}

impl PlatPos {
    /// Creates a new [`PlatPos`] from the provided coordinates.
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the world-space origin of the plat (at `y = 0`).
    ///
    /// The plat grid is a torus: coordinates wrap around at the edges of `i32`.
    #[inline]
    pub const fn origin(self) -> IVec3 {
        IVec3::new(
            self.x.wrapping_mul(VoxelChunk::WIDTH),
            0,
            self.z.wrapping_mul(VoxelChunk::WIDTH),
        )
    }

    /// Returns the plat adjacent to this one in the provided direction.
    ///
    /// Wraps around at the edges of the grid, like [`origin`](Self::origin).
    #[inline]
    pub fn neighbor(self, dir: Direction) -> Self {
        let offset = dir.offset();
        Self::new(self.x.wrapping_add(offset.x), self.z.wrapping_add(offset.y))
    }

    /// Translates a position local to this plat into world space, wrapping like
    /// [`origin`](Self::origin).
    #[inline]
    pub fn world_pos(self, local: IVec3) -> IVec3 {
        let origin = self.origin();
        IVec3::new(
            origin.x.wrapping_add(local.x),
            origin.y.wrapping_add(local.y),
            origin.z.wrapping_add(local.z),
        )
    }

    /// Returns the coordinates reinterpreted as unsigned integers, ready to be fed to a
    /// hashing noise.
    #[inline]
    pub fn to_u64s(self) -> [u64; 2] {
        [self.x as u32 as u64, self.z as u32 as u64]
    }
}

impl Debug for PlatPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

impl Hash for PlatPos {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        #[cfg(target_pointer_width = "64")]
        {
            state.write_usize((self.x as u32 as usize) << 32 | self.z as u32 as usize);
        }

        #[cfg(target_pointer_width = "32")]
        {
            self.x.hash(state);
            self.z.hash(state);
        }
    }
}

/// One of the four cardinal directions of the plat grid.
///
/// # Axes
///
/// The plat grid uses the following convention: [`North`] is `+x`, [`South`] is `-x`,
/// [`East`] is `+z` and [`West`] is `-z`.
///
/// Within a chunk, the side facing [`West`] is the `z = 0` row, [`East`] is `z = 15`,
/// [`South`] is `x = 0` and [`North`] is `x = 15`.
///
/// [`North`]: Direction::North
/// [`South`]: Direction::South
/// [`East`]: Direction::East
/// [`West`]: Direction::West
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in the order lots usually walk them.
    pub const ALL: [Self; 4] = [Self::West, Self::East, Self::South, Self::North];

    /// Returns the offset to the adjacent plat in this direction.
    #[inline]
    pub const fn offset(self) -> IVec2 {
        match self {
            Self::North => IVec2::new(1, 0),
            Self::South => IVec2::new(-1, 0),
            Self::East => IVec2::new(0, 1),
            Self::West => IVec2::new(0, -1),
        }
    }

    /// Returns the direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Maps coordinates relative to the chunk edge facing this direction back to local `(x, z)`
    /// ranges.
    ///
    /// `along` runs parallel to the edge (from the low X or Z end), and `inward` counts voxels
    /// from the edge toward the center of the chunk. Both are half-open.
    pub fn edge_box(self, along: Range<i32>, inward: Range<i32>) -> (Range<i32>, Range<i32>) {
        const W: i32 = VoxelChunk::WIDTH;
        let flipped = W - inward.end..W - inward.start;
        match self {
            Self::West => (along, inward),
            Self::East => (along, flipped),
            Self::South => (inward, along),
            Self::North => (flipped, along),
        }
    }

    /// Maps a single position relative to the chunk edge facing this direction back to local
    /// `(x, z)` coordinates.
    ///
    /// See [`edge_box`](Self::edge_box).
    #[inline]
    pub fn edge_point(self, along: i32, inward: i32) -> (i32, i32) {
        let (x, z) = self.edge_box(along..along + 1, inward..inward + 1);
        (x.start, z.start)
    }

    /// Returns the [`Sides`] flag associated with this direction.
    #[inline]
    pub const fn side(self) -> Sides {
        match self {
            Self::North => Sides::NORTH,
            Self::South => Sides::SOUTH,
            Self::East => Sides::EAST,
            Self::West => Sides::WEST,
        }
    }
}

bitflags::bitflags! {
    /// A set of sides of a plat.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Sides: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST = 1 << 2;
        const WEST = 1 << 3;
    }
}

impl Sides {
    /// Returns whether the provided direction is part of the set.
    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        self.contains(dir.side())
    }
}
