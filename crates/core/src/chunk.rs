use std::ops::{Index, IndexMut, Range};

use bytemuck::Zeroable;

use crate::{Direction, Material};

/// A simple wrapper around a static array that can be indexed with a [`VoxelIndex`] with
/// no bound checking.
#[derive(Clone, Copy, Zeroable)]
#[repr(transparent)]
struct ChunkStore<T>([T; VoxelChunk::SIZE]);

impl<T> Index<VoxelIndex> for ChunkStore<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: VoxelIndex) -> &Self::Output {
        unsafe { self.0.get_unchecked(index.0) }
    }
}

impl<T> IndexMut<VoxelIndex> for ChunkStore<T> {
    #[inline]
    fn index_mut(&mut self, index: VoxelIndex) -> &mut Self::Output {
        unsafe { self.0.get_unchecked_mut(index.0) }
    }
}

/// An index into a [`VoxelChunk`] that is known to be in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VoxelIndex(usize);

impl VoxelIndex {
    /// Creates a new [`VoxelIndex`] without checking the coordinates.
    ///
    /// # Safety
    ///
    /// `x` and `z` must be in `0..WIDTH` and `y` must be in `0..HEIGHT`.
    #[inline]
    unsafe fn new_unchecked(x: i32, y: i32, z: i32) -> Self {
        Self(((x * VoxelChunk::WIDTH + z) * VoxelChunk::HEIGHT + y) as usize)
    }
}

/// The material content of one chunk column, spanning the whole height of the world.
///
/// # Layout
///
/// The buffer stores one [`Material`] byte per voxel. The index of the voxel at `(x, y, z)` is:
///
/// ```text
/// index = (x * VoxelChunk::WIDTH + z) * VoxelChunk::HEIGHT + y
/// ```
///
/// Each vertical column is therefore contiguous in memory.
///
/// # Bounds
///
/// Writing outside of the chunk is a bug in the caller. In debug builds, every write method
/// panics when it is asked to touch a voxel outside of the chunk. In release builds, such a
/// write is skipped *entirely*: the in-bounds part of an out-of-bounds box is not written
/// either, so a misplaced feature never shows up half-clipped.
///
/// Empty ranges (where the upper bound is less than or equal to the lower bound) write nothing
/// and are never considered out of bounds.
#[derive(Clone)]
pub struct VoxelChunk {
    blocks: Box<ChunkStore<Material>>,
}

impl VoxelChunk {
    /// The side-length of a chunk on the X and Z axes, in voxels.
    pub const WIDTH: i32 = 16;

    /// The height of a chunk, in voxels.
    pub const HEIGHT: i32 = 128;

    /// The total size of a chunk, in voxels.
    pub const SIZE: usize = (Self::WIDTH * Self::WIDTH * Self::HEIGHT) as usize;

    /// Creates a new [`VoxelChunk`] filled with [`Material::Air`].
    #[inline]
    pub fn new() -> Self {
        Self {
            blocks: bytemuck::zeroed_box(),
        }
    }

    /// Returns whether the provided coordinates are within the chunk.
    #[inline]
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        (0..Self::WIDTH).contains(&x)
            && (0..Self::HEIGHT).contains(&y)
            && (0..Self::WIDTH).contains(&z)
    }

    /// Returns the material at the provided position.
    ///
    /// # Panics
    ///
    /// This function panics if the position is outside of the chunk.
    #[inline]
    #[track_caller]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Material {
        assert!(
            Self::contains(x, y, z),
            "voxel ({x}, {y}, {z}) is outside of the chunk"
        );
        self.blocks[unsafe { VoxelIndex::new_unchecked(x, y, z) }]
    }

    /// Sets the material of a single voxel.
    #[inline]
    #[track_caller]
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, material: Material) {
        if !check_bounds(x..x + 1, y..y + 1, z..z + 1) {
            return;
        }
        self.blocks[unsafe { VoxelIndex::new_unchecked(x, y, z) }] = material;
    }

    /// Fills the horizontal slab at height `y` across the whole footprint of the chunk.
    #[track_caller]
    pub fn set_layer(&mut self, y: i32, material: Material) {
        self.set_blocks(0, Self::WIDTH, y, y + 1, 0, Self::WIDTH, material);
    }

    /// Fills the vertical run `y0..y1` of the column at `(x, z)`.
    #[track_caller]
    pub fn set_pillar(&mut self, x: i32, y0: i32, y1: i32, z: i32, material: Material) {
        self.set_blocks(x, x + 1, y0, y1, z, z + 1, material);
    }

    /// Fills the axis-aligned box `x0..x1`, `y0..y1`, `z0..z1`.
    ///
    /// The upper bounds are excluded, which means that two calls sharing a bound tile without
    /// gaps or overlaps.
    #[allow(clippy::too_many_arguments)]
    #[track_caller]
    pub fn set_blocks(
        &mut self,
        x0: i32,
        x1: i32,
        y0: i32,
        y1: i32,
        z0: i32,
        z1: i32,
        material: Material,
    ) {
        if !check_bounds(x0..x1, y0..y1, z0..z1) {
            return;
        }

        for x in x0..x1 {
            for z in z0..z1 {
                // SAFETY:
                //  `check_bounds` made sure that the whole box is in the chunk, and the Y range
                //  is non-empty.
                let start = unsafe { VoxelIndex::new_unchecked(x, y0, z) }.0;
                let len = (y1 - y0) as usize;
                self.blocks.0[start..start + len].fill(material);
            }
        }
    }

    /// Fills a box hugging the chunk edge that faces `side`.
    ///
    /// `along` runs parallel to the edge and `inward` counts voxels from the edge toward the
    /// center of the chunk. See [`Direction::edge_box`].
    #[track_caller]
    pub fn set_edge_blocks(
        &mut self,
        side: Direction,
        along: Range<i32>,
        y: Range<i32>,
        inward: Range<i32>,
        material: Material,
    ) {
        let (x, z) = side.edge_box(along, inward);
        self.set_blocks(x.start, x.end, y.start, y.end, z.start, z.end, material);
    }

    /// Fills a disc of the provided radius centered at `(cx, cz)`, at height `y`.
    ///
    /// A voxel at `(x, z)` is part of the disc if and only if
    /// `(x - cx)² + (z - cz)² <= radius²`.
    ///
    /// # Bounds
    ///
    /// The whole disc must fit within the chunk. A negative radius draws nothing.
    #[track_caller]
    pub fn set_circle(&mut self, cx: i32, cz: i32, radius: i32, y: i32, material: Material) {
        if radius < 0 {
            return;
        }

        if !check_bounds(
            cx - radius..cx + radius + 1,
            y..y + 1,
            cz - radius..cz + radius + 1,
        ) {
            return;
        }

        let r2 = radius * radius;
        for x in cx - radius..=cx + radius {
            for z in cz - radius..=cz + radius {
                let dx = x - cx;
                let dz = z - cz;
                if dx * dx + dz * dz <= r2 {
                    self.blocks[unsafe { VoxelIndex::new_unchecked(x, y, z) }] = material;
                }
            }
        }
    }

    /// Returns the vertical column at `(x, z)`, indexed by `y`.
    ///
    /// # Panics
    ///
    /// This function panics if the column is outside of the chunk.
    #[track_caller]
    pub fn column(&self, x: i32, z: i32) -> &[Material] {
        assert!(
            Self::contains(x, 0, z),
            "column ({x}, {z}) is outside of the chunk"
        );
        let start = unsafe { VoxelIndex::new_unchecked(x, 0, z) }.0;
        &self.blocks.0[start..start + Self::HEIGHT as usize]
    }

    /// Returns the highest `y` at which the column `(x, z)` holds a non-air material.
    pub fn highest_y(&self, x: i32, z: i32) -> Option<i32> {
        self.column(x, z)
            .iter()
            .rposition(|&m| m != Material::Air)
            .map(|y| y as i32)
    }

    /// Counts the voxels of the provided material in the horizontal slab at height `y`.
    pub fn count_in_layer(&self, y: i32, material: Material) -> usize {
        let mut ret = 0;
        for x in 0..Self::WIDTH {
            for z in 0..Self::WIDTH {
                if self.get(x, y, z) == material {
                    ret += 1;
                }
            }
        }
        ret
    }

    /// Counts how many voxels of each material the chunk contains, indexed by material ID.
    #[profiling::function]
    pub fn histogram(&self) -> [usize; Material::COUNT] {
        let mut ret = [0; Material::COUNT];
        for &m in self.blocks.0.iter() {
            ret[m as usize] += 1;
        }
        ret
    }

    /// Returns the raw material bytes of the chunk, in the layout described on the type.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks.0[..])
    }
}

impl Default for VoxelChunk {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for VoxelChunk {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for VoxelChunk {}

impl std::fmt::Debug for VoxelChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelChunk").finish_non_exhaustive()
    }
}

/// Checks that the box described by the provided ranges is within a chunk.
///
/// Returns `false` when nothing should be written, either because the box is empty or because
/// it leaves the chunk (in release builds only, debug builds panic).
#[inline]
#[track_caller]
fn check_bounds(x: Range<i32>, y: Range<i32>, z: Range<i32>) -> bool {
    if x.is_empty() || y.is_empty() || z.is_empty() {
        return false;
    }

    let horizontal = 0..=VoxelChunk::WIDTH;
    let in_bounds = x.start >= 0
        && horizontal.contains(&x.end)
        && z.start >= 0
        && horizontal.contains(&z.end)
        && y.start >= 0
        && y.end <= VoxelChunk::HEIGHT;

    debug_assert!(
        in_bounds,
        "write to {x:?} x {y:?} x {z:?} leaves the chunk (16 x {} x 16)",
        VoxelChunk::HEIGHT,
    );

    in_bounds
}
