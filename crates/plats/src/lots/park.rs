use pc_core::{Direction, Material, VoxelChunk};
use pc_rng::{DefaultRng, Rng};

use super::{generate_bedrock, surface_y, Lot, LotGen, LARGE_TREES, SMALL_TREES};
use crate::{DecoratedChunk, Neighbors, PlatMap};

/// A park built on the roof of a water cistern.
///
/// Every park shares the same connectivity key, which means that adjacent parks open their
/// cisterns into each other and drop the fences between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Park {
    /// Whether the sidewalks form a circle around the center of the park, rather than a cross.
    pub circle_sidewalk: bool,
}

impl Park {
    /// The number of voxels between the grass layer and the top of the cistern.
    pub const GROUND_DEPTH: i32 = 2;

    /// Draws the attributes of a new park.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            circle_sidewalk: rng.next_bool(),
        }
    }

    /// The depth of the cistern, measured down from the street level.
    #[inline]
    pub fn cistern_depth(map: &PlatMap) -> i32 {
        map.settings().cistern_depth()
    }

    /// The maximum depth of the water held by the cistern.
    #[inline]
    pub fn max_water_depth(map: &PlatMap) -> i32 {
        map.floor_height() * 2
    }

    /// The Y coordinate of the cistern floor.
    #[inline]
    pub fn floor_y(map: &PlatMap) -> i32 {
        map.street_level() - Self::cistern_depth(map) + 1
    }

    /// The Y coordinate of the ceiling supports, right under the cistern roof.
    #[inline]
    pub fn ceiling_y(map: &PlatMap) -> i32 {
        map.street_level() - Self::GROUND_DEPTH
    }
}

/// Two stubs on the edge of a connected side, one near each corner.
const STUBS: [std::ops::Range<i32>; 2] = [3..5, 11..13];

impl LotGen for Park {
    fn generate_chunk(&self, lot: &Lot, map: &PlatMap, chunk: &mut VoxelChunk) {
        const W: i32 = VoxelChunk::WIDTH;

        let floor_y = Self::floor_y(map);
        let ceiling_y = Self::ceiling_y(map);

        // The basin.
        generate_bedrock(chunk, floor_y);
        chunk.set_layer(floor_y, Material::Cistern);

        let lowest_y = floor_y + 1;
        chunk.set_blocks(
            0,
            W,
            lowest_y,
            lowest_y + Self::max_water_depth(map),
            0,
            W,
            Material::Water,
        );

        let neighbors = Neighbors::of(map, lot);

        // Connected sides only keep two stubs so that the water flows into the next park.
        for dir in Direction::ALL {
            if neighbors.connected(dir) {
                for along in STUBS {
                    chunk.set_edge_blocks(dir, along, lowest_y..ceiling_y, 0..1, Material::Cistern);
                }
            } else {
                chunk.set_edge_blocks(dir, 0..W, lowest_y..ceiling_y + 1, 0..1, Material::Cistern);
            }
        }

        // Center columns.
        chunk.set_blocks(7, 9, lowest_y, ceiling_y, 3, 5, Material::Cistern);
        chunk.set_blocks(7, 9, lowest_y, ceiling_y, 11, 13, Material::Cistern);
        chunk.set_blocks(3, 5, lowest_y, ceiling_y, 7, 9, Material::Cistern);
        chunk.set_blocks(11, 13, lowest_y, ceiling_y, 7, 9, Material::Cistern);

        // Ceiling supports.
        chunk.set_blocks(3, 5, ceiling_y, ceiling_y + 1, 0, W, Material::Cistern);
        chunk.set_blocks(11, 13, ceiling_y, ceiling_y + 1, 0, W, Material::Cistern);
        chunk.set_blocks(0, W, ceiling_y, ceiling_y + 1, 3, 5, Material::Cistern);
        chunk.set_blocks(0, W, ceiling_y, ceiling_y + 1, 11, 13, Material::Cistern);

        // Roof of the cistern, and the ground on top of it.
        chunk.set_layer(ceiling_y + 1, Material::Cistern);
        chunk.set_layer(ceiling_y + 2, Material::Dirt);
        chunk.set_layer(ceiling_y + 3, Material::Grass);

        // Fences and gate posts on the sides that do not open onto another park.
        let surface_y = surface_y(map);
        for dir in Direction::ALL {
            if neighbors.connected(dir) {
                continue;
            }

            let y = surface_y..surface_y + 1;
            chunk.set_edge_blocks(dir, 0..6, y.clone(), 0..1, Material::Fence);
            chunk.set_edge_blocks(dir, 10..W, y.clone(), 0..1, Material::Fence);
            for along in [6, 9] {
                chunk.set_edge_blocks(
                    dir,
                    along..along + 1,
                    surface_y..surface_y + 2,
                    0..1,
                    Material::Column,
                );
                chunk.set_edge_blocks(dir, along..along + 1, y.clone(), 1..2, Material::Column);
            }
        }

        // Sidewalks, replacing the grass.
        let y = surface_y - 1;
        if self.circle_sidewalk {
            chunk.set_blocks(7, 9, y, y + 1, 0, 3, Material::Pavement);
            chunk.set_blocks(7, 9, y, y + 1, 13, W, Material::Pavement);
            chunk.set_blocks(0, 3, y, y + 1, 7, 9, Material::Pavement);
            chunk.set_blocks(13, W, y, y + 1, 7, 9, Material::Pavement);
            // The inner disc is fully covered by the outer one.
            chunk.set_circle(8, 8, 4, y, Material::Pavement);
            chunk.set_circle(8, 8, 3, y, Material::Pavement);
        } else {
            chunk.set_blocks(7, 9, y, y + 1, 0, 8, Material::Pavement);
            chunk.set_blocks(7, 9, y, y + 1, 8, W, Material::Pavement);
            chunk.set_blocks(0, 8, y, y + 1, 7, 9, Material::Pavement);
            chunk.set_blocks(8, W, y, y + 1, 7, 9, Material::Pavement);
        }
    }

    fn generate_blocks(
        &self,
        lot: &Lot,
        map: &PlatMap,
        chunk: &mut DecoratedChunk,
        rng: &mut DefaultRng,
    ) {
        let surface_y = surface_y(map);

        // A way down into the cistern, through the west wall.
        let neighbors = Neighbors::of(map, lot);
        if !neighbors.to_west() {
            let ledge_y = Self::floor_y(map) + Self::max_water_depth(map);
            chunk.set_blocks(4, 7, ledge_y, ledge_y + 1, 1, 2, Material::Cistern);
            chunk.set_ladder(5, ledge_y + 1, surface_y, 1, Direction::West);
            chunk.set_trap_door(5, surface_y, 1, Direction::West);
        }

        if self.circle_sidewalk {
            let kind = *rng.pick(&LARGE_TREES);
            chunk.generate_tree(7, surface_y, 7, kind);
        } else {
            let kind = *rng.pick(&SMALL_TREES);
            for (x, z) in [(3, 3), (12, 3), (3, 12), (12, 12)] {
                chunk.generate_tree(x, surface_y, z, kind);
            }
        }
    }
}
