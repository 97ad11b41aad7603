use pc_core::{Direction, Material, VoxelChunk};
use pc_rng::{DefaultRng, Rng};

use super::{generate_bedrock, Lot, LotGen, LotVariant};
use crate::{DecoratedChunk, Neighbors, PlatMap, WorldSettings};

/// An office block.
///
/// A building may span several plats of the same parcel. Those share the connectivity key, the
/// height and the facade of the parcel anchor, and drop the walls between each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    /// The number of stories above the street.
    pub floors: i32,
    /// The distance between two windows of a facade.
    pub window_spacing: i32,
}

impl Building {
    /// Draws the attributes of a new building.
    pub fn new(rng: &mut impl Rng, settings: &WorldSettings) -> Self {
        Self {
            floors: rng.next_i32_in(1, settings.max_building_floors),
            window_spacing: rng.next_i32_in(2, 4),
        }
    }

    /// The Y coordinate of the basement slab.
    #[inline]
    pub fn basement_y(map: &PlatMap) -> i32 {
        map.street_level() + 1 - map.floor_height()
    }

    /// The Y coordinate of the slab of the provided story, `0` being the ground floor.
    #[inline]
    pub fn story_y(map: &PlatMap, story: i32) -> i32 {
        map.street_level() + 1 + story * map.floor_height()
    }

    /// The Y coordinate of the roof slab.
    #[inline]
    pub fn roof_y(&self, map: &PlatMap) -> i32 {
        Self::story_y(map, self.floors)
    }
}

impl LotGen for Building {
    fn generate_chunk(&self, lot: &Lot, map: &PlatMap, chunk: &mut VoxelChunk) {
        const W: i32 = VoxelChunk::WIDTH;

        let floor_height = map.floor_height();
        let basement_y = Self::basement_y(map);
        let roof_y = self.roof_y(map);
        let neighbors = Neighbors::of(map, lot);

        generate_bedrock(chunk, basement_y);
        chunk.set_layer(basement_y, Material::Floor);

        for dir in Direction::ALL {
            if !neighbors.connected(dir) {
                chunk.set_edge_blocks(
                    dir,
                    0..W,
                    basement_y + 1..basement_y + floor_height,
                    0..1,
                    Material::Wall,
                );
            }
        }

        for story in 0..self.floors {
            let slab_y = Self::story_y(map, story);
            chunk.set_layer(slab_y, Material::Floor);

            for dir in Direction::ALL {
                if neighbors.connected(dir) {
                    continue;
                }

                chunk.set_edge_blocks(
                    dir,
                    0..W,
                    slab_y + 1..slab_y + floor_height,
                    0..1,
                    Material::Wall,
                );

                for along in (1..W - 1).step_by(self.window_spacing as usize) {
                    chunk.set_edge_blocks(
                        dir,
                        along..along + 1,
                        slab_y + 2..slab_y + floor_height,
                        0..1,
                        Material::Glass,
                    );
                }
            }
        }

        chunk.set_layer(roof_y, Material::Roof);
        for dir in Direction::ALL {
            if !neighbors.connected(dir) {
                chunk.set_edge_blocks(dir, 0..W, roof_y + 1..roof_y + 2, 0..1, Material::Wall);
            }
        }
    }

    fn generate_blocks(
        &self,
        lot: &Lot,
        map: &PlatMap,
        chunk: &mut DecoratedChunk,
        rng: &mut DefaultRng,
    ) {
        let neighbors = Neighbors::of(map, lot);

        // A ladder from the basement to the roof, along the first exterior wall.
        let Some(dir) = [
            Direction::West,
            Direction::South,
            Direction::East,
            Direction::North,
        ]
        .into_iter()
        .find(|&dir| !neighbors.connected(dir)) else {
            return;
        };

        let along = rng.next_i32_in(2, VoxelChunk::WIDTH - 3);
        let (x, z) = dir.edge_point(along, 1);
        let roof_y = self.roof_y(map);
        chunk.set_ladder(x, Self::basement_y(map) + 1, roof_y, z, dir);
        chunk.set_trap_door(x, roof_y, z, dir);
    }

    fn make_connected(&mut self, _rng: &mut DefaultRng, relative: &Lot) {
        if let LotVariant::Building(relative) = relative.variant() {
            self.floors = relative.floors;
            self.window_spacing = relative.window_spacing;
        }
    }
}
