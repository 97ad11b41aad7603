use pc_core::{Direction, Material, VoxelChunk};
use pc_rng::{DefaultRng, Rng};

use super::{generate_bedrock, surface_y, Lot, LotGen};
use crate::{DecoratedChunk, Neighbors, PlatMap};

/// A piece of road, with a sewer running under it.
///
/// Streets share a single connectivity key. Sidewalks and sewer walls are drawn toward every
/// side that does not lead to another street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Street {
    /// Whether a manhole leads down into the sewer.
    pub manhole: bool,
}

impl Street {
    /// The width of a sidewalk, curb included.
    pub const SIDEWALK_WIDTH: i32 = 3;
    /// The height of a lamp post, lamp excluded.
    pub const LAMP_POST_HEIGHT: i32 = 3;
    /// The position of the manhole.
    pub const MANHOLE: (i32, i32) = (10, 10);

    /// Draws the attributes of a new street.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            manhole: rng.next_below(4) == 0,
        }
    }

    /// The Y coordinate of the sewer floor.
    #[inline]
    pub fn sewer_floor_y(map: &PlatMap) -> i32 {
        map.street_level() - map.floor_height() * 2
    }

    /// The Y coordinate of the sewer ceiling.
    #[inline]
    pub fn sewer_ceiling_y(map: &PlatMap) -> i32 {
        Self::sewer_floor_y(map) + map.floor_height()
    }
}

/// Returns the two directions flanking an edge, the one at the low end of `along` first.
fn flanks(dir: Direction) -> (Direction, Direction) {
    match dir {
        Direction::West | Direction::East => (Direction::South, Direction::North),
        Direction::South | Direction::North => (Direction::West, Direction::East),
    }
}

impl LotGen for Street {
    fn generate_chunk(&self, lot: &Lot, map: &PlatMap, chunk: &mut VoxelChunk) {
        const W: i32 = VoxelChunk::WIDTH;

        let floor_y = Self::sewer_floor_y(map);
        let ceiling_y = Self::sewer_ceiling_y(map);
        let road_y = map.street_level() + 1;
        let surface_y = surface_y(map);

        generate_bedrock(chunk, floor_y);
        chunk.set_layer(floor_y, Material::Cistern);
        chunk.set_layer(ceiling_y, Material::Cistern);
        chunk.set_blocks(0, W, ceiling_y + 1, road_y, 0, W, Material::Dirt);
        chunk.set_layer(road_y, Material::Asphalt);

        let neighbors = Neighbors::of(map, lot);

        // The sewer is walled off where the street ends, and a trickle of water runs along it
        // where it goes on.
        let tunnel = floor_y + 1..ceiling_y;
        let trickle = floor_y + 1..floor_y + 2;
        chunk.set_blocks(7, 9, trickle.start, trickle.end, 7, 9, Material::Water);
        for dir in Direction::ALL {
            if neighbors.connected(dir) {
                chunk.set_edge_blocks(dir, 7..9, trickle.clone(), 0..7, Material::Water);
            } else {
                chunk.set_edge_blocks(dir, 0..W, tunnel.clone(), 0..1, Material::Cistern);
            }
        }

        // Sidewalks first, so that corners shared by two of them are paved.
        let width = Self::SIDEWALK_WIDTH;
        for dir in Direction::ALL {
            if !neighbors.connected(dir) {
                chunk.set_edge_blocks(
                    dir,
                    0..W,
                    road_y..surface_y + 1,
                    0..width,
                    Material::Pavement,
                );
            }
        }

        // Curbs along the road, stopping where they would cut through another sidewalk.
        for dir in Direction::ALL {
            if neighbors.connected(dir) {
                continue;
            }

            let (low, high) = flanks(dir);
            let start = if neighbors.connected(low) { 0 } else { width };
            let end = if neighbors.connected(high) { W } else { W - width };
            chunk.set_edge_blocks(
                dir,
                start..end,
                surface_y..surface_y + 1,
                width - 1..width,
                Material::Curb,
            );
        }
    }

    fn generate_blocks(
        &self,
        lot: &Lot,
        map: &PlatMap,
        chunk: &mut DecoratedChunk,
        _rng: &mut DefaultRng,
    ) {
        let surface_y = surface_y(map);
        let neighbors = Neighbors::of(map, lot);

        for dir in Direction::ALL {
            if neighbors.connected(dir) {
                continue;
            }

            let (x, z) = dir.edge_point(8, 1);
            let top = surface_y + 1 + Self::LAMP_POST_HEIGHT;
            chunk.set_blocks(x, x + 1, surface_y + 1, top, z, z + 1, Material::Column);
            chunk.set_lamp(x, top, z);
        }

        if self.manhole {
            let (x, z) = Self::MANHOLE;
            let road_y = map.street_level() + 1;
            chunk.set_ladder(x, Self::sewer_floor_y(map) + 1, road_y, z, Direction::West);
            chunk.set_trap_door(x, road_y, z, Direction::West);
        }
    }
}
