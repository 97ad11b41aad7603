use pc_core::{Material, VoxelChunk};
use pc_rng::{DefaultRng, Rng};

use super::{generate_bedrock, surface_y, Lot, LotGen, SMALL_TREES};
use crate::{DecoratedChunk, PlatMap};

/// A vacant lot, left to grass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Empty;

impl LotGen for Empty {
    fn generate_chunk(&self, _lot: &Lot, map: &PlatMap, chunk: &mut VoxelChunk) {
        let street_level = map.street_level();
        generate_bedrock(chunk, street_level - 3);
        chunk.set_blocks(
            0,
            VoxelChunk::WIDTH,
            street_level - 3,
            street_level + 1,
            0,
            VoxelChunk::WIDTH,
            Material::Dirt,
        );
        chunk.set_layer(street_level + 1, Material::Grass);
    }

    fn generate_blocks(
        &self,
        _lot: &Lot,
        map: &PlatMap,
        chunk: &mut DecoratedChunk,
        rng: &mut DefaultRng,
    ) {
        if !rng.chance(0.5) {
            return;
        }

        let kind = *rng.pick(&SMALL_TREES);
        let x = rng.next_i32_in(3, 12);
        let z = rng.next_i32_in(3, 12);
        chunk.generate_tree(x, surface_y(map), z, kind);
    }
}
