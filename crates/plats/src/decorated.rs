use glam::IVec3;
use pc_core::{Direction, Material, PlatPos, VoxelChunk};
use pc_worldgen_core::{DecorationHost, Fixture, FixtureKind, TreeKind};

/// A view over a chunk whose voxel content was committed, used to place decorations that need
/// the host.
///
/// Fixtures are written as materials into the chunk *and* recorded with their orientation.
/// Trees are forwarded to the host right away. When the host refuses one, the failure is logged
/// and counted, and generation carries on.
pub struct DecoratedChunk<'a> {
    pos: PlatPos,
    voxels: &'a mut VoxelChunk,
    host: &'a mut dyn DecorationHost,
    fixtures: Vec<Fixture>,
    skipped: u32,
}

impl<'a> DecoratedChunk<'a> {
    /// Creates a new [`DecoratedChunk`] over the chunk of the provided plat.
    pub fn new(pos: PlatPos, voxels: &'a mut VoxelChunk, host: &'a mut dyn DecorationHost) -> Self {
        Self {
            pos,
            voxels,
            host,
            fixtures: Vec::new(),
            skipped: 0,
        }
    }

    /// The position of the plat being decorated.
    #[inline]
    pub fn pos(&self) -> PlatPos {
        self.pos
    }

    /// Converts a position local to the chunk into a world-space position.
    #[inline]
    pub fn world_pos(&self, x: i32, y: i32, z: i32) -> IVec3 {
        self.pos.world_pos(IVec3::new(x, y, z))
    }

    /// Fills the axis-aligned box `x0..x1`, `y0..y1`, `z0..z1`.
    ///
    /// See [`VoxelChunk::set_blocks`].
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
        self.voxels.set_blocks(x0, x1, y0, y1, z0, z1, material);
    }

    /// Places a ladder on the run `y0..y1` of the column at `(x, z)`, attached to the wall on
    /// its `facing` side.
    #[track_caller]
    pub fn set_ladder(&mut self, x: i32, y0: i32, y1: i32, z: i32, facing: Direction) {
        self.voxels.set_pillar(x, y0, y1, z, Material::Ladder);
        for y in y0..y1 {
            self.push_fixture(x, y, z, FixtureKind::Ladder { facing });
        }
    }

    /// Places a hatch at the provided position, opening toward `facing`.
    #[track_caller]
    pub fn set_trap_door(&mut self, x: i32, y: i32, z: i32, facing: Direction) {
        self.voxels.set_block(x, y, z, Material::TrapDoor);
        self.push_fixture(x, y, z, FixtureKind::TrapDoor { facing });
    }

    /// Places a light source at the provided position.
    #[track_caller]
    pub fn set_lamp(&mut self, x: i32, y: i32, z: i32) {
        self.voxels.set_block(x, y, z, Material::Lamp);
        self.push_fixture(x, y, z, FixtureKind::Lamp);
    }

    /// Asks the host to grow a tree with its base at the provided position.
    ///
    /// Returns whether the tree was placed.
    pub fn generate_tree(&mut self, x: i32, y: i32, z: i32, kind: TreeKind) -> bool {
        let at = self.world_pos(x, y, z);
        match self.host.generate_tree(at, kind) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("skipped a {kind:?} tree in plat {:?}: {err}", self.pos);
                self.skipped += 1;
                false
            }
        }
    }

    /// Consumes the view, returning the placed fixtures and the number of skipped decorations.
    pub fn finish(self) -> (Vec<Fixture>, u32) {
        (self.fixtures, self.skipped)
    }

    fn push_fixture(&mut self, x: i32, y: i32, z: i32, kind: FixtureKind) {
        if VoxelChunk::contains(x, y, z) {
            let pos = self.world_pos(x, y, z);
            self.fixtures.push(Fixture { pos, kind });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pc_worldgen_core::TreeLog;

    #[test]
    fn fixtures_are_written_and_recorded() {
        let mut voxels = VoxelChunk::new();
        let mut host = TreeLog::new();
        let mut chunk = DecoratedChunk::new(PlatPos::new(1, -1), &mut voxels, &mut host);

        chunk.set_ladder(5, 58, 61, 1, Direction::West);
        chunk.set_trap_door(5, 61, 1, Direction::West);
        chunk.set_lamp(2, 70, 2);

        let (fixtures, skipped) = chunk.finish();
        assert_eq!(skipped, 0);
        assert_eq!(fixtures.len(), 5);
        assert_eq!(fixtures[0], Fixture {
            pos: IVec3::new(16 + 5, 58, -16 + 1),
            kind: FixtureKind::Ladder {
                facing: Direction::West
            },
        });
        assert_eq!(fixtures[4].kind, FixtureKind::Lamp);

        assert_eq!(voxels.get(5, 60, 1), Material::Ladder);
        assert_eq!(voxels.get(5, 61, 1), Material::TrapDoor);
        assert_eq!(voxels.get(2, 70, 2), Material::Lamp);
    }

    #[test]
    fn refused_trees_are_counted() {
        let mut voxels = VoxelChunk::new();
        let mut host = TreeLog::new();
        host.obstruct(IVec3::new(3, 66, 3));

        let mut chunk = DecoratedChunk::new(PlatPos::new(0, 0), &mut voxels, &mut host);
        assert!(!chunk.generate_tree(3, 66, 3, TreeKind::Birch));
        assert!(chunk.generate_tree(12, 66, 3, TreeKind::Birch));
        let (fixtures, skipped) = chunk.finish();
        assert!(fixtures.is_empty());
        assert_eq!(skipped, 1);

        assert_eq!(host.trees().len(), 1);
        assert_eq!(host.trees()[0].at, IVec3::new(12, 66, 3));
    }
}
