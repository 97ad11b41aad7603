use glam::IVec3;
use pc_core::{Material, PlatPos, VoxelChunk};
use pc_plats::{CityGenerator, LotKind, LotVariant, WorldSettings};
use pc_worldgen_core::{FixtureKind, TreeKind, TreeLog};

/// Parks at the provided positions, streets everywhere else.
fn parks_at(parks: &'static [(i32, i32)]) -> CityGenerator {
    let _ = env_logger::builder().is_test(true).try_init();

    CityGenerator::with_policy(WorldSettings::default(), move |pos: PlatPos| {
        if parks.contains(&(pos.x, pos.z)) {
            LotKind::Park
        } else {
            LotKind::Street
        }
    })
    .unwrap()
}

fn circle_sidewalk(generator: &CityGenerator, pos: PlatPos) -> bool {
    match generator.map().lookup(pos).variant() {
        LotVariant::Park(park) => park.circle_sidewalk,
        other => panic!("expected a park, got {other:?}"),
    }
}

#[test]
fn isolated_park() {
    let generator = parks_at(&[(0, 0)]);
    let mut host = TreeLog::new();
    let chunk = generator.produce(0, 0, &mut host).unwrap();
    let v = &chunk.voxels;

    // The basin.
    assert_eq!(v.count_in_layer(0, Material::Bedrock), 256);
    assert_eq!(v.count_in_layer(48, Material::Stone), 256);
    assert_eq!(v.count_in_layer(49, Material::Cistern), 256);
    assert_eq!(v.get(8, 50, 8), Material::Water);
    assert_eq!(v.get(1, 57, 1), Material::Water);
    assert_eq!(v.get(8, 58, 8), Material::Air);

    // Full walls on every side, up to the ceiling supports.
    for (x, z) in [(0, 8), (15, 8), (8, 0), (8, 15)] {
        for y in 50..63 {
            assert_eq!(v.get(x, y, z), Material::Cistern, "wall at ({x}, {y}, {z})");
        }
    }

    // Center columns and ceiling supports.
    assert_eq!(v.get(8, 55, 4), Material::Cistern);
    assert_eq!(v.get(4, 55, 8), Material::Cistern);
    assert_eq!(v.get(3, 62, 8), Material::Cistern);
    assert_eq!(v.get(8, 62, 8), Material::Air);

    // The cap, pierced by the ladder shaft.
    assert_eq!(v.count_in_layer(63, Material::Cistern), 255);
    assert_eq!(v.count_in_layer(64, Material::Dirt), 255);
    assert_eq!(v.get(1, 65, 1), Material::Grass);

    // Fences and gate posts on every side.
    for (x, z) in [(2, 0), (2, 15), (0, 2), (15, 2), (12, 0), (0, 12)] {
        assert_eq!(v.get(x, 66, z), Material::Fence, "fence at ({x}, {z})");
    }
    for (x, z) in [(6, 0), (9, 0), (0, 6), (15, 9)] {
        assert_eq!(v.get(x, 66, z), Material::Column);
        assert_eq!(v.get(x, 67, z), Material::Column);
    }
    assert_eq!(v.get(6, 66, 1), Material::Column);
    assert_eq!(v.get(14, 66, 9), Material::Column);
    assert_eq!(v.get(7, 66, 0), Material::Air);
    assert_eq!(v.get(8, 66, 15), Material::Air);

    // Sidewalks and trees.
    let pavement = v.count_in_layer(65, Material::Pavement);
    let trees = host.trees();
    if circle_sidewalk(&generator, chunk.pos) {
        assert_eq!(pavement, 49 + 4 * 6);
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].at, IVec3::new(7, 66, 7));
        assert!(matches!(trees[0].kind, TreeKind::BigTree | TreeKind::TallRedwood));
    } else {
        assert_eq!(pavement, 60);
        assert_eq!(trees.len(), 4);
        assert!(trees.iter().all(|t| t.kind == trees[0].kind));
        assert!(matches!(trees[0].kind, TreeKind::Birch | TreeKind::Tree));
    }
    assert_eq!(v.count_in_layer(65, Material::Grass), 256 - pavement - 1);

    // The way down, through the west wall.
    assert_eq!(v.get(4, 57, 1), Material::Cistern);
    assert_eq!(v.get(6, 57, 1), Material::Cistern);
    assert_eq!(v.get(5, 63, 1), Material::Ladder);
    assert_eq!(v.get(5, 66, 1), Material::TrapDoor);

    let ladders = chunk
        .fixtures
        .iter()
        .filter(|f| matches!(f.kind, FixtureKind::Ladder { .. }))
        .count();
    assert_eq!(ladders, 8);
    assert_eq!(chunk.fixtures.last().map(|f| f.pos), Some(IVec3::new(5, 66, 1)));
    assert_eq!(chunk.skipped_decorations, 0);
}

#[test]
fn merged_parks_open_their_shared_edge() {
    // (0, 1) lies east of (0, 0).
    let generator = parks_at(&[(0, 0), (0, 1)]);

    let west = generator.produce(0, 0, &mut TreeLog::new()).unwrap();
    let east = generator.produce(0, 1, &mut TreeLog::new()).unwrap();

    let key = generator.map().lookup(PlatPos::new(0, 0)).key();
    assert!(key.is_some());
    assert_eq!(generator.map().lookup(PlatPos::new(0, 1)).key(), key);
    assert_ne!(generator.map().lookup(PlatPos::new(1, 0)).key(), key);

    // The west plat keeps its west wall, and only has stubs toward the east.
    let v = &west.voxels;
    assert_eq!(v.get(8, 55, 0), Material::Cistern);
    assert_eq!(v.get(3, 55, 15), Material::Cistern);
    assert_eq!(v.get(12, 55, 15), Material::Cistern);
    assert_eq!(v.get(8, 55, 15), Material::Water);
    assert_eq!(v.get(8, 62, 15), Material::Air);
    assert_eq!(v.get(2, 66, 15), Material::Air);
    assert_eq!(v.get(2, 66, 0), Material::Fence);

    // The east plat mirrors it.
    let v = &east.voxels;
    assert_eq!(v.get(8, 55, 15), Material::Cistern);
    assert_eq!(v.get(3, 55, 0), Material::Cistern);
    assert_eq!(v.get(8, 55, 0), Material::Water);
    assert_eq!(v.get(2, 66, 0), Material::Air);
    assert_eq!(v.get(2, 66, 15), Material::Fence);

    // Only the plat with an outward west side gets a way down.
    assert!(west
        .fixtures
        .iter()
        .any(|f| matches!(f.kind, FixtureKind::TrapDoor { .. })));
    assert!(east.fixtures.is_empty());
    assert_eq!(east.voxels.get(5, 57, 1), Material::Water);
    assert_eq!(east.voxels.get(5, 63, 1), Material::Cistern);
}

#[test]
fn construction_order_does_not_matter() {
    let a = parks_at(&[(0, 0), (0, 1)]);
    let b = parks_at(&[(0, 0), (0, 1)]);

    let a0 = a.produce(0, 0, &mut TreeLog::new()).unwrap();
    let a1 = a.produce(0, 1, &mut TreeLog::new()).unwrap();

    let b1 = b.produce(0, 1, &mut TreeLog::new()).unwrap();
    let b0 = b.produce(0, 0, &mut TreeLog::new()).unwrap();

    assert_eq!(a0.voxels, b0.voxels);
    assert_eq!(a1.voxels, b1.voxels);
    assert_eq!(a0.fixtures, b0.fixtures);

    for g in [&a, &b] {
        let k0 = g.map().lookup(PlatPos::new(0, 0)).key();
        let k1 = g.map().lookup(PlatPos::new(0, 1)).key();
        assert!(k0.connects_to(k1));
    }
}

#[test]
fn phase_one_is_repeatable() {
    let generator = parks_at(&[(0, 0)]);
    let lot = generator.map().lookup(PlatPos::new(0, 0));

    let mut first = VoxelChunk::new();
    let mut second = VoxelChunk::new();
    lot.generate_chunk(generator.map(), &mut first);
    lot.generate_chunk(generator.map(), &mut second);
    assert_eq!(first, second);

    // Producing the plat consumes the stream, but phase 1 does not depend on it.
    generator.produce(0, 0, &mut TreeLog::new()).unwrap();
    let mut third = VoxelChunk::new();
    lot.generate_chunk(generator.map(), &mut third);
    assert_eq!(first, third);
}

#[test]
fn refused_trees_do_not_abort_the_chunk() {
    let generator = parks_at(&[(0, 0)]);
    let mut host = TreeLog::refusing();
    let chunk = generator.produce(0, 0, &mut host).unwrap();

    let expected = if circle_sidewalk(&generator, chunk.pos) { 1 } else { 4 };
    assert_eq!(chunk.skipped_decorations, expected);
    assert!(host.trees().is_empty());
    assert_eq!(chunk.voxels.get(5, 66, 1), Material::TrapDoor);
}
