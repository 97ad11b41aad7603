use std::sync::Arc;

use glam::IVec3;
use pc_core::{Direction, Material, PlatPos, VoxelChunk};
use pc_plats::{CityGenerator, LandUse, LotKind, LotState, LotVariant, WorldSettings};
use pc_worldgen_core::{Fixture, FixtureKind, TreeKind, TreeLog};

/// A single 2x2 building parcel anchored at (1, 1), surrounded by streets.
struct OneParcel;

impl LandUse for OneParcel {
    fn lot_kind(&self, pos: PlatPos) -> LotKind {
        if (1..=2).contains(&pos.x) && (1..=2).contains(&pos.z) {
            LotKind::Building
        } else {
            LotKind::Street
        }
    }

    fn parcel_anchor(&self, pos: PlatPos) -> PlatPos {
        if self.lot_kind(pos) == LotKind::Building {
            PlatPos::new(1, 1)
        } else {
            pos
        }
    }
}

fn ladders(fixtures: &[Fixture]) -> impl Iterator<Item = Direction> + '_ {
    fixtures.iter().filter_map(|f| match f.kind {
        FixtureKind::Ladder { facing } => Some(facing),
        _ => None,
    })
}

#[test]
fn street_row_between_empty_lots() {
    let generator = CityGenerator::with_policy(WorldSettings::default(), |pos: PlatPos| {
        if pos.x == 0 {
            LotKind::Street
        } else {
            LotKind::Empty
        }
    })
    .unwrap();

    let chunk = generator.produce(0, 0, &mut TreeLog::new()).unwrap();
    let v = &chunk.voxels;

    // Road and substrate.
    assert_eq!(v.count_in_layer(0, Material::Bedrock), 256);
    assert_eq!(v.count_in_layer(56, Material::Cistern), 256);
    assert!(v.count_in_layer(60, Material::Cistern) >= 255);
    assert_eq!(v.get(8, 63, 8), Material::Dirt);
    assert_eq!(v.get(8, 65, 8), Material::Asphalt);
    assert_eq!(v.get(8, 66, 8), Material::Air);

    // The sewer is walled toward the empty lots and open along the street.
    assert_eq!(v.get(0, 58, 8), Material::Cistern);
    assert_eq!(v.get(15, 58, 8), Material::Cistern);
    assert_eq!(v.get(8, 58, 0), Material::Air);
    assert_eq!(v.get(8, 57, 0), Material::Water);
    assert_eq!(v.get(8, 57, 15), Material::Water);
    assert_eq!(v.get(3, 57, 8), Material::Air);

    // Sidewalks with curbs on the south and north sides.
    for z in 0..VoxelChunk::WIDTH {
        assert_eq!(v.get(1, 65, z), Material::Pavement);
        assert_eq!(v.get(1, 66, z), Material::Pavement);
        assert_eq!(v.get(2, 66, z), Material::Curb);
        assert_eq!(v.get(13, 66, z), Material::Curb);
    }

    // One lamp per sidewalk.
    let lamps: Vec<IVec3> = chunk
        .fixtures
        .iter()
        .filter(|f| f.kind == FixtureKind::Lamp)
        .map(|f| f.pos)
        .collect();
    assert_eq!(lamps, [IVec3::new(1, 70, 8), IVec3::new(14, 70, 8)]);
    assert_eq!(v.get(1, 67, 8), Material::Column);
}

#[test]
fn street_corner_is_paved() {
    // (0, 0) only continues north and east.
    let generator = CityGenerator::with_policy(WorldSettings::default(), |pos: PlatPos| {
        if (pos.x == 0 && pos.z >= 0) || (pos.z == 0 && pos.x >= 0) {
            LotKind::Street
        } else {
            LotKind::Empty
        }
    })
    .unwrap();

    let chunk = generator.produce(0, 0, &mut TreeLog::new()).unwrap();
    let v = &chunk.voxels;

    assert_eq!(v.get(1, 66, 1), Material::Pavement);
    assert_eq!(v.get(2, 66, 8), Material::Curb);
    assert_eq!(v.get(8, 66, 2), Material::Curb);
    assert_eq!(v.get(2, 66, 1), Material::Pavement);
    assert_eq!(v.get(13, 66, 8), Material::Air);
}

#[test]
fn buildings_share_their_parcel() {
    let generator = CityGenerator::with_policy(WorldSettings::default(), OneParcel).unwrap();

    let positions = [(2, 2), (1, 1), (2, 1), (1, 2)].map(|(x, z)| PlatPos::new(x, z));
    let chunks: Vec<_> = positions
        .iter()
        .map(|pos| generator.produce(pos.x, pos.z, &mut TreeLog::new()).unwrap())
        .collect();

    let anchor = generator.map().lookup(PlatPos::new(1, 1));
    let LotVariant::Building(building) = anchor.variant() else {
        panic!("the anchor should be a building");
    };
    for pos in positions {
        let lot = generator.map().lookup(pos);
        assert_eq!(lot.key(), anchor.key());
        assert_eq!(lot.variant(), anchor.variant());
        assert_eq!(generator.map().state(pos), Some(LotState::Phase2Done));
    }

    let roof_y = 65 + building.floors * 4;
    for chunk in &chunks {
        let v = &chunk.voxels;
        assert_eq!(v.count_in_layer(61, Material::Floor), 256);
        assert!(v.count_in_layer(roof_y, Material::Roof) >= 255);
        assert_eq!(v.highest_y(8, 8), Some(roof_y));
    }

    // (1, 1) has exterior walls on its south and west sides only.
    let v = &chunks[1].voxels;
    assert_eq!(v.get(0, 66, 8), Material::Wall);
    assert_eq!(v.get(8, 66, 0), Material::Wall);
    assert_eq!(v.get(15, 66, 8), Material::Air);
    assert_eq!(v.get(8, 66, 15), Material::Air);
    assert_eq!(v.get(0, 67, 1), Material::Glass);
    assert_eq!(v.get(0, roof_y + 1, 8), Material::Wall);
    assert_eq!(v.get(15, roof_y + 1, 8), Material::Air);
    assert!(ladders(&chunks[1].fixtures).all(|d| d == Direction::West));

    // (2, 2) climbs along its east side, the first exterior one after west and south.
    assert!(ladders(&chunks[0].fixtures).all(|d| d == Direction::East));
    let ladder_count = ladders(&chunks[0].fixtures).count() as i32;
    assert_eq!(ladder_count, roof_y - 62);
}

#[test]
fn same_seed_same_city() {
    let settings = WorldSettings {
        seed: 42,
        ..WorldSettings::default()
    };
    let a = CityGenerator::new(settings.clone()).unwrap();
    let b = CityGenerator::new(settings).unwrap();

    let mut positions = Vec::new();
    for x in -4..4 {
        for z in -4..4 {
            positions.push(PlatPos::new(x, z));
        }
    }

    let produce = |generator: &CityGenerator, pos: PlatPos| {
        let mut host = TreeLog::new();
        let chunk = generator.produce(pos.x, pos.z, &mut host).unwrap();
        (chunk, host.take())
    };

    let forward: Vec<_> = positions.iter().map(|&pos| produce(&a, pos)).collect();
    let backward: Vec<_> = positions.iter().rev().map(|&pos| produce(&b, pos)).collect();

    for ((ca, ta), (cb, tb)) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(ca.pos, cb.pos);
        assert_eq!(ca.voxels.as_bytes(), cb.voxels.as_bytes(), "plat {:?}", ca.pos);
        assert_eq!(ca.fixtures, cb.fixtures);
        assert_eq!(ta, tb);
    }

    // The default policy is not degenerate.
    let kinds: Vec<LotKind> = positions
        .iter()
        .map(|&pos| a.map().lookup(pos).kind())
        .collect();
    assert!(kinds.contains(&LotKind::Street));
    assert!(kinds.iter().any(|&k| k != LotKind::Street));
}

#[test]
fn concurrent_lookups_share_one_lot() {
    let generator = CityGenerator::new(WorldSettings::default()).unwrap();
    let pos = PlatPos::new(5, 7);

    let lots: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| generator.map().lookup(pos)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(lots.iter().all(|lot| Arc::ptr_eq(lot, &lots[0])));
}

#[test]
fn concurrent_production_claims_each_plat_once() {
    let generator = CityGenerator::new(WorldSettings::default()).unwrap();

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let generator = &generator;
                s.spawn(move || {
                    let mut ok = 0;
                    for x in -3..3 {
                        for z in -3..3 {
                            // Every thread walks the same plats, starting at different places.
                            let x = (x + i + 3i32).rem_euclid(6) - 3;
                            if generator.produce(x, z, &mut TreeLog::new()).is_ok() {
                                ok += 1;
                            }
                        }
                    }
                    ok
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().sum::<i32>(), 36);
    for x in -3..3 {
        for z in -3..3 {
            assert_eq!(
                generator.map().state(PlatPos::new(x, z)),
                Some(LotState::Phase2Done)
            );
        }
    }
}

#[test]
fn empty_lots_are_left_to_grass() {
    let generator =
        CityGenerator::with_policy(WorldSettings::default(), |_: PlatPos| LotKind::Empty).unwrap();

    let mut planted = 0;
    for x in 0..64 {
        let pos = PlatPos::new(x, 0);
        let mut host = TreeLog::new();
        let chunk = generator.produce(pos.x, pos.z, &mut host).unwrap();
        let v = &chunk.voxels;

        assert_eq!(v.count_in_layer(0, Material::Bedrock), 256);
        assert_eq!(v.count_in_layer(60, Material::Stone), 256);
        assert_eq!(v.count_in_layer(61, Material::Dirt), 256);
        assert_eq!(v.count_in_layer(64, Material::Dirt), 256);
        assert_eq!(v.count_in_layer(65, Material::Grass), 256);
        assert_eq!(v.count_in_layer(66, Material::Air), 256);
        assert!(chunk.fixtures.is_empty());

        let trees = host.take();
        assert!(trees.len() <= 1);
        for tree in trees {
            let local = tree.at - pos.origin();
            assert_eq!(local.y, 66);
            assert!((3..=12).contains(&local.x) && (3..=12).contains(&local.z));
            assert!(matches!(tree.kind, TreeKind::Birch | TreeKind::Tree));
            planted += 1;
        }
    }

    // About one lot in two grows a tree.
    assert!((12..=52).contains(&planted), "{planted} trees");
}

#[test]
fn manholes_lead_down_to_the_sewer() {
    let generator =
        CityGenerator::with_policy(WorldSettings::default(), |_: PlatPos| LotKind::Street).unwrap();

    let manhole = |pos: PlatPos| match generator.map().lookup(pos).variant() {
        LotVariant::Street(street) => street.manhole,
        other => panic!("expected a street, got {other:?}"),
    };

    let positions: Vec<PlatPos> = (0..400).map(|i| PlatPos::new(i / 20, i % 20)).collect();
    let count = positions.iter().filter(|&&pos| manhole(pos)).count();
    assert!((60..=140).contains(&count), "{count} manholes");

    let with = *positions.iter().find(|&&pos| manhole(pos)).unwrap();
    let without = *positions.iter().find(|&&pos| !manhole(pos)).unwrap();

    // Streets all around: no sidewalks and no lamps, only the manhole.
    let chunk = generator.produce(with.x, with.z, &mut TreeLog::new()).unwrap();
    let v = &chunk.voxels;
    assert_eq!(v.get(10, 65, 10), Material::TrapDoor);
    for y in 57..65 {
        assert_eq!(v.get(10, y, 10), Material::Ladder);
    }
    assert_eq!(v.get(10, 56, 10), Material::Cistern);
    assert_eq!(v.get(9, 65, 10), Material::Asphalt);

    assert!(ladders(&chunk.fixtures).all(|d| d == Direction::West));
    assert_eq!(ladders(&chunk.fixtures).count(), 8);
    let hatch = chunk.fixtures.last().unwrap();
    assert_eq!(hatch.pos, with.origin() + IVec3::new(10, 65, 10));
    assert_eq!(
        hatch.kind,
        FixtureKind::TrapDoor {
            facing: Direction::West
        }
    );

    let chunk = generator.produce(without.x, without.z, &mut TreeLog::new()).unwrap();
    assert_eq!(chunk.voxels.get(10, 65, 10), Material::Asphalt);
    assert_eq!(chunk.voxels.get(10, 60, 10), Material::Cistern);
    assert!(chunk.fixtures.is_empty());
}
