use pc_core::{Material, PlatPos};
use pc_plats::PlatMap;
use pc_worldgen_core::FixtureKind;

use crate::worker::ProducedPlat;

/// Statistics accumulated over every produced plat.
#[derive(Default)]
pub struct Report {
    plats: usize,
    histogram: [usize; Material::COUNT],
    ladders: usize,
    trap_doors: usize,
    lamps: usize,
    trees: usize,
    skipped_decorations: u32,
}

impl Report {
    pub fn add(&mut self, plat: ProducedPlat) {
        self.plats += 1;

        for (total, count) in self.histogram.iter_mut().zip(plat.chunk.voxels.histogram()) {
            *total += count;
        }

        for fixture in &plat.chunk.fixtures {
            match fixture.kind {
                FixtureKind::Ladder { .. } => self.ladders += 1,
                FixtureKind::TrapDoor { .. } => self.trap_doors += 1,
                FixtureKind::Lamp => self.lamps += 1,
            }
        }

        self.trees += plat.trees.len();
        self.skipped_decorations += plat.chunk.skipped_decorations;
    }

    pub fn log_summary(&self) {
        log::info!("produced {} plats", self.plats);

        let solid: usize = Material::iter_all()
            .filter(|m| m.is_solid())
            .map(|m| self.histogram[m.to_u8() as usize])
            .sum();
        log::info!("solid voxels: {solid}");

        for material in Material::iter_all() {
            let count = self.histogram[material.to_u8() as usize];
            if material == Material::Air || count == 0 {
                continue;
            }
            log::info!("{:>12}: {count}", material.info().name);
        }

        log::info!(
            "fixtures: {} ladders, {} trap doors, {} lamps",
            self.ladders,
            self.trap_doors,
            self.lamps,
        );
        log::info!("trees: {}", self.trees);
        if self.skipped_decorations != 0 {
            log::warn!("{} decorations were skipped", self.skipped_decorations);
        }
    }
}

/// Logs the land use of the plats within `radius` of the origin, north up.
pub fn log_map(map: &PlatMap, radius: i32) {
    for x in (-radius..=radius).rev() {
        let row: String = (-radius..=radius)
            .map(|z| map.lookup(PlatPos::new(x, z)).kind().symbol())
            .collect();
        log::info!("{row}");
    }
}
