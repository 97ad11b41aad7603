use std::sync::Arc;

use pc_core::PlatPos;
use pc_plats::{CityGenerator, GenerateError};
use pc_worldgen_core::{FinishedChunk, TreeLog, TreePlacement};
use pc_workers::Worker;

/// A request to produce the plat at the provided chunk coordinates.
pub struct ChunkTask {
    pub x: i32,
    pub z: i32,
}

/// A plat that went through both generation phases, along with the trees that were grown in it.
pub struct ProducedPlat {
    pub chunk: FinishedChunk,
    pub trees: Vec<TreePlacement>,
}

/// The output of a [`ChunkWorker`].
pub struct ChunkResult {
    pub pos: PlatPos,
    pub outcome: Result<ProducedPlat, GenerateError>,
}

/// Produces plats on a worker thread.
///
/// Every worker shares the same generator. Trees are recorded in a [`TreeLog`] that is local to
/// the task.
pub struct ChunkWorker {
    generator: Arc<CityGenerator>,
}

impl ChunkWorker {
    pub fn new(generator: Arc<CityGenerator>) -> Self {
        Self { generator }
    }
}

impl Worker for ChunkWorker {
    type Input = ChunkTask;
    type Output = ChunkResult;

    fn run(&mut self, input: ChunkTask) -> ChunkResult {
        let mut host = TreeLog::new();
        let outcome = self
            .generator
            .produce(input.x, input.z, &mut host)
            .map(|chunk| ProducedPlat {
                chunk,
                trees: host.take(),
            });

        ChunkResult {
            pos: PlatPos::new(input.x, input.z),
            outcome,
        }
    }
}
