use pc_core::{Direction, PlatPos, Sides};

use crate::{Lot, PlatMap};

/// The sides of a lot that open onto the same connected region.
///
/// Looking at the neighbors of a lot materializes them if they were never looked up before.
/// This is required for connectivity to be decided the same way regardless of the order in
/// which plats are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    connected: Sides,
}

impl Neighbors {
    /// Looks around the lot at the provided position.
    pub fn new(map: &PlatMap, pos: PlatPos) -> Self {
        Self::of(map, &map.lookup(pos))
    }

    /// Looks around the provided lot.
    #[profiling::function]
    pub fn of(map: &PlatMap, lot: &Lot) -> Self {
        let mut connected = Sides::empty();

        for dir in Direction::ALL {
            let neighbor = map.lookup(lot.pos().neighbor(dir));
            if lot.key().connects_to(neighbor.key()) {
                connected |= dir.side();
            }
        }

        Self { connected }
    }

    /// Returns whether the neighbor in the provided direction is part of the same region.
    #[inline]
    pub fn connected(self, dir: Direction) -> bool {
        self.connected.has(dir)
    }

    /// Returns the set of connected sides.
    #[inline]
    pub fn sides(self) -> Sides {
        self.connected
    }

    #[inline]
    pub fn to_west(self) -> bool {
        self.connected(Direction::West)
    }

    #[inline]
    pub fn to_east(self) -> bool {
        self.connected(Direction::East)
    }

    #[inline]
    pub fn to_north(self) -> bool {
        self.connected(Direction::North)
    }

    #[inline]
    pub fn to_south(self) -> bool {
        self.connected(Direction::South)
    }
}
