use std::path::PathBuf;

use pc_core::PlatPos;

use crate::settings::{MAX_BUILDING_FLOORS, MAX_FLOOR_HEIGHT, MIN_FLOOR_HEIGHT};

/// An error raised while loading or validating [`WorldSettings`](crate::WorldSettings).
///
/// Those are always reported before the first chunk is generated.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid RON, or does not describe settings.
    #[error("malformed settings")]
    Parse(#[from] ron::error::SpannedError),
    /// The floor height is too small to fit a story, or too large to fit a cistern.
    #[error(
        "floor height {0} is outside of {min}..={max}",
        min = MIN_FLOOR_HEIGHT,
        max = MAX_FLOOR_HEIGHT
    )]
    FloorHeightOutOfRange(i32),
    /// The maximum number of floors of a building is not positive, or absurdly large.
    #[error("maximum building floors {0} is outside of 1..={max}", max = MAX_BUILDING_FLOORS)]
    MaxFloorsOutOfRange(i32),
    /// The street level leaves no room for the underground structures or the tallest building.
    #[error("street level {street_level} is outside of {min}..={max} for these settings")]
    StreetLevelOutOfRange { street_level: i32, min: i32, max: i32 },
    /// Streets would be adjacent to each other.
    #[error("street spacing {0} must be at least 2")]
    StreetSpacingTooSmall(i32),
    /// The land-use odds are not probabilities, or add up to more than one.
    #[error(
        "park odds {park_odds} and empty odds {empty_odds} must be in 0..=1 and sum to at most 1"
    )]
    OddsOutOfRange { park_odds: f32, empty_odds: f32 },
}

/// An error raised while producing a chunk.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The generator could not be created.
    #[error("invalid world settings")]
    Config(#[from] ConfigError),
    /// The plat was already produced once during this run.
    #[error("plat {0:?} was already produced")]
    AlreadyProduced(PlatPos),
}
