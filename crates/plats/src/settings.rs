//! World-level settings, supplied once when the generator is created.

use std::path::Path;

use pc_core::VoxelChunk;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The smallest supported floor height.
pub const MIN_FLOOR_HEIGHT: i32 = 3;
/// The largest supported floor height.
pub const MAX_FLOOR_HEIGHT: i32 = 8;
/// The largest supported number of floors for a building.
pub const MAX_BUILDING_FLOORS: i32 = 32;

/// The settings of a world.
///
/// Every field has a default, which means that a settings file only needs to mention what it
/// changes. For instance:
///
/// ```ron
/// (
///     seed: 1234,
///     street_level: 70,
///     include_parks: false,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldSettings {
    /// The seed of the world.
    pub seed: u64,
    /// The world-space Y coordinate of the nominal ground plane.
    ///
    /// Ground cover (grass, asphalt) sits one voxel above it.
    pub street_level: i32,
    /// The vertical spacing between two structural floors.
    pub floor_height: i32,
    /// Every `street_spacing`-th row and column of plats is a street.
    pub street_spacing: i32,
    /// The probability for a parcel to become a park.
    pub park_odds: f32,
    /// The probability for a parcel to be left empty.
    pub empty_odds: f32,
    /// Whether parks may be generated at all.
    pub include_parks: bool,
    /// Whether buildings may be generated at all.
    pub include_buildings: bool,
    /// The maximum number of stories of a building.
    pub max_building_floors: i32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            street_level: 64,
            floor_height: 4,
            street_spacing: 4,
            park_odds: 0.25,
            empty_odds: 0.15,
            include_parks: true,
            include_buildings: true,
            max_building_floors: 6,
        }
    }
}

impl WorldSettings {
    /// Parses settings from a RON string.
    ///
    /// The returned settings are *not* validated.
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Loads settings from the RON file at the provided path, and validates them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ret = Self::from_ron(&text)?;
        ret.validate()?;
        Ok(ret)
    }

    /// The depth of a park cistern, measured down from the street level.
    #[inline]
    pub fn cistern_depth(&self) -> i32 {
        self.floor_height * 4
    }

    /// The lowest street level that still leaves room for bedrock and substrate under the
    /// deepest underground structure.
    #[inline]
    pub fn min_street_level(&self) -> i32 {
        self.cistern_depth() + 2
    }

    /// The highest street level that still fits the tallest building, its parapet, and a
    /// floor's worth of headroom under the top of the world.
    #[inline]
    pub fn max_street_level(&self) -> i32 {
        VoxelChunk::HEIGHT - 3 - (self.max_building_floors + 1) * self.floor_height
    }

    /// Checks that the settings describe a world that lots can be drawn into.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FLOOR_HEIGHT..=MAX_FLOOR_HEIGHT).contains(&self.floor_height) {
            return Err(ConfigError::FloorHeightOutOfRange(self.floor_height));
        }

        if !(1..=MAX_BUILDING_FLOORS).contains(&self.max_building_floors) {
            return Err(ConfigError::MaxFloorsOutOfRange(self.max_building_floors));
        }

        let min = self.min_street_level();
        let max = self.max_street_level();
        if !(min..=max).contains(&self.street_level) {
            return Err(ConfigError::StreetLevelOutOfRange {
                street_level: self.street_level,
                min,
                max,
            });
        }

        if self.street_spacing < 2 {
            return Err(ConfigError::StreetSpacingTooSmall(self.street_spacing));
        }

        let unit = 0.0..=1.0;
        if !unit.contains(&self.park_odds)
            || !unit.contains(&self.empty_odds)
            || self.park_odds + self.empty_odds > 1.0
        {
            return Err(ConfigError::OddsOutOfRange {
                park_odds: self.park_odds,
                empty_odds: self.empty_odds,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = WorldSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.cistern_depth(), 16);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let settings = WorldSettings::from_ron("(seed: 1234, street_level: 70)").unwrap();
        assert_eq!(settings.seed, 1234);
        assert_eq!(settings.street_level, 70);
        assert_eq!(settings.floor_height, 4);
        assert!(settings.include_parks);
        settings.validate().unwrap();
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = WorldSettings::from_ron("(sead: 3)").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn street_level_must_fit_the_cistern() {
        let settings = WorldSettings {
            street_level: 10,
            ..WorldSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::StreetLevelOutOfRange { min: 18, .. })
        ));
    }

    #[test]
    fn street_level_must_fit_the_tallest_building() {
        let settings = WorldSettings {
            street_level: 120,
            ..WorldSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::StreetLevelOutOfRange { max: 97, .. })
        ));
    }

    #[test]
    fn floor_height_is_bounded() {
        for floor_height in [0, 2, 9] {
            let settings = WorldSettings {
                floor_height,
                ..WorldSettings::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(ConfigError::FloorHeightOutOfRange(h)) if h == floor_height
            ));
        }
    }

    #[test]
    fn odds_must_be_probabilities() {
        let settings = WorldSettings {
            park_odds: 0.7,
            empty_odds: 0.5,
            ..WorldSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::OddsOutOfRange { .. })
        ));
    }

    #[test]
    fn street_spacing_must_leave_room_for_lots() {
        let settings = WorldSettings {
            street_spacing: 1,
            ..WorldSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::StreetSpacingTooSmall(1))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WorldSettings::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
