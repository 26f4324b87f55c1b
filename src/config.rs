use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grid dimensions observed in the reference configuration.
pub const DEFAULT_GRID_WIDTH: u16 = 16;
pub const DEFAULT_GRID_HEIGHT: u16 = 16;

/// Real-time delay between eating food and the body gaining a segment.
///
/// This runs on the simulation's own clock, deliberately decoupled from the
/// tick interval: at the normal speed roughly 6-7 ticks pass before the new
/// segment appears.
pub const GROWTH_DELAY: Duration = Duration::from_secs(1);

/// Logical grid dimensions passed through the simulation as a named type.
///
/// Makes width vs. height unambiguous at every call site.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Selected game speed, mapping to the fixed tick interval.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Slow,
    Normal,
    Fast,
}

impl SpeedTier {
    /// Returns the tick interval this tier runs at.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(300),
            Self::Normal => Duration::from_millis(150),
            Self::Fast => Duration::from_millis(75),
        }
    }
}

impl FromStr for SpeedTier {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("slow") {
            Ok(Self::Slow)
        } else if value.eq_ignore_ascii_case("normal") {
            Ok(Self::Normal)
        } else if value.eq_ignore_ascii_case("fast") {
            Ok(Self::Fast)
        } else {
            Err(ConfigError::UnknownSpeed {
                value: value.to_owned(),
            })
        }
    }
}

/// Skin identifiers chosen by the presentation layer.
///
/// The simulation never interprets these; they are validated for presence
/// and carried through so the renderer can resolve them against its own
/// asset registry.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SkinSelection {
    pub head: String,
    pub body: String,
    pub tail: String,
    pub food: String,
}

impl Default for SkinSelection {
    fn default() -> Self {
        Self {
            head: "classic".to_owned(),
            body: "classic".to_owned(),
            tail: "classic".to_owned(),
            food: "classic".to_owned(),
        }
    }
}

/// Complete configuration for one simulation session.
///
/// Replaces the process-wide selection state of a typical engine build with
/// an explicit struct handed to [`crate::game::GameState::new`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: GridSize,
    pub speed: SpeedTier,
    pub map: String,
    pub skins: SkinSelection,
}

impl GameConfig {
    /// Checks the configuration is complete enough to start a session.
    ///
    /// Map existence is checked separately against the catalog when the
    /// session is constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::InvalidGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        let selections = [
            ("map", self.map.as_str()),
            ("head skin", self.skins.head.as_str()),
            ("body skin", self.skins.body.as_str()),
            ("tail skin", self.skins.tail.as_str()),
            ("food skin", self.skins.food.as_str()),
        ];
        for (field, value) in selections {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingSelection { field });
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            speed: SpeedTier::Normal,
            map: "open".to_owned(),
            skins: SkinSelection::default(),
        }
    }
}

/// Startup configuration failures. None of these are recoverable mid-run;
/// a session refuses to construct rather than tick with a broken setup.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing or empty {field} selection")]
    MissingSelection { field: &'static str },
    #[error("unknown map '{name}'")]
    UnknownMap { name: String },
    #[error("unrecognized speed tier '{value}' (expected slow, normal, or fast)")]
    UnknownSpeed { value: String },
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidGrid { width: u16, height: u16 },
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, GameConfig, GridSize, SpeedTier};

    #[test]
    fn speed_tiers_map_to_expected_intervals() {
        assert_eq!(SpeedTier::Slow.tick_interval(), Duration::from_millis(300));
        assert_eq!(
            SpeedTier::Normal.tick_interval(),
            Duration::from_millis(150)
        );
        assert_eq!(SpeedTier::Fast.tick_interval(), Duration::from_millis(75));
    }

    #[test]
    fn speed_tier_parses_case_insensitively() {
        assert_eq!("slow".parse::<SpeedTier>().unwrap(), SpeedTier::Slow);
        assert_eq!("Normal".parse::<SpeedTier>().unwrap(), SpeedTier::Normal);
        assert_eq!("FAST".parse::<SpeedTier>().unwrap(), SpeedTier::Fast);
        assert!(matches!(
            "warp".parse::<SpeedTier>(),
            Err(ConfigError::UnknownSpeed { .. })
        ));
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_skin_selection_fails_validation() {
        let mut config = GameConfig::default();
        config.skins.tail = String::new();

        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSelection { field: "tail skin" })
        );
    }

    #[test]
    fn zero_sized_grid_fails_validation() {
        let mut config = GameConfig::default();
        config.grid = GridSize {
            width: 0,
            height: 16,
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn grid_size_counts_cells() {
        let size = GridSize {
            width: 16,
            height: 16,
        };
        assert_eq!(size.total_cells(), 256);
    }
}
