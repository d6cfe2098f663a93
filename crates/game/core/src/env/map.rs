use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

use super::OracleError;
use crate::state::Position;

/// Tile/terrain provider backing the movement rules.
///
/// Implementations must present a stable snapshot for the duration of a
/// single path search.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Returns the terrain at `position`, or `None` when the tile is unknown.
    ///
    /// Errors signal a failing provider rather than a missing tile.
    fn terrain(&self, position: Position) -> Result<Option<TerrainKind>, OracleError>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A coordinate is valid iff `0 <= x < width` and `0 <= y < height`.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Number of tiles, used as the search expansion cap.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Terrain classes known to the movement rules.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerrainKind {
    Ocean,
    DeepOcean,
    Lake,
    Grassland,
    Plains,
    Desert,
    Tundra,
    Forest,
    Jungle,
    Swamp,
    Hills,
    Mountains,
    Glacier,
}

impl TerrainKind {
    pub const fn category(self) -> TerrainCategory {
        use TerrainKind::*;
        match self {
            Ocean | DeepOcean | Lake => TerrainCategory::Water,
            Grassland | Plains | Desert | Tundra => TerrainCategory::Flat,
            Forest | Jungle | Swamp | Hills | Glacier => TerrainCategory::Rough,
            Mountains => TerrainCategory::VeryRough,
        }
    }

    pub const fn is_water(self) -> bool {
        matches!(self.category(), TerrainCategory::Water)
    }

    pub const fn is_land(self) -> bool {
        !self.is_water()
    }

    /// Stable index used by dense per-terrain tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Movement cost category of a terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainCategory {
    Flat,
    Rough,
    VeryRough,
    Water,
}

impl TerrainCategory {
    /// Base cost in whole movement points.
    pub const fn base_points(self) -> u32 {
        match self {
            Self::Flat | Self::Water => 1,
            Self::Rough => 2,
            Self::VeryRough => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn dimensions_reject_negative_and_overflowing_coordinates() {
        let dims = MapDimensions::new(80, 50);
        assert!(dims.contains(Position::new(0, 0)));
        assert!(dims.contains(Position::new(79, 49)));
        assert!(!dims.contains(Position::new(-1, -1)));
        assert!(!dims.contains(Position::new(80, 10)));
        assert!(!dims.contains(Position::new(10, 50)));
        assert_eq!(dims.area(), 4000);
    }

    #[test]
    fn terrain_names_parse_case_insensitively() {
        assert_eq!(
            TerrainKind::from_str("deep_ocean").unwrap(),
            TerrainKind::DeepOcean
        );
        assert_eq!(TerrainKind::from_str("Hills").unwrap(), TerrainKind::Hills);
        assert!(TerrainKind::from_str("lava").is_err());
        assert_eq!(TerrainKind::Grassland.to_string(), "grassland");
    }

    #[test]
    fn categories() {
        assert!(TerrainKind::Lake.is_water());
        assert!(TerrainKind::Tundra.is_land());
        assert_eq!(TerrainKind::Mountains.category(), TerrainCategory::VeryRough);
        assert_eq!(TerrainCategory::Rough.base_points(), 2);
    }
}
