//! Map layout loader.
//!
//! Maps are a fill terrain, optional glyph rows and explicit tile overrides,
//! applied in that order:
//!
//! ```ron
//! (
//!     dimensions: (6, 3),
//!     fill: grassland,
//!     rows: [
//!         "..~~..",
//!         ".h~~m.",
//!         "......",
//!     ],
//!     tiles: [(0, 0, forest)],
//! )
//! ```
//!
//! Glyphs: `.` grassland, `p` plains, `d` desert, `t` tundra, `f` forest,
//! `j` jungle, `s` swamp, `h` hills, `m` mountains, `a` glacier, `~` ocean,
//! `:` deep ocean, `l` lake, `?` unknown.

use std::path::Path;

use anyhow::{Context, anyhow};
use march_core::{MapDimensions, MapSnapshot, Position, TerrainKind};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default = "default_fill")]
    fill: TerrainKind,
    #[serde(default)]
    rows: Vec<String>,
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>,
}

fn default_fill() -> TerrainKind {
    TerrainKind::Grassland
}

pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<MapSnapshot> {
        let data: MapDataRon = ron::from_str(content).context("Failed to parse map RON")?;
        let (width, height) = data.dimensions;
        anyhow::ensure!(width > 0 && height > 0, "Map dimensions must be non-zero");

        let dimensions = MapDimensions::new(width, height);
        let mut map = MapSnapshot::filled(dimensions, data.fill);

        anyhow::ensure!(
            data.rows.len() <= height as usize,
            "Map has {} rows but height is {height}",
            data.rows.len()
        );
        for (y, row) in data.rows.iter().enumerate() {
            anyhow::ensure!(
                row.chars().count() <= width as usize,
                "Row {y} is wider than the map"
            );
            for (x, glyph) in row.chars().enumerate() {
                let terrain = glyph_terrain(glyph)
                    .ok_or_else(|| anyhow!("Unknown map glyph '{glyph}' at ({x}, {y})"))?;
                map.set(Position::new(x as i32, y as i32), terrain);
            }
        }

        for (x, y, terrain) in data.tiles {
            let position = Position::new(x, y);
            anyhow::ensure!(
                dimensions.contains(position),
                "Tile {position} lies outside the map"
            );
            map.set(position, Some(terrain));
        }

        Ok(map)
    }
}

/// `Some(None)` marks an unknown tile.
fn glyph_terrain(glyph: char) -> Option<Option<TerrainKind>> {
    use TerrainKind::*;
    let terrain = match glyph {
        '.' => Grassland,
        'p' => Plains,
        'd' => Desert,
        't' => Tundra,
        'f' => Forest,
        'j' => Jungle,
        's' => Swamp,
        'h' => Hills,
        'm' => Mountains,
        'a' => Glacier,
        '~' => Ocean,
        ':' => DeepOcean,
        'l' => Lake,
        '?' => return Some(None),
        _ => return None,
    };
    Some(Some(terrain))
}
