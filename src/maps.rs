use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};

/// Background color a map asks the presentation layer to use.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One named map: obstacle layout plus backdrop color.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub obstacles: Vec<Position>,
    pub background: Rgb,
}

impl MapData {
    /// Seeds a grid with this map's obstacles. Runs once at level start.
    pub fn apply(&self, grid: &mut Grid) {
        for &position in &self.obstacles {
            grid.add_obstacle(position);
        }
    }
}

/// Registry of named maps, read-only once constructed.
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    maps: HashMap<String, MapData>,
}

impl MapCatalog {
    /// Returns the built-in maps, laid out for the default 16x16 grid.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::default();

        catalog.insert(
            "open",
            MapData {
                obstacles: Vec::new(),
                background: Rgb {
                    r: 34,
                    g: 85,
                    b: 34,
                },
            },
        );

        catalog.insert(
            "pillars",
            MapData {
                obstacles: vec![
                    Position { x: 5, y: 5 },
                    Position { x: 5, y: 10 },
                    Position { x: 10, y: 5 },
                    Position { x: 10, y: 10 },
                ],
                background: Rgb {
                    r: 30,
                    g: 30,
                    b: 60,
                },
            },
        );

        let mut cross = Vec::new();
        for offset in 2..=5 {
            cross.push(Position { x: offset, y: 8 });
            cross.push(Position { x: 15 - offset, y: 8 });
            cross.push(Position { x: 8, y: offset });
            cross.push(Position {
                x: 8,
                y: 15 - offset,
            });
        }
        catalog.insert(
            "cross",
            MapData {
                obstacles: cross,
                background: Rgb {
                    r: 70,
                    g: 30,
                    b: 30,
                },
            },
        );

        catalog
    }

    /// Parses a catalog from a JSON object of name -> map entries.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let maps: HashMap<String, MapData> = serde_json::from_str(raw)?;
        Ok(Self { maps })
    }

    /// Adds a map under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: &str, map: MapData) {
        self.maps.insert(name.to_owned(), map);
    }

    /// Looks up a map by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MapData> {
        self.maps.get(name)
    }

    /// Returns all map names, sorted for stable listings.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
