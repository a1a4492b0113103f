//! Built-in maze layouts.
//!
//! `0` is floor, anything else is a wall.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Identifier of a built-in maze. Unknown identifiers resolve to [`MapId::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapId {
    One,
    Two,
    Three,
}

impl MapId {
    pub const DEFAULT: MapId = MapId::One;

    /// Resolves an identifier, substituting the default map for anything unknown.
    pub fn resolve(id: &str) -> MapId {
        id.parse().unwrap_or_else(|_| {
            warn!(map_id = id, fallback = %MapId::DEFAULT, "Unknown map identifier, using default map");
            MapId::DEFAULT
        })
    }

    /// The raw cell rows of this map.
    pub fn rows(self) -> &'static [&'static [u8]] {
        match self {
            MapId::One => MAP_ONE,
            MapId::Two => MAP_TWO,
            MapId::Three => MAP_THREE,
        }
    }

    pub fn palette(self) -> MapPalette {
        match self {
            MapId::One => MapPalette {
                wall: [92, 64, 51, 255],
                floor: [196, 164, 120, 255],
            },
            MapId::Two => MapPalette {
                wall: [54, 84, 60, 255],
                floor: [170, 190, 140, 255],
            },
            MapId::Three => MapPalette {
                wall: [60, 60, 92, 255],
                floor: [160, 160, 200, 255],
            },
        }
    }
}

impl Default for MapId {
    fn default() -> Self {
        MapId::DEFAULT
    }
}

impl FromStr for MapId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MapId::One),
            "2" => Ok(MapId::Two),
            "3" => Ok(MapId::Three),
            other => Err(format!("unknown map id '{other}'")),
        }
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            MapId::One => "1",
            MapId::Two => "2",
            MapId::Three => "3",
        };
        f.write_str(id)
    }
}

/// Accepts both `"2"` and `2`, falling back to the default map for unknown values.
impl<'de> Deserialize<'de> for MapId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => MapId::resolve(&s),
            Value::Number(n) => MapId::resolve(&n.to_string()),
            _ => MapId::DEFAULT,
        })
    }
}

/// Wall and floor colours (RGBA) for a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPalette {
    pub wall: [u8; 4],
    pub floor: [u8; 4],
}

const MAP_ONE: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    &[1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1],
    &[1, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1],
    &[1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
    &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 1],
    &[1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    &[1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const MAP_TWO: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 0, 0, 1, 0, 0, 1],
    &[1, 0, 1, 0, 0, 1, 0, 1],
    &[1, 0, 1, 1, 1, 1, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1],
];

const MAP_THREE: &[&[u8]] = &[
    &[1, 1, 1, 1, 1],
    &[1, 0, 0, 1, 1],
    &[1, 1, 0, 0, 1],
    &[1, 0, 0, 0, 1],
    &[1, 1, 1, 1, 1],
];
