use std::path::PathBuf;

use figment::{providers::Env, Figment};
use serde::{Deserialize, Deserializer};

use crate::constants::mechanics;
use crate::error::ConfigError;
use crate::game::GameOptions;
use crate::map::layout::MapId;

/// Where the game definition comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    /// Fetched from the game service by identifier.
    Remote { game_id: String },
    /// Read from a local JSON file holding the same response envelope.
    File(PathBuf),
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the game service
    pub api_base_url: String,
    pub source: DefinitionSource,
    /// Overrides the map named by the definition
    pub map_id: Option<MapId>,
    pub npc_count: usize,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
    /// Window zoom factor
    pub scale: f32,
}

impl Config {
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            map_override: self.map_id,
            npc_count: self.npc_count,
            seed: self.seed,
        }
    }
}

/// Configuration as read from the environment, before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
    #[serde(default, deserialize_with = "deserialize_optional_string_from_any")]
    game_id: Option<String>,
    definition_path: Option<PathBuf>,
    #[serde(default)]
    map_id: Option<MapId>,
    #[serde(default = "default_npc_count")]
    npc_count: usize,
    seed: Option<u64>,
    #[serde(default = "default_scale")]
    scale: f32,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        // A local file wins over the service when both are given
        let source = match (raw.definition_path, raw.game_id) {
            (Some(path), _) => DefinitionSource::File(path),
            (None, Some(game_id)) if !game_id.trim().is_empty() => DefinitionSource::Remote { game_id },
            _ => return Err(ConfigError::MissingSource),
        };

        Ok(Config {
            api_base_url: raw.api_base_url.trim_end_matches('/').to_string(),
            source,
            map_id: raw.map_id,
            npc_count: raw.npc_count.min(mechanics::MAX_NPCS),
            seed: raw.seed,
            scale: if raw.scale > 0.0 { raw.scale } else { default_scale() },
        })
    }
}

fn default_api_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_npc_count() -> usize {
    mechanics::MAX_NPCS
}

fn default_scale() -> f32 {
    2.0
}

fn deserialize_optional_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Null) | None => Ok(None),
        _ => Err(serde::de::Error::custom("Expected string, number, or null")),
    }
}

/// Extracts a [`Config`] from any figment.
pub fn extract_config(figment: Figment) -> Result<Config, ConfigError> {
    let raw: RawConfig = figment.extract().map_err(Box::new)?;
    Config::try_from(raw)
}

/// Loads configuration from `MAZE_CHASE_*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    extract_config(Figment::new().merge(Env::prefixed("MAZE_CHASE_")))
}

/// Create a minimal config for testing
#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        api_base_url: default_api_base_url(),
        source: DefinitionSource::File(PathBuf::from("definition.json")),
        map_id: None,
        npc_count: mechanics::MAX_NPCS,
        seed: Some(7),
        scale: default_scale(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_game_id() {
        let config = extract_config(Figment::new().merge(("game_id", "abc-123"))).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(
            config.source,
            DefinitionSource::Remote {
                game_id: "abc-123".to_string()
            }
        );
        assert_eq!(config.npc_count, 4);
        assert_eq!(config.scale, 2.0);
        assert!(config.seed.is_none());
        assert!(config.map_id.is_none());
    }

    #[test]
    fn test_numeric_game_id() {
        let config = extract_config(Figment::new().merge(("game_id", 42))).unwrap();
        assert_eq!(config.source, DefinitionSource::Remote { game_id: "42".to_string() });
    }

    #[test]
    fn test_missing_source() {
        let result = extract_config(Figment::new());
        assert!(matches!(result, Err(ConfigError::MissingSource)));
    }

    #[test]
    fn test_file_source_wins() {
        let figment = Figment::new()
            .merge(("game_id", "abc"))
            .merge(("definition_path", "game.json"));
        let config = extract_config(figment).unwrap();
        assert_eq!(config.source, DefinitionSource::File(PathBuf::from("game.json")));
    }

    #[test]
    fn test_overrides() {
        let figment = Figment::new()
            .merge(("game_id", "abc"))
            .merge(("map_id", "3"))
            .merge(("npc_count", 9))
            .merge(("seed", 99))
            .merge(("api_base_url", "http://example.test/"));
        let config = extract_config(figment).unwrap();
        assert_eq!(config.map_id, Some(MapId::Three));
        assert_eq!(config.npc_count, mechanics::MAX_NPCS);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.api_base_url, "http://example.test");
    }

    #[test]
    fn test_game_options() {
        let options = test_config().game_options();
        assert_eq!(options.npc_count, 4);
        assert_eq!(options.seed, Some(7));
        assert!(options.map_override.is_none());
    }
}
