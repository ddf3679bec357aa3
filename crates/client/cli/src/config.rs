//! Environment-driven configuration for the terminal client.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use combat_core::{Attributes, CharacterSnapshot, CombatState, ItemSnapshot, WeaponModifiers};
use combat_runtime::RuntimeConfig;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// JSON [`CharacterSnapshot`] for the player; a demo character otherwise.
    pub player_file: Option<PathBuf>,
    /// JSON [`CharacterSnapshot`] for the opponent; a demo NPC otherwise.
    pub opponent_file: Option<PathBuf>,
    /// JSON [`CombatState`] to resume from.
    pub resume_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub input_buffer: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            player_file: None,
            opponent_file: None,
            resume_file: None,
            log_dir: None,
            input_buffer: 16,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        config.player_file = read_path("COMBAT_PLAYER_FILE");
        config.opponent_file = read_path("COMBAT_OPPONENT_FILE");
        config.resume_file = read_path("COMBAT_RESUME_FILE");
        config.log_dir = read_path("COMBAT_LOG_DIR");

        if let Some(capacity) = read_env::<usize>("COMBAT_INPUT_BUFFER") {
            config.input_buffer = capacity.max(1);
        }

        config
    }

    pub fn load_player(&self) -> Result<CharacterSnapshot, ConfigError> {
        match &self.player_file {
            Some(path) => load_json(path),
            None => Ok(demo_player()),
        }
    }

    pub fn load_opponent(&self) -> Result<Option<CharacterSnapshot>, ConfigError> {
        match &self.opponent_file {
            Some(path) => load_json(path).map(Some),
            None => Ok(Some(demo_opponent())),
        }
    }

    pub fn load_resume(&self) -> Result<Option<CombatState>, ConfigError> {
        self.resume_file.as_deref().map(load_json).transpose()
    }
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn demo_player() -> CharacterSnapshot {
    let mut attributes = Attributes::with_strength(12);
    attributes.gun_accuracy = 60;

    let mut player = CharacterSnapshot::new("player", "Drifter", attributes);
    player.inventory = vec![
        ItemSnapshot::weapon(
            "Colt Revolver",
            WeaponModifiers {
                damage: Some("1d6".into()),
                range: Some(20),
                accuracy: Some(0),
                reliability: Some(95),
                ammunition: Some(6),
                thrown: Some(false),
            },
        ),
        ItemSnapshot::plain("Canteen"),
    ];
    player.equipped_weapon = Some("Colt Revolver".into());
    player
}

pub fn demo_opponent() -> CharacterSnapshot {
    let mut bart = CharacterSnapshot::new("black-bart", "Black Bart", Attributes::with_strength(10));
    bart.is_npc = true;
    bart
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn demo_player_is_armed() {
        let weapon = demo_player()
            .equipped_weapon()
            .expect("weapon data complete")
            .expect("weapon equipped");
        assert_eq!(weapon.name, "Colt Revolver");
        assert_eq!(weapon.ammunition, Some(6));
    }

    #[test]
    fn demo_opponent_is_an_unarmed_npc() {
        let bart = demo_opponent();
        assert!(bart.is_npc);
        assert_eq!(bart.equipped_weapon(), Ok(None));
    }

    #[test]
    fn loads_snapshot_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "id": "npc-7",
                "name": "Deputy",
                "is_npc": true,
                "attributes": {{
                    "speed": 55, "gun_accuracy": 40, "throwing_accuracy": 30,
                    "strength": 11, "base_strength": 11, "bravery": 60, "experience": 20
                }}
            }}"#
        )
        .expect("write");

        let config = CliConfig {
            opponent_file: Some(file.path().to_path_buf()),
            ..CliConfig::default()
        };
        let deputy = config.load_opponent().expect("parses").expect("present");
        assert_eq!(deputy.name, "Deputy");
        assert!(deputy.inventory.is_empty());
        assert_eq!(deputy.attributes.base_strength, 11);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let config = CliConfig {
            player_file: Some(PathBuf::from("/nonexistent/player.json")),
            ..CliConfig::default()
        };
        let error = config.load_player().expect_err("file is missing");
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("/nonexistent/player.json"));
    }

    #[test]
    fn no_resume_by_default() {
        assert_eq!(CliConfig::default().load_resume().expect("no file"), None);
    }
}
