use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minefield_core::{BoardConfig, Difficulty};
use serde::Deserialize;

/// Contents of the optional settings file, e.g.
///
/// ```toml
/// difficulty = "intermediate"
/// seed = 1234
///
/// [board]
/// rows = 20
/// cols = 24
/// mines = 80
/// ```
///
/// A `[board]` table wins over `difficulty`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Option<Difficulty>,
    pub board: Option<BoardConfig>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Values given on the command line, each one overriding the settings file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub difficulty: Option<Difficulty>,
    pub custom: Option<BoardConfig>,
    pub seed: Option<u64>,
}

/// Board configuration and optional fixed seed the session starts with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameSetup {
    pub config: BoardConfig,
    pub seed: Option<u64>,
}

impl GameSetup {
    pub fn resolve(settings: Settings, overrides: Overrides) -> Result<Self> {
        let config = overrides
            .custom
            .or(overrides.difficulty.map(Difficulty::config))
            .or(settings.board)
            .or(settings.difficulty.map(Difficulty::config))
            .unwrap_or_default();
        config.validate()?;

        Ok(Self {
            config,
            seed: overrides.seed.or(settings.seed),
        })
    }
}
