//! Load effect catalogs and game settings from TOML files

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::rules::effect::Effect;
use crate::state::GameSettings;

#[derive(Debug, Default, Serialize, Deserialize)]
struct EffectFile {
    #[serde(default)]
    effects: Vec<Effect>,
}

/// Parse an effect catalog from TOML text
pub fn parse_effects(content: &str) -> Result<Vec<Effect>> {
    let file: EffectFile = toml::from_str(content)?;
    Ok(file.effects)
}

/// Load an effect catalog from a TOML file
pub fn load_effects(path: &Path) -> Result<Vec<Effect>> {
    let content = fs::read_to_string(path)?;
    parse_effects(&content)
}

/// Parse game settings from TOML text
pub fn parse_settings(content: &str) -> Result<GameSettings> {
    Ok(toml::from_str(content)?)
}

/// Load game settings from a TOML file
pub fn load_settings(path: &Path) -> Result<GameSettings> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}
