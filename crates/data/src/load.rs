use crate::schema::{ConfigPatch, GameConfig};
use crate::text::parse_config_text;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads a complete JSON config and validates it.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let config: GameConfig = load_json(path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn save_game_config(path: &Path, config: &GameConfig) -> anyhow::Result<()> {
    save_json(path, config)
}

/// Reads a JSON patch (any subset of fields) and merges it over `base`.
pub fn load_config_patch(path: &Path, base: &GameConfig) -> anyhow::Result<GameConfig> {
    let patch: ConfigPatch = load_json(path)?;
    patch
        .merged(base)
        .with_context(|| format!("validate {}", path.display()))
}

/// Reads an exported text block and merges it over `base`.
pub fn load_config_text(path: &Path, base: &GameConfig) -> anyhow::Result<GameConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let patch = parse_config_text(&raw).with_context(|| format!("parse {}", path.display()))?;
    patch
        .merged(base)
        .with_context(|| format!("validate {}", path.display()))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let raw = serde_json::to_string_pretty(value).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
