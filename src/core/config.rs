//! Catalog file location. Precedence: `--file` flag, `CARNET_CATALOG`
//! env var, `catalog_path` in `~/.carnet/config.toml`, then the default
//! `~/.carnet/recipes.json`. A missing config file is not an error.

use crate::core::error::CarnetError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct CarnetConfig {
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

pub fn load_config() -> Result<CarnetConfig, CarnetError> {
    let Some(home) = home_dir() else {
        return Ok(CarnetConfig::default());
    };
    let path = home.join(".carnet").join("config.toml");
    if !path.is_file() {
        return Ok(CarnetConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| CarnetError::Config(format!("{}: {}", path.display(), e)))
}

pub fn resolve_catalog_path(flag: Option<PathBuf>) -> Result<PathBuf, CarnetError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = env::var_os("CARNET_CATALOG") {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = load_config()?.catalog_path {
        return Ok(path);
    }
    home_dir()
        .map(|h| h.join(".carnet").join("recipes.json"))
        .ok_or_else(|| {
            CarnetError::Config("cannot determine home directory; pass --file".to_string())
        })
}
