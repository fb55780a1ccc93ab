use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    /// host:port
    pub address: String,
    pub password: String,
    #[serde(default)]
    pub auto_reconnect: bool,
}

#[derive(Deserialize, Debug)]
struct ServerConfigMap {
    configs: HashMap<String, ServerConfig>,
}

pub const ENV_VAR_KEY: &str = "RCON_CONFIG_PATH";

/// Looks up a server entry in the file named by `RCON_CONFIG_PATH`.
/// Returns `Ok(None)` when the variable is unset.
pub fn load_config_from_env(config_name: Option<&str>) -> Result<Option<ServerConfig>> {
    match std::env::var(ENV_VAR_KEY) {
        Ok(path) => {
            log::debug!("Found environment variable {}: {}", ENV_VAR_KEY, path);
            load_config(Path::new(&path), config_name).map(Some)
        }
        Err(_) => {
            log::warn!("Environment variable {} not set", ENV_VAR_KEY);
            Ok(None)
        }
    }
}

/// Picks `config_name` from the file, or its only entry when no name is given.
pub fn load_config(path: &Path, config_name: Option<&str>) -> Result<ServerConfig> {
    let file = File::open(path)
        .with_context(|| format!("failed to open config file {}", path.display()))?;
    let mut map: ServerConfigMap = serde_json::from_reader(file)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    let (name, config) = match config_name {
        Some(name) => match map.configs.remove(name) {
            Some(config) => (name.to_string(), config),
            None => bail!("config '{}' not found in {}", name, path.display()),
        },
        None if map.configs.len() == 1 => match map.configs.into_iter().next() {
            Some(entry) => entry,
            None => bail!("no configs defined in {}", path.display()),
        },
        None if map.configs.is_empty() => bail!("no configs defined in {}", path.display()),
        None => bail!("{} defines several configs; pick one with --config-name", path.display()),
    };

    log::info!("Using config: {} ({})", name, config.address);
    Ok(config)
}
