// Configuration source loading.
//
// Priority order:
// 1. Environment variables (APIDEPLOY_* prefix, plus AWS_DEFAULT_REGION / AWS_REGION)
// 2. Explicit config file path, else APIDEPLOY_CONFIG
// 3. Default config file (./apideploy.toml)
// 4. Platform defaults (based on auto-detected Platform)

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::platform::Platform;
use crate::{ConfigFile, DeployConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "./apideploy.toml";

/// Build the layered config. Validation is left to the caller.
pub(crate) fn load_layers<E: EnvSource>(
    platform: Platform,
    config_path: Option<&Path>,
    env: &E,
) -> Result<DeployConfig> {
    let mut config = DeployConfig::from_platform_defaults(platform);

    if let Some(file_config) = load_from_file(config_path, env)? {
        config.merge(file_config);
    }

    env_overrides::apply_env_overrides(&mut config, env)?;
    Ok(config)
}

fn load_from_file<E: EnvSource>(
    explicit: Option<&Path>,
    env: &E,
) -> Result<Option<ConfigFile>> {
    // An explicitly named file must exist; the default location is optional
    if let Some(path) = explicit {
        return read_config_file(path).map(Some);
    }

    if let Some(path) = env.get("CONFIG") {
        return read_config_file(Path::new(&path))
            .with_context(|| format!("Config named by {}CONFIG could not be loaded", ENV_PREFIX))
            .map(Some);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        return read_config_file(&default_path).map(Some);
    }

    Ok(None)
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    debug!(path = %path.display(), "Reading config file");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Reads the real process environment.
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
