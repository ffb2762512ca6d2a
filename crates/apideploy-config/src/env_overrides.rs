use crate::{DeployConfig, FailurePolicy, LogFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "APIDEPLOY_";

/// Abstraction over environment-variable lookups so tests (and runtimes
/// without a process environment) can supply their own source of overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the APIDEPLOY_ prefix
    /// Used for AWS standard variables (AWS_DEFAULT_REGION, AWS_REGION)
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority) to the config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut DeployConfig, env: &E) -> Result<()> {
    // Region: our own variable first, then the AWS CLI/SDK conventions
    if let Some(region) = get_env_string(env, "REGION")
        .or_else(|| get_raw_env_string(env, "AWS_DEFAULT_REGION"))
        .or_else(|| get_raw_env_string(env, "AWS_REGION"))
    {
        config.region = region;
    }

    if let Some(dir) = get_env_string(env, "SOURCE_DIR") {
        config.source_dir = PathBuf::from(dir);
    }
    if let Some(importer) = get_env_string(env, "IMPORTER") {
        config.importer = PathBuf::from(importer);
    }
    if let Some(policy) = get_env_string(env, "FAILURE_POLICY") {
        config.failure_policy = policy
            .parse::<FailurePolicy>()
            .with_context(|| format!("Invalid {}FAILURE_POLICY value", ENV_PREFIX))?;
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = format
            .parse::<LogFormat>()
            .with_context(|| format!("Invalid {}LOG_FORMAT value", ENV_PREFIX))?;
    }

    Ok(())
}

// Blank values count as unset so they fall through to the next source.
fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|v| !v.trim().is_empty())
}

fn get_raw_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get_raw(key).filter(|v| !v.trim().is_empty())
}
