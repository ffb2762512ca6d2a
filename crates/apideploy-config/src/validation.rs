// Configuration validation
//
// Runs once at startup, before the source directory is read

use crate::*;
use anyhow::{bail, Result};
use tracing::warn;

pub fn validate_config(config: &DeployConfig) -> Result<()> {
    if config.region.trim().is_empty() {
        bail!(
            "region is required: set {}REGION or AWS_DEFAULT_REGION, or pass --region",
            ENV_PREFIX
        );
    }

    validate_paths(config)?;
    validate_log_config(&config.log)?;

    Ok(())
}

fn validate_paths(config: &DeployConfig) -> Result<()> {
    if config.source_dir.as_os_str().is_empty() {
        bail!("source_dir must not be empty");
    }

    if config.importer.as_os_str().is_empty() {
        bail!("importer must not be empty");
    }

    if config.source_dir.is_relative() {
        warn!(
            source_dir = %config.source_dir.display(),
            "source_dir is relative; it resolves against the working directory"
        );
    }

    Ok(())
}

pub(crate) fn validate_log_config(config: &LogConfig) -> Result<()> {
    let level = config.level.trim();
    if level.is_empty() {
        bail!("log.level must not be empty");
    }

    // Full filter directives (`info,apideploy_core=debug`) are checked by the subscriber
    let is_directive = level.contains('=') || level.contains(',');
    if !is_directive && level != "off" && level.parse::<tracing::Level>().is_err() {
        bail!(
            "log.level '{}' is not one of trace, debug, info, warn, error, off",
            level
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid() -> DeployConfig {
        let mut config = DeployConfig::from_platform_defaults(Platform::Local);
        config.region = "us-east-1".to_string();
        config
    }

    #[test]
    fn test_validate_region() {
        assert!(validate_config(&valid()).is_ok());

        let mut missing = valid();
        missing.region = String::new();
        let err = validate_config(&missing).unwrap_err();
        assert!(err.to_string().contains("region is required"));
    }

    #[test]
    fn test_validate_paths() {
        let mut config = valid();
        config.importer = PathBuf::new();
        assert!(validate_config(&config).is_err());

        let mut config = valid();
        config.source_dir = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = valid();
        config.log.level = "verbose".to_string();
        assert!(validate_config(&config).is_err());

        config.log.level = "WARN".to_string();
        assert!(validate_config(&config).is_ok());

        config.log.level = "info,apideploy_core=trace".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
