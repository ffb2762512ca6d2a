// apideploy-config - Configuration for the API definition importer
//
// Supports configuration from multiple sources:
// 1. Environment variables (highest priority)
// 2. Config file path from APIDEPLOY_CONFIG env var (or an explicit --config path)
// 3. Default config file location (./apideploy.toml)
// 4. Platform-specific defaults (lowest priority)
//
// CLI flags are applied by the binary on top of the loaded config, before validation.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod env_overrides;
mod platform;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, ENV_PREFIX};
pub use platform::{Platform, PlatformDefaults};
pub use sources::StdEnvSource;

pub const DEFAULT_SOURCE_DIR: &str = "/usr/src/";
pub const DEFAULT_IMPORTER: &str = "/root/aws-apigateway-importer/aws-api-import.sh";

/// Resolved configuration for one deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// AWS region handed to the importer. Required, no default.
    pub region: String,
    pub source_dir: PathBuf,
    pub importer: PathBuf,
    pub failure_policy: FailurePolicy,
    pub log: LogConfig,
}

/// What the dispatcher does after an import fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep going through the remaining files.
    #[default]
    Continue,
    /// Halt the pass at the first failed import.
    StopOnFirstFailure,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Continue => write!(f, "continue"),
            FailurePolicy::StopOnFirstFailure => write!(f, "stop"),
        }
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "stop" | "stop_on_first_failure" | "abort" => Ok(FailurePolicy::StopOnFirstFailure),
            _ => anyhow::bail!("Unsupported failure policy: {}. Supported: continue, stop", s),
        }
    }
}

/// Logging configuration shared by the CLI and the Lambda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// Platform defaults plus `APIDEPLOY_LOG_*` overrides, no config file.
    pub fn load() -> Result<Self> {
        let platform = Platform::detect();
        let mut config = DeployConfig::from_platform_defaults(platform);
        apply_env_overrides(&mut config, &StdEnvSource)?;
        validation::validate_log_config(&config.log)?;
        Ok(config.log)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Unsupported log format: {}. Supported: text, json", s),
        }
    }
}

/// On-disk TOML layout. Every field is optional so a file only needs to
/// carry what it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importer: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<FailurePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
}

impl DeployConfig {
    pub fn from_platform_defaults(platform: Platform) -> Self {
        let defaults = platform.defaults();
        Self {
            region: String::new(),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            importer: PathBuf::from(DEFAULT_IMPORTER),
            failure_policy: FailurePolicy::Continue,
            log: LogConfig {
                level: defaults.log_level.to_string(),
                format: defaults.log_format,
            },
        }
    }

    /// Overlay values present in a config file.
    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(region) = file.region {
            self.region = region;
        }
        if let Some(source_dir) = file.source_dir {
            self.source_dir = source_dir;
        }
        if let Some(importer) = file.importer {
            self.importer = importer;
        }
        if let Some(policy) = file.failure_policy {
            self.failure_policy = policy;
        }
        if let Some(log) = file.log {
            if let Some(level) = log.level {
                self.log.level = level;
            }
            if let Some(format) = log.format {
                self.log.format = format;
            }
        }
    }

    /// Load defaults, config file and env overrides without validating.
    ///
    /// The CLI uses this so its flags can fill in values (such as the
    /// region) before `validate` runs.
    pub fn load_layers(config_path: Option<&Path>) -> Result<Self> {
        sources::load_layers(Platform::detect(), config_path, &StdEnvSource)
    }

    /// Same as `load_layers` with an explicit platform and env source (useful for testing)
    pub fn load_layers_with<E: EnvSource>(
        platform: Platform,
        config_path: Option<&Path>,
        env: &E,
    ) -> Result<Self> {
        sources::load_layers(platform, config_path, env)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!(
            "continue".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::Continue
        );
        assert_eq!(
            "stop".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::StopOnFirstFailure
        );
        assert_eq!(
            "Stop_On_First_Failure".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::StopOnFirstFailure
        );
        assert!("retry".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_defaults_have_no_region() {
        let config = DeployConfig::from_platform_defaults(Platform::Local);
        assert!(config.region.is_empty());
        assert_eq!(config.source_dir, PathBuf::from("/usr/src/"));
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn test_merge_only_overrides_present_fields() {
        let mut config = DeployConfig::from_platform_defaults(Platform::Local);
        let file: ConfigFile = toml::from_str(
            r#"
            region = "eu-west-1"

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        config.merge(file);

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.importer, PathBuf::from(DEFAULT_IMPORTER));
    }

    #[test]
    fn test_unknown_file_keys_are_rejected() {
        let parsed = toml::from_str::<ConfigFile>("regoin = \"us-east-1\"");
        assert!(parsed.is_err());
    }
}
