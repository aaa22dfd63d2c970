use crate::domain::ServiceDefinition;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_TOML_NAME: &str = "orquestra.toml";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/orquestra")
}

fn default_data_root() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.orquestra").into_owned())
}

fn default_max_attempts() -> u32 {
    5
}

fn default_delay_ms() -> u64 {
    5000
}

fn default_settle_delay_ms() -> u64 {
    5000
}

/// Retry policy applied uniformly to every service healthcheck.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Configuration loaded from orquestra.toml (all fields optional).
#[derive(Debug, Clone, Deserialize)]
pub struct LauncherConfig {
    /// Lean mode: only the backend service, with a reduced image.
    #[serde(default)]
    pub lean_mode: bool,

    /// Parent of every per-service volume directory.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    #[serde(default)]
    pub retry: RetryPolicy,

    /// Pause after starting a container, before the first healthcheck.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            lean_mode: false,
            data_root: default_data_root(),
            retry: RetryPolicy::default(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl LauncherConfig {
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(DEFAULT_CONFIG_TOML_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("lendo config em {:?}", path))?;
        let mut config: LauncherConfig =
            toml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;

        config.data_root = expand_path(&config.data_root);
        Ok(config)
    }
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Creates the data root plus one subdirectory per service key, used as
/// that service's bind-mounted volume root.
pub fn ensure_data_dirs(data_root: &Path, registry: &[ServiceDefinition]) -> Result<()> {
    fs::create_dir_all(data_root).with_context(|| format!("criando {:?}", data_root))?;

    for definition in registry {
        let service_dir = data_root.join(definition.key);
        fs::create_dir_all(&service_dir)
            .with_context(|| format!("criando {:?}", service_dir))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry;

    #[test]
    fn defaults_when_config_file_is_missing() {
        let temp = tempfile::tempdir().unwrap();

        let config = LauncherConfig::load(temp.path()).unwrap();
        assert!(!config.lean_mode);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.delay_ms, 5000);
        assert_eq!(config.settle_delay_ms, 5000);
    }

    #[test]
    fn parses_partial_config() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_TOML_NAME),
            r#"
lean_mode = true
data_root = "/tmp/orquestra-test"

[retry]
max_attempts = 2
"#,
        )
        .unwrap();

        let config = LauncherConfig::load(temp.path()).unwrap();
        assert!(config.lean_mode);
        assert_eq!(config.data_root, PathBuf::from("/tmp/orquestra-test"));
        assert_eq!(config.retry.max_attempts, 2);
        // delay_ms não informado mantém o padrão
        assert_eq!(config.retry.delay_ms, 5000);
    }

    #[test]
    fn rejects_invalid_toml() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(DEFAULT_CONFIG_TOML_NAME), "lean_mode = ").unwrap();

        assert!(LauncherConfig::load(temp.path()).is_err());
    }

    #[test]
    fn creates_one_directory_per_service_key() {
        let temp = tempfile::tempdir().unwrap();
        let data_root = temp.path().join("data");
        let registry = registry(&data_root, false);

        ensure_data_dirs(&data_root, &registry).unwrap();

        for definition in &registry {
            assert!(data_root.join(definition.key).is_dir());
        }
    }
}
