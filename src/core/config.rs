//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mccmd/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::selector::Target;
use crate::core::version::VersionTier;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct McCmdConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Semantic version (`"1.20.4"`) or tier literal (`"1.20+"`).
    pub default_version: Option<String>,
    pub default_target: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub enabled: Option<bool>,
    pub max_entries: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TARGET: &str = "@a";
pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 50;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub version: VersionTier,
    pub target: Target,
    pub history_enabled: bool,
    pub history_max_entries: usize,
    /// Directory holding the history file and log; `None` without a home dir.
    pub data_dir: Option<PathBuf>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub version: Option<String>,
    pub target: Option<String>,
    pub no_history: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.mccmd/`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mccmd"))
}

/// Returns the path to `~/.mccmd/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.mccmd/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `McCmdConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<McCmdConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(McCmdConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<McCmdConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(McCmdConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: McCmdConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# mccmd Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_version = "1.21.5"      # Minecraft version or tier: 1.21.5+, 1.20+, 1.16+, 1.13+, 1.12-
# default_target = "@a"           # Selector or player name (or MCCMD_TARGET env var)

# [history]
# enabled = true
# max_entries = 50
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &McCmdConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &McCmdConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Version: CLI → env → config → default
    let version = cli
        .version
        .clone()
        .or_else(|| env("MCCMD_VERSION"))
        .or_else(|| config.general.default_version.clone())
        .map(|raw| match raw.parse::<VersionTier>() {
            Ok(tier) => tier,
            Err(e) => {
                warn!("{}; using {}", e, VersionTier::default());
                VersionTier::default()
            }
        })
        .unwrap_or_default();

    // Target: CLI → env → config → default
    let target = cli
        .target
        .clone()
        .or_else(|| env("MCCMD_TARGET"))
        .or_else(|| config.general.default_target.clone())
        .and_then(|raw| match raw.parse::<Target>() {
            Ok(target) => Some(target),
            Err(e) => {
                warn!("{}; using {}", e, DEFAULT_TARGET);
                None
            }
        })
        .unwrap_or_default();

    let history_enabled = !cli.no_history && config.history.enabled.unwrap_or(true);

    ResolvedConfig {
        version,
        target,
        history_enabled,
        history_max_entries: config
            .history
            .max_entries
            .unwrap_or(DEFAULT_HISTORY_MAX_ENTRIES),
        data_dir: data_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = McCmdConfig::default();
        assert!(config.general.default_version.is_none());
        assert!(config.history.enabled.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&McCmdConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.version, VersionTier::V1_21_5);
        assert_eq!(resolved.target.to_string(), DEFAULT_TARGET);
        assert!(resolved.history_enabled);
        assert_eq!(resolved.history_max_entries, DEFAULT_HISTORY_MAX_ENTRIES);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = McCmdConfig {
            general: GeneralConfig {
                default_version: Some("1.19.2".to_string()),
                default_target: Some("@p".to_string()),
            },
            history: HistoryConfig {
                enabled: Some(false),
                max_entries: Some(5),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.version, VersionTier::V1_16);
        assert_eq!(resolved.target.to_string(), "@p");
        assert!(!resolved.history_enabled);
        assert_eq!(resolved.history_max_entries, 5);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = McCmdConfig {
            general: GeneralConfig {
                default_version: Some("1.12.2".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "MCCMD_VERSION").then(|| "1.20+".to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.version, VersionTier::V1_20);

        let cli = CliOverrides {
            version: Some("1.13".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.version, VersionTier::V1_13);
    }

    #[test]
    fn test_bad_values_fall_back_to_defaults() {
        let cli = CliOverrides {
            version: Some("snapshot".to_string()),
            target: Some("not a player".to_string()),
            no_history: true,
        };
        let resolved = resolve_with_env(&McCmdConfig::default(), &cli, no_env);
        assert_eq!(resolved.version, VersionTier::default());
        assert_eq!(resolved.target.to_string(), "@a");
        assert!(!resolved.history_enabled);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[history]
max_entries = 10
"#;
        let config: McCmdConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.history.max_entries, Some(10));
        assert!(config.history.enabled.is_none());
        assert!(config.general.default_target.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.general.default_version.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# default_version"));
        // Generated file is all comments, so it parses back to defaults
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.history.max_entries.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\ndefault_version = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
