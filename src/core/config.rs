//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.carehub/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::model::Audience;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CarehubConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub operator: OperatorConfig,
    #[serde(default)]
    pub inbox: InboxConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_audience: Option<Audience>,
    pub fixtures_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OperatorConfig {
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InboxConfig {
    pub append_sent_messages: Option<bool>,
    pub mark_read_on_open: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_OPERATOR_NAME: &str = "Sarah Jenkins";
pub const DEFAULT_OPERATOR_ROLE: &str = "Center Director";
pub const DEFAULT_APPEND_SENT_MESSAGES: bool = true;
pub const DEFAULT_MARK_READ_ON_OPEN: bool = false;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub audience: Audience,
    /// `None` = use the built-in demo conversations.
    pub fixtures_path: Option<PathBuf>,
    pub operator_name: String,
    pub operator_role: String,
    pub append_sent_messages: bool,
    pub mark_read_on_open: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&CarehubConfig::default(), &CliOverrides::default())
    }
}

/// Values given on the command line. `None` = flag not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub audience: Option<Audience>,
    pub fixtures: Option<PathBuf>,
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

/// Returns `~/.carehub/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".carehub"))
}

/// Returns the path to `~/.carehub/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.carehub/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CarehubConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CarehubConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CarehubConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CarehubConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CarehubConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CarehubConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# CareHub Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_audience = "parent"          # "parent" or "support"
# fixtures_file = "conversations.json"  # JSON array of conversations, relative to ~/.carehub/

# [operator]
# name = "Sarah Jenkins"             # Or set CAREHUB_OPERATOR_NAME
# role = "Center Director"           # Or set CAREHUB_OPERATOR_ROLE

# [inbox]
# append_sent_messages = true        # Show sent messages in the thread
# mark_read_on_open = false          # Clear the unread badge when a conversation is opened
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
pub fn resolve(config: &CarehubConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Audience: CLI → env → config → default
    let audience = cli
        .audience
        .or_else(|| {
            std::env::var("CAREHUB_AUDIENCE")
                .ok()
                .and_then(|s| Audience::parse(&s))
        })
        .or(config.general.start_audience)
        .unwrap_or_default();

    // Fixtures: CLI → env → config (relative to ~/.carehub/)
    let fixtures_path = cli
        .fixtures
        .clone()
        .or_else(|| std::env::var("CAREHUB_FIXTURES").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .fixtures_file
                .as_deref()
                .map(resolve_fixtures_file)
        });

    let operator_name = std::env::var("CAREHUB_OPERATOR_NAME")
        .ok()
        .or_else(|| config.operator.name.clone())
        .unwrap_or_else(|| DEFAULT_OPERATOR_NAME.to_string());

    let operator_role = std::env::var("CAREHUB_OPERATOR_ROLE")
        .ok()
        .or_else(|| config.operator.role.clone())
        .unwrap_or_else(|| DEFAULT_OPERATOR_ROLE.to_string());

    ResolvedConfig {
        audience,
        fixtures_path,
        operator_name,
        operator_role,
        append_sent_messages: config
            .inbox
            .append_sent_messages
            .unwrap_or(DEFAULT_APPEND_SENT_MESSAGES),
        mark_read_on_open: config
            .inbox
            .mark_read_on_open
            .unwrap_or(DEFAULT_MARK_READ_ON_OPEN),
    }
}

/// Absolute paths are used as-is; relative ones live under `~/.carehub/`.
fn resolve_fixtures_file(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CarehubConfig::default();
        assert!(config.general.start_audience.is_none());
        assert!(config.operator.name.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CarehubConfig {
            general: GeneralConfig {
                start_audience: Some(Audience::Support),
                fixtures_file: Some("/tmp/chats.json".to_string()),
            },
            inbox: InboxConfig {
                append_sent_messages: Some(false),
                mark_read_on_open: Some(true),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.fixtures_path, Some(PathBuf::from("/tmp/chats.json")));
        assert!(!resolved.append_sent_messages);
        assert!(resolved.mark_read_on_open);
    }

    #[test]
    fn test_resolve_cli_audience_wins() {
        let config = CarehubConfig {
            general: GeneralConfig {
                start_audience: Some(Audience::Support),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            audience: Some(Audience::Parent),
            fixtures: Some(PathBuf::from("/srv/fixtures.json")),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.audience, Audience::Parent);
        assert_eq!(
            resolved.fixtures_path,
            Some(PathBuf::from("/srv/fixtures.json"))
        );
    }

    #[test]
    fn test_relative_fixtures_file_lives_in_config_dir() {
        let path = resolve_fixtures_file("conversations.json");
        assert!(path.ends_with("conversations.json"));
        if let Some(dir) = config_dir() {
            assert!(path.starts_with(dir));
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
start_audience = "support"
fixtures_file = "chats.json"

[operator]
name = "Dana Ortiz"
role = "Owner"

[inbox]
append_sent_messages = false
"#;
        let config: CarehubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.start_audience, Some(Audience::Support));
        assert_eq!(config.general.fixtures_file.as_deref(), Some("chats.json"));
        assert_eq!(config.operator.name.as_deref(), Some("Dana Ortiz"));
        assert_eq!(config.inbox.append_sent_messages, Some(false));
        assert_eq!(config.inbox.mark_read_on_open, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[operator]
role = "Owner"
"#;
        let config: CarehubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.operator.role.as_deref(), Some("Owner"));
        assert!(config.operator.name.is_none());
        assert!(config.general.fixtures_file.is_none());
    }

    #[test]
    fn test_unknown_audience_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nstart_audience = \"staff\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_generate_default_config_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        generate_default_config(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.general.start_audience.is_none());
        assert!(config.inbox.append_sent_messages.is_none());
    }
}
