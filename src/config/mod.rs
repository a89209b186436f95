//! Configuration module for tagbar
//!
//! Holds the tunables shared by every tag input: token limit, commit keys,
//! command prefix, sigils and the mode a search bar starts in. The file is
//! TOML and lives in the user's config directory
//! (`~/.config/tagbar/config.toml` on Linux):
//!
//! ```toml
//! max_tokens = 8
//! commit_keys = ["space", "enter"]
//! command_prefix = "/"
//! initial_mode = "title"
//! min_url_len = 3
//!
//! [sigils]
//! title = "b"
//! text = "f"
//! tag = "t"
//! ```

use crate::TagbarError;
use crate::input::CommitKey;
use crate::mode::{Mode, ModeCycle, SigilConfig};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Token limit used when nothing else is configured
pub const DEFAULT_MAX_TOKENS: usize = 8;

/// Shortest URL the bookmark form accepts by default
pub const DEFAULT_MIN_URL_LEN: usize = 3;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TagbarConfig {
    /// Maximum number of tags per input
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Keys that commit the typed text as a tag
    #[serde(default = "CommitKey::defaults")]
    pub commit_keys: Vec<CommitKey>,

    /// Character introducing a `/x` mode command
    #[serde(default = "default_command_prefix")]
    pub command_prefix: char,

    /// Mode a search bar starts in
    #[serde(default)]
    pub initial_mode: Mode,

    /// Minimum URL length accepted by the bookmark form
    #[serde(default = "default_min_url_len")]
    pub min_url_len: usize,

    /// Command sigil per mode
    #[serde(default)]
    pub sigils: SigilConfig,
}

impl Default for TagbarConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            commit_keys: CommitKey::defaults(),
            command_prefix: ModeCycle::DEFAULT_PREFIX,
            initial_mode: Mode::default(),
            sigils: SigilConfig::default(),
            min_url_len: DEFAULT_MIN_URL_LEN,
        }
    }
}

const fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

const fn default_command_prefix() -> char {
    ModeCycle::DEFAULT_PREFIX
}

const fn default_min_url_len() -> usize {
    DEFAULT_MIN_URL_LEN
}

impl TagbarConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("tagbar").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when no file exists
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load the configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Mode cycle described by the prefix and sigils
    ///
    /// # Errors
    ///
    /// Returns `TagbarError::BuildError` for clashing or invalid sigils.
    pub fn mode_cycle(&self) -> Result<ModeCycle, TagbarError> {
        ModeCycle::new(self.command_prefix, self.sigils)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TagbarConfig::default();
        assert_eq!(config.max_tokens, 8);
        assert_eq!(config.commit_keys, vec![CommitKey::Space, CommitKey::Enter]);
        assert_eq!(config.command_prefix, '/');
        assert_eq!(config.initial_mode, Mode::TitleSearch);
        assert_eq!(config.min_url_len, 3);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "max_tokens = 4").unwrap();
        writeln!(file, "initial_mode = \"tag\"").unwrap();

        let config = TagbarConfig::load_from(&path).unwrap();

        assert_eq!(config.max_tokens, 4);
        assert_eq!(config.initial_mode, Mode::TagSearch);
        assert_eq!(config.commit_keys, CommitKey::defaults());
        assert_eq!(config.sigils, SigilConfig::default());
    }

    #[test]
    fn test_load_sigils_and_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "commit_keys = [\"enter\"]\ncommand_prefix = \":\"\n\n[sigils]\ntag = \"#\"\n",
        )
        .unwrap();

        let config = TagbarConfig::load_from(&path).unwrap();
        let cycle = config.mode_cycle().unwrap();

        assert_eq!(config.commit_keys, vec![CommitKey::Enter]);
        assert_eq!(cycle.resolve_sigil('#'), Some(Mode::TagSearch));
        assert_eq!(cycle.resolve_sigil('b'), Some(Mode::TitleSearch));
        assert_eq!(cycle.prefix(), ':');
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = TagbarConfig {
            max_tokens: 5,
            initial_mode: Mode::TextSearch,
            ..TagbarConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = TagbarConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_tokens = \"many\"").unwrap();

        assert!(TagbarConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_clashing_sigils_rejected() {
        let config = TagbarConfig {
            sigils: SigilConfig { title: 't', text: 'f', tag: 't' },
            ..TagbarConfig::default()
        };
        assert!(matches!(config.mode_cycle(), Err(TagbarError::BuildError(_))));
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Ok(path) = TagbarConfig::config_path() {
            assert!(path.ends_with("tagbar/config.toml"));
        }
    }
}
