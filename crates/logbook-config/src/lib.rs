//! Configuration management for logbook.
//!
//! Parses `logbook.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.source_dir`
//! - `routes.post_prefix`
//! - `routes.home_label`
//!
//! ## Example
//!
//! ```toml
//! [content]
//! source_dir = "content/posts"
//!
//! [routes]
//! post_prefix = "/post/"
//! home_label = "Home"
//!
//! [defaults]
//! title = "Untitled"
//! read_time = "5 min read"
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "logbook.toml";

/// Default content directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "content/posts";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Route configuration.
    pub routes: RoutesConfig,
    /// Metadata defaults applied when front matter omits a field.
    pub defaults: DefaultsConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding the journal's markdown documents.
    pub source_dir: PathBuf,
}

/// Route configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Prefix of post routes; a post lives at `{post_prefix}{slug}`.
    pub post_prefix: String,
    /// Label of the root breadcrumb entry.
    pub home_label: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            post_prefix: "/post/".to_owned(),
            home_label: "Home".to_owned(),
        }
    }
}

/// Metadata defaults applied when a document's front matter omits a field.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Title for documents without one.
    pub title: String,
    /// Read time for documents without one.
    pub read_time: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            title: "Untitled".to_owned(),
            read_time: "5 min read".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.source_dir`").
        field: String,
        /// Error message (e.g., "${`JOURNAL_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `logbook.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            routes: RoutesConfig::default(),
            defaults: DefaultsConfig::default(),
            content_resolved: ContentConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_routes()?;
        self.validate_defaults()?;
        Ok(())
    }

    /// Validate route configuration.
    fn validate_routes(&self) -> Result<(), ConfigError> {
        let prefix = &self.routes.post_prefix;
        if !prefix.starts_with('/') || !prefix.ends_with('/') || prefix.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "routes.post_prefix must start and end with '/' (got {prefix:?})"
            )));
        }
        require_non_empty(&self.routes.home_label, "routes.home_label")?;
        Ok(())
    }

    /// Validate metadata defaults.
    fn validate_defaults(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.defaults.title, "defaults.title")?;
        require_non_empty(&self.defaults.read_time, "defaults.read_time")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(source_dir, "content.source_dir")?);
        }
        self.routes.post_prefix = expand::expand_env(&self.routes.post_prefix, "routes.post_prefix")?;
        self.routes.home_label = expand::expand_env(&self.routes.home_label, "routes.home_label")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = self
            .content
            .source_dir
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_DIR);
        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(source_dir),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/test/content/posts")
        );
        assert_eq!(config.routes.post_prefix, "/post/");
        assert_eq!(config.routes.home_label, "Home");
        assert_eq!(config.defaults.title, "Untitled");
        assert_eq!(config.defaults.read_time, "5 min read");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.routes.post_prefix, "/post/");
        assert_eq!(config.defaults.title, "Untitled");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[content]
source_dir = "journal"

[routes]
post_prefix = "/notes/"
home_label = "Index"

[defaults]
title = "Draft"
read_time = "3 min read"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/project/journal")
        );
        assert_eq!(config.routes.post_prefix, "/notes/");
        assert_eq!(config.routes.home_label, "Index");
        assert_eq!(config.defaults.title, "Draft");
        assert_eq!(config.defaults.read_time, "3 min read");
    }

    #[test]
    fn test_resolve_paths_default_source_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/project/content/posts")
        );
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere")),
        });

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/project/content/posts")
        );
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: LOGBOOK_TEST_JOURNAL is only touched by this test, so parallel tests never race on it
        unsafe {
            std::env::set_var("LOGBOOK_TEST_JOURNAL", "/srv/journal");
        }

        let toml = r#"
[content]
source_dir = "${LOGBOOK_TEST_JOURNAL}/posts"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/srv/journal/posts")
        );

        // SAFETY: LOGBOOK_TEST_JOURNAL is only touched by this test
        unsafe {
            std::env::remove_var("LOGBOOK_TEST_JOURNAL");
        }
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content]\nsource_dir = \"posts\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.content_resolved.source_dir,
            temp_dir.path().join("posts")
        );
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/logbook.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[routes\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let msg = result.unwrap_err().to_string();
        for expected in expected_substrings {
            assert!(msg.contains(expected), "{msg:?} should contain {expected:?}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_post_prefix_needs_slashes() {
        let mut config = Config::default();
        config.routes.post_prefix = "post".to_owned();
        assert_validation_error(&config, &["routes.post_prefix"]);

        config.routes.post_prefix = "/post".to_owned();
        assert_validation_error(&config, &["routes.post_prefix"]);

        config.routes.post_prefix = "/".to_owned();
        assert_validation_error(&config, &["routes.post_prefix"]);
    }

    #[test]
    fn test_validate_empty_defaults() {
        let mut config = Config::default();
        config.defaults.title = "  ".to_owned();
        assert_validation_error(&config, &["defaults.title", "cannot be empty"]);

        let mut config = Config::default();
        config.defaults.read_time = String::new();
        assert_validation_error(&config, &["defaults.read_time"]);
    }

    #[test]
    fn test_validate_empty_home_label() {
        let mut config = Config::default();
        config.routes.home_label = String::new();
        assert_validation_error(&config, &["routes.home_label"]);
    }
}
