//! Configuration management for mdpub.
//!
//! Parses `mdpub.toml` configuration files with serde and provides
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
//! - `confluence.base_url`
//! - `confluence.token`
//! - `confluence.token_file` (also `~` expansion)

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Read the access token from this file instead of the configured token.
    pub token_file: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpub.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection settings.
    pub confluence: ConfluenceConfig,
    /// Storage format conversion settings.
    pub convert: ConvertConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Confluence server base URL. A document's `base_url` takes precedence.
    pub base_url: Option<String>,
    /// Personal access token.
    pub token: Option<String>,
    /// File holding the personal access token.
    pub token_file: Option<PathBuf>,
}

/// Storage format conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Code macro theme.
    pub code_theme: String,
    /// Whether code macros show line numbers.
    pub line_numbers: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            code_theme: "Midnight".to_owned(),
            line_numbers: true,
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
        /// Config field path (e.g., "`confluence.token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
    /// Token file could not be read.
    #[error("Cannot read token file {}: {source}", path.display())]
    TokenFile {
        /// Token file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Expand an optional string field in place.
fn expand_field(slot: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(value) = slot {
        *value = expand_env(value, field)?;
    }
    Ok(())
}

/// Expand `${VAR}` and `${VAR:-default}`.
///
/// Strings without `${` are returned as-is, so tokens containing a bare `$`
/// survive untouched.
fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }
    let defaulted = defaulted_vars(value);
    shellexpand::env_with_context(value, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        // `Ok(None)` lets shellexpand fall back to the `:-` default.
        Err(_) if defaulted.contains(&var) => Ok(None),
        Err(e) => Err(e),
    })
    .map(Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}}: {}", e.var_name, e.cause),
    })
}

/// Names of variables referenced as `${VAR:-default}`.
fn defaulted_vars(value: &str) -> Vec<&str> {
    value
        .split("${")
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(inner, _)| inner))
        .filter_map(|inner| inner.split_once(":-").map(|(name, _)| name))
        .collect()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpub.toml` in current directory and parents.
    /// Without any config file, defaults are used.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.confluence.base_url = Some(base_url.clone());
        }
        if let Some(token_file) = &settings.token_file {
            self.confluence.token_file = Some(token_file.clone());
            self.confluence.token = None;
        }
    }

    /// Resolve the access token.
    ///
    /// An inline `token` wins over `token_file`; a token file given on the
    /// command line replaces both. File contents are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TokenFile` if the file cannot be read and
    /// `ConfigError::Validation` if no token is configured or it is empty.
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        let token = if let Some(token) = &self.confluence.token {
            token.trim().to_owned()
        } else if let Some(path) = &self.confluence.token_file {
            std::fs::read_to_string(path)
                .map_err(|source| ConfigError::TokenFile {
                    path: path.clone(),
                    source,
                })?
                .trim()
                .to_owned()
        } else {
            return Err(ConfigError::Validation(
                "no access token: pass a token file or set confluence.token / confluence.token_file"
                    .to_owned(),
            ));
        };
        require_non_empty(&token, "confluence token")?;
        Ok(token)
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
        if let Some(base_url) = &self.confluence.base_url {
            require_non_empty(base_url, "confluence.base_url")?;
            require_http_url(base_url, "confluence.base_url")?;
        }
        if let Some(token) = &self.confluence.token {
            require_non_empty(token, "confluence.token")?;
        }
        require_non_empty(&self.convert.code_theme, "convert.code_theme")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    ///
    /// `token_file` additionally gets a leading `~` replaced by the home
    /// directory, after variables are expanded.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let confluence = &mut self.confluence;
        expand_field(&mut confluence.base_url, "confluence.base_url")?;
        expand_field(&mut confluence.token, "confluence.token")?;
        if let Some(path) = &confluence.token_file {
            let expanded = expand_env(&path.to_string_lossy(), "confluence.token_file")?;
            confluence.token_file =
                Some(PathBuf::from(shellexpand::tilde(&expanded).into_owned()));
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(ref path) = self.confluence.token_file
            && path.is_relative()
        {
            self.confluence.token_file = Some(config_dir.join(path));
        }
    }
}
