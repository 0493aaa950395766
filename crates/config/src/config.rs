//! Core configuration struct and loading logic.

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::repository::Repository;

/// Environment variable overriding [`Config::github_token`].
pub const ENV_GITHUB_TOKEN: &str = "MERGEABLE_GITHUB_TOKEN";

/// Environment variable overriding [`Config::api_url`].
pub const ENV_API_URL: &str = "MERGEABLE_API_URL";

/// The configuration for talking to GitHub.
///
/// Tokens are held as [`SecretString`], so `Debug` output never shows them.
///
/// # Examples
///
/// ```
/// use mergeable_config::{Config, Repository};
/// use secrecy::SecretString;
///
/// let config = Config {
///     repositories: vec![Repository::new("mergeability", "mergeable")],
///     github_token: Some(SecretString::from("ghp_xxx")),
///     api_url: None,
/// };
/// assert!(config.validate().is_ok());
/// assert!(!format!("{config:?}").contains("ghp_xxx"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Repositories the tool acts on.
    ///
    /// Repositories can be specified in short format (`"owner/repo"`) or
    /// full format with optional token override.
    #[serde(default)]
    pub repositories: Vec<Repository>,

    /// Global GitHub token.
    ///
    /// Used for all repositories that don't have a specific token configured.
    /// If not set, the `gh` CLI is asked for one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_token"
    )]
    pub github_token: Option<SecretString>,

    /// API root for GitHub Enterprise, e.g. `https://github.example.com/api/v3`.
    ///
    /// `None` means `https://api.github.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn serialize_token<S>(token: &Option<SecretString>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match token {
        Some(token) => serializer.serialize_some(token.expose_secret()),
        None => serializer.serialize_none(),
    }
}

impl Config {
    /// Creates a new empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations, then applies
    /// environment overrides and validates the result.
    ///
    /// If no configuration file is found, starts from the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read
    /// or parsed, or if the result fails [`validate`](Self::validate).
    pub async fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_file(path),
            None => {
                debug!("no config file found, using defaults");
                Self::default().finish(env_lookup)
            }
        }
    }

    /// Loads `path`, then applies environment overrides and validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails [`validate`](Self::validate).
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_file_with(path, env_lookup)
    }

    /// Like [`load_file`](Self::load_file), with overrides looked up through
    /// `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`load_file`](Self::load_file).
    pub fn load_file_with(
        path: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config file");
        read_config_file::<Self>(path)?.finish(lookup)
    }

    /// Loads configuration from a specific file, without environment
    /// overrides. The file is validated as written; use
    /// [`load_file`](Self::load_file) to validate after overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails [`validate`](Self::validate).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies overrides looked up by environment variable name.
    ///
    /// Empty values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use mergeable_config::Config;
    /// use mergeable_config::config::ENV_API_URL;
    ///
    /// let config = Config::default().with_overrides(|key| {
    ///     (key == ENV_API_URL).then(|| "https://ghe.example.com/api/v3".to_string())
    /// });
    /// assert_eq!(config.api_url.as_deref(), Some("https://ghe.example.com/api/v3"));
    /// ```
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = lookup(ENV_GITHUB_TOKEN) {
            debug!(variable = ENV_GITHUB_TOKEN, "overriding GitHub token");
            self.github_token = Some(SecretString::from(token));
        }
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(variable = ENV_API_URL, url = %url, "overriding API URL");
            self.api_url = Some(url);
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if `api_url` is set but does
    /// not parse as an `http://` or `https://` URL with a host.
    pub fn validate(&self) -> Result<()> {
        let Some(raw) = &self.api_url else {
            return Ok(());
        };
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: raw.clone(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "expected an http or https URL, got scheme '{}'",
                url.scheme()
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        Ok(())
    }

    /// Finds a configured repository by its full name (`"owner/repo"`).
    #[must_use]
    pub fn repository(&self, full_name: &str) -> Option<&Repository> {
        self.repositories
            .iter()
            .find(|r| r.full_name().eq_ignore_ascii_case(full_name))
    }

    fn finish(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = self.with_overrides(lookup);
        config.validate()?;
        Ok(config)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
