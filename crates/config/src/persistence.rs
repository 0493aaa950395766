//! Config file discovery, reading and writing.
//!
//! Files are JSON5 (comments and trailing commas allowed) or plain JSON.
//! Discovery checks, in order:
//!
//! 1. Local: `./mergeable.json5` or `./mergeable.json`
//! 2. User: `~/.config/mergeable/config.json5` or `~/.config/mergeable/config.json`

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{ConfigError, Result};

const LOCAL_FILE_NAMES: &[&str] = &["mergeable.json5", "mergeable.json"];

const USER_CONFIG_DIR: &str = "mergeable";

const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file from the current directory and the user's
/// config directory.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = user_config_dir()
        .inspect_err(|error| debug!(%error, "skipping user config directory"))
        .ok();
    find_config_file_from(Path::new("."), user_dir.as_deref())
}

/// Finds the configuration file in `local_dir`, then in `user_dir`.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use mergeable_config::persistence::find_config_file_from;
///
/// let found = find_config_file_from(Path::new("/srv/bot"), None);
/// ```
#[must_use]
pub fn find_config_file_from(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| {
        let exists = path.is_file();
        trace!(path = %path.display(), exists, "probing config file");
        exists
    })
}

/// Returns the user configuration directory, typically `~/.config/mergeable/`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if it cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a JSON5 or JSON configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    // JSON is valid JSON5
    Ok(serde_json5::from_str(&content)?)
}

/// Writes `config` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written, or if
/// serialization fails.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}
