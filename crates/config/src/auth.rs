//! GitHub token resolution.
//!
//! Tokens are looked up in this order:
//!
//! 1. Repository-specific token (if configured)
//! 2. Global `github_token` from config (or `MERGEABLE_GITHUB_TOKEN`)
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (returns `None`)

use std::fmt;
use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::Repository;
use crate::error::{ConfigError, Result};

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// The repository entry carries its own token.
    Repository,
    /// The global `github_token` setting.
    Global,
    /// `gh auth token`.
    GhCli,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Repository => "repository",
            Self::Global => "global",
            Self::GhCli => "gh-cli",
        })
    }
}

/// A token together with its [`TokenSource`].
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    token: SecretString,
    source: TokenSource,
}

impl ResolvedToken {
    #[must_use]
    pub fn new(token: SecretString, source: TokenSource) -> Self {
        Self { token, source }
    }

    #[must_use]
    pub fn source(&self) -> TokenSource {
        self.source
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.token
    }

    /// Consumes the value, returning the token for a client.
    #[must_use]
    pub fn into_secret(self) -> SecretString {
        self.token
    }
}

/// Resolves the GitHub token for a specific repository.
///
/// Falls back to the `gh` CLI when neither `repo` nor `global_token` has
/// one. A failing `gh` is logged and treated as "no token".
///
/// # Examples
///
/// ```no_run
/// use mergeable_config::{Repository, TokenSource, auth::resolve_token};
/// use secrecy::SecretString;
///
/// # async fn example() {
/// let repo = Repository::new("mergeability", "mergeable");
/// let global = SecretString::from("ghp_global");
/// let token = resolve_token(&repo, Some(&global)).await;
/// assert_eq!(token.map(|t| t.source()), Some(TokenSource::Global));
/// # }
/// ```
pub async fn resolve_token(
    repo: &Repository,
    global_token: Option<&SecretString>,
) -> Option<ResolvedToken> {
    resolve_token_with(repo, global_token, get_gh_token).await
}

/// Like [`resolve_token`], with the `gh` lookup supplied by the caller.
pub async fn resolve_token_with<F, Fut>(
    repo: &Repository,
    global_token: Option<&SecretString>,
    gh: F,
) -> Option<ResolvedToken>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<SecretString>>>,
{
    let resolved = if let Some(token) = repo.token() {
        Some(ResolvedToken::new(token.clone(), TokenSource::Repository))
    } else if let Some(token) = global_token.filter(|t| !t.expose_secret().trim().is_empty()) {
        Some(ResolvedToken::new(token.clone(), TokenSource::Global))
    } else {
        match gh().await {
            Ok(token) => token.map(|t| ResolvedToken::new(t, TokenSource::GhCli)),
            Err(error) => {
                warn!(%error, "could not read token from gh CLI");
                None
            }
        }
    };

    match &resolved {
        Some(token) => debug!(repo = %repo, source = %token.source(), "resolved GitHub token"),
        None => debug!(repo = %repo, "no GitHub token available, continuing unauthenticated"),
    }
    resolved
}

/// Gets a GitHub token from the `gh` CLI.
///
/// Returns `Ok(None)` when `gh` is not installed, not logged in, or prints
/// nothing.
///
/// # Errors
///
/// Returns an error if `gh` cannot be started or exits with an unexpected
/// failure.
pub async fn get_gh_token() -> Result<Option<SecretString>> {
    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::GhAuthFailed(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!token.is_empty()).then(|| SecretString::from(token)))
}
