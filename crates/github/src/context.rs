//! The call context shared by every facade operation.

use std::fmt;
use std::sync::Arc;

use crate::api::GitHubApi;
use crate::error::{Error, Result};

/// Coordinates of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    repo: String,
}

impl RepoRef {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the repository name in `"owner/repo"` format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The client handle and coordinates a facade operation acts on.
///
/// A context is immutable once built. Cloning it is cheap: the client handle
/// is shared, so the same context can drive concurrent operations.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use mergeable_github::{Context, GitHubClient, RepoRef, label};
///
/// # async fn example() -> mergeable_github::Result<()> {
/// let client = GitHubClient::new(None).await?;
/// let ctx = Context::new(Arc::new(client), RepoRef::new("rust-lang", "rust"))
///     .with_number(42);
///
/// let names = label::list_labels_on_issue(&ctx).await?;
/// println!("labels: {names:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Context {
    client: Arc<dyn GitHubApi>,
    repo: RepoRef,
    number: Option<u64>,
}

impl Context {
    /// Creates a context for a repository, without an issue number.
    #[must_use]
    pub fn new(client: Arc<dyn GitHubApi>, repo: RepoRef) -> Self {
        Self {
            client,
            repo,
            number: None,
        }
    }

    /// Returns this context addressing issue or pull request `number`.
    #[must_use]
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Returns a copy of this context addressing another issue of the same
    /// repository.
    #[must_use]
    pub fn for_issue(&self, number: u64) -> Self {
        self.clone().with_number(number)
    }

    #[must_use]
    pub fn client(&self) -> &dyn GitHubApi {
        self.client.as_ref()
    }

    #[must_use]
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Returns the issue or pull request number, if the context carries one.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.number
    }

    /// Returns the issue number an issue-scoped `operation` needs.
    pub(crate) fn require_number(&self, operation: &'static str) -> Result<u64> {
        self.number.ok_or(Error::MissingIssueNumber { operation })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("repo", &self.repo)
            .field("number", &self.number)
            .finish_non_exhaustive()
    }
}
