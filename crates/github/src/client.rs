//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct, the octocrab-backed
//! implementation of [`GitHubApi`], supporting both authenticated and
//! unauthenticated access.

use async_trait::async_trait;
use octocrab::{FromResponse, Octocrab, Page};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api::GitHubApi;
use crate::context::RepoRef;
use crate::error::{Error, Result};
use crate::models::{
    ChangedFile, CheckRun, CheckRunParams, ContentFile, IssueUpdate, Label, Member,
    ProjectColumn, TeamMembership,
};

/// Page size requested from list endpoints (GitHub's maximum).
const PER_PAGE: u8 = 100;

/// Characters escaped when a caller-supplied value becomes a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
}

const FIRST_PAGE: PageParams = PageParams { per_page: PER_PAGE };

#[derive(Serialize)]
struct LabelsBody<'a> {
    labels: &'a [String],
}

#[derive(Serialize)]
struct AssigneesBody<'a> {
    assignees: &'a [String],
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Encodes a repository file path, keeping its `/` separators.
fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn repo_route(repo: &RepoRef) -> String {
    format!(
        "/repos/{}/{}",
        encode_segment(repo.owner()),
        encode_segment(repo.repo())
    )
}

fn content_route(repo: &RepoRef, path: &str, git_ref: Option<&str>) -> String {
    let route = format!("{}/contents/{}", repo_route(repo), encode_path(path));
    match git_ref {
        Some(git_ref) => format!("{route}?ref={}", encode_segment(git_ref)),
        None => route,
    }
}

fn team_route(org: &str, team_slug: &str) -> String {
    format!(
        "/orgs/{}/teams/{}",
        encode_segment(org),
        encode_segment(team_slug)
    )
}

/// GitHub API client with optional authentication.
///
/// The client supports both authenticated and unauthenticated access.
/// Authenticated clients have higher rate limits (5,000 req/hour vs 60 req/hour)
/// and can access private repositories.
///
/// # Security
///
/// Tokens are stored using [`SecretString`] to prevent accidental logging
/// or exposure in debug output.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use mergeable_github::GitHubClient;
///
/// # async fn example() -> mergeable_github::Result<()> {
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GitHubClient::new(Some(token)).await?;
///
/// let is_valid = client.validate_token().await?;
/// println!("Token valid: {}", is_valid);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    inner: Octocrab,
    /// Whether this client is authenticated.
    authenticated: bool,
}

impl GitHubClient {
    /// Creates a new client for `api.github.com`.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional GitHub token. `None` yields an unauthenticated
    ///   client with lower rate limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client fails to initialize.
    pub async fn new(token: Option<SecretString>) -> Result<Self> {
        Self::build(token, None).await
    }

    /// Creates a new client for a GitHub Enterprise API root such as
    /// `https://github.example.com/api/v3`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URI or the octocrab
    /// client fails to initialize.
    pub async fn with_base_url(token: Option<SecretString>, base_url: &str) -> Result<Self> {
        Self::build(token, Some(base_url)).await
    }

    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    async fn build(token: Option<SecretString>, base_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(base_url) = base_url {
            debug!("using custom API base URL");
            builder = builder.base_uri(base_url)?;
        }

        let authenticated = token.is_some();
        let inner = match token {
            Some(token) => {
                debug!("creating authenticated GitHub client");
                builder.personal_token(token.expose_secret()).build()?
            }
            None => {
                debug!("creating unauthenticated GitHub client");
                builder.build()?
            }
        };

        Ok(Self {
            inner,
            authenticated,
        })
    }

    /// Validates the current token by making a test API call.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if authenticated and token is valid
    /// - `Ok(false)` if not authenticated (no token provided)
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenValidation`] if GitHub rejects the token, and
    /// [`Error::Transport`] if the call could not be made.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> Result<bool> {
        if !self.authenticated {
            debug!("client is not authenticated, skipping validation");
            return Ok(false);
        }

        debug!("validating token by calling /user endpoint");
        match self.inner.current().user().await {
            Ok(user) => {
                debug!(login = %user.login, "token validated successfully");
                Ok(true)
            }
            Err(octocrab::Error::GitHub { source, .. }) => {
                warn!(message = %source.message, "token validation failed");
                Err(Error::TokenValidation {
                    reason: source.message,
                })
            }
            Err(e) => {
                warn!(error = %e, "API error during token validation");
                Err(Error::Transport(e))
            }
        }
    }

    /// Returns whether this client is authenticated.
    ///
    /// This reflects the state at creation time; use
    /// [`validate_token`](Self::validate_token) to check the token is still
    /// accepted.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// GETs `route` and decodes the JSON body.
    ///
    /// A failure keeps its HTTP status even when the body is not GitHub's
    /// error document, so lookups can still recognize a `404`.
    async fn get_json<R: FromResponse>(&self, route: String) -> Result<R> {
        let response = self.inner._get(route).await?;
        let status = response.status();
        let response = octocrab::map_github_error(response)
            .await
            .map_err(|err| Error::from_response(status.as_u16(), status.canonical_reason(), err))?;
        Ok(R::from_response(response).await?)
    }

    /// GETs `route`, whose success carries no body (`204 No Content`).
    async fn get_empty(&self, route: String) -> Result<()> {
        let response = self.inner._get(route).await?;
        let status = response.status();
        octocrab::map_github_error(response)
            .await
            .map_err(|err| Error::from_response(status.as_u16(), status.canonical_reason(), err))?;
        Ok(())
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    #[instrument(skip(self), fields(repo = %repo))]
    async fn list_pull_request_files(
        &self,
        repo: &RepoRef,
        pull_number: u64,
    ) -> Result<Vec<ChangedFile>> {
        let route = format!("{}/pulls/{pull_number}/files", repo_route(repo));
        let first: Page<ChangedFile> = self.inner.get(&route, Some(&FIRST_PAGE)).await?;
        let files = self.inner.all_pages(first).await?;
        debug!(count = files.len(), "listed pull request files");
        Ok(files)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn get_content(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentFile> {
        self.get_json(content_route(repo, path, git_ref)).await
    }

    #[instrument(skip(self, params), fields(repo = %repo))]
    async fn create_check_run(
        &self,
        repo: &RepoRef,
        params: &CheckRunParams,
    ) -> Result<CheckRun> {
        let route = format!("{}/check-runs", repo_route(repo));
        let run: CheckRun = self.inner.post(&route, Some(params)).await?;
        debug!(check_run_id = run.id, "created check run");
        Ok(run)
    }

    #[instrument(skip(self, params), fields(repo = %repo))]
    async fn update_check_run(
        &self,
        repo: &RepoRef,
        check_run_id: u64,
        params: &CheckRunParams,
    ) -> Result<CheckRun> {
        let route = format!("{}/check-runs/{check_run_id}", repo_route(repo));
        Ok(self.inner.patch(&route, Some(params)).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn list_labels_on_issue(
        &self,
        repo: &RepoRef,
        issue_number: u64,
    ) -> Result<Vec<Label>> {
        let route = format!("{}/issues/{issue_number}/labels", repo_route(repo));
        Ok(self.inner.get(&route, Some(&FIRST_PAGE)).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn add_labels(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        let route = format!("{}/issues/{issue_number}/labels", repo_route(repo));
        Ok(self.inner.post(&route, Some(&LabelsBody { labels })).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn set_labels(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        let route = format!("{}/issues/{issue_number}/labels", repo_route(repo));
        Ok(self.inner.put(&route, Some(&LabelsBody { labels })).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn add_assignees(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        assignees: &[String],
    ) -> Result<Value> {
        let route = format!("{}/issues/{issue_number}/assignees", repo_route(repo));
        Ok(self.inner.post(&route, Some(&AssigneesBody { assignees })).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn check_assignee(&self, repo: &RepoRef, assignee: &str) -> Result<()> {
        let route = format!("{}/assignees/{}", repo_route(repo), encode_segment(assignee));
        self.get_empty(route).await
    }

    #[instrument(skip(self, body), fields(repo = %repo))]
    async fn create_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<Value> {
        let route = format!("{}/issues/{issue_number}/comments", repo_route(repo));
        Ok(self.inner.post(&route, Some(&CommentBody { body })).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn list_comments(&self, repo: &RepoRef, issue_number: u64) -> Result<Vec<Value>> {
        let route = format!("{}/issues/{issue_number}/comments", repo_route(repo));
        Ok(self.inner.get(&route, Some(&FIRST_PAGE)).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn delete_comment(&self, repo: &RepoRef, comment_id: u64) -> Result<()> {
        let route = format!("{}/issues/comments/{comment_id}", repo_route(repo));
        let response = self.inner._delete(route, None::<&()>).await?;
        let status = response.status();
        octocrab::map_github_error(response)
            .await
            .map_err(|err| Error::from_response(status.as_u16(), status.canonical_reason(), err))?;
        Ok(())
    }

    #[instrument(skip(self, update), fields(repo = %repo))]
    async fn update_issue(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        update: &IssueUpdate,
    ) -> Result<Value> {
        let route = format!("{}/issues/{issue_number}", repo_route(repo));
        Ok(self.inner.patch(&route, Some(update)).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn get_issue(&self, repo: &RepoRef, issue_number: u64) -> Result<Value> {
        let route = format!("{}/issues/{issue_number}", repo_route(repo));
        self.get_json(route).await
    }

    #[instrument(skip(self))]
    async fn list_team_members(&self, org: &str, team_slug: &str) -> Result<Vec<Member>> {
        let route = format!("{}/members", team_route(org, team_slug));
        Ok(self.inner.get(&route, Some(&FIRST_PAGE)).await?)
    }

    #[instrument(skip(self))]
    async fn get_team_membership(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> Result<TeamMembership> {
        let route = format!(
            "{}/memberships/{}",
            team_route(org, team_slug),
            encode_segment(username)
        );
        self.get_json(route).await
    }

    #[instrument(skip(self))]
    async fn list_project_columns(&self, project_id: u64) -> Result<Vec<ProjectColumn>> {
        let route = format!("/projects/{project_id}/columns");
        Ok(self.inner.get(&route, Some(&FIRST_PAGE)).await?)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn list_repo_projects(&self, repo: &RepoRef) -> Result<Vec<Value>> {
        let route = format!("{}/projects", repo_route(repo));
        Ok(self.inner.get(&route, Some(&FIRST_PAGE)).await?)
    }

    #[instrument(skip(self))]
    async fn list_column_cards(&self, column_id: u64) -> Result<Vec<Value>> {
        let route = format!("/projects/columns/{column_id}/cards");
        Ok(self.inner.get(&route, Some(&FIRST_PAGE)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_unauthenticated_client() {
        let client = GitHubClient::new(None).await.unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn new_authenticated_client() {
        // Creates a client with a token but doesn't validate it
        let token = SecretString::from("fake_token_for_testing".to_string());
        let client = GitHubClient::new(Some(token)).await.unwrap();
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn enterprise_base_url() {
        let client = GitHubClient::with_base_url(None, "https://github.example.com/api/v3")
            .await
            .unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn validate_token_unauthenticated() {
        let client = GitHubClient::new(None).await.unwrap();
        let result = client.validate_token().await.unwrap();
        assert!(!result);
    }

    #[test]
    fn encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("octo-cat_1.0~"), "octo-cat_1.0~");
        assert_eq!(encode_segment("dependabot[bot]"), "dependabot%5Bbot%5D");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn encode_path_keeps_separators() {
        assert_eq!(encode_path(".github/mergeable.yml"), ".github/mergeable.yml");
        assert_eq!(encode_path("/docs/read me.md"), "docs/read%20me.md");
    }

    #[test]
    fn routes() {
        let repo = RepoRef::new("octo", "hello-world");
        assert_eq!(repo_route(&repo), "/repos/octo/hello-world");
        assert_eq!(team_route("octo", "core team"), "/orgs/octo/teams/core%20team");
    }

    #[test]
    fn content_route_encodes_ref() {
        let repo = RepoRef::new("octo", "hello-world");
        assert_eq!(
            content_route(&repo, ".github/mergeable.yml", None),
            "/repos/octo/hello-world/contents/.github/mergeable.yml"
        );
        assert_eq!(
            content_route(&repo, "README.md", Some("feature/x")),
            "/repos/octo/hello-world/contents/README.md?ref=feature%2Fx"
        );
    }
}
