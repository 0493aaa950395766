//! The raw GitHub endpoints the facade is built on.
//!
//! [`GitHubApi`] has one method per REST endpoint. Implementations make a
//! single request and report GitHub's answer as-is: a decoded body on
//! success, an [`Error`](crate::Error) carrying the original status
//! otherwise. Shaping results and interpreting "not found" is left to the
//! facade operations.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::RepoRef;
use crate::error::Result;
use crate::models::{
    ChangedFile, CheckRun, CheckRunParams, ContentFile, IssueUpdate, Label, Member,
    ProjectColumn, TeamMembership,
};

#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /repos/{owner}/{repo}/pulls/{pull_number}/files`, all pages.
    async fn list_pull_request_files(
        &self,
        repo: &RepoRef,
        pull_number: u64,
    ) -> Result<Vec<ChangedFile>>;

    /// `GET /repos/{owner}/{repo}/contents/{path}`
    async fn get_content(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentFile>;

    /// `POST /repos/{owner}/{repo}/check-runs`
    async fn create_check_run(&self, repo: &RepoRef, params: &CheckRunParams)
    -> Result<CheckRun>;

    /// `PATCH /repos/{owner}/{repo}/check-runs/{check_run_id}`
    async fn update_check_run(
        &self,
        repo: &RepoRef,
        check_run_id: u64,
        params: &CheckRunParams,
    ) -> Result<CheckRun>;

    /// `GET /repos/{owner}/{repo}/issues/{issue_number}/labels`
    async fn list_labels_on_issue(&self, repo: &RepoRef, issue_number: u64)
    -> Result<Vec<Label>>;

    /// `POST /repos/{owner}/{repo}/issues/{issue_number}/labels`
    async fn add_labels(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>>;

    /// `PUT /repos/{owner}/{repo}/issues/{issue_number}/labels`
    async fn set_labels(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>>;

    /// `POST /repos/{owner}/{repo}/issues/{issue_number}/assignees`
    async fn add_assignees(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        assignees: &[String],
    ) -> Result<Value>;

    /// `GET /repos/{owner}/{repo}/assignees/{assignee}`, answered with
    /// `204` when the user can be assigned and `404` when not.
    async fn check_assignee(&self, repo: &RepoRef, assignee: &str) -> Result<()>;

    /// `POST /repos/{owner}/{repo}/issues/{issue_number}/comments`
    async fn create_comment(&self, repo: &RepoRef, issue_number: u64, body: &str)
    -> Result<Value>;

    /// `GET /repos/{owner}/{repo}/issues/{issue_number}/comments`
    async fn list_comments(&self, repo: &RepoRef, issue_number: u64) -> Result<Vec<Value>>;

    /// `DELETE /repos/{owner}/{repo}/issues/comments/{comment_id}`
    async fn delete_comment(&self, repo: &RepoRef, comment_id: u64) -> Result<()>;

    /// `PATCH /repos/{owner}/{repo}/issues/{issue_number}`
    async fn update_issue(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        update: &IssueUpdate,
    ) -> Result<Value>;

    /// `GET /repos/{owner}/{repo}/issues/{issue_number}`
    async fn get_issue(&self, repo: &RepoRef, issue_number: u64) -> Result<Value>;

    /// `GET /orgs/{org}/teams/{team_slug}/members`
    async fn list_team_members(&self, org: &str, team_slug: &str) -> Result<Vec<Member>>;

    /// `GET /orgs/{org}/teams/{team_slug}/memberships/{username}`
    async fn get_team_membership(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> Result<TeamMembership>;

    /// `GET /projects/{project_id}/columns`
    async fn list_project_columns(&self, project_id: u64) -> Result<Vec<ProjectColumn>>;

    /// `GET /repos/{owner}/{repo}/projects`
    async fn list_repo_projects(&self, repo: &RepoRef) -> Result<Vec<Value>>;

    /// `GET /projects/columns/{column_id}/cards`
    async fn list_column_cards(&self, column_id: u64) -> Result<Vec<Value>>;
}
