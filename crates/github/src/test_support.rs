//! In-memory [`GitHubApi`] used by the unit tests.
//!
//! [`FakeGitHub`] serves canned payloads, can be told to fail any endpoint
//! with a given HTTP status, and records every call it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use crate::api::GitHubApi;
use crate::context::{Context, RepoRef};
use crate::error::{Error, Result};
use crate::models::{
    ChangedFile, CheckRun, CheckRunParams, ContentFile, IssueUpdate, Label, Member,
    MembershipState, ProjectColumn, TeamMembership,
};

/// GitHub wraps base64 content at this width.
const BASE64_LINE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Endpoint {
    ListFiles,
    GetContent,
    CreateCheckRun,
    UpdateCheckRun,
    ListLabelsOnIssue,
    AddLabels,
    SetLabels,
    AddAssignees,
    CheckAssignee,
    CreateComment,
    ListComments,
    DeleteComment,
    UpdateIssue,
    GetIssue,
    ListTeamMembers,
    GetTeamMembership,
    ListProjectColumns,
    ListRepoProjects,
    ListColumnCards,
}

/// A call received by the fake, with its arguments as JSON.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub endpoint: Endpoint,
    pub args: Value,
}

pub(crate) struct FakeGitHub {
    pub files: Vec<ChangedFile>,
    pub content: String,
    pub labels: Vec<Label>,
    pub comments: Vec<Value>,
    pub issue: Value,
    pub members: Vec<Member>,
    pub membership: MembershipState,
    pub project_columns: Vec<ProjectColumn>,
    pub repo_projects: Vec<Value>,
    pub project_cards: Vec<Value>,
    failures: HashMap<Endpoint, u16>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            content: String::new(),
            labels: Vec::new(),
            comments: Vec::new(),
            issue: json!({}),
            members: Vec::new(),
            membership: MembershipState::Pending,
            project_columns: Vec::new(),
            repo_projects: Vec::new(),
            project_cards: Vec::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes `endpoint` answer with HTTP `status`.
    pub fn failing(mut self, endpoint: Endpoint, status: u16) -> Self {
        self.failures.insert(endpoint, status);
        self
    }

    /// Builds a context for `owner/repo#1` backed by this fake.
    pub fn context(self) -> Context {
        self.into_parts().1
    }

    pub fn context_without_number(self) -> Context {
        Context::new(Arc::new(self), RepoRef::new("owner", "repo"))
    }

    /// Like [`context`](Self::context), but keeps a handle for inspecting calls.
    pub fn into_parts(self) -> (Arc<Self>, Context) {
        let fake = Arc::new(self);
        let ctx = Context::new(fake.clone(), RepoRef::new("owner", "repo")).with_number(1);
        (fake, ctx)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: Endpoint, args: Value) -> Result<()> {
        self.calls.lock().unwrap().push(Call { endpoint, args });
        match self.failures.get(&endpoint) {
            Some(&status) => Err(Error::api(status, format!("fake failure for {endpoint:?}"))),
            None => Ok(()),
        }
    }
}

/// Encodes `text` the way the contents endpoint does.
fn github_base64(text: &str) -> String {
    let encoded = STANDARD.encode(text);
    encoded
        .as_bytes()
        .chunks(BASE64_LINE_WIDTH)
        .map(|line| format!("{}\n", String::from_utf8_lossy(line)))
        .collect()
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn list_pull_request_files(
        &self,
        _repo: &RepoRef,
        pull_number: u64,
    ) -> Result<Vec<ChangedFile>> {
        self.record(Endpoint::ListFiles, json!({ "pull_number": pull_number }))?;
        Ok(self.files.clone())
    }

    async fn get_content(
        &self,
        _repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentFile> {
        self.record(Endpoint::GetContent, json!({ "path": path, "ref": git_ref }))?;
        Ok(ContentFile {
            content: github_base64(&self.content),
            encoding: Some("base64".to_string()),
            path: Some(path.to_string()),
            sha: None,
        })
    }

    async fn create_check_run(
        &self,
        _repo: &RepoRef,
        params: &CheckRunParams,
    ) -> Result<CheckRun> {
        self.record(Endpoint::CreateCheckRun, json!(params))?;
        Ok(CheckRun {
            id: 1,
            name: params.name.clone().unwrap_or_default(),
            head_sha: params.head_sha.clone(),
            status: params.status,
            conclusion: params.conclusion,
            html_url: None,
        })
    }

    async fn update_check_run(
        &self,
        _repo: &RepoRef,
        check_run_id: u64,
        params: &CheckRunParams,
    ) -> Result<CheckRun> {
        self.record(
            Endpoint::UpdateCheckRun,
            json!({ "check_run_id": check_run_id, "params": params }),
        )?;
        Ok(CheckRun {
            id: check_run_id,
            name: params.name.clone().unwrap_or_default(),
            head_sha: None,
            status: params.status,
            conclusion: params.conclusion,
            html_url: None,
        })
    }

    async fn list_labels_on_issue(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
    ) -> Result<Vec<Label>> {
        self.record(
            Endpoint::ListLabelsOnIssue,
            json!({ "issue_number": issue_number }),
        )?;
        Ok(self.labels.clone())
    }

    async fn add_labels(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        self.record(
            Endpoint::AddLabels,
            json!({ "issue_number": issue_number, "labels": labels }),
        )?;
        Ok(Vec::new())
    }

    async fn set_labels(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        self.record(
            Endpoint::SetLabels,
            json!({ "issue_number": issue_number, "labels": labels }),
        )?;
        Ok(Vec::new())
    }

    async fn add_assignees(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        assignees: &[String],
    ) -> Result<Value> {
        self.record(
            Endpoint::AddAssignees,
            json!({ "issue_number": issue_number, "assignees": assignees }),
        )?;
        Ok(json!({}))
    }

    async fn check_assignee(&self, _repo: &RepoRef, assignee: &str) -> Result<()> {
        self.record(Endpoint::CheckAssignee, json!({ "assignee": assignee }))
    }

    async fn create_comment(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<Value> {
        self.record(
            Endpoint::CreateComment,
            json!({ "issue_number": issue_number, "body": body }),
        )?;
        Ok(json!({ "id": 1, "body": body }))
    }

    async fn list_comments(&self, _repo: &RepoRef, issue_number: u64) -> Result<Vec<Value>> {
        self.record(
            Endpoint::ListComments,
            json!({ "issue_number": issue_number }),
        )?;
        Ok(self.comments.clone())
    }

    async fn delete_comment(&self, _repo: &RepoRef, comment_id: u64) -> Result<()> {
        self.record(Endpoint::DeleteComment, json!({ "comment_id": comment_id }))
    }

    async fn update_issue(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        update: &IssueUpdate,
    ) -> Result<Value> {
        self.record(
            Endpoint::UpdateIssue,
            json!({ "issue_number": issue_number, "update": update }),
        )?;
        Ok(self.issue.clone())
    }

    async fn get_issue(&self, _repo: &RepoRef, issue_number: u64) -> Result<Value> {
        self.record(Endpoint::GetIssue, json!({ "issue_number": issue_number }))?;
        Ok(self.issue.clone())
    }

    async fn list_team_members(&self, org: &str, team_slug: &str) -> Result<Vec<Member>> {
        self.record(
            Endpoint::ListTeamMembers,
            json!({ "org": org, "team_slug": team_slug }),
        )?;
        Ok(self.members.clone())
    }

    async fn get_team_membership(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> Result<TeamMembership> {
        self.record(
            Endpoint::GetTeamMembership,
            json!({ "org": org, "team_slug": team_slug, "username": username }),
        )?;
        Ok(TeamMembership {
            state: self.membership,
            role: Some("member".to_string()),
        })
    }

    async fn list_project_columns(&self, project_id: u64) -> Result<Vec<ProjectColumn>> {
        self.record(
            Endpoint::ListProjectColumns,
            json!({ "project_id": project_id }),
        )?;
        Ok(self.project_columns.clone())
    }

    async fn list_repo_projects(&self, _repo: &RepoRef) -> Result<Vec<Value>> {
        self.record(Endpoint::ListRepoProjects, Value::Null)?;
        Ok(self.repo_projects.clone())
    }

    async fn list_column_cards(&self, column_id: u64) -> Result<Vec<Value>> {
        self.record(Endpoint::ListColumnCards, json!({ "column_id": column_id }))?;
        Ok(self.project_cards.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_base64_wraps_lines() {
        let encoded = github_base64(&"x".repeat(100));
        assert!(encoded.lines().all(|line| line.len() <= BASE64_LINE_WIDTH));
        assert!(encoded.lines().count() > 1);
    }
}
