//! GitHub API facade for mergeable.
//!
//! This crate gives automation code one calling convention for the GitHub
//! endpoints it needs (pull request files, file contents, check runs, labels,
//! assignees, comments, issues, team membership and classic project boards)
//! and one predictable error policy for all of them.
//!
//! # Overview
//!
//! - [`Context`]: the client handle plus repository and issue coordinates
//!   every operation takes
//! - [`GitHubApi`]: the raw endpoint calls, implemented by [`GitHubClient`]
//! - One module per resource holding the operations:
//!   [`pull`], [`content`], [`check`], [`label`], [`issue`], [`comment`],
//!   [`team`] and [`project`]
//! - [`Error`]: failures carrying GitHub's original status and body
//!
//! # Not-found normalization
//!
//! Lookups answer "is it there?", so a `404` is a normal answer for them:
//!
//! | Operation | On `404` |
//! |-----------|----------|
//! | [`content::get_content`] | `None` |
//! | [`issue::check_user_can_be_assigned`] | `None` |
//! | [`issue::get_issues`] | `None` |
//! | [`team::get_membership_for_user_in_org`] | `false` |
//! | [`comment::delete_comment`] | `Ok(())` |
//!
//! Every other operation, and every other status, returns the error exactly
//! as GitHub reported it. Nothing is retried or cached.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use secrecy::SecretString;
//! use mergeable_github::{Context, GitHubClient, RepoRef, comment, label};
//!
//! # async fn example() -> mergeable_github::Result<()> {
//! let token = SecretString::from("ghp_your_token_here".to_string());
//! let client = GitHubClient::new(Some(token)).await?;
//! let ctx = Context::new(Arc::new(client), RepoRef::new("owner", "repo")).with_number(17);
//!
//! let labels = label::list_labels_on_issue(&ctx).await?;
//! if labels.iter().any(|name| name == "wip") {
//!     comment::create_comment(&ctx, "Remove the `wip` label to merge.").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod check;
pub mod client;
pub mod comment;
pub mod content;
pub mod context;
pub mod error;
pub mod issue;
pub mod label;
pub mod models;
pub mod normalize;
pub mod project;
pub mod pull;
pub mod team;

#[cfg(test)]
mod test_support;

pub use api::GitHubApi;
pub use client::GitHubClient;
pub use context::{Context, RepoRef};
pub use error::{Error, NOT_FOUND, Result};
pub use models::{
    ApiResponse, ChangedFile, CheckConclusion, CheckRun, CheckRunOutput, CheckRunParams,
    CheckStatus, ContentFile, FileStatus, IssueState, IssueUpdate, Label, Member,
    MembershipState, ProjectColumn, TeamMembership,
};
pub use normalize::not_found_as;
