//! Issue operations: reading and updating an issue and managing assignees.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;
use crate::models::{ApiResponse, IssueUpdate};
use crate::normalize::not_found_as;

/// Adds `assignees` to the context's issue.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn add_assignees(ctx: &Context, assignees: &[String]) -> Result<()> {
    let issue_number = ctx.require_number("add_assignees")?;
    ctx.client()
        .add_assignees(ctx.repo(), issue_number, assignees)
        .await?;
    debug!("added assignees");
    Ok(())
}

/// Checks whether `assignee` can be assigned to issues of the context's
/// repository.
///
/// # Returns
///
/// `Ok(Some(assignee))` echoing the login back if the user is assignable,
/// `Ok(None)` if GitHub answers `404`.
///
/// # Errors
///
/// Any failure other than `404` is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo()))]
pub async fn check_user_can_be_assigned(ctx: &Context, assignee: &str) -> Result<Option<String>> {
    let checked = ctx
        .client()
        .check_assignee(ctx.repo(), assignee)
        .await
        .map(|()| Some(assignee.to_string()));
    not_found_as(checked, || None)
}

/// Applies `update` to the context's issue.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx, update), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn update_issues(ctx: &Context, update: &IssueUpdate) -> Result<()> {
    let issue_number = ctx.require_number("update_issues")?;
    ctx.client()
        .update_issue(ctx.repo(), issue_number, update)
        .await?;
    debug!("updated issue");
    Ok(())
}

/// Reads the context's issue, passing GitHub's payload through untouched.
///
/// # Returns
///
/// `Ok(None)` if the issue does not exist.
///
/// # Errors
///
/// Any failure other than `404` is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn get_issues(ctx: &Context) -> Result<Option<ApiResponse<Value>>> {
    let issue_number = ctx.require_number("get_issues")?;
    let issue = ctx
        .client()
        .get_issue(ctx.repo(), issue_number)
        .await
        .map(|data| Some(ApiResponse::new(data)));
    not_found_as(issue, || None)
}
