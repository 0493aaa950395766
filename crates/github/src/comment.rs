//! Issue comment operations.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;
use crate::models::ApiResponse;
use crate::normalize::not_found_as;

/// Posts `body` as a comment on the context's issue.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx, body), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn create_comment(ctx: &Context, body: &str) -> Result<()> {
    let issue_number = ctx.require_number("create_comment")?;
    ctx.client()
        .create_comment(ctx.repo(), issue_number, body)
        .await?;
    debug!("created comment");
    Ok(())
}

/// Lists the comments on the context's issue. Comment records are passed
/// through untouched, in API order.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn list_comments(ctx: &Context) -> Result<ApiResponse<Vec<Value>>> {
    let issue_number = ctx.require_number("list_comments")?;
    let comments = ctx
        .client()
        .list_comments(ctx.repo(), issue_number)
        .await?;
    debug!(count = comments.len(), "listed comments");
    Ok(ApiResponse::new(comments))
}

/// Deletes comment `comment_id` from the context's repository.
///
/// A comment that is already gone counts as deleted.
///
/// # Errors
///
/// Any failure other than `404` is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo()))]
pub async fn delete_comment(ctx: &Context, comment_id: u64) -> Result<()> {
    let deleted = ctx.client().delete_comment(ctx.repo(), comment_id).await;
    not_found_as(deleted, || ())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{Endpoint, FakeGitHub};

    #[tokio::test]
    async fn create_posts_body() {
        let (fake, ctx) = FakeGitHub::new().into_parts();
        create_comment(&ctx, "This PR is ready to merge").await.unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args["issue_number"], 1);
        assert_eq!(calls[0].args["body"], "This PR is ready to merge");
    }

    #[tokio::test]
    async fn create_errors_are_rethrown() {
        let ctx = FakeGitHub::new()
            .failing(Endpoint::CreateComment, 402)
            .context();
        let err = create_comment(&ctx, "hello").await.unwrap_err();
        assert_eq!(err.status(), Some(402));
    }

    #[tokio::test]
    async fn list_returns_raw_records() {
        let mut fake = FakeGitHub::new();
        fake.comments = vec![
            json!({ "user": { "login": "mergeable[bot]" } }),
            json!({ "user": { "login": "userA" } }),
        ];

        let response = list_comments(&fake.context()).await.unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0]["user"]["login"], "mergeable[bot]");
        assert_eq!(response.data[1]["user"]["login"], "userA");
    }

    #[tokio::test]
    async fn list_errors_are_rethrown() {
        let ctx = FakeGitHub::new()
            .failing(Endpoint::ListComments, 402)
            .context();
        let err = list_comments(&ctx).await.unwrap_err();
        assert_eq!(err.status(), Some(402));
    }

    #[tokio::test]
    async fn delete_succeeds() {
        let (fake, ctx) = FakeGitHub::new().into_parts();
        delete_comment(&ctx, 42).await.unwrap();
        assert_eq!(fake.calls()[0].args["comment_id"], 42);
    }

    #[tokio::test]
    async fn delete_not_found_is_success() {
        let ctx = FakeGitHub::new()
            .failing(Endpoint::DeleteComment, 404)
            .context();
        assert!(delete_comment(&ctx, 42).await.is_ok());
    }

    #[tokio::test]
    async fn delete_errors_are_rethrown() {
        let ctx = FakeGitHub::new()
            .failing(Endpoint::DeleteComment, 402)
            .context();
        let err = delete_comment(&ctx, 42).await.unwrap_err();
        assert_eq!(err.status(), Some(402));
    }
}
