//! Pull request operations.

use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;
use crate::models::ChangedFile;

/// Lists the files changed by the context's pull request, in API order.
///
/// Every page of the endpoint is followed. Missing counts default to `0` and
/// a missing status to `modified`.
///
/// # Errors
///
/// Any failure is returned unchanged, including `404`.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn list_files(ctx: &Context) -> Result<Vec<ChangedFile>> {
    let pull_number = ctx.require_number("list_files")?;
    let files = ctx
        .client()
        .list_pull_request_files(ctx.repo(), pull_number)
        .await?;
    debug!(count = files.len(), "listed changed files");
    Ok(files)
}
