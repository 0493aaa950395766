//! Issue label operations.
//!
//! Labels are addressed by name. Every operation here acts on the issue or
//! pull request number carried by the [`Context`].
//!
//! # Example
//!
//! ```no_run
//! use mergeable_github::{Context, label};
//!
//! # async fn example(ctx: &Context) -> mergeable_github::Result<()> {
//! let current = label::list_labels_on_issue(ctx).await?;
//! if !current.iter().any(|name| name == "needs review") {
//!     label::add_labels(ctx, &["needs review".to_string()]).await?;
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;

/// Lists the names of the labels on the context's issue, in API order.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn list_labels_on_issue(ctx: &Context) -> Result<Vec<String>> {
    let issue_number = ctx.require_number("list_labels_on_issue")?;
    let labels = ctx
        .client()
        .list_labels_on_issue(ctx.repo(), issue_number)
        .await?;
    debug!(count = labels.len(), "listed labels");
    Ok(labels.into_iter().map(|label| label.name).collect())
}

/// Adds `labels` to the context's issue, keeping the labels it already has.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn add_labels(ctx: &Context, labels: &[String]) -> Result<()> {
    let issue_number = ctx.require_number("add_labels")?;
    ctx.client()
        .add_labels(ctx.repo(), issue_number, labels)
        .await?;
    debug!("added labels");
    Ok(())
}

/// Replaces every label on the context's issue with `labels`.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo(), number = ?ctx.number()))]
pub async fn set_labels(ctx: &Context, labels: &[String]) -> Result<()> {
    let issue_number = ctx.require_number("set_labels")?;
    ctx.client()
        .set_labels(ctx.repo(), issue_number, labels)
        .await?;
    debug!("replaced labels");
    Ok(())
}
