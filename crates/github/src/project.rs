//! Classic project board operations.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;
use crate::models::ApiResponse;

/// Lists the ids of the columns of project `project_id`, in board order.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx))]
pub async fn project_list_columns(ctx: &Context, project_id: u64) -> Result<Vec<u64>> {
    let columns = ctx.client().list_project_columns(project_id).await?;
    debug!(count = columns.len(), "listed project columns");
    Ok(columns.into_iter().map(|column| column.id).collect())
}

/// Lists the project boards of the context's repository, passing the
/// records through untouched.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx), fields(repo = %ctx.repo()))]
pub async fn project_list_for_repo(ctx: &Context) -> Result<Vec<Value>> {
    let projects = ctx.client().list_repo_projects(ctx.repo()).await?;
    debug!(count = projects.len(), "listed repository projects");
    Ok(projects)
}

/// Lists the cards of column `column_id`, passing the records through
/// untouched.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx))]
pub async fn project_list_cards(ctx: &Context, column_id: u64) -> Result<ApiResponse<Vec<Value>>> {
    let cards = ctx.client().list_column_cards(column_id).await?;
    debug!(count = cards.len(), "listed column cards");
    Ok(ApiResponse::new(cards))
}
