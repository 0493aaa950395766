//! Organization team membership.

use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;
use crate::normalize::not_found_as;

/// Lists the logins of the members of team `team_slug` in `org`, in API
/// order.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx))]
pub async fn list_members_in_org(
    ctx: &Context,
    org: &str,
    team_slug: &str,
) -> Result<Vec<String>> {
    let members = ctx.client().list_team_members(org, team_slug).await?;
    debug!(count = members.len(), "listed team members");
    Ok(members.into_iter().map(|member| member.login).collect())
}

/// Returns `true` if `username` is an active member of team `team_slug` in
/// `org`.
///
/// A pending invitation counts as not a member, and so does a `404`.
///
/// # Errors
///
/// Any failure other than `404` is returned unchanged.
#[instrument(skip(ctx))]
pub async fn get_membership_for_user_in_org(
    ctx: &Context,
    org: &str,
    team_slug: &str,
    username: &str,
) -> Result<bool> {
    let membership = ctx
        .client()
        .get_team_membership(org, team_slug, username)
        .await
        .map(|membership| membership.is_active());
    not_found_as(membership, || false)
}
