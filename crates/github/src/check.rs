//! Check run operations.

use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::Result;
use crate::models::{ApiResponse, CheckRun, CheckRunParams};

/// Creates a check run in the context's repository.
///
/// The created run is returned as-is; its id is `response.data.id`.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx, params), fields(repo = %ctx.repo()))]
pub async fn create_checks(
    ctx: &Context,
    params: &CheckRunParams,
) -> Result<ApiResponse<CheckRun>> {
    let run = ctx.client().create_check_run(ctx.repo(), params).await?;
    debug!(check_run_id = run.id, "created check run");
    Ok(ApiResponse::new(run))
}

/// Updates check run `check_run_id` with the fields set in `params`.
///
/// # Errors
///
/// Any failure is returned unchanged.
#[instrument(skip(ctx, params), fields(repo = %ctx.repo()))]
pub async fn update_checks(
    ctx: &Context,
    check_run_id: u64,
    params: &CheckRunParams,
) -> Result<()> {
    ctx.client()
        .update_check_run(ctx.repo(), check_run_id, params)
        .await?;
    debug!("updated check run");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{CheckConclusion, CheckRunOutput, CheckStatus};
    use crate::test_support::{Endpoint, FakeGitHub};

    fn params() -> CheckRunParams {
        CheckRunParams::new("Mergeable", "abc123").status(CheckStatus::InProgress)
    }

    #[tokio::test]
    async fn create_returns_check_run_envelope() {
        let run = create_checks(&FakeGitHub::new().context(), &params())
            .await
            .unwrap()
            .into_inner();
        assert_eq!(run.id, 1);
        assert_eq!(run.name, "Mergeable");
        assert_eq!(run.status, Some(CheckStatus::InProgress));
    }

    #[tokio::test]
    async fn create_errors_are_rethrown() {
        let ctx = FakeGitHub::new()
            .failing(Endpoint::CreateCheckRun, 402)
            .context();
        let err = create_checks(&ctx, &params()).await.unwrap_err();
        assert_eq!(err.status(), Some(402));
    }

    #[tokio::test]
    async fn update_succeeds_with_unit() {
        let (fake, ctx) = FakeGitHub::new().into_parts();
        let started = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let update = CheckRunParams::default()
            .started_at(started)
            .completed_at(started + chrono::Duration::seconds(30))
            .status(CheckStatus::Completed)
            .conclusion(CheckConclusion::Success)
            .output(CheckRunOutput {
                title: "All checks passed".to_string(),
                summary: "2 validators ran".to_string(),
                text: None,
            });

        update_checks(&ctx, 99, &update).await.unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args["check_run_id"], 99);
        assert_eq!(calls[0].args["params"]["conclusion"], "success");
        assert_eq!(calls[0].args["params"]["output"]["title"], "All checks passed");
        assert_eq!(calls[0].args["params"]["started_at"], "2024-05-01T12:00:00Z");
        assert_eq!(calls[0].args["params"]["completed_at"], "2024-05-01T12:00:30Z");
        assert!(calls[0].args["params"].get("name").is_none());
    }

    #[tokio::test]
    async fn update_errors_are_rethrown() {
        let ctx = FakeGitHub::new()
            .failing(Endpoint::UpdateCheckRun, 402)
            .context();
        let err = update_checks(&ctx, 1, &params()).await.unwrap_err();
        assert_eq!(err.status(), Some(402));
    }
}
