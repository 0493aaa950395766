//! mergeable - query GitHub through the normalizing facade.
//!
//! Loads configuration, resolves a token, and runs one read-only facade
//! operation, printing its result as JSON on stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use mergeable_config::{Config, Repository, ResolvedToken, auth};
use mergeable_github::{
    Context, GitHubClient, RepoRef, comment, content, issue, label, project, pull, team,
};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mergeable")]
#[command(about = "Query the GitHub REST API with normalized not-found handling")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to ./mergeable.json5 or the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository name (e.g., "owner/repo")
    #[arg(short, long)]
    repo: Repository,

    /// Issue or pull request number
    #[arg(short, long)]
    number: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Files changed by the pull request
    Files,
    /// Label names on the issue
    Labels,
    /// Decoded file content, or null when the file is absent
    Content {
        path: String,
        /// Branch, tag or commit to read from
        #[arg(long = "ref")]
        git_ref: Option<String>,
    },
    /// Whether a user can be assigned in the repository
    CanAssign { user: String },
    /// Comments on the issue
    Comments,
    /// The issue itself, or null when absent
    Issue,
    /// Logins of a team's members
    Members { org: String, team: String },
    /// Whether a user is an active team member
    Membership {
        org: String,
        team: String,
        user: String,
    },
    /// Classic projects of the repository
    Projects,
    /// Column ids of a classic project
    Columns { project_id: u64 },
    /// Cards in a project column
    Cards { column_id: u64 },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load_file(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Config::load().await?),
    }
}

async fn build_context(config: &Config, args: &Args) -> Result<Context> {
    // A configured entry may carry its own token
    let repo = config
        .repository(&args.repo.full_name())
        .cloned()
        .unwrap_or_else(|| args.repo.clone());

    let token = auth::resolve_token(&repo, config.github_token.as_ref())
        .await
        .map(ResolvedToken::into_secret);

    let client = match &config.api_url {
        Some(url) => GitHubClient::with_base_url(token, url).await?,
        None => GitHubClient::new(token).await?,
    };
    info!(repo = %repo, authenticated = client.is_authenticated(), "GitHub client ready");

    let ctx = Context::new(Arc::new(client), RepoRef::new(repo.owner(), repo.repo()));
    Ok(match args.number {
        Some(number) => ctx.with_number(number),
        None => ctx,
    })
}

async fn run(ctx: &Context, command: &Command) -> Result<Value> {
    debug!(?command, "running command");
    let value = match command {
        Command::Files => serde_json::to_value(pull::list_files(ctx).await?)?,
        Command::Labels => serde_json::to_value(label::list_labels_on_issue(ctx).await?)?,
        Command::Content { path, git_ref } => {
            serde_json::to_value(content::get_content(ctx, path, git_ref.as_deref()).await?)?
        }
        Command::CanAssign { user } => {
            serde_json::to_value(issue::check_user_can_be_assigned(ctx, user).await?)?
        }
        Command::Comments => serde_json::to_value(comment::list_comments(ctx).await?)?,
        Command::Issue => serde_json::to_value(issue::get_issues(ctx).await?)?,
        Command::Members { org, team } => {
            serde_json::to_value(team::list_members_in_org(ctx, org, team).await?)?
        }
        Command::Membership { org, team, user } => serde_json::to_value(
            team::get_membership_for_user_in_org(ctx, org, team, user).await?,
        )?,
        Command::Projects => serde_json::to_value(project::project_list_for_repo(ctx).await?)?,
        Command::Columns { project_id } => {
            serde_json::to_value(project::project_list_columns(ctx, *project_id).await?)?
        }
        Command::Cards { column_id } => {
            serde_json::to_value(project::project_list_cards(ctx, *column_id).await?)?
        }
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_config(args.config.as_ref()).await?;
    let ctx = build_context(&config, &args).await?;
    let value = run(&ctx, &args.command).await?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
