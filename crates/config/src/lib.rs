//! Configuration management for mergeable.
//!
//! This crate loads the settings needed to talk to GitHub: which
//! repositories to act on, which token to use, and which API root to call.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct, loading, and environment overrides
//! - [`repository`]: Repository coordinates with flexible parsing
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`MERGEABLE_GITHUB_TOKEN`, `MERGEABLE_API_URL`)
//! 2. Local config (`./mergeable.json5` or `./mergeable.json`)
//! 3. User config (`~/.config/mergeable/config.json5` or `config.json`)
//! 4. Built-in defaults
//!
//! # Repository Format
//!
//! ```json5
//! {
//!   repositories: [
//!     // Short format: "owner/repo"
//!     "mergeability/mergeable",
//!     // Full format with optional token override
//!     { owner: "private-org", repo: "secret-repo", token: "ghp_xxx" },
//!   ],
//!   // GitHub Enterprise API root (defaults to api.github.com)
//!   api_url: "https://github.example.com/api/v3",
//! }
//! ```
//!
//! # Token Resolution
//!
//! 1. Repository-specific token (if configured)
//! 2. Global `github_token` from config
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (rate-limited)
//!
//! # Examples
//!
//! ```no_run
//! use mergeable_config::Config;
//!
//! # async fn example() -> mergeable_config::Result<()> {
//! let config = Config::load().await?;
//! for repo in &config.repositories {
//!     println!("Repository: {}", repo.full_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;
pub mod repository;

pub use auth::{ResolvedToken, TokenSource};
pub use config::Config;
pub use error::{ConfigError, Result};
pub use repository::Repository;
