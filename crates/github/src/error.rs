//! Error types for GitHub API operations.
//!
//! Every failure reported by GitHub is surfaced as [`Error::Api`], which keeps
//! the original HTTP status and response body intact. Callers branch on
//! [`Error::status`] rather than on octocrab's error shapes.

use tracing::debug;

/// HTTP status GitHub uses for a resource that does not exist.
pub const NOT_FOUND: u16 = 404;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status.
    ///
    /// The fields mirror the error body GitHub sent, untouched.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// The HTTP status code of the response.
        status: u16,
        /// The `message` field of the error body.
        message: String,
        /// Link to the relevant API documentation, if GitHub provided one.
        documentation_url: Option<String>,
        /// Detailed validation errors, if GitHub provided any.
        errors: Option<Vec<serde_json::Value>>,
    },

    /// The request failed without a usable HTTP status: network and URI
    /// errors, or a success body that did not decode.
    ///
    /// Lookups build failed responses through [`Error::from_response`], so
    /// an error page that is not GitHub JSON still lands in [`Error::Api`].
    #[error("GitHub transport error: {0}")]
    Transport(#[source] octocrab::Error),

    /// File content returned by GitHub could not be decoded.
    #[error("invalid file content: {reason}")]
    Content {
        /// A description of why decoding failed.
        reason: String,
    },

    /// An issue-scoped operation ran on a context without an issue number.
    #[error("{operation} requires an issue or pull request number")]
    MissingIssueNumber {
        /// The operation that needed the number.
        operation: &'static str,
    },

    /// Token validation failed.
    ///
    /// This occurs when a provided token is invalid, expired, or lacks
    /// the necessary permissions.
    #[error("token validation failed: {reason}")]
    TokenValidation {
        /// A description of why validation failed.
        reason: String,
    },
}

impl Error {
    /// Builds an [`Error::Api`] from a status and message alone.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            documentation_url: None,
            errors: None,
        }
    }

    /// Converts the octocrab error for a response that came back with
    /// HTTP `status`.
    ///
    /// octocrab reports a failed response whose body is not GitHub's JSON
    /// error document (an HTML page from a proxy, say) as a decoding error.
    /// That case becomes [`Error::Api`] with `status` and `reason`.
    #[must_use]
    pub fn from_response(status: u16, reason: Option<&str>, err: octocrab::Error) -> Self {
        match Self::from(err) {
            Self::Transport(source) if !(200..300).contains(&status) => {
                debug!(status, error = %source, "error body is not GitHub JSON");
                Self::api(status, reason.unwrap_or("unexpected response"))
            }
            other => other,
        }
    }

    /// Returns the HTTP status GitHub reported, if the failure had one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if GitHub reported the resource as absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(NOT_FOUND)
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let source = *source;
                Self::Api {
                    status: source.status_code.as_u16(),
                    message: source.message,
                    documentation_url: source.documentation_url,
                    errors: source.errors,
                }
            }
            other => Self::Transport(other),
        }
    }
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
