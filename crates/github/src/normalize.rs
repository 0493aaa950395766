//! The not-found policy shared by lookup operations.
//!
//! A lookup treats a missing resource as a normal answer, so a `404` from
//! GitHub becomes the operation's absent value. Every other failure is
//! returned untouched.

use tracing::debug;

use crate::error::Result;

/// Replaces a "not found" failure with `absent()`.
///
/// # Examples
///
/// ```
/// use mergeable_github::{Error, not_found_as};
///
/// let missing: mergeable_github::Result<Option<u64>> = Err(Error::api(404, "Not Found"));
/// assert_eq!(not_found_as(missing, || None).unwrap(), None);
///
/// let denied: mergeable_github::Result<Option<u64>> = Err(Error::api(403, "Forbidden"));
/// assert_eq!(not_found_as(denied, || None).unwrap_err().status(), Some(403));
/// ```
pub fn not_found_as<T>(result: Result<T>, absent: impl FnOnce() -> T) -> Result<T> {
    match result {
        Err(err) if err.is_not_found() => {
            debug!("resource not found, returning absent value");
            Ok(absent())
        }
        other => other,
    }
}
