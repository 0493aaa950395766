//! Repository file contents.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, instrument};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::models::ContentFile;
use crate::normalize::not_found_as;

/// Fetches a file from the context's repository and returns it as text.
///
/// `git_ref` selects a branch, tag or commit; `None` reads the default
/// branch.
///
/// # Returns
///
/// `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Any failure other than `404` is returned unchanged.
/// [`Error::Content`] is returned if the file is not valid base64-encoded
/// UTF-8.
///
/// # Examples
///
/// ```no_run
/// # async fn example(ctx: &mergeable_github::Context) -> mergeable_github::Result<()> {
/// match mergeable_github::content::get_content(ctx, ".github/mergeable.yml", None).await? {
///     Some(text) => println!("{text}"),
///     None => println!("no configuration file"),
/// }
/// # Ok(())
/// # }
/// ```
#[instrument(skip(ctx), fields(repo = %ctx.repo()))]
pub async fn get_content(
    ctx: &Context,
    path: &str,
    git_ref: Option<&str>,
) -> Result<Option<String>> {
    let file = ctx.client().get_content(ctx.repo(), path, git_ref).await.map(Some);
    match not_found_as(file, || None)? {
        Some(file) => {
            let text = decode_content(&file)?;
            debug!(bytes = text.len(), "fetched file content");
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

/// Decodes the base64 payload of a contents response.
fn decode_content(file: &ContentFile) -> Result<String> {
    if let Some(encoding) = file.encoding.as_deref().filter(|e| *e != "base64") {
        return Err(Error::Content {
            reason: format!("unsupported encoding '{encoding}'"),
        });
    }

    // GitHub wraps the payload with newlines
    let compact: String = file
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD.decode(compact).map_err(|e| Error::Content {
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| Error::Content {
        reason: e.to_string(),
    })
}
