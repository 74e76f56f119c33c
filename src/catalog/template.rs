//! Alignment templates available in a bucket.

use super::choose;
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Menu title for template selection.
pub const TEMPLATE_TITLE: &str = "Select an alignment template:";

/// Matches keys containing `JRC`, at least one digit, at least one more
/// character, then a `/` (e.g. `JRC2018_Unisex_20x_HR/`).
fn is_template_key(key: &str) -> bool {
    key.match_indices("JRC").any(|(start, marker)| {
        let rest = &key[start + marker.len()..];
        rest.starts_with(|c: char| c.is_ascii_digit())
            && rest.char_indices().skip(2).any(|(_, c)| c == '/')
    })
}

/// Lists top-level template prefixes in `bucket`, in listing order, with
/// slashes removed.
///
/// # Errors
///
/// Returns [`Error::Port`] if the listing fails.
pub async fn templates(ctx: &ServiceContext, bucket: &str) -> Result<Vec<String>> {
    let keys = ctx.objects.list_prefixes(bucket, "").await.map_err(Error::port("objects"))?;
    Ok(keys.into_iter().filter(|key| is_template_key(key)).map(|key| key.replace('/', "")).collect())
}

/// Picks the bucket's alignment template, asking only when there is more
/// than one.
///
/// # Errors
///
/// Returns [`Error::Port`] if the listing or the selector fails.
pub async fn select_template(ctx: &ServiceContext, bucket: &str) -> Result<Option<String>> {
    let mut found = templates(ctx, bucket).await?;
    if found.len() == 1 {
        return Ok(found.pop());
    }
    choose(ctx, TEMPLATE_TITLE, found)
}
