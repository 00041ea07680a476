use reqwest::Url;
use serde::Deserialize;

use crate::error::{MemoError, Result};

/// Error body the memo API sends with non-2xx answers.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// Appends percent-encoded path segments to the API base, keeping any path
/// prefix the base already has.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|_| MemoError::Config(format!("api base cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
