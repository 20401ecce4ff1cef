//! Listing endpoint access
//!
//! The listing is a single JSON document: an array of post records. Fetching it is
//! all-or-nothing; any failure here ends the run before a file is written.

use crate::error::{Error, ListingError, Result};
use crate::types::PostRecord;
use serde_json::Value;
use tracing::debug;

/// Base URL of the Safebooru post API
pub const SAFEBOORU_API: &str = "https://safebooru.org/index.php";

/// Fetch the listing at `url` and validate it into post records
///
/// # Errors
/// - [`ListingError::Request`] on connection failure or timeout
/// - [`ListingError::Status`] on a non-success HTTP status
/// - [`ListingError::Body`] if the body cannot be read
/// - [`ListingError::Parse`] if the body is not JSON
/// - [`ListingError::NotASequence`] if the JSON is not an array
pub async fn fetch_listing(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<Vec<PostRecord>, ListingError> {
    debug!(url = %url, "fetching listing");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ListingError::Request {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ListingError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| ListingError::Body {
        url: url.to_string(),
        source: e,
    })?;

    let value: Value = serde_json::from_slice(&body).map_err(ListingError::Parse)?;
    let records = validate_listing(value)?;

    debug!(url = %url, posts = records.len(), "listing fetched");
    Ok(records)
}

/// Check that a parsed listing is an array and turn its elements into records
///
/// Elements that are not JSON objects become empty records, so they are reported
/// as missing a media URL rather than failing the whole listing.
pub fn validate_listing(value: Value) -> std::result::Result<Vec<PostRecord>, ListingError> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => PostRecord::from(map),
                _ => PostRecord::default(),
            })
            .collect()),
        other => Err(ListingError::NotASequence {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a Safebooru JSON listing URL for a tag query
///
/// `tags` is the space separated tag query as typed on the site; it is encoded into
/// the query string.
///
/// ```
/// let url = booru_dl::listing::safebooru_listing_url("yuuka_(blue_archive)", 300).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://safebooru.org/index.php?page=dapi&s=post&q=index&tags=yuuka_%28blue_archive%29&limit=300&json=1"
/// );
/// ```
pub fn safebooru_listing_url(tags: &str, limit: usize) -> Result<url::Url> {
    let mut url = url::Url::parse(SAFEBOORU_API)
        .map_err(|e| Error::config("tags", format!("invalid API base URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("page", "dapi")
        .append_pair("s", "post")
        .append_pair("q", "index")
        .append_pair("tags", tags.trim())
        .append_pair("limit", &limit.to_string())
        .append_pair("json", "1");
    Ok(url)
}
