use chrono::Locale;
use quill_types::{document::QueryResponse, page::Page};

use super::error::Error;

/// Parse a successful response body into a normalized page.
pub async fn parse_page(resp: reqwest::Response, locale: Locale) -> Result<Page, Error> {
    let raw: QueryResponse = resp.json().await.map_err(|e| {
        if e.is_decode() {
            Error::InvalidResponse(e.to_string())
        } else {
            Error::Reqwest(e)
        }
    })?;
    Ok(Page::from_response(&raw, locale))
}
