use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::document::QueryResponse;
use crate::post::Post;

/// One page of normalized results plus the cursor to the next one. Returned
/// by the initial query and by every cursor follow. The cursor is opaque;
/// `None` means the end of the list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub next_page: Option<String>,
    pub results: Vec<Post>,
}

impl Page {
    pub fn from_response(resp: &QueryResponse, locale: Locale) -> Self {
        Page {
            // Some responses use an empty string as the end-of-list sentinel.
            next_page: resp
                .next_page
                .as_deref()
                .filter(|cursor| !cursor.is_empty())
                .map(str::to_string),
            results: resp
                .results
                .iter()
                .map(|doc| Post::from_raw(doc, locale))
                .collect(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}
