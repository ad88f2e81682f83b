use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::document::RawDocument;
use crate::utils;

/// Normalized, display-ready form of a post document. Immutable once
/// constructed; `uid` is the route key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub uid: String,
    pub first_publication_date: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl Post {
    /// Normalize a raw document. Missing fields degrade to empty strings so
    /// a malformed document never fails the whole page.
    pub fn from_raw(doc: &RawDocument, locale: Locale) -> Self {
        Post {
            uid: doc.uid.clone().unwrap_or_default(),
            // The display date is derived from the last publication timestamp.
            first_publication_date: doc
                .last_publication_date
                .as_deref()
                .map(|ts| utils::display_date(ts, locale))
                .unwrap_or_default(),
            title: utils::flatten(&doc.data.title),
            subtitle: doc.data.first_paragraph(),
            author: utils::flatten(&doc.data.author),
        }
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for Post {}
