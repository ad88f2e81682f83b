use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    /// Document search: type filter, field selection, page size.
    Search {
        document_type: String,
        fetch: Vec<String>,
        page_size: u32,
    },
    /// Opaque cursor URL returned by a previous page. Forwarded verbatim,
    /// never interpreted.
    Cursor(String),
}

impl Endpoint {
    pub fn posts(fetch: &[&str], page_size: u32) -> Self {
        Endpoint::Search {
            document_type: "post".to_string(),
            fetch: fetch.iter().map(|field| field.to_string()).collect(),
            page_size,
        }
    }

    /// Render the request URL against the repository base URL. A cursor is
    /// already absolute and ignores the base.
    pub fn url(&self, base: &str) -> String {
        match self {
            Endpoint::Search {
                document_type,
                fetch,
                page_size,
            } => format!(
                "{}/documents/search?q=[[at(document.type,\"{}\")]]&fetch={}&pageSize={}",
                base.trim_end_matches('/'),
                document_type,
                fetch.join(","),
                page_size,
            ),
            Endpoint::Cursor(url) => url.clone(),
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Search { document_type, .. } => write!(f, "search({})", document_type),
            Endpoint::Cursor(url) => write!(f, "cursor({})", url),
        }
    }
}
