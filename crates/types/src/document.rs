use serde::{Deserialize, Serialize};

/// One typed block of a rich-text field or of the `content` array.
/// Block kinds other than the ones normalization looks at are carried
/// through untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

impl Block {
    pub fn is_paragraph(&self) -> bool {
        self.kind == "paragraph"
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawData {
    #[serde(default)]
    pub title: Vec<Block>,
    #[serde(default)]
    pub author: Vec<Block>,
    #[serde(default)]
    pub content: Vec<Block>,
}

impl RawData {
    /// Text of the first paragraph block of `content`, used as the excerpt.
    /// Empty string when the document has no paragraph block.
    pub fn first_paragraph(&self) -> String {
        self.content
            .iter()
            .find(|block| block.is_paragraph())
            .and_then(|block| block.text.clone())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawDocument {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: RawData,
}

/// Body returned by the search endpoint and by every cursor URL.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub next_page: Option<String>,
    pub results: Vec<RawDocument>,
}
