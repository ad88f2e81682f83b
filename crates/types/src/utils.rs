use chrono::{DateTime, Locale};
use tracing::debug;

use crate::document::Block;

/// Flatten a rich-text field to plain text: join block texts, decode HTML
/// entities, turn `<br>` into newlines, strip any remaining tags.
pub fn flatten(blocks: &[Block]) -> String {
    let joined = blocks
        .iter()
        .filter_map(|block| block.text.as_deref())
        .collect::<Vec<_>>()
        .join(" ");
    clean_text(&joined)
}

pub fn clean_text(input: &str) -> String {
    let decoded = match html_entities::decode_html_entities(input) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("entity decode failed, keeping raw text: {:?}", e);
            input.to_string()
        }
    };
    // Replace <br> with newline
    let br_re = regex::Regex::new("<br\\s*/?>").unwrap();
    let decoded = br_re.replace_all(&decoded, "\n");

    // Replace &gt; with >
    let gt_re = regex::Regex::new("&gt;").unwrap();
    let converted = gt_re.replace_all(&decoded, ">");

    // Remove all html tags
    let tag_re = regex::Regex::new("<[^>]*>").unwrap();
    tag_re.replace_all(&converted, "").into_owned()
}

/// Render an ISO-8601 timestamp as `%d %b %Y` under the given locale,
/// e.g. `15 mar 2021` for `pt_BR`. The API emits offsets both with and
/// without a colon. An unparseable timestamp is returned as-is.
pub fn display_date(raw: &str, locale: Locale) -> String {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|date| date.format_localized("%d %b %Y", locale).to_string())
        .unwrap_or_else(|e| {
            debug!("unparseable timestamp {:?}: {}", raw, e);
            raw.to_string()
        })
}
