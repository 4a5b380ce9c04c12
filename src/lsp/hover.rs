//! Hover reply → label text.

use lsp_types::{Hover, HoverContents, MarkedString};

/// Text of the first content entry of a hover reply, if there is one.
///
/// Array replies yield their first element, scalar and markup replies are a
/// single entry. An empty markup value counts as no entry.
pub fn first_content_entry(hover: &Hover) -> Option<String> {
    match &hover.contents {
        HoverContents::Array(entries) => entries.first().map(marked_string_text),
        HoverContents::Scalar(entry) => Some(marked_string_text(entry)),
        HoverContents::Markup(markup) if !markup.value.is_empty() => Some(markup.value.clone()),
        HoverContents::Markup(_) => None,
    }
}

fn marked_string_text(entry: &MarkedString) -> String {
    match entry {
        MarkedString::String(text) => text.clone(),
        MarkedString::LanguageString(ls) => ls.value.clone(),
    }
}
