//! Position resolver: one slice of a line in, hint positions out.
//!
//! Pure: looks at nothing but the slice it is handed.

use std::sync::LazyLock;

use lsp_types::Position;

use super::patterns::{BindingKind, PatternSet};

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(PatternSet::new);

/// The matcher that fired on a slice and where it anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: BindingKind,
    /// Byte offsets relative to the resolved slice, ascending.
    pub anchors: Vec<usize>,
}

/// Run the matchers in precedence order; the first one that matches with at
/// least one anchor wins and the rest are not consulted.
pub fn resolve(substring: &str) -> Option<Resolution> {
    PATTERNS.iter().find_map(|matcher| {
        let anchors = matcher.anchors(substring)?;
        if anchors.is_empty() {
            return None;
        }
        Some(Resolution {
            kind: matcher.kind(),
            anchors,
        })
    })
}

/// Resolve `substring` into document positions on `line`. `base` is the
/// character offset (UTF-16 units) at which `substring` starts in the line.
pub fn resolve_positions(line: u32, substring: &str, base: u32) -> Vec<Position> {
    match resolve(substring) {
        Some(resolution) => resolution
            .anchors
            .iter()
            .map(|&anchor| Position::new(line, base + utf16_len(&substring[..anchor])))
            .collect(),
        None => Vec::new(),
    }
}

/// Length of `text` in UTF-16 code units, the LSP default position encoding.
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}
