//! Binding-site scanner: finds where type hints belong without parsing.
//!
//! Works line by line on raw text. Comment-like suffixes are cut off,
//! `impl` headers are skipped, and the remainder of each line is fed to the
//! resolver until it stops finding bindings. The result is recomputed from
//! scratch every time; nothing is cached between edits.

pub mod patterns;
pub mod resolver;

use lsp_types::Position;

pub use patterns::{BindingKind, BindingMatcher, PatternSet};
pub use resolver::{resolve, resolve_positions, utf16_len, Resolution};

/// A resolved anchor together with the shape that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSite {
    pub position: Position,
    pub kind: BindingKind,
}

/// Scan a whole document. Positions come out ordered by line, then left to
/// right within the line.
pub fn scan_document(text: &str) -> Vec<Position> {
    scan_sites(text).into_iter().map(|site| site.position).collect()
}

/// Like [`scan_document`], but keeps the binding kind of each anchor.
pub fn scan_sites(text: &str) -> Vec<BindingSite> {
    text.split('\n')
        .enumerate()
        .flat_map(|(idx, line)| scan_line_sites(idx as u32, line))
        .collect()
}

/// Scan a single line of a document.
pub fn scan_line(line_number: u32, line: &str) -> Vec<Position> {
    scan_line_sites(line_number, line)
        .into_iter()
        .map(|site| site.position)
        .collect()
}

fn scan_line_sites(line_number: u32, line: &str) -> Vec<BindingSite> {
    let code = strip_comment(line);
    if is_impl_header(code) {
        return Vec::new();
    }

    let mut sites = Vec::new();
    let mut rest = code;
    let mut offset = 0u32;

    while let Some(resolution) = resolve(rest) {
        for &anchor in &resolution.anchors {
            sites.push(BindingSite {
                position: Position::new(line_number, offset + utf16_len(&rest[..anchor])),
                kind: resolution.kind,
            });
        }

        // Anchors always sit after at least one identifier character, so
        // this strictly shrinks `rest`.
        let Some(&last) = resolution.anchors.last() else {
            break;
        };
        if last == 0 {
            break;
        }
        offset += utf16_len(&rest[..last]);
        rest = &rest[last..];
    }

    sites
}

/// Cut the line at the first `//`, then at the first `#`.
///
/// String and char literals are not recognised; a `#` or `//` inside one
/// truncates the line all the same.
pub fn strip_comment(line: &str) -> &str {
    let line = line.split("//").next().unwrap_or(line);
    line.split('#').next().unwrap_or(line)
}

/// Whether the (comment-stripped) line opens an `impl` block.
pub fn is_impl_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix("impl") {
        Some(after) => !after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(positions: &[Position]) -> Vec<(u32, u32)> {
        positions.iter().map(|p| (p.line, p.character)).collect()
    }

    #[test]
    fn comment_suffix_is_ignored() {
        let positions = scan_line(0, "let x = 5; // let y = 6");
        assert_eq!(chars(&positions), vec![(0, 5)]);
    }

    #[test]
    fn hash_suffix_is_ignored() {
        assert!(scan_line(0, "#[derive(Debug)] let z = 1;").is_empty());
        assert_eq!(scan_line(0, "let z = 1; # trailing").len(), 1);
    }

    #[test]
    fn impl_lines_are_skipped() {
        assert!(scan_line(0, "impl<T> From<T> for Wrapper<T> {").is_empty());
        assert!(scan_line(0, "    impl Iterator for Foo { let x = 1; }").is_empty());
        assert!(scan_line(0, "impl").is_empty());
    }

    #[test]
    fn impl_prefix_must_be_whole_token() {
        assert_eq!(scan_line(0, "implicit_value; let x = 1;").len(), 1);
    }

    #[test]
    fn multiple_bindings_on_one_line() {
        let line = "let a = 1; let b = 2; let c = 3;";
        let positions = scan_line(4, line);
        assert_eq!(chars(&positions), vec![(4, 5), (4, 16), (4, 27)]);
    }

    #[test]
    fn declaration_then_closure() {
        let line = "let add = |a, b| a + b;";
        let sites = scan_sites(line);
        let kinds: Vec<BindingKind> = sites.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BindingKind::SimpleDeclaration,
                BindingKind::ClosureParameterList,
                BindingKind::ClosureParameterList,
            ]
        );
        let columns: Vec<u32> = sites.iter().map(|s| s.position.character).collect();
        assert_eq!(columns, vec![7, 12, 15]);
    }

    #[test]
    fn document_positions_are_line_ordered() {
        let text = "fn main() {\n    let (a, mut b) = pair;\n    impl Foo {}\n    for x in v {}\n}\n";
        let positions = scan_document(text);
        assert_eq!(chars(&positions), vec![(1, 10), (1, 17), (3, 9)]);
    }

    #[test]
    fn match_arms_in_document() {
        let text = "match pair {\n    (a, b) => a,\n    (c, d)\n}";
        let positions = scan_document(text);
        assert_eq!(chars(&positions), vec![(1, 6), (1, 9)]);
    }

    #[test]
    fn crlf_line_endings() {
        let positions = scan_document("let x = 1;\r\nlet y = 2;\r\n");
        assert_eq!(chars(&positions), vec![(0, 5), (1, 5)]);
    }

    #[test]
    fn scanning_terminates_on_awkward_input() {
        let lines = [
            "|||||||",
            "let let let let",
            "((((a, b)))) => => =>",
            "for for for x in y",
            "let",
            "|a|b|c|d|",
            "    ",
            "if let (a, b) = (|x| x, |y| y) {",
        ];
        for line in lines {
            let _ = scan_line(0, line);
        }
    }
}
