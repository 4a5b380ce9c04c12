//! Binding-site matchers.
//!
//! Each recognised binding shape is one independent matcher. A matcher
//! looks at a slice of a single line and, on a match, reports the byte
//! offsets (relative to that slice) just past every bound identifier.
//! Ordering between matchers is the resolver's business, not theirs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Repeated binding group: `&? mut? ident (: Type)? ,?` one or more times.
const MULTIPLE_DECLARATIONS: &str = r"(?:&?(?:mut\s+)?\w+(?:\s*:\s*\w+)?\s*,?\s*)+";

static INNER_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&?\s*(?:mut\s+)?\w+").expect("inner identifier regex"));

static SIMPLE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:let|for)(?:\s+mut)?\s+\w+[ :=]").expect("simple declaration regex")
});

static CLOSURE_PARAMETERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\|{MULTIPLE_DECLARATIONS}\|")).expect("closure parameter regex")
});

static TUPLE_DESTRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<head>let\s+|for\s+|if let[^=]+)(?P<group>\({MULTIPLE_DECLARATIONS}\))"
    ))
    .expect("tuple destructure regex")
});

static MATCH_ARM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\({MULTIPLE_DECLARATIONS}\)[)\s]*=>")).expect("match arm regex")
});

/// The binding shapes the scanner recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// `let x = …`, `let mut x: T = …`, `for x in …`
    SimpleDeclaration,
    /// `|a, mut b: T| …`
    ClosureParameterList,
    /// `let (a, b) = …`, `for (i, x) in …`, `if let Some((a, b)) = …`
    TupleDestructure,
    /// `(a, b) => …`
    MatchArmPattern,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BindingKind::SimpleDeclaration => "simple",
            BindingKind::ClosureParameterList => "closure",
            BindingKind::TupleDestructure => "tuple",
            BindingKind::MatchArmPattern => "match-arm",
        };
        f.write_str(name)
    }
}

/// Common capability of every binding matcher: try one slice of text.
pub trait BindingMatcher: Send + Sync {
    /// Which shape this matcher recognises.
    fn kind(&self) -> BindingKind;

    /// Anchor offsets (bytes, relative to `substring`) for the first match,
    /// left to right. `None` when the shape does not occur.
    fn anchors(&self, substring: &str) -> Option<Vec<usize>>;
}

/// `let`/`for` followed by a single identifier.
pub struct SimpleDeclaration;

impl BindingMatcher for SimpleDeclaration {
    fn kind(&self) -> BindingKind {
        BindingKind::SimpleDeclaration
    }

    fn anchors(&self, substring: &str) -> Option<Vec<usize>> {
        let m = SIMPLE_DECLARATION.find(substring)?;
        // The match ends on the single ASCII delimiter after the identifier.
        Some(vec![m.end() - 1])
    }
}

/// `|…|` closure parameter list.
pub struct ClosureParameterList;

impl BindingMatcher for ClosureParameterList {
    fn kind(&self) -> BindingKind {
        BindingKind::ClosureParameterList
    }

    fn anchors(&self, substring: &str) -> Option<Vec<usize>> {
        let m = CLOSURE_PARAMETERS.find(substring)?;
        let interior_start = m.start() + 1;
        Some(unpack_bindings(&substring[interior_start..m.end()], interior_start))
    }
}

/// Parenthesised destructuring after `let`, `for` or `if let`.
pub struct TupleDestructure;

impl BindingMatcher for TupleDestructure {
    fn kind(&self) -> BindingKind {
        BindingKind::TupleDestructure
    }

    fn anchors(&self, substring: &str) -> Option<Vec<usize>> {
        let caps = TUPLE_DESTRUCTURE.captures(substring)?;
        let group = caps.name("group")?;
        let interior_start = group.start() + 1;
        Some(unpack_bindings(&substring[interior_start..group.end()], interior_start))
    }
}

/// Parenthesised pattern directly in front of `=>`.
pub struct MatchArmPattern;

impl BindingMatcher for MatchArmPattern {
    fn kind(&self) -> BindingKind {
        BindingKind::MatchArmPattern
    }

    fn anchors(&self, substring: &str) -> Option<Vec<usize>> {
        if !substring.contains("=>") {
            return None;
        }
        let m = MATCH_ARM.find(substring)?;
        let interior_start = m.start() + 1;
        Some(unpack_bindings(&substring[interior_start..m.end()], interior_start))
    }
}

/// Split a binding group interior on commas and anchor after the first
/// identifier of each fragment. `offset` is where `interior` starts in the
/// caller's slice.
pub fn unpack_bindings(interior: &str, offset: usize) -> Vec<usize> {
    let mut anchors = Vec::new();
    let mut consumed = 0;
    for fragment in interior.split(',') {
        if let Some(inner) = INNER_IDENTIFIER.find(fragment) {
            anchors.push(offset + consumed + inner.end());
        }
        consumed += fragment.len() + 1;
    }
    anchors
}

/// The matchers in precedence order.
pub struct PatternSet {
    matchers: Vec<Box<dyn BindingMatcher>>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(SimpleDeclaration),
                Box::new(ClosureParameterList),
                Box::new(TupleDestructure),
                Box::new(MatchArmPattern),
            ],
        }
    }

    /// Iterate the matchers, highest precedence first.
    pub fn iter(&self) -> impl Iterator<Item = &dyn BindingMatcher> {
        self.matchers.iter().map(|m| m.as_ref())
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}
