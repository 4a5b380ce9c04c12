//! bindhints: inline type hints for implicitly-typed bindings.
//!
//! Scans source text for binding sites without a parser, asks a language
//! analysis service what each binding's type is, and hands the answers to
//! an editor surface as trailing decorations.

pub mod config;
pub mod decorate;
pub mod lsp;
pub mod scan;
