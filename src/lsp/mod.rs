//! Point queries against an external language analysis service.
//!
//! The service is anything that can answer `textDocument/hover` for one
//! position. Transport, process lifecycle and restarts belong to whoever
//! implements [`AnalysisService`]; this module only asks questions and turns
//! the answers into short hint labels.

pub mod fetcher;
pub mod hover;

use std::sync::Arc;

use async_trait::async_trait;
use lsp_types::{Hover, TextDocumentPositionParams};

pub use fetcher::{fetch_hint, fetch_hints, HintResult, TypeHint};
pub use hover::first_content_entry;

/// Errors from a single point query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("query timed out")]
    Timeout,

    #[error("service error (code {code}): {message}")]
    Service { code: i32, message: String },

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("service disconnected")]
    Disconnected,
}

/// A language analysis service that answers hover queries.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Hover information at one document position. `Ok(None)` means the
    /// service had nothing to say.
    async fn hover(&self, params: TextDocumentPositionParams) -> Result<Option<Hover>, QueryError>;
}

/// Shared reference to the live analysis service.
pub type AnalysisServiceHandle = Arc<dyn AnalysisService>;
