//! Decoration pass error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecorateError {
    #[error("editor surface rejected decorations: {0}")]
    Surface(String),

    #[error("document closed: {0}")]
    DocumentClosed(String),
}

pub type DecorateResult<T> = Result<T, DecorateError>;
