//! Hint fetcher: one hover query per binding site, strictly in order.

use lsp_types::{Position, TextDocumentIdentifier, TextDocumentPositionParams, Uri};
use serde::Serialize;
use tracing::debug;

use super::hover::first_content_entry;
use super::AnalysisService;

/// Outcome of querying one position. `label` is `None` when the query
/// failed or the service had nothing to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintResult {
    pub position: Position,
    pub label: Option<String>,
}

/// A labelled hint ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeHint {
    pub position: Position,
    pub label: String,
}

/// Query the service for the binding that ends at `position`.
///
/// `position` sits just past the identifier, so the probe goes one
/// character to the left to land inside it.
pub async fn fetch_hint(
    service: &dyn AnalysisService,
    uri: &Uri,
    position: Position,
    prefix: &str,
) -> HintResult {
    let probe = Position::new(position.line, position.character.saturating_sub(1));
    let params = TextDocumentPositionParams::new(TextDocumentIdentifier::new(uri.clone()), probe);

    let label = match service.hover(params).await {
        Ok(Some(hover)) => match first_content_entry(&hover) {
            Some(text) => Some(format!("{prefix}{text}")),
            None => {
                debug!(line = position.line, character = position.character, "hover reply had no content");
                None
            }
        },
        Ok(None) => {
            debug!(line = position.line, character = position.character, "no hover reply");
            None
        }
        Err(e) => {
            debug!(line = position.line, character = position.character, "hover query failed: {e}");
            None
        }
    };

    HintResult { position, label }
}

/// Fetch labels for every position, one query at a time. Positions whose
/// query fails are dropped; the others keep their order.
pub async fn fetch_hints(
    service: &dyn AnalysisService,
    uri: &Uri,
    positions: &[Position],
    prefix: &str,
) -> Vec<TypeHint> {
    let mut hints = Vec::with_capacity(positions.len());
    for &position in positions {
        let result = fetch_hint(service, uri, position, prefix).await;
        if let Some(label) = result.label {
            hints.push(TypeHint {
                position: result.position,
                label,
            });
        }
    }
    hints
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lsp_types::{Hover, HoverContents, MarkedString};

    use super::*;
    use crate::lsp::QueryError;

    /// Answers with the probed column, fails on the columns listed in `fail_at`.
    struct ColumnService {
        fail_at: Vec<u32>,
        probes: Mutex<Vec<Position>>,
    }

    impl ColumnService {
        fn new(fail_at: Vec<u32>) -> Self {
            Self {
                fail_at,
                probes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnalysisService for ColumnService {
        async fn hover(
            &self,
            params: TextDocumentPositionParams,
        ) -> Result<Option<Hover>, QueryError> {
            let pos = params.position;
            self.probes.lock().unwrap().push(pos);
            if self.fail_at.contains(&pos.character) {
                return Err(QueryError::Timeout);
            }
            Ok(Some(Hover {
                contents: HoverContents::Array(vec![MarkedString::String(format!(
                    "T{}",
                    pos.character
                ))]),
                range: None,
            }))
        }
    }

    fn uri() -> Uri {
        "file:///src/main.rs".parse().unwrap()
    }

    #[tokio::test]
    async fn probes_one_character_left() {
        let svc = ColumnService::new(Vec::new());
        let result = fetch_hint(&svc, &uri(), Position::new(2, 9), ": ").await;
        assert_eq!(result.label.as_deref(), Some(": T8"));
        assert_eq!(result.position, Position::new(2, 9));
        assert_eq!(svc.probes.lock().unwrap().as_slice(), &[Position::new(2, 8)]);
    }

    #[tokio::test]
    async fn failures_do_not_affect_siblings() {
        let svc = ColumnService::new(vec![4]);
        let positions = [
            Position::new(0, 3),
            Position::new(0, 5),
            Position::new(1, 7),
        ];
        let hints = fetch_hints(&svc, &uri(), &positions, ": ").await;
        assert_eq!(
            hints,
            vec![
                TypeHint {
                    position: Position::new(0, 3),
                    label: ": T2".into()
                },
                TypeHint {
                    position: Position::new(1, 7),
                    label: ": T6".into()
                },
            ]
        );
        // Every position was still queried, in order.
        assert_eq!(svc.probes.lock().unwrap().len(), 3);
    }

    struct SilentService;

    #[async_trait]
    impl AnalysisService for SilentService {
        async fn hover(
            &self,
            _params: TextDocumentPositionParams,
        ) -> Result<Option<Hover>, QueryError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn empty_replies_are_skipped() {
        let hints = fetch_hints(&SilentService, &uri(), &[Position::new(0, 5)], ": ").await;
        assert!(hints.is_empty());
        let result = fetch_hint(&SilentService, &uri(), Position::new(0, 5), ": ").await;
        assert_eq!(result.label, None);
    }
}
