//! Decoration passes, serialised per decorator.
//!
//! A [`Decorator`] owns the live analysis-service handle behind a single
//! fair mutex. Every pass holds that mutex from before the scan until the
//! new decoration set has been handed to the surface, so passes queue in
//! call order and never interleave their queries. Replacing the handle
//! takes the same mutex; a pass that already started keeps the handle it
//! started with.

pub mod error;
pub mod registry;

use std::collections::HashMap;

use lsp_types::{Position, Range, Uri};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{DecorationStyle, HintsConfig};
use crate::lsp::{fetch_hints, AnalysisServiceHandle, TypeHint};
use crate::scan::scan_document;

pub use error::{DecorateError, DecorateResult};
pub use registry::DecoratorRegistry;

/// Token the surface uses to tell our decorations apart from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationType {
    pub key: String,
    pub style: DecorationStyle,
}

impl DecorationType {
    pub fn from_config(config: &HintsConfig) -> Self {
        Self {
            key: config.decoration_key.clone(),
            style: config.decoration.clone(),
        }
    }
}

/// One rendered hint: zero-width range plus the text drawn after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationOptions {
    pub range: Range,
    pub after_text: String,
}

impl From<TypeHint> for DecorationOptions {
    fn from(hint: TypeHint) -> Self {
        Self {
            range: Range::new(hint.position, hint.position),
            after_text: hint.label,
        }
    }
}

/// All decorations currently shown for one document, in document order.
pub type DecorationSet = Vec<DecorationOptions>;

/// Read-only view of a document at the moment a pass starts.
pub trait TextDocument: Send + Sync {
    fn uri(&self) -> &Uri;
    fn language_id(&self) -> &str;
    fn text(&self) -> String;
}

/// Where decorations end up. Each call replaces everything previously set
/// for `decoration_type`.
pub trait DecorationSurface: Send + Sync {
    fn set_decorations(
        &self,
        decoration_type: &DecorationType,
        decorations: DecorationSet,
    ) -> DecorateResult<()>;
}

/// Owned document snapshot.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub uri: Uri,
    pub language_id: String,
    pub text: String,
}

impl DocumentSnapshot {
    pub fn new(uri: Uri, language_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri,
            language_id: language_id.into(),
            text: text.into(),
        }
    }
}

impl TextDocument for DocumentSnapshot {
    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}

/// What a call to [`Decorator::decorate`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Not a document we decorate.
    Skipped,
    /// A new set with `count` decorations replaced the old one.
    Applied { count: usize },
    /// Something failed; the previous set is still in place.
    Failed,
}

/// State guarded by the pass mutex.
struct PassState {
    service: AnalysisServiceHandle,
    applied: HashMap<String, DecorationSet>,
}

/// Serialises decoration passes and owns the analysis-service handle.
pub struct Decorator {
    state: Mutex<PassState>,
    decoration_type: DecorationType,
    language_id: String,
    label_prefix: String,
}

impl Decorator {
    pub fn new(service: AnalysisServiceHandle, config: &HintsConfig) -> Self {
        Self {
            state: Mutex::new(PassState {
                service,
                applied: HashMap::new(),
            }),
            decoration_type: DecorationType::from_config(config),
            language_id: config.language_id.clone(),
            label_prefix: config.label_prefix.clone(),
        }
    }

    pub fn decoration_type(&self) -> &DecorationType {
        &self.decoration_type
    }

    /// Swap in a new service handle once any running pass has finished.
    pub async fn replace_service(&self, service: AnalysisServiceHandle) {
        let mut state = self.state.lock().await;
        state.service = service;
        debug!("analysis service replaced");
    }

    /// The handle the next pass will use.
    pub async fn service(&self) -> AnalysisServiceHandle {
        self.state.lock().await.service.clone()
    }

    /// The set most recently applied to `uri`, if any pass succeeded for it.
    pub async fn current_decorations(&self, uri: &Uri) -> Option<DecorationSet> {
        self.state.lock().await.applied.get(uri.as_str()).cloned()
    }

    /// Run one full decoration pass over `document`.
    ///
    /// Never returns an error: failures are logged and leave the previous
    /// decorations on screen.
    pub async fn decorate(
        &self,
        document: &dyn TextDocument,
        surface: &dyn DecorationSurface,
    ) -> PassOutcome {
        if document.language_id() != self.language_id {
            return PassOutcome::Skipped;
        }

        let mut state = self.state.lock().await;
        let uri = document.uri();
        info!("decorating {}", uri.as_str());

        let positions: Vec<Position> = scan_document(&document.text());
        let hints = fetch_hints(state.service.as_ref(), uri, &positions, &self.label_prefix).await;
        let set: DecorationSet = hints.into_iter().map(DecorationOptions::from).collect();
        let count = set.len();

        match surface.set_decorations(&self.decoration_type, set.clone()) {
            Ok(()) => {
                state.applied.insert(uri.as_str().to_string(), set);
                info!(
                    "done: {count} decorations provided ({} binding sites)",
                    positions.len()
                );
                PassOutcome::Applied { count }
            }
            Err(e) => {
                warn!("decoration pass for {} failed: {e}", uri.as_str());
                PassOutcome::Failed
            }
        }
    }
}
