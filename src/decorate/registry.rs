//! Process-wide decorator slot.
//!
//! Holds at most one [`Decorator`]. The first `bind` creates it; later
//! binds only swap the service handle inside it.

use std::sync::{Arc, LazyLock};

use tokio::sync::Mutex;
use tracing::info;

use super::Decorator;
use crate::config::HintsConfig;
use crate::lsp::AnalysisServiceHandle;

static GLOBAL: LazyLock<DecoratorRegistry> =
    LazyLock::new(|| DecoratorRegistry::new(HintsConfig::load()));

pub struct DecoratorRegistry {
    config: HintsConfig,
    slot: Mutex<Option<Arc<Decorator>>>,
}

impl DecoratorRegistry {
    pub fn new(config: HintsConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(None),
        }
    }

    /// The registry shared by the whole process, configured from disk on
    /// first use.
    pub fn global() -> &'static DecoratorRegistry {
        &GLOBAL
    }

    /// Install `service`, creating the decorator if this is the first bind.
    ///
    /// On later binds the swap waits for any in-flight pass to finish.
    pub async fn bind(&self, service: AnalysisServiceHandle) -> Arc<Decorator> {
        let existing = {
            let mut slot = self.slot.lock().await;
            match slot.as_ref() {
                Some(decorator) => decorator.clone(),
                None => {
                    info!("creating decorator for '{}' documents", self.config.language_id);
                    let decorator = Arc::new(Decorator::new(service, &self.config));
                    *slot = Some(decorator.clone());
                    return decorator;
                }
            }
        };
        // Slot lock is released; only the pass mutex is awaited here.
        existing.replace_service(service).await;
        existing
    }

    /// The decorator, if anything has been bound yet.
    pub async fn get(&self) -> Option<Arc<Decorator>> {
        self.slot.lock().await.clone()
    }
}
