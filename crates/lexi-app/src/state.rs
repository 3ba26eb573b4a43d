use std::sync::Arc;

use lexi_capability::definitions::FallbackDefinitions;
use lexi_capability::speech::Speaker;
use lexi_capability::{Capabilities, LifecyclePolicy};
use lexi_config::Config;
use lexi_core::AppState as CoreState;
use lexi_dom::{Document, Highlighter, MutationWatcher};
use lexi_lang_english::{EnglishFrequency, FallbackDictionary};
use lexi_store::Store;
use lexi_types::UserSettings;
use lexi_ui::{BusyFlag, OverlayCoordinator, SelectionTracker, SharedSelection};
use tokio::sync::Mutex;

use crate::article::ArticleDetector;
use crate::hover::HoverState;
use crate::session::Sessions;

/// Everything that touches the page tree, behind one lock
pub struct Page {
    pub doc: Document,
    pub overlay: OverlayCoordinator,
    pub watcher: MutationWatcher,
    pub highlighter: Highlighter,
}

pub struct AppState {
    /// Config, settings, immersive toggle and the event bus
    pub core: CoreState,
    pub page: Mutex<Page>,
    pub store: Store,
    pub caps: Capabilities,
    pub fallback: Arc<dyn FallbackDefinitions>,
    pub speaker: Option<Speaker>,
    pub selection: SharedSelection,
    pub tracker: SelectionTracker,
    pub busy: BusyFlag,
    pub article: Mutex<ArticleDetector>,
    pub hover: Mutex<HoverState>,
    pub sessions: Mutex<Sessions>,
}

impl AppState {
    pub fn new(
        config: Config,
        settings: UserSettings,
        doc: Document,
        store: Store,
        caps: Capabilities,
    ) -> Self {
        let mut frequency = EnglishFrequency::with_defaults();
        for path in &config.highlight.frequency_paths {
            match frequency.merge_file(path) {
                Ok(n) => tracing::info!("Merged {n} frequency entries from {path}"),
                Err(e) => tracing::warn!("Skipping frequency list {path}: {e}"),
            }
        }

        let highlighter = Highlighter::new(Arc::new(frequency), &config.highlight);
        let speaker = match Speaker::from_host(caps.speech.clone(), &config.capability) {
            Ok(speaker) => Some(speaker),
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        };

        let page = Page {
            doc,
            overlay: OverlayCoordinator::new(config.overlay.clone()),
            watcher: MutationWatcher::new(settings.reading_level),
            highlighter,
        };

        Self {
            page: Mutex::new(page),
            store,
            caps,
            fallback: Arc::new(FallbackDictionary::with_defaults()),
            speaker,
            selection: SharedSelection::new(),
            tracker: SelectionTracker::new(config.selection.clone()),
            busy: BusyFlag::new(),
            article: Mutex::new(ArticleDetector::new(config.article.completion_threshold)),
            hover: Mutex::new(HoverState::new()),
            sessions: Mutex::new(Sessions::default()),
            core: CoreState::new(config, settings),
        }
    }

    pub async fn config(&self) -> Config {
        self.core.config.read().await.clone()
    }

    pub async fn settings(&self) -> UserSettings {
        self.core.settings.read().await.clone()
    }

    pub async fn policy(&self) -> LifecyclePolicy {
        LifecyclePolicy::new(self.core.config.read().await.capability.allow_download)
    }

    /// URL of the page being read
    pub async fn url(&self) -> String {
        self.page.lock().await.doc.url.clone()
    }
}
