use std::sync::Arc;

use lexi_config::Config;
use lexi_types::{ReadingLevel, UserSettings};
use tokio::sync::RwLock;

use crate::bus::EventBus;

/// Immersive-mode toggle as seen by the highlighter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmersiveMode {
    pub enabled: bool,
    pub level: ReadingLevel,
}

#[derive(Default)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub settings: RwLock<UserSettings>,
    pub immersive: RwLock<ImmersiveMode>,
    pub bus: EventBus,
}

impl AppState {
    pub fn new(config: Config, settings: UserSettings) -> Self {
        let immersive = ImmersiveMode {
            enabled: false,
            level: settings.reading_level,
        };

        Self {
            config: Arc::new(RwLock::new(config)),
            settings: RwLock::new(settings),
            immersive: RwLock::new(immersive),
            bus: EventBus::new(),
        }
    }

    pub async fn reading_level(&self) -> ReadingLevel {
        self.immersive.read().await.level
    }
}
