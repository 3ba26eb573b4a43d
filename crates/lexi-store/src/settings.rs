use lexi_types::UserSettings;

use crate::store::Store;
use crate::{StoreError, keys};

impl Store {
    /// Saved settings, defaults when none were saved
    pub async fn settings(&self) -> UserSettings {
        self.load_or_default(keys::SETTINGS).await
    }

    /// Persist defaults on first run; returns the effective settings
    pub async fn init_settings(&self) -> Result<UserSettings, StoreError> {
        if let Some(existing) = self.load::<UserSettings>(keys::SETTINGS).await {
            return Ok(existing);
        }
        let defaults = UserSettings::default();
        self.save(keys::SETTINGS, &defaults).await?;
        tracing::info!("Stored default settings");
        Ok(defaults)
    }

    pub async fn save_settings(&self, settings: &UserSettings) -> Result<(), StoreError> {
        self.save(keys::SETTINGS, settings).await
    }
}

#[cfg(test)]
mod tests {
    use lexi_types::ReadingLevel;

    use super::*;

    #[tokio::test]
    async fn first_run_persists_defaults() {
        let store = Store::in_memory();
        assert!(store.load::<UserSettings>(keys::SETTINGS).await.is_none());

        let settings = store.init_settings().await.unwrap();

        assert_eq!(settings.target_language, "es");
        assert_eq!(settings.native_language, "en");
        assert!(store.load::<UserSettings>(keys::SETTINGS).await.is_some());
    }

    #[tokio::test]
    async fn saved_settings_win_over_defaults() {
        let store = Store::in_memory();
        let custom = UserSettings {
            reading_level: ReadingLevel::Advanced,
            target_language: "fr".into(),
            ..Default::default()
        };
        store.save_settings(&custom).await.unwrap();

        assert_eq!(store.init_settings().await.unwrap(), custom);
        assert_eq!(store.settings().await, custom);
    }
}
