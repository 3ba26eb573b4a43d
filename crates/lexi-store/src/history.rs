use lexi_types::TranslationRecord;

use crate::store::{Store, push_front_capped};
use crate::{StoreError, keys};

impl Store {
    /// Newest first
    pub async fn translation_history(&self) -> Vec<TranslationRecord> {
        self.load_or_default(keys::TRANSLATION_HISTORY).await
    }

    pub async fn add_translation(&self, record: TranslationRecord) -> Result<(), StoreError> {
        let cap = self.limits.translation_history;
        self.update(keys::TRANSLATION_HISTORY, |history: &mut Vec<TranslationRecord>| {
            push_front_capped(history, record, cap)
        })
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn history_keeps_latest_hundred() {
        let store = Store::in_memory();
        let mut seed: Vec<TranslationRecord> = (0..100)
            .rev()
            .map(|i| TranslationRecord {
                original: format!("text {i}"),
                translation: format!("texto {i}"),
                source_lang: "en".into(),
                target_lang: "es".into(),
                timestamp: i,
            })
            .collect();
        store.save(keys::TRANSLATION_HISTORY, &seed).await.unwrap();

        let latest = TranslationRecord {
            original: "laureate".into(),
            translation: "galardonado".into(),
            source_lang: "en".into(),
            target_lang: "es".into(),
            timestamp: 100,
        };
        store.add_translation(latest.clone()).await.unwrap();

        seed.insert(0, latest);
        seed.truncate(100);
        assert_eq!(store.translation_history().await, seed);
    }
}
