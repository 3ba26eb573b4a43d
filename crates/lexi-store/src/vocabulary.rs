use lexi_types::WordEntry;

use crate::store::{Store, push_front_capped};
use crate::{StoreError, keys, now_ms};

/// Review count below which a practiced word is still offered for practice
const MASTERED_REVIEWS: u32 = 3;

impl Store {
    /// Newest first
    pub async fn vocabulary(&self) -> Vec<WordEntry> {
        self.load_or_default(keys::VOCABULARY).await
    }

    pub async fn find_word(&self, word: &str) -> Option<WordEntry> {
        self.vocabulary().await.into_iter().find(|w| w.matches(word))
    }

    /// Save a looked-up word.
    ///
    /// A new word goes to the front and the oldest words beyond the cap are
    /// dropped. A word already saved keeps its place: translation and context
    /// are refreshed, the review count goes up and `practiced` is never cleared.
    pub async fn add_word(&self, entry: WordEntry) -> Result<WordEntry, StoreError> {
        let cap = self.limits.vocabulary;
        let mut saved = entry.clone();

        self.update(keys::VOCABULARY, |vocabulary: &mut Vec<WordEntry>| {
            match vocabulary.iter_mut().find(|w| w.matches(&entry.word)) {
                Some(existing) => {
                    let reviews = existing.review_count + 1;
                    let practiced = existing.practiced || entry.practiced;
                    *existing = WordEntry {
                        review_count: reviews,
                        practiced,
                        timestamp: now_ms(),
                        ..entry
                    };
                    saved = existing.clone();
                }
                None => push_front_capped(vocabulary, entry, cap),
            }
        })
        .await?;

        tracing::debug!("Saved word {} (reviews: {})", saved.word, saved.review_count);
        Ok(saved)
    }

    /// Returns false when the word is not saved
    pub async fn mark_practiced(&self, word: &str) -> Result<bool, StoreError> {
        self.modify_word(word, |w| w.practiced = true).await
    }

    pub async fn increment_review(&self, word: &str) -> Result<bool, StoreError> {
        self.modify_word(word, |w| w.review_count += 1).await
    }

    async fn modify_word(
        &self,
        word: &str,
        f: impl FnOnce(&mut WordEntry),
    ) -> Result<bool, StoreError> {
        let mut found = false;
        self.update(keys::VOCABULARY, |vocabulary: &mut Vec<WordEntry>| {
            if let Some(entry) = vocabulary.iter_mut().find(|w| w.matches(word)) {
                f(entry);
                entry.timestamp = now_ms();
                found = true;
            }
        })
        .await?;
        Ok(found)
    }

    /// Words not yet practiced or reviewed fewer than three times
    pub async fn words_to_practice(&self) -> Vec<WordEntry> {
        self.vocabulary()
            .await
            .into_iter()
            .filter(|w| !w.practiced || w.review_count < MASTERED_REVIEWS)
            .collect()
    }

    pub async fn recent_words(&self, n: usize) -> Vec<WordEntry> {
        let mut vocabulary = self.vocabulary().await;
        vocabulary.truncate(n);
        vocabulary
    }

    pub async fn delete_word(&self, word: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        self.update(keys::VOCABULARY, |vocabulary: &mut Vec<WordEntry>| {
            let before = vocabulary.len();
            vocabulary.retain(|w| !w.matches(word));
            removed = vocabulary.len() != before;
        })
        .await?;
        Ok(removed)
    }

    pub async fn clear_vocabulary(&self) -> Result<(), StoreError> {
        self.save(keys::VOCABULARY, &Vec::<WordEntry>::new()).await
    }

    pub async fn vocabulary_count(&self) -> usize {
        self.vocabulary().await.len()
    }
}
