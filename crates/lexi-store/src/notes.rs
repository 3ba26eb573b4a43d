use std::collections::BTreeMap;

use lexi_types::WordNote;

use crate::store::Store;
use crate::{StoreError, keys, now_ms};

impl Store {
    /// Every note, keyed by lower-cased word
    pub async fn word_notes(&self) -> BTreeMap<String, WordNote> {
        self.load_or_default(keys::WORD_DATA).await
    }

    pub async fn note(&self, word: &str) -> Option<WordNote> {
        self.word_notes().await.remove(&word.to_lowercase())
    }

    pub async fn set_note(&self, word: &str, mut note: WordNote) -> Result<WordNote, StoreError> {
        note.updated_at = now_ms();
        let saved = note.clone();
        self.update(keys::WORD_DATA, |notes: &mut BTreeMap<String, WordNote>| {
            notes.insert(word.to_lowercase(), note);
        })
        .await?;
        Ok(saved)
    }

    pub async fn remove_note(&self, word: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        self.update(keys::WORD_DATA, |notes: &mut BTreeMap<String, WordNote>| {
            removed = notes.remove(&word.to_lowercase()).is_some();
        })
        .await?;
        Ok(removed)
    }
}
