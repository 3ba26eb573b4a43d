use lexi_types::{SummaryEntry, SummaryLength, SummaryType};

use crate::store::{Store, push_front_capped};
use crate::{StoreError, keys, now_ms};

/// First `max_chars` chars of `text`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

impl Store {
    /// Newest first
    pub async fn summaries(&self) -> Vec<SummaryEntry> {
        self.load_or_default(keys::SUMMARIES).await
    }

    /// Append a summary of `original`, keeping only an excerpt of the source text
    pub async fn add_summary(
        &self,
        url: &str,
        original: &str,
        excerpt_chars: usize,
        summary: &str,
        summary_type: SummaryType,
        length: SummaryLength,
    ) -> Result<SummaryEntry, StoreError> {
        let entry = SummaryEntry {
            url: url.to_string(),
            original: excerpt(original, excerpt_chars),
            summary: summary.to_string(),
            summary_type,
            length,
            timestamp: now_ms(),
        };

        let cap = self.limits.summaries;
        let saved = entry.clone();
        self.update(keys::SUMMARIES, |summaries: &mut Vec<SummaryEntry>| {
            push_front_capped(summaries, entry, cap)
        })
        .await?;
        Ok(saved)
    }

    pub async fn clear_summaries(&self) -> Result<(), StoreError> {
        self.save(keys::SUMMARIES, &Vec::<SummaryEntry>::new()).await
    }
}
