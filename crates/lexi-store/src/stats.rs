use chrono::NaiveDate;
use lexi_types::LearningStats;

use crate::store::Store;
use crate::{StoreError, keys};

impl Store {
    pub async fn stats(&self) -> LearningStats {
        self.load_or_default(keys::STATS).await
    }

    /// Count `today` towards the streak; returns the streak
    pub async fn record_activity(&self, today: NaiveDate) -> Result<u32, StoreError> {
        let stats = self
            .update(keys::STATS, |s: &mut LearningStats| {
                s.record_activity(today);
            })
            .await?;
        Ok(stats.current_streak)
    }

    pub async fn increment_articles_read(&self, today: NaiveDate) -> Result<LearningStats, StoreError> {
        self.update(keys::STATS, |s: &mut LearningStats| {
            s.articles_read += 1;
            s.record_activity(today);
        })
        .await
    }

    pub async fn increment_practice_sessions(
        &self,
        today: NaiveDate,
    ) -> Result<LearningStats, StoreError> {
        self.update(keys::STATS, |s: &mut LearningStats| {
            s.practice_sessions += 1;
            s.record_activity(today);
        })
        .await
    }

    pub async fn increment_words_learned(&self, count: u32) -> Result<LearningStats, StoreError> {
        self.update(keys::STATS, |s: &mut LearningStats| {
            s.words_learned += count
        })
        .await
    }

    pub async fn reset_streak(&self) -> Result<(), StoreError> {
        self.update(keys::STATS, |s: &mut LearningStats| {
            s.current_streak = 0;
            s.last_active_date = None;
        })
        .await
        .map(|_| ())
    }

    pub async fn clear_stats(&self) -> Result<(), StoreError> {
        self.save(keys::STATS, &LearningStats::default()).await
    }
}
