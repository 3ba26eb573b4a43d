use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{LanguageCode, PracticeWord, ReadingLevel, SummaryLength, SummaryType, Theme};

/// A looked-up or saved vocabulary word, unique by case-insensitive `word`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    pub translation: String,
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub review_count: u32,
    pub practiced: bool,
    pub article_url: String,
}

impl WordEntry {
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        article_url: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            timestamp,
            review_count: 0,
            practiced: false,
            article_url: article_url.into(),
        }
    }

    pub fn matches(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.to_lowercase()
    }

    pub fn to_practice_word(&self) -> PracticeWord {
        PracticeWord {
            word: self.word.clone(),
            translation: self.translation.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        }
    }
}

/// A page the user read, unique by `url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleEntry {
    pub url: String,
    pub title: String,
    pub timestamp: i64,
    pub word_count: u32,
    /// Insertion-ordered, no duplicates
    #[serde(default)]
    pub words_looked_up: Vec<String>,
}

impl ArticleEntry {
    /// Returns false when the word was already recorded
    pub fn record_lookup(&mut self, word: &str) -> bool {
        if self.words_looked_up.iter().any(|w| w == word) {
            return false;
        }
        self.words_looked_up.push(word.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub url: String,
    /// Excerpt of the summarised text
    pub original: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
    pub length: SummaryLength,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningStats {
    pub articles_read: u32,
    pub words_learned: u32,
    pub practice_sessions: u32,
    pub current_streak: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl LearningStats {
    /// Count `today` as an active day.
    ///
    /// Same-day calls are no-ops; a gap of exactly one day extends the
    /// streak, anything else restarts it at 1.
    pub fn record_activity(&mut self, today: NaiveDate) -> u32 {
        if self.last_active_date == Some(today) {
            return self.current_streak;
        }

        let consecutive = today
            .pred_opt()
            .is_some_and(|yesterday| self.last_active_date == Some(yesterday));

        self.current_streak = if consecutive {
            self.current_streak + 1
        } else {
            1
        };
        self.last_active_date = Some(today);
        self.current_streak
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub target_language: LanguageCode,
    pub native_language: LanguageCode,
    pub reading_level: ReadingLevel,
    pub theme: Theme,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            target_language: "es".to_string(),
            native_language: "en".to_string(),
            reading_level: ReadingLevel::Beginner,
            theme: Theme::Light,
        }
    }
}

/// One entry of the `translationHistory` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub original: String,
    pub translation: String,
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
    pub timestamp: i64,
}

/// Free-form notes attached to a word in the `wordData` map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordNote {
    pub note: String,
    pub definition: Option<String>,
    pub pronunciation: Option<String>,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn streak_extends_from_yesterday() {
        let mut stats = LearningStats {
            current_streak: 3,
            last_active_date: Some(day(2024, 3, 9)),
            ..Default::default()
        };

        assert_eq!(stats.record_activity(day(2024, 3, 10)), 4);
        assert_eq!(stats.last_active_date, Some(day(2024, 3, 10)));
    }

    #[test]
    fn streak_is_stable_within_a_day() {
        let mut stats = LearningStats {
            current_streak: 4,
            last_active_date: Some(day(2024, 3, 10)),
            ..Default::default()
        };

        assert_eq!(stats.record_activity(day(2024, 3, 10)), 4);
        assert_eq!(stats.record_activity(day(2024, 3, 10)), 4);
    }

    #[test]
    fn streak_resets_after_a_gap() {
        let mut stats = LearningStats {
            current_streak: 7,
            last_active_date: Some(day(2024, 3, 7)),
            ..Default::default()
        };

        assert_eq!(stats.record_activity(day(2024, 3, 10)), 1);
    }

    #[test]
    fn first_activity_starts_streak() {
        let mut stats = LearningStats::default();
        assert_eq!(stats.record_activity(day(2024, 1, 1)), 1);
    }

    #[test]
    fn article_lookups_are_deduplicated() {
        let mut article = ArticleEntry {
            url: "https://example.com/a".into(),
            title: "A".into(),
            timestamp: 0,
            word_count: 10,
            words_looked_up: vec![],
        };

        assert!(article.record_lookup("laureate"));
        assert!(!article.record_lookup("laureate"));
        assert!(article.record_lookup("prize"));
        assert_eq!(article.words_looked_up, vec!["laureate", "prize"]);
    }

    #[test]
    fn word_entry_serializes_camel_case() {
        let entry = WordEntry::new("Hola", "hello", "es", "en", "https://x", 1);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["reviewCount"], 0);
        assert_eq!(json["sourceLang"], "es");
        assert!(entry.matches("hola"));
    }
}
