use serde::{Deserialize, Serialize};

fn default_vocabulary() -> usize {
    1000
}

fn default_translation_history() -> usize {
    100
}

fn default_articles() -> usize {
    50
}

fn default_summaries() -> usize {
    20
}

fn default_practice_words() -> usize {
    5
}

/// Collection caps, oldest entries are evicted first
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    #[serde(default = "default_vocabulary")]
    pub vocabulary: usize,
    #[serde(default = "default_translation_history")]
    pub translation_history: usize,
    #[serde(default = "default_articles")]
    pub articles: usize,
    #[serde(default = "default_summaries")]
    pub summaries: usize,
    #[serde(default = "default_practice_words")]
    pub practice_words: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
            translation_history: default_translation_history(),
            articles: default_articles(),
            summaries: default_summaries(),
            practice_words: default_practice_words(),
        }
    }
}
