//! Storage keys, one record per logical collection

pub const SETTINGS: &str = "settings";
pub const VOCABULARY: &str = "vocabulary";
pub const TRANSLATION_HISTORY: &str = "translationHistory";
pub const ARTICLES: &str = "articles";
pub const SUMMARIES: &str = "summaries";
pub const STATS: &str = "stats";
pub const WORD_DATA: &str = "wordData";

pub const ALL: [&str; 7] = [
    SETTINGS,
    VOCABULARY,
    TRANSLATION_HISTORY,
    ARTICLES,
    SUMMARIES,
    STATS,
    WORD_DATA,
];
