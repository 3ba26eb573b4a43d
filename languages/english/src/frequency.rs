use std::collections::HashMap;

use lexi_core::DifficultyClassifier;
use lexi_core::words::normalize_word;
use lexi_types::ReadingLevel;

/// Highest rank still counted as a beginner word
const BEGINNER_MAX_RANK: u32 = 1000;
/// Highest rank still counted as an intermediate word
const INTERMEDIATE_MAX_RANK: u32 = 5000;

const BEGINNER_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i",
    "it", "for", "not", "on", "with", "he", "as", "you", "do", "at",
    "this", "but", "his", "by", "from", "they", "we", "say", "her", "she",
    "or", "an", "will", "my", "one", "all", "would", "there", "their", "what",
    "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
    "when", "make", "can", "like", "time", "no", "just", "him", "know", "take",
    "people", "into", "year", "your", "good", "some", "could", "them", "see", "other",
    "than", "then", "now", "look", "only", "come", "its", "over", "think", "also",
    "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
    "even", "new", "want", "because", "any", "these", "give", "day", "most", "us",
    "is", "are", "was", "were", "been", "has", "had", "does", "did", "done",
    "am", "going", "where", "here", "why", "much", "many", "more", "very",
    "should", "must", "may", "might", "need",
];

const INTERMEDIATE_WORDS: &[&str] = &[
    "government", "administration", "policy", "economic", "social", "political",
    "develop", "system", "program", "community", "issue", "service", "national",
    "public", "process", "information", "change", "include", "provide", "continue",
    "require", "individual", "particular", "available", "important", "support",
    "different", "however", "increase", "become", "significant", "interest",
];

/// Frequency band of a rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyBand {
    /// Top 1000
    Core,
    /// Ranks 1001 to 5000
    Common,
    /// Ranked but beyond 5000
    Rare,
    Unknown,
}

impl FrequencyBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyBand::Core => "Core",
            FrequencyBand::Common => "Common",
            FrequencyBand::Rare => "Rare",
            FrequencyBand::Unknown => "Unknown",
        }
    }

    pub fn reading_level(&self) -> ReadingLevel {
        match self {
            FrequencyBand::Core => ReadingLevel::Beginner,
            FrequencyBand::Common => ReadingLevel::Intermediate,
            FrequencyBand::Rare | FrequencyBand::Unknown => ReadingLevel::Advanced,
        }
    }
}

/// English word frequency ranks
pub struct EnglishFrequency {
    ranks: HashMap<String, u32>,
}

impl EnglishFrequency {
    /// Create empty frequency database
    pub fn new() -> Self {
        Self {
            ranks: HashMap::new(),
        }
    }

    /// Create with the embedded beginner and intermediate bands
    pub fn with_defaults() -> Self {
        let mut ranks = HashMap::new();

        for (idx, word) in BEGINNER_WORDS.iter().enumerate() {
            ranks.entry(word.to_string()).or_insert(idx as u32 + 1);
        }

        for (idx, word) in INTERMEDIATE_WORDS.iter().enumerate() {
            ranks
                .entry(word.to_string())
                .or_insert(BEGINNER_MAX_RANK + idx as u32 + 1);
        }

        Self { ranks }
    }

    /// Load frequency data from TSV file (word\trank format)
    pub fn load_from_file(path: &str) -> Result<Self, std::io::Error> {
        let mut frequency = Self::new();
        frequency.merge_file(path)?;
        Ok(frequency)
    }

    /// Merge a TSV list over the current ranks, returns the number of entries read
    pub fn merge_file(&mut self, path: &str) -> Result<usize, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        let mut merged = 0;

        for line in content.lines() {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() >= 2 {
                if let Ok(rank) = parts[1].trim().parse::<u32>() {
                    self.ranks.insert(normalize_word(parts[0]), rank);
                    merged += 1;
                }
            }
        }

        tracing::info!("Merged {merged} frequency entries from {path}");
        Ok(merged)
    }

    /// Get frequency rank for a word (lower = more common)
    pub fn get_rank(&self, word: &str) -> Option<u32> {
        self.ranks.get(&normalize_word(word)).copied()
    }

    pub fn get_band(&self, word: &str) -> FrequencyBand {
        match self.get_rank(word) {
            Some(rank) if rank <= BEGINNER_MAX_RANK => FrequencyBand::Core,
            Some(rank) if rank <= INTERMEDIATE_MAX_RANK => FrequencyBand::Common,
            Some(_) => FrequencyBand::Rare,
            None => FrequencyBand::Unknown,
        }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl Default for EnglishFrequency {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DifficultyClassifier for EnglishFrequency {
    fn language_code(&self) -> &str {
        "en"
    }

    fn classify(&self, word: &str) -> ReadingLevel {
        self.get_band(word).reading_level()
    }
}
