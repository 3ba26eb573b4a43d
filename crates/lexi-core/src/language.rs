use lexi_types::ReadingLevel;

/// Word difficulty source for a language
pub trait DifficultyClassifier: Send + Sync {
    /// Language identifier (ISO 639-1 code: "en", "es", ...)
    fn language_code(&self) -> &str;

    /// Difficulty band of a word; words the classifier does not know are `Advanced`
    fn classify(&self, word: &str) -> ReadingLevel;

    /// True only for words strictly harder than the reader's level
    fn should_highlight(&self, word: &str, level: ReadingLevel) -> bool {
        self.classify(word) > level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ReadingLevel);

    impl DifficultyClassifier for Fixed {
        fn language_code(&self) -> &str {
            "en"
        }

        fn classify(&self, _word: &str) -> ReadingLevel {
            self.0
        }
    }

    #[test]
    fn advanced_words_are_hidden_only_from_advanced_readers() {
        let classifier = Fixed(ReadingLevel::Advanced);

        assert!(classifier.should_highlight("laureate", ReadingLevel::Beginner));
        assert!(classifier.should_highlight("laureate", ReadingLevel::Intermediate));
        assert!(!classifier.should_highlight("laureate", ReadingLevel::Advanced));
    }

    #[test]
    fn intermediate_words_only_reach_beginners() {
        let classifier = Fixed(ReadingLevel::Intermediate);

        assert!(classifier.should_highlight("policy", ReadingLevel::Beginner));
        assert!(!classifier.should_highlight("policy", ReadingLevel::Intermediate));
        assert!(!classifier.should_highlight("policy", ReadingLevel::Advanced));
    }

    #[test]
    fn beginner_words_are_never_highlighted() {
        let classifier = Fixed(ReadingLevel::Beginner);

        for level in ReadingLevel::ALL {
            assert!(!classifier.should_highlight("the", level));
        }
    }
}
