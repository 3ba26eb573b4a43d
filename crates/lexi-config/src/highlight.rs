use serde::{Deserialize, Serialize};

fn default_class_name() -> String {
    "lexi-highlight".to_string()
}

fn default_min_word_len() -> usize {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HighlightConfig {
    /// Class put on every highlight span
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_min_word_len")]
    pub min_word_len: usize,
    /// Extra `word\trank` frequency lists merged over the built-in bands
    #[serde(default)]
    pub frequency_paths: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            min_word_len: default_min_word_len(),
            frequency_paths: vec![],
        }
    }
}
