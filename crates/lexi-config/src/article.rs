use serde::{Deserialize, Serialize};

fn default_completion_threshold() -> f64 {
    0.8
}

fn default_prompt_delay_ms() -> u64 {
    2000
}

fn default_prompt_hide_ms() -> u64 {
    10000
}

fn default_min_content_chars() -> usize {
    100
}

fn default_excerpt_chars() -> usize {
    500
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ArticleConfig {
    /// Fraction of the document height that counts as "read"
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: f64,
    #[serde(default = "default_prompt_delay_ms")]
    pub prompt_delay_ms: u64,
    #[serde(default = "default_prompt_hide_ms")]
    pub prompt_hide_ms: u64,
    /// Shortest text the summarizer accepts
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            completion_threshold: default_completion_threshold(),
            prompt_delay_ms: default_prompt_delay_ms(),
            prompt_hide_ms: default_prompt_hide_ms(),
            min_content_chars: default_min_content_chars(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}
