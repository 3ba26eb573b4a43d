use serde::{Deserialize, Serialize};

fn default_settle_delay_ms() -> u64 {
    10
}

fn default_max_chars() -> usize {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SelectionConfig {
    /// Wait before reading the native selection after pointer/key up
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Selections at or above this many chars are ignored
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            max_chars: default_max_chars(),
        }
    }
}
