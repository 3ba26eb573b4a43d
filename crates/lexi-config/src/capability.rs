use serde::{Deserialize, Serialize};

fn default_allow_download() -> bool {
    true
}

fn default_detection_threshold() -> f32 {
    0.5
}

fn default_voice_timeout_ms() -> u64 {
    2000
}

fn default_speech_rate() -> f32 {
    0.85
}

fn default_remote_enabled() -> bool {
    false
}

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CapabilityConfig {
    /// Create sessions for capabilities that still need a model download
    #[serde(default = "default_allow_download")]
    pub allow_download: bool,
    /// Detected languages below this confidence are ignored
    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f32,
    #[serde(default = "default_voice_timeout_ms")]
    pub voice_timeout_ms: u64,
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
    #[serde(default)]
    pub remote_translator: RemoteTranslatorConfig,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            allow_download: default_allow_download(),
            detection_threshold: default_detection_threshold(),
            voice_timeout_ms: default_voice_timeout_ms(),
            speech_rate: default_speech_rate(),
            remote_translator: RemoteTranslatorConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteTranslatorConfig {
    #[serde(default = "default_remote_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl RemoteTranslatorConfig {
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

impl Default for RemoteTranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_remote_enabled(),
            api_key: String::new(),
            api_url: default_api_url(),
        }
    }
}
