use serde::{Deserialize, Serialize};

use crate::gateway::{self, Capabilities, LifecyclePolicy};
use crate::CapabilityKind;

/// One ranked guess from the language detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub detected_language: String,
    pub confidence: f32,
}

/// Most confident detection strictly above `threshold`
pub fn best_language(detections: &[Detection], threshold: f32) -> Option<&str> {
    detections
        .iter()
        .filter(|d| d.confidence > threshold)
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| d.detected_language.as_str())
}

/// Detected language of `text`, or `None` when detection is missing, fails or is unsure
pub async fn detect(
    caps: &Capabilities,
    text: &str,
    threshold: f32,
    policy: &LifecyclePolicy,
) -> Option<String> {
    let detections = gateway::run(
        CapabilityKind::LanguageDetector,
        caps.detector.as_deref(),
        (),
        text.to_string(),
        policy,
    )
    .await;

    match detections {
        Ok(detections) => best_language(&detections, threshold).map(str::to_string),
        Err(e) => {
            tracing::debug!("Language detection skipped: {e}");
            None
        }
    }
}
