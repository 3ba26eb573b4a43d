use std::fmt;
use std::sync::Arc;

/// Readiness reported by a host capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Unavailable,
    /// Present but the on-device model still has to be fetched
    NeedsDownload,
    Ready,
}

impl Availability {
    /// Map the status strings hosts report ("readily", "after-download", "no", ...)
    pub fn from_host(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "readily" | "available" => Availability::Ready,
            "after-download" | "downloadable" | "downloading" => Availability::NeedsDownload,
            _ => Availability::Unavailable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Unavailable => "unavailable",
            Availability::NeedsDownload => "after-download",
            Availability::Ready => "ready",
        }
    }
}

/// Download progress callback, receives the loaded fraction in `0.0..=1.0`
pub type ProgressSink = Arc<dyn Fn(f32) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Translator,
    Summarizer,
    Proofreader,
    Rewriter,
    LanguageDetector,
    Speaker,
    Definitions,
}

impl CapabilityKind {
    pub fn name(&self) -> &'static str {
        match self {
            CapabilityKind::Translator => "Translator",
            CapabilityKind::Summarizer => "Summarizer",
            CapabilityKind::Proofreader => "Proofreader",
            CapabilityKind::Rewriter => "Rewriter",
            CapabilityKind::LanguageDetector => "LanguageDetector",
            CapabilityKind::Speaker => "Speech synthesis",
            CapabilityKind::Definitions => "Definitions",
        }
    }

    /// Remediation shown when the host lacks the capability
    pub fn hint(&self) -> &'static str {
        match self {
            CapabilityKind::Translator => "Requires Chrome 138+ with the Translator API enabled.",
            CapabilityKind::Summarizer => "Requires Chrome 138+ with the Summarizer API enabled.",
            CapabilityKind::Proofreader => {
                "Requires Chrome 141+ with chrome://flags/#proofreader-api-for-gemini-nano enabled."
            }
            CapabilityKind::Rewriter => {
                "Requires Chrome 137+ with chrome://flags/#rewriter-api-for-gemini-nano enabled."
            }
            CapabilityKind::LanguageDetector => {
                "Requires Chrome 138+ with the Language Detector API enabled."
            }
            CapabilityKind::Speaker => "Text-to-speech not supported in your browser.",
            CapabilityKind::Definitions => "Requires Chrome 138+ with the Prompt API enabled.",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_status_strings_map_to_availability() {
        assert_eq!(Availability::from_host("readily"), Availability::Ready);
        assert_eq!(Availability::from_host("available"), Availability::Ready);
        assert_eq!(
            Availability::from_host("after-download"),
            Availability::NeedsDownload
        );
        assert_eq!(
            Availability::from_host("downloadable"),
            Availability::NeedsDownload
        );
        assert_eq!(Availability::from_host("no"), Availability::Unavailable);
        assert_eq!(Availability::from_host(""), Availability::Unavailable);
    }
}
