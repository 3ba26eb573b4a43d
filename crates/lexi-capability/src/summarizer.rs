use lexi_types::{SummaryLength, SummaryType};

use crate::gateway::{self, Capabilities, LifecyclePolicy};
use crate::{CapabilityError, CapabilityKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerOptions {
    pub summary_type: SummaryType,
    pub length: SummaryLength,
    /// Output format requested from the host, always markdown here
    pub format: &'static str,
}

impl SummarizerOptions {
    pub fn new(summary_type: SummaryType, length: SummaryLength) -> Self {
        Self {
            summary_type,
            length,
            format: "markdown",
        }
    }
}

pub async fn summarize(
    caps: &Capabilities,
    text: &str,
    options: SummarizerOptions,
    policy: &LifecyclePolicy,
) -> Result<String, CapabilityError> {
    gateway::run(
        CapabilityKind::Summarizer,
        caps.summarizer.as_deref(),
        options,
        text.to_string(),
        policy,
    )
    .await
}
