use crate::gateway::{self, Capabilities, LifecyclePolicy};
use crate::{CapabilityError, CapabilityKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RewriteTone {
    #[default]
    AsIs,
    MoreFormal,
    MoreCasual,
}

impl RewriteTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteTone::AsIs => "as-is",
            RewriteTone::MoreFormal => "more-formal",
            RewriteTone::MoreCasual => "more-casual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriterOptions {
    pub shared_context: String,
    pub tone: RewriteTone,
    pub format: &'static str,
    pub length: &'static str,
}

impl RewriterOptions {
    pub fn with_tone(tone: RewriteTone) -> Self {
        Self {
            tone,
            ..Self::default()
        }
    }
}

impl Default for RewriterOptions {
    fn default() -> Self {
        Self {
            shared_context: "Language learning context".to_string(),
            tone: RewriteTone::AsIs,
            format: "plain-text",
            length: "as-is",
        }
    }
}

/// Rewrite `text`; an empty host result falls back to the input
pub async fn rewrite(
    caps: &Capabilities,
    text: &str,
    options: RewriterOptions,
    policy: &LifecyclePolicy,
) -> Result<String, CapabilityError> {
    if text.trim().is_empty() {
        return Err(CapabilityError::Validation(
            "Please write a sentence first.".to_string(),
        ));
    }

    let rewritten = gateway::run(
        CapabilityKind::Rewriter,
        caps.rewriter.as_deref(),
        options,
        text.to_string(),
        policy,
    )
    .await?;

    if rewritten.trim().is_empty() {
        Ok(text.to_string())
    } else {
        Ok(rewritten)
    }
}
