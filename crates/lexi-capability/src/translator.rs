use lexi_config::capability::CapabilityConfig;
use lexi_types::LanguageCode;

use crate::gateway::{self, Capabilities, LifecyclePolicy};
use crate::{CapabilityError, CapabilityKind, detector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
}

/// What the user asked for; `source` is used when detection is missing or unsure
#[derive(Debug, Clone)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub native: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub text: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
}

fn primary_subtag(code: &str) -> String {
    code.split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase()
}

pub fn same_language(a: &str, b: &str) -> bool {
    primary_subtag(a) == primary_subtag(b)
}

/// Target language that differs from `source`.
///
/// Falls back to the native language, then to the other of `en`/`es`.
pub fn resolve_target(source: &str, target: &str, native: &str) -> LanguageCode {
    if !same_language(source, target) {
        return target.to_string();
    }

    if !same_language(source, native) {
        tracing::debug!("Source equals target ({source}), translating to native {native}");
        return native.to_string();
    }

    let fallback = if primary_subtag(source) == "en" { "es" } else { "en" };
    tracing::debug!("Source, target and native all {source}, falling back to {fallback}");
    fallback.to_string()
}

/// Detect the source language, pick a non-identical target and translate
pub async fn translate(
    caps: &Capabilities,
    config: &CapabilityConfig,
    request: TranslationRequest<'_>,
    policy: &LifecyclePolicy,
) -> Result<TranslationOutcome, CapabilityError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(CapabilityError::Validation(
            "Select some text to translate.".to_string(),
        ));
    }

    let source = detector::detect(caps, text, config.detection_threshold, policy)
        .await
        .unwrap_or_else(|| request.source.to_string());
    let target = resolve_target(&source, request.target, request.native);

    let options = TranslatorOptions {
        source_language: source.clone(),
        target_language: target.clone(),
    };

    let translated = gateway::run(
        CapabilityKind::Translator,
        caps.translator.as_deref(),
        options,
        text.to_string(),
        policy,
    )
    .await?;

    Ok(TranslationOutcome {
        text: translated,
        source,
        target,
    })
}
