use serde::{Deserialize, Serialize};

use crate::gateway::{self, Capabilities, LifecyclePolicy};
use crate::{CapabilityError, CapabilityKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofreaderOptions {
    pub expected_input_languages: Vec<String>,
    pub output_language: String,
}

impl ProofreaderOptions {
    pub fn for_language(language: &str) -> Self {
        Self {
            expected_input_languages: vec![language.to_string()],
            output_language: language.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Spelling,
    Grammar,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    #[serde(rename = "type", default)]
    pub kind: CorrectionKind,
    pub original: String,
    pub suggestion: String,
    /// Char offset of `original` in the checked text
    pub start_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Correction {
    /// One-line description shown in the grammar panel
    pub fn message(&self) -> String {
        match self.kind {
            CorrectionKind::Spelling => {
                format!("Spelling: \"{}\" → \"{}\"", self.original, self.suggestion)
            }
            CorrectionKind::Grammar => match &self.explanation {
                Some(explanation) => format!("Grammar: {explanation}"),
                None => format!("Grammar: \"{}\" → \"{}\"", self.original, self.suggestion),
            },
            CorrectionKind::Other => self
                .explanation
                .clone()
                .unwrap_or_else(|| "Suggestion available".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofreadResult {
    pub corrections: Vec<Correction>,
    pub corrected_text: String,
}

impl ProofreadResult {
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Apply suggestions from the end of the text backwards so earlier offsets stay valid.
///
/// Corrections that fall outside the text or overlap an already applied one are skipped.
pub fn apply_corrections(text: &str, corrections: &[Correction]) -> String {
    let mut sorted: Vec<&Correction> = corrections.iter().collect();
    sorted.sort_by(|a, b| b.start_index.cmp(&a.start_index));

    let mut chars: Vec<char> = text.chars().collect();
    let mut applied_from = chars.len();

    for correction in sorted {
        let start = correction.start_index;
        let end = start + correction.original.chars().count();
        if end > applied_from || end > chars.len() {
            tracing::debug!("Skipping correction at {start}, out of range or overlapping");
            continue;
        }

        chars.splice(start..end, correction.suggestion.chars());
        applied_from = start;
    }

    chars.into_iter().collect()
}

/// Check `text`; empty input is a validation warning and never reaches the host
pub async fn proofread(
    caps: &Capabilities,
    text: &str,
    language: &str,
    policy: &LifecyclePolicy,
) -> Result<ProofreadResult, CapabilityError> {
    if text.trim().is_empty() {
        return Err(CapabilityError::Validation(
            "Please write a sentence first.".to_string(),
        ));
    }

    let mut result = gateway::run(
        CapabilityKind::Proofreader,
        caps.proofreader.as_deref(),
        ProofreaderOptions::for_language(language),
        text.to_string(),
        policy,
    )
    .await?;

    if result.corrected_text.is_empty() {
        result.corrected_text = apply_corrections(text, &result.corrections);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(kind: CorrectionKind, original: &str, suggestion: &str, at: usize) -> Correction {
        Correction {
            kind,
            original: original.to_string(),
            suggestion: suggestion.to_string(),
            start_index: at,
            explanation: None,
        }
    }

    #[test]
    fn applies_corrections_back_to_front() {
        let text = "I goes to teh store";
        let corrections = vec![
            fix(CorrectionKind::Grammar, "goes", "go", 2),
            fix(CorrectionKind::Spelling, "teh", "the", 10),
        ];

        assert_eq!(apply_corrections(text, &corrections), "I go to the store");
    }

    #[test]
    fn out_of_range_correction_is_ignored() {
        let corrections = vec![fix(CorrectionKind::Spelling, "word", "world", 40)];
        assert_eq!(apply_corrections("hello", &corrections), "hello");
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let corrections = vec![fix(CorrectionKind::Spelling, "cafe", "café", 7)];
        assert_eq!(apply_corrections("¿Dónde cafe?", &corrections), "¿Dónde café?");
    }

    #[test]
    fn messages_follow_correction_kind() {
        assert_eq!(
            fix(CorrectionKind::Spelling, "teh", "the", 0).message(),
            "Spelling: \"teh\" → \"the\""
        );
        let mut grammar = fix(CorrectionKind::Grammar, "goes", "go", 0);
        grammar.explanation = Some("Subject-verb agreement".into());
        assert_eq!(grammar.message(), "Grammar: Subject-verb agreement");
    }

    #[tokio::test]
    async fn empty_sentence_is_a_warning() {
        let err = proofread(
            &Capabilities::default(),
            "  ",
            "es",
            &LifecyclePolicy::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Please write a sentence first.");
        assert!(err.is_warning());
    }
}
