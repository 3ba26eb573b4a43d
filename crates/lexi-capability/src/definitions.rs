use serde::{Deserialize, Serialize};

use crate::gateway::{self, Capabilities, LifecyclePolicy};
use crate::CapabilityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionOptions {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub word: String,
    pub definition: String,
    /// IPA transcription
    pub pronunciation: Option<String>,
    pub example: String,
    /// Content came from the static fallback, not a model
    #[serde(default)]
    pub demo_mode: bool,
}

/// Canned definitions used when no model-backed capability answers
pub trait FallbackDefinitions: Send + Sync {
    fn define(&self, word: &str) -> Definition;
}

/// Definition for `word`, never fails: any capability error degrades to the fallback
pub async fn define(
    caps: &Capabilities,
    fallback: &dyn FallbackDefinitions,
    word: &str,
    language: &str,
    policy: &LifecyclePolicy,
) -> Definition {
    let result = gateway::run(
        CapabilityKind::Definitions,
        caps.definitions.as_deref(),
        DefinitionOptions {
            language: language.to_string(),
        },
        word.to_string(),
        policy,
    )
    .await;

    match result {
        Ok(definition) => definition,
        Err(e) => {
            tracing::info!("Using fallback definition for '{word}': {e}");
            let mut definition = fallback.define(word);
            definition.demo_mode = true;
            definition
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::gateway::fakes::ScriptedFactory;
    use crate::{Availability, CapabilityError};

    struct Canned;

    impl FallbackDefinitions for Canned {
        fn define(&self, word: &str) -> Definition {
            Definition {
                word: word.to_string(),
                definition: format!("A word: {word}"),
                pronunciation: None,
                example: String::new(),
                demo_mode: false,
            }
        }
    }

    #[tokio::test]
    async fn missing_capability_uses_fallback_in_demo_mode() {
        let definition = define(
            &Capabilities::default(),
            &Canned,
            "laureate",
            "en",
            &LifecyclePolicy::default(),
        )
        .await;

        assert_eq!(definition.definition, "A word: laureate");
        assert!(definition.demo_mode);
    }

    #[tokio::test]
    async fn failing_capability_also_degrades() {
        let caps = Capabilities {
            definitions: Some(Arc::new(ScriptedFactory::<Definition>::new(
                Availability::Ready,
                Err(CapabilityError::operation(CapabilityKind::Definitions, "quota")),
            ))),
            ..Default::default()
        };

        let definition = define(&caps, &Canned, "prize", "en", &LifecyclePolicy::default()).await;
        assert!(definition.demo_mode);
    }
}
