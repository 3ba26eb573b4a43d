use async_trait::async_trait;
use lexi_capability::remote::{ProviderMetadata, RemoteTranslator, TranslateError, Translation};
use lexi_types::LanguageCode;

/// DeepL-backed translator for hosts without a built-in one
#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    /// DeepL wants upper-case codes and names English targets by variant
    fn target_code(code: &str) -> String {
        match code.to_lowercase().as_str() {
            "en" => "EN-US".to_string(),
            "pt" => "PT-BR".to_string(),
            other => other.to_uppercase(),
        }
    }

    fn source_code(code: &str) -> String {
        code.split('-').next().unwrap_or(code).to_uppercase()
    }
}

#[async_trait]
impl RemoteTranslator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let source = Self::source_code(&from);
        let target = Self::target_code(&to);
        let params = [
            ("text", text),
            ("source_lang", source.as_str()),
            ("target_lang", target.as_str()),
        ];

        tracing::debug!("DeepL request {source} -> {target}, {} chars", text.len());

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        match response.status().as_u16() {
            429 => return Err(TranslateError::RateLimitExceeded),
            403 => return Err(TranslateError::AuthenticationError),
            400 => {
                return Err(TranslateError::UnsupportedLanguagePair {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            _ => {}
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_follow_deepl_conventions() {
        assert_eq!(DeepLTranslator::target_code("en"), "EN-US");
        assert_eq!(DeepLTranslator::target_code("es"), "ES");
        assert_eq!(DeepLTranslator::source_code("en-GB"), "EN");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let translator = DeepLTranslator::new(String::new(), "http://127.0.0.1:9".into());
        assert!(!translator.is_configured());

        let err = translator
            .translate("laureate", "en".into(), "es".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }
}
