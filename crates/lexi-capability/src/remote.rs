use async_trait::async_trait;
use lexi_types::LanguageCode;

use crate::translator::TranslatorOptions;
use crate::{Availability, CapabilityError, CapabilityKind, Factory, ProgressSink, Session};

/// Network translation provider used when the host has no built-in translator
#[async_trait]
pub trait RemoteTranslator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Usable without further setup (e.g. an API key is present)
    fn is_configured(&self) -> bool;

    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl From<TranslateError> for CapabilityError {
    fn from(e: TranslateError) -> Self {
        CapabilityError::operation(CapabilityKind::Translator, e.to_string())
    }
}

/// Exposes a [`RemoteTranslator`] through the translator capability lifecycle
pub struct RemoteTranslatorFactory<T> {
    provider: std::sync::Arc<T>,
}

impl<T: RemoteTranslator + 'static> RemoteTranslatorFactory<T> {
    pub fn new(provider: T) -> Self {
        Self {
            provider: std::sync::Arc::new(provider),
        }
    }
}

struct RemoteSession<T> {
    provider: std::sync::Arc<T>,
    options: TranslatorOptions,
}

#[async_trait]
impl<T: RemoteTranslator + 'static> Session<String, String> for RemoteSession<T> {
    async fn invoke(&self, input: String) -> Result<String, CapabilityError> {
        let translation = self
            .provider
            .translate(
                &input,
                self.options.source_language.clone(),
                self.options.target_language.clone(),
            )
            .await?;
        Ok(translation.text)
    }
}

#[async_trait]
impl<T: RemoteTranslator + 'static> Factory<TranslatorOptions, String, String>
    for RemoteTranslatorFactory<T>
{
    async fn availability(
        &self,
        _options: &TranslatorOptions,
    ) -> Result<Availability, CapabilityError> {
        if self.provider.is_configured() {
            Ok(Availability::Ready)
        } else {
            tracing::debug!("{} is not configured", self.provider.metadata().name);
            Ok(Availability::Unavailable)
        }
    }

    async fn create(
        &self,
        options: TranslatorOptions,
        _progress: Option<ProgressSink>,
    ) -> Result<Box<dyn Session<String, String>>, CapabilityError> {
        Ok(Box::new(RemoteSession {
            provider: self.provider.clone(),
            options,
        }))
    }
}
