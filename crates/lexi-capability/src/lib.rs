pub mod availability;
pub mod definitions;
pub mod detector;
pub mod error;
pub mod gateway;
pub mod proofreader;
pub mod remote;
pub mod rewriter;
pub mod speech;
pub mod summarizer;
pub mod translator;

pub use availability::{Availability, CapabilityKind, ProgressSink};
pub use error::CapabilityError;
pub use gateway::{Capabilities, LifecyclePolicy};

/// A created capability instance that performs one kind of call
#[async_trait::async_trait]
pub trait Session<I, O>: Send + Sync
where
    I: Send + 'static,
    O: Send + 'static,
{
    async fn invoke(&self, input: I) -> Result<O, CapabilityError>;

    /// Release host resources held by the session
    async fn destroy(&self) {}
}

/// Host entry point for a capability: readiness probe and session construction
#[async_trait::async_trait]
pub trait Factory<Opts, I, O>: Send + Sync
where
    Opts: Send + Sync + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn availability(&self, options: &Opts) -> Result<Availability, CapabilityError>;

    async fn create(
        &self,
        options: Opts,
        progress: Option<ProgressSink>,
    ) -> Result<Box<dyn Session<I, O>>, CapabilityError>;
}

pub type TranslatorFactory = dyn Factory<translator::TranslatorOptions, String, String>;
pub type SummarizerFactory = dyn Factory<summarizer::SummarizerOptions, String, String>;
pub type RewriterFactory = dyn Factory<rewriter::RewriterOptions, String, String>;
pub type ProofreaderFactory =
    dyn Factory<proofreader::ProofreaderOptions, String, proofreader::ProofreadResult>;
pub type DetectorFactory = dyn Factory<(), String, Vec<detector::Detection>>;
pub type DefinitionFactory =
    dyn Factory<definitions::DefinitionOptions, String, definitions::Definition>;
