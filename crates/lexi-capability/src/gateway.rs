use std::sync::Arc;

use crate::speech::SpeechHost;
use crate::{
    Availability, CapabilityError, CapabilityKind, DefinitionFactory, DetectorFactory, Factory,
    ProgressSink, ProofreaderFactory, RewriterFactory, SummarizerFactory, TranslatorFactory,
};

/// Capabilities the host exposes; `None` means the host lacks it entirely
#[derive(Clone, Default)]
pub struct Capabilities {
    pub translator: Option<Arc<TranslatorFactory>>,
    pub summarizer: Option<Arc<SummarizerFactory>>,
    pub rewriter: Option<Arc<RewriterFactory>>,
    pub proofreader: Option<Arc<ProofreaderFactory>>,
    pub detector: Option<Arc<DetectorFactory>>,
    pub definitions: Option<Arc<DefinitionFactory>>,
    pub speech: Option<Arc<dyn SpeechHost>>,
}

#[derive(Clone, Default)]
pub struct LifecyclePolicy {
    /// Create sessions whose model is still downloading
    pub allow_download: bool,
    pub progress: Option<ProgressSink>,
}

impl LifecyclePolicy {
    pub fn new(allow_download: bool) -> Self {
        Self {
            allow_download,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Presence, availability, create, invoke, destroy, strictly in that order.
///
/// The session is destroyed whether or not the call succeeded.
pub async fn run<Opts, I, O>(
    kind: CapabilityKind,
    factory: Option<&dyn Factory<Opts, I, O>>,
    options: Opts,
    input: I,
    policy: &LifecyclePolicy,
) -> Result<O, CapabilityError>
where
    Opts: Send + Sync + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    let Some(factory) = factory else {
        tracing::warn!("{kind} missing from host");
        return Err(CapabilityError::unavailable(kind));
    };

    let availability = factory.availability(&options).await?;
    tracing::debug!("{kind} availability: {}", availability.as_str());

    match availability {
        Availability::Unavailable => {
            return Err(CapabilityError::Unavailable {
                capability: kind,
                hint: "Not supported on this device.".to_string(),
            });
        }
        Availability::NeedsDownload if !policy.allow_download => {
            return Err(CapabilityError::NotReady {
                capability: kind,
                status: availability.as_str().to_string(),
                progress: None,
            });
        }
        Availability::NeedsDownload => {
            tracing::info!("{kind} model download required, creating with progress");
            if let Some(progress) = &policy.progress {
                progress(0.0);
            }
        }
        Availability::Ready => {}
    }

    let session = factory.create(options, policy.progress.clone()).await?;
    tracing::debug!("{kind} session created");

    let result = session.invoke(input).await;
    session.destroy().await;

    if let Err(e) = &result {
        tracing::warn!("{kind} call failed: {e}");
    }

    result
}


#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::fakes::ScriptedFactory;
    use super::*;

    async fn call(
        factory: &ScriptedFactory<String>,
        policy: &LifecyclePolicy,
    ) -> Result<String, CapabilityError> {
        run::<(), String, String>(
            CapabilityKind::Summarizer,
            Some(factory),
            (),
            "text".to_string(),
            policy,
        )
        .await
    }

    #[tokio::test]
    async fn missing_capability_fails_fast_with_hint() {
        let err = run::<(), String, String>(
            CapabilityKind::Summarizer,
            None,
            (),
            "text".into(),
            &LifecyclePolicy::default(),
        )
        .await
        .unwrap_err();

        match err {
            CapabilityError::Unavailable { capability, hint } => {
                assert_eq!(capability, CapabilityKind::Summarizer);
                assert!(hint.contains("Chrome"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn ready_capability_runs_full_lifecycle_in_order() {
        let factory = ScriptedFactory::new(Availability::Ready, Ok("summary".to_string()));

        let out = call(&factory, &LifecyclePolicy::default()).await.unwrap();

        assert_eq!(out, "summary");
        assert_eq!(
            factory.steps(),
            vec!["availability", "create", "invoke", "destroy"]
        );
    }

    #[tokio::test]
    async fn session_is_destroyed_after_failed_invoke() {
        let factory = ScriptedFactory::<String>::new(
            Availability::Ready,
            Err(CapabilityError::operation(
                CapabilityKind::Summarizer,
                "unsupported language",
            )),
        );

        let err = call(&factory, &LifecyclePolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CapabilityError::Operation { .. }));
        assert_eq!(factory.steps().last(), Some(&"destroy"));
    }

    #[tokio::test]
    async fn unavailable_status_never_creates_a_session() {
        let factory = ScriptedFactory::new(Availability::Unavailable, Ok(String::new()));

        let err = call(&factory, &LifecyclePolicy::new(true)).await.unwrap_err();

        assert!(matches!(err, CapabilityError::Unavailable { .. }));
        assert_eq!(factory.steps(), vec!["availability"]);
    }

    #[tokio::test]
    async fn download_is_refused_without_permission() {
        let factory = ScriptedFactory::new(Availability::NeedsDownload, Ok(String::new()));

        let err = call(&factory, &LifecyclePolicy::new(false))
            .await
            .unwrap_err();

        assert!(matches!(err, CapabilityError::NotReady { .. }));
        assert_eq!(factory.steps(), vec!["availability"]);
    }

    #[tokio::test]
    async fn download_reports_progress_when_allowed() {
        let factory = ScriptedFactory::new(Availability::NeedsDownload, Ok("done".to_string()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let policy = LifecyclePolicy::new(true)
            .with_progress(Arc::new(move |p| sink.lock().unwrap().push(p)));

        let out = call(&factory, &policy).await.unwrap();

        assert_eq!(out, "done");
        assert_eq!(*seen.lock().unwrap(), vec![0.0]);
    }
}
