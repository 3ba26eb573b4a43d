use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lexi_config::capability::CapabilityConfig;

use crate::{CapabilityError, CapabilityKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. "es-ES"
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Start,
    End,
    Error(String),
}

pub type SpeechCallback = Arc<dyn Fn(SpeechEvent) + Send + Sync>;

/// Host speech synthesis
#[async_trait]
pub trait SpeechHost: Send + Sync {
    /// Currently loaded voices, may be empty until the host finishes loading them
    fn voices(&self) -> Vec<Voice>;

    /// Resolves the next time the voice list changes
    async fn voices_changed(&self);

    /// Stop the utterance in flight, if any
    fn cancel(&self);

    /// Queue an utterance; progress is reported through `on_event`
    fn speak(&self, utterance: Utterance, on_event: SpeechCallback);
}

/// Voice for `code`: an exact tag first, then one starting with the full code,
/// then one sharing its primary subtag
pub fn pick_voice(voices: &[Voice], code: &str) -> Option<Voice> {
    let code = code.to_lowercase();
    let primary = code.split('-').next().unwrap_or(&code).to_string();

    voices
        .iter()
        .find(|v| v.lang.eq_ignore_ascii_case(&code))
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.lang.to_lowercase().starts_with(&code))
        })
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.lang.to_lowercase().starts_with(&primary))
        })
        .cloned()
}

/// Fire-and-forget text to speech over a [`SpeechHost`]
pub struct Speaker {
    host: Arc<dyn SpeechHost>,
    rate: f32,
    voice_timeout: Duration,
}

impl Speaker {
    pub fn new(host: Arc<dyn SpeechHost>, config: &CapabilityConfig) -> Self {
        Self {
            host,
            rate: config.speech_rate,
            voice_timeout: Duration::from_millis(config.voice_timeout_ms),
        }
    }

    /// Build a speaker from the host capability set, failing fast when speech is missing
    pub fn from_host(
        host: Option<Arc<dyn SpeechHost>>,
        config: &CapabilityConfig,
    ) -> Result<Self, CapabilityError> {
        host.map(|h| Self::new(h, config))
            .ok_or_else(|| CapabilityError::unavailable(CapabilityKind::Speaker))
    }

    /// Cancel anything in flight and speak `text`
    pub async fn speak(&self, text: &str, lang: &str, on_event: SpeechCallback) {
        self.host.cancel();

        let voices = self.load_voices().await;
        let voice = pick_voice(&voices, lang);
        if voice.is_none() {
            tracing::debug!("No voice for {lang}, host default will be used");
        }

        self.host.speak(
            Utterance {
                text: text.to_string(),
                lang: lang.to_string(),
                rate: self.rate,
                pitch: 1.0,
                volume: 1.0,
                voice,
            },
            on_event,
        );
    }

    pub fn stop(&self) {
        self.host.cancel();
    }

    /// Voices available for a language
    pub fn voices_for(&self, code: &str) -> Vec<Voice> {
        self.host
            .voices()
            .into_iter()
            .filter(|v| v.lang.starts_with(code))
            .collect()
    }

    async fn load_voices(&self) -> Vec<Voice> {
        let voices = self.host.voices();
        if !voices.is_empty() {
            return voices;
        }

        if tokio::time::timeout(self.voice_timeout, self.host.voices_changed())
            .await
            .is_err()
        {
            tracing::debug!("Voices not loaded after {:?}", self.voice_timeout);
        }
        self.host.voices()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn voice(name: &str, lang: &str) -> Voice {
        Voice {
            name: name.into(),
            lang: lang.into(),
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        voices: Vec<Voice>,
        calls: Mutex<Vec<String>>,
        spoken: Mutex<Vec<Utterance>>,
    }

    #[async_trait]
    impl SpeechHost for RecordingHost {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        async fn voices_changed(&self) {
            std::future::pending::<()>().await
        }

        fn cancel(&self) {
            self.calls.lock().unwrap().push("cancel".into());
        }

        fn speak(&self, utterance: Utterance, on_event: SpeechCallback) {
            self.calls.lock().unwrap().push("speak".into());
            self.spoken.lock().unwrap().push(utterance);
            on_event(SpeechEvent::End);
        }
    }

    #[test]
    fn exact_tag_beats_prefix() {
        let voices = vec![voice("Jorge", "es-MX"), voice("Lucia", "es-ES")];
        assert_eq!(pick_voice(&voices, "es-ES").unwrap().name, "Lucia");
    }

    #[test]
    fn bare_language_prefers_the_matching_bare_tag() {
        let voices = vec![voice("Daniel", "en-GB"), voice("Alex", "EN")];
        assert_eq!(pick_voice(&voices, "en").unwrap().name, "Alex");

        let regional = vec![voice("Daniel", "en-GB")];
        assert_eq!(pick_voice(&regional, "en").unwrap().name, "Daniel");
    }

    #[test]
    fn falls_back_to_primary_subtag() {
        let voices = vec![voice("Daniel", "en-GB"), voice("Jorge", "es-MX")];
        assert_eq!(pick_voice(&voices, "es-AR").unwrap().name, "Jorge");
        assert!(pick_voice(&voices, "ja").is_none());
    }

    #[tokio::test]
    async fn cancels_before_speaking_at_learner_rate() {
        let host = Arc::new(RecordingHost {
            voices: vec![voice("Lucia", "es-ES")],
            ..Default::default()
        });
        let speaker = Speaker::new(host.clone(), &CapabilityConfig::default());

        let ended = Arc::new(Mutex::new(false));
        let flag = ended.clone();
        speaker
            .speak(
                "hola",
                "es",
                Arc::new(move |e| *flag.lock().unwrap() = e == SpeechEvent::End),
            )
            .await;

        assert_eq!(*host.calls.lock().unwrap(), vec!["cancel", "speak"]);
        let spoken = host.spoken.lock().unwrap();
        assert_eq!(spoken[0].rate, 0.85);
        assert_eq!(spoken[0].voice.as_ref().unwrap().name, "Lucia");
        assert!(*ended.lock().unwrap());
    }

    #[tokio::test]
    async fn speaks_with_default_voice_when_voices_never_load() {
        let host = Arc::new(RecordingHost::default());
        let config = CapabilityConfig {
            voice_timeout_ms: 10,
            ..Default::default()
        };
        let speaker = Speaker::new(host.clone(), &config);

        speaker.speak("hello", "en", Arc::new(|_| {})).await;

        assert!(host.spoken.lock().unwrap()[0].voice.is_none());
    }

    #[test]
    fn missing_host_is_unavailable() {
        let err = Speaker::from_host(None, &CapabilityConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CapabilityError::Unavailable { .. }));
    }
}
