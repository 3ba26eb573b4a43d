use std::sync::Arc;

use kanal::AsyncSender;
use lexi_capability::speech::SpeechEvent;
use lexi_capability::{CapabilityError, CapabilityKind};

use crate::host::HostCommand;
use crate::state::AppState;

/// Speak `text`, telling the user when the host has no speech synthesis
pub async fn speak(
    state: &AppState,
    host_tx: &AsyncSender<HostCommand>,
    text: &str,
    lang: &str,
) -> anyhow::Result<()> {
    let Some(speaker) = &state.speaker else {
        let err = CapabilityError::unavailable(CapabilityKind::Speaker);
        host_tx.send(HostCommand::Notice(err.to_string())).await?;
        return Ok(());
    };

    speaker
        .speak(
            text,
            lang,
            Arc::new(|event: SpeechEvent| match event {
                SpeechEvent::Error(e) => tracing::warn!("Speech failed: {e}"),
                other => tracing::debug!("Speech {other:?}"),
            }),
        )
        .await;
    Ok(())
}
