use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::host::HostCommand;
use crate::state::AppState;

/// Highlight content the page adds while immersive mode is on
pub async fn watcher_io(
    state: Arc<AppState>,
    delta_time: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<HostCommand>,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(delta_time);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Mutation watcher stopping");
                return Ok(());
            }
            _ = interval.tick() => {}
        }

        let applied = {
            let mut guard = state.page.lock().await;
            let page = &mut *guard;
            if !page.watcher.is_active() {
                continue;
            }
            let handles = page.watcher.process(&mut page.doc, &page.highlighter);
            if handles.is_empty() {
                continue;
            }
            tracing::debug!("Highlighted {} words in added content", handles.len());
            page.highlighter.count(&page.doc)
        };

        if let Err(e) = event_tx.send(HostCommand::Highlighted { count: applied }).await {
            tracing::error!("Failed to report highlights: {e}");
        }
    }
}
