use std::sync::Arc;

use kanal::AsyncSender;
use lexi_types::{AppEvent, ReadingLevel};

use crate::host::HostCommand;
use crate::state::AppState;

/// Popup toggle: flip the mode and let every module know
pub async fn handle_set_immersive(state: Arc<AppState>, enabled: bool) {
    let level = {
        let mut mode = state.core.immersive.write().await;
        if mode.enabled == enabled {
            tracing::debug!("Immersive mode already {}", on_off(enabled));
            return;
        }
        mode.enabled = enabled;
        mode.level
    };

    let delivered = state
        .core
        .bus
        .publish(AppEvent::ModeChanged { enabled, level })
        .await;
    tracing::info!(
        "Immersive mode {} at {level} ({delivered} listeners)",
        on_off(enabled)
    );
}

/// Persist the new reading level and announce it
pub async fn handle_set_level(state: Arc<AppState>, level: ReadingLevel) {
    let settings = {
        let mut settings = state.core.settings.write().await;
        settings.reading_level = level;
        settings.clone()
    };
    if let Err(e) = state.store.save_settings(&settings).await {
        tracing::error!("Failed to save reading level: {e}");
    }

    state.core.immersive.write().await.level = level;
    state.core.bus.publish(AppEvent::LevelChanged { level }).await;
}

pub async fn handle_mode_changed(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    enabled: bool,
    level: ReadingLevel,
) -> anyhow::Result<()> {
    let count = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;

        if enabled {
            page.highlighter.remove_all(&mut page.doc);
            page.watcher.set_level(level);
            let handles = page.highlighter.highlight(&mut page.doc, level);
            tracing::info!("Highlighted {} words at {level}", handles.len());
            page.watcher.start(&mut page.doc);
        } else {
            page.watcher.stop(&mut page.doc);
            let removed = page.highlighter.remove_all(&mut page.doc);
            tracing::info!("Removed {removed} highlights");
        }
        page.highlighter.count(&page.doc)
    };

    if enabled {
        state.article.lock().await.rearm();
    }

    host_tx.send(HostCommand::Highlighted { count }).await?;
    Ok(())
}

/// Re-highlight at the new level when immersive mode is on
pub async fn handle_level_changed(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    level: ReadingLevel,
) -> anyhow::Result<()> {
    let enabled = state.core.immersive.read().await.enabled;

    let count = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;
        page.watcher.set_level(level);
        if !enabled {
            return Ok(());
        }

        // wrapping below must not be fed back to the watcher
        page.watcher.stop(&mut page.doc);
        page.highlighter.remove_all(&mut page.doc);
        page.highlighter.highlight(&mut page.doc, level);
        page.watcher.start(&mut page.doc);
        page.highlighter.count(&page.doc)
    };

    tracing::info!("Reading level now {level}, {count} words highlighted");
    host_tx.send(HostCommand::Highlighted { count }).await?;
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
