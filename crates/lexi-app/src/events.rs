use std::future::Future;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::host::{HostCommand, HostEvent};
use crate::state::AppState;

pub mod actions;
pub mod article;
pub mod grammar;
pub mod hover;
pub mod immersive;
pub mod lookup;
pub mod overlay;
pub mod pointer;
pub mod practice;
pub mod selection;
pub mod speech;
pub mod summary;

/// Host input loop
pub async fn event_loop(
    state: Arc<AppState>,
    host_rx: AsyncReceiver<HostEvent>,
    host_tx: AsyncSender<HostCommand>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Waiting for host events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            event = host_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {}", event.name());
        if let Err(e) = handle_events(state.clone(), &host_tx, event).await {
            tracing::error!("[EVENT_LOOP] Handler failed: {e:#}");
        }
    }
}

pub async fn handle_events(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    event: HostEvent,
) -> anyhow::Result<()> {
    match event {
        HostEvent::PointerDown { target, x, y } => {
            pointer::handle_pointer_down(state, target, (x, y)).await?;
        }
        HostEvent::PointerMove { x, y } => {
            pointer::handle_pointer_move(state, (x, y)).await;
        }
        HostEvent::PointerUp { target, x, y } => {
            pointer::handle_pointer_up(state, target, (x, y)).await;
        }
        HostEvent::Click { target } => {
            pointer::handle_click(state, host_tx, target).await?;
        }
        HostEvent::KeyDown { key } => {
            pointer::handle_key_down(state, &key).await;
        }
        HostEvent::KeyUp { target, key, shift } => {
            pointer::handle_key_up(state, target, &key, shift).await;
        }
        HostEvent::HoverStart { target } => {
            hover::handle_hover_start(state, target).await;
        }
        HostEvent::HoverEnd { target } => {
            hover::handle_hover_end(state, target).await;
        }
        HostEvent::Scroll { scroll_y } => {
            article::handle_scroll(state, scroll_y).await;
        }
        HostEvent::Selection(range) => {
            state.selection.set(range);
        }
        HostEvent::Input { kind, field, value } => {
            overlay::handle_input(&state, kind, &field, &value).await;
        }
        HostEvent::SetImmersive { enabled } => {
            immersive::handle_set_immersive(state, enabled).await;
        }
        HostEvent::SetLevel(level) => {
            immersive::handle_set_level(state, level).await;
        }
        HostEvent::OpenSummary => {
            state.core.bus.publish(AppEvent::OpenSummary).await;
        }
        HostEvent::OpenGrammar => {
            grammar::open_grammar(state).await?;
        }
    }

    Ok(())
}

/// Consumer of the page-local event bus
pub async fn bus_loop(
    state: Arc<AppState>,
    bus_rx: AsyncReceiver<AppEvent>,
    host_tx: AsyncSender<HostCommand>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[BUS_LOOP] Listening");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[BUS_LOOP] Cancelled");
                return Ok(());
            }
            event = bus_rx.recv() => event?,
        };

        tracing::debug!("[BUS_LOOP] {}", event.name());
        if let Err(e) = handle_app_event(state.clone(), &host_tx, event).await {
            tracing::error!("[BUS_LOOP] Handler failed: {e:#}");
        }
    }
}

pub async fn handle_app_event(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::ModeChanged { enabled, level } => {
            immersive::handle_mode_changed(state, host_tx, enabled, level).await?;
        }
        AppEvent::LevelChanged { level } => {
            immersive::handle_level_changed(state, host_tx, level).await?;
        }
        AppEvent::ArticleComplete(entry) => {
            practice::handle_article_complete(state, entry).await;
        }
        AppEvent::OpenSummary => {
            summary::open_summary(state).await?;
        }
        AppEvent::StartPractice(words) => {
            practice::start_practice(state, words).await?;
        }
    }

    Ok(())
}

/// Run capability-bound work off the loop so the page keeps responding
pub fn spawn_handler<F>(name: &'static str, task: F)
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = task.await {
            tracing::error!("{name} failed: {e:#}");
        }
    });
}
