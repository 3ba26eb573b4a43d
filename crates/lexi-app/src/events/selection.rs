use std::sync::Arc;

use kanal::AsyncSender;
use lexi_capability::detector;
use lexi_capability::rewriter::{self, RewriterOptions};
use lexi_dom::range::replace_range;
use lexi_ui::{Anchor, PanelState, SelectionTrigger, SurfaceKind, Ticket, content};

use crate::events::{lookup, overlay, speech};
use crate::host::HostCommand;
use crate::session::ToolbarSession;
use crate::state::AppState;

const SUBJECT_CHARS: usize = 40;

/// Wait for the selection to settle and offer the toolbar for it
pub async fn show_toolbar(state: Arc<AppState>, trigger: SelectionTrigger) -> anyhow::Result<()> {
    state.tracker.settle().await;
    if state.busy.is_busy() {
        tracing::debug!("Toolbar busy, selection ignored");
        return Ok(());
    }

    let selection = {
        let page = state.page.lock().await;
        state.tracker.resolve(&page.doc, trigger, &state.selection)
    };
    let Some(selection) = selection else {
        return Ok(());
    };

    let (x, y) = selection.anchor;
    let subject: String = selection.text.chars().take(SUBJECT_CHARS).collect();
    let ticket = overlay::open_surface(
        &state,
        SurfaceKind::SelectionToolbar,
        "Lexi",
        subject,
        Anchor::Point { x, y },
        &[],
    )
    .await?;

    tracing::debug!("Toolbar for {} chars", selection.text.chars().count());
    state.sessions.lock().await.toolbar = Some(ToolbarSession {
        ticket,
        text: selection.text,
        range: selection.range,
        rewritten: None,
    });
    overlay::set_content(&state, ticket, &content::toolbar_actions()).await;
    Ok(())
}

async fn selected_text(state: &AppState, ticket: Ticket) -> Option<String> {
    state
        .sessions
        .lock()
        .await
        .toolbar(ticket)
        .map(|s| s.text.clone())
}

/// Translate the selection; a single word also goes to the vocabulary
pub async fn translate_selection(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let Some(_busy) = state.busy.try_acquire() else {
        tracing::debug!("Toolbar busy, translate ignored");
        return Ok(());
    };
    let Some(text) = selected_text(&state, ticket).await else {
        return Ok(());
    };

    overlay::render(&state, ticket, &PanelState::loading("Translating...")).await;
    match lookup::translate_text(&state, &text).await {
        Ok(result) => {
            let panel = PanelState::Ready(content::translation_result(&result.translation));
            overlay::render(&state, ticket, &panel).await;
            if text.split_whitespace().count() == 1 {
                lookup::save_word(&state, &result).await;
            }
        }
        Err(e) => {
            tracing::warn!("Selection translation failed: {e}");
            overlay::render(&state, ticket, &PanelState::from(&e)).await;
        }
    }
    Ok(())
}

pub async fn speak_selection(
    state: Arc<AppState>,
    host_tx: AsyncSender<HostCommand>,
    ticket: Ticket,
) -> anyhow::Result<()> {
    let Some(text) = selected_text(&state, ticket).await else {
        return Ok(());
    };

    let threshold = state.core.config.read().await.capability.detection_threshold;
    let policy = state.policy().await;
    let lang = match detector::detect(&state.caps, &text, threshold, &policy).await {
        Some(lang) => lang,
        None => lookup::page_language(&state).await,
    };
    speech::speak(&state, &host_tx, &text, &lang).await
}

pub async fn rewrite_selection(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let Some(_busy) = state.busy.try_acquire() else {
        tracing::debug!("Toolbar busy, rewrite ignored");
        return Ok(());
    };
    let Some(text) = selected_text(&state, ticket).await else {
        return Ok(());
    };

    overlay::render(&state, ticket, &PanelState::loading("Rewriting...")).await;
    let policy = state.policy().await;
    match rewriter::rewrite(&state.caps, &text, RewriterOptions::default(), &policy).await {
        Ok(rewritten) => {
            let panel = PanelState::Ready(content::rewrite_result(&rewritten));
            if let Some(session) = state.sessions.lock().await.toolbar(ticket) {
                session.rewritten = Some(rewritten);
            }
            overlay::render(&state, ticket, &panel).await;
        }
        Err(e) => {
            tracing::warn!("Rewrite failed: {e}");
            overlay::render(&state, ticket, &PanelState::from(&e)).await;
        }
    }
    Ok(())
}

/// Put the rewritten text in place of the selection and close the toolbar
pub async fn apply_rewrite(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let pending = state
        .sessions
        .lock()
        .await
        .toolbar(ticket)
        .and_then(|s| s.rewritten.clone().map(|r| (s.range, r)));
    let Some((range, rewritten)) = pending else {
        return Ok(());
    };

    {
        let mut page = state.page.lock().await;
        replace_range(&mut page.doc, &range, &rewritten)?;
    }
    tracing::info!("Applied rewrite of {} chars", rewritten.chars().count());
    overlay::close_surface(&state, SurfaceKind::SelectionToolbar).await;
    Ok(())
}

pub async fn copy_rewrite(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    ticket: Ticket,
) -> anyhow::Result<()> {
    let rewritten = state
        .sessions
        .lock()
        .await
        .toolbar(ticket)
        .and_then(|s| s.rewritten.clone());
    if let Some(text) = rewritten {
        host_tx.send(HostCommand::CopyText(text)).await?;
        host_tx
            .send(HostCommand::Notice("✓ Copied".to_string()))
            .await?;
    }
    Ok(())
}
