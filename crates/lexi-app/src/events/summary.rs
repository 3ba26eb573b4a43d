use std::sync::Arc;

use kanal::AsyncSender;
use lexi_capability::summarizer::{self, SummarizerOptions};
use lexi_dom::page::extract_article_text;
use lexi_types::{SummaryLength, SummaryType};
use lexi_ui::content::{self, SUMMARY_INPUT, SUMMARY_LENGTH, SUMMARY_TYPE};
use lexi_ui::{Anchor, PanelState, SurfaceKind, Ticket};

use crate::events::overlay;
use crate::host::HostCommand;
use crate::session::SummarySession;
use crate::state::AppState;

pub async fn open_summary(state: Arc<AppState>) -> anyhow::Result<()> {
    let url = state.url().await;
    let ticket = overlay::open_surface(
        &state,
        SurfaceKind::SummaryModal,
        "📝 Summarize",
        url,
        Anchor::Centered,
        &content::summary_form(SummaryType::default(), SummaryLength::default()),
    )
    .await?;

    state.sessions.lock().await.summary = Some(SummarySession { ticket, last: None });
    Ok(())
}

/// Summarise the pasted text, or the article when nothing was pasted
pub async fn generate_summary(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let (summary_type, length, pasted, article, url) = {
        let page = state.page.lock().await;
        let field = |name| page.overlay.field(&page.doc, ticket, name);
        (
            field(SUMMARY_TYPE)
                .and_then(|v| SummaryType::parse(&v))
                .unwrap_or_default(),
            field(SUMMARY_LENGTH)
                .and_then(|v| SummaryLength::parse(&v))
                .unwrap_or_default(),
            field(SUMMARY_INPUT).unwrap_or_default(),
            extract_article_text(&page.doc),
            page.doc.url.clone(),
        )
    };

    let pasted = pasted.trim();
    let text = if pasted.is_empty() { article } else { pasted.to_string() };

    let (min_chars, excerpt_chars) = {
        let config = state.core.config.read().await;
        (config.article.min_content_chars, config.article.excerpt_chars)
    };
    if text.chars().count() < min_chars {
        let message = format!(
            "Not enough content to summarize. Paste at least {min_chars} characters of text."
        );
        overlay::render(&state, ticket, &PanelState::Warning(message)).await;
        return Ok(());
    }

    tracing::info!("Summarizing {} characters", text.chars().count());
    overlay::render(&state, ticket, &PanelState::loading("Generating summary...")).await;
    let policy = state.policy().await;
    let options = SummarizerOptions::new(summary_type, length);
    let summary = match summarizer::summarize(&state.caps, &text, options, &policy).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("Summary failed: {e}");
            overlay::render(&state, ticket, &PanelState::from(&e)).await;
            return Ok(());
        }
    };

    let panel = PanelState::Ready(content::summary_result(&summary, summary_type));
    if let Some(session) = state.sessions.lock().await.summary(ticket) {
        session.last = Some((summary.clone(), summary_type));
    }
    overlay::render(&state, ticket, &panel).await;

    if let Err(e) = state
        .store
        .add_summary(&url, &text, excerpt_chars, &summary, summary_type, length)
        .await
    {
        tracing::error!("Summary not saved: {e}");
    }
    Ok(())
}

async fn last_summary(state: &AppState, ticket: Ticket) -> Option<String> {
    state
        .sessions
        .lock()
        .await
        .summary(ticket)
        .and_then(|s| s.last.as_ref().map(|(text, _)| text.clone()))
}

pub async fn copy_summary(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    ticket: Ticket,
) -> anyhow::Result<()> {
    if let Some(summary) = last_summary(&state, ticket).await {
        host_tx.send(HostCommand::CopyText(summary)).await?;
        host_tx
            .send(HostCommand::Notice("✓ Copied".to_string()))
            .await?;
    }
    Ok(())
}

/// Summaries are stored as soon as they are generated; this only confirms it
pub async fn save_summary(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    ticket: Ticket,
) -> anyhow::Result<()> {
    if last_summary(&state, ticket).await.is_some() {
        host_tx
            .send(HostCommand::Notice("✓ Saved".to_string()))
            .await?;
    }
    Ok(())
}
