use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use lexi_capability::proofreader;
use lexi_capability::rewriter::{self, RewriteTone, RewriterOptions};
use lexi_store::today;
use lexi_types::{AppEvent, ArticleEntry, PracticeWord};
use lexi_ui::content::{self, PRACTICE_INPUT};
use lexi_ui::{Anchor, Block, PanelState, SurfaceKind, Ticket};

use crate::events::{overlay, spawn_handler};
use crate::host::HostCommand;
use crate::session::PracticeSession;
use crate::state::AppState;

/// Offer practice a little after an article with lookups was finished
pub async fn handle_article_complete(state: Arc<AppState>, entry: ArticleEntry) {
    if entry.words_looked_up.is_empty() {
        tracing::debug!("Nothing looked up on {}, no practice prompt", entry.url);
        return;
    }

    let (delay, hide, max_words) = {
        let config = state.core.config.read().await;
        (
            Duration::from_millis(config.article.prompt_delay_ms),
            Duration::from_millis(config.article.prompt_hide_ms),
            config.limits.practice_words,
        )
    };
    let count = entry.words_looked_up.len().min(max_words);
    spawn_handler("practice-prompt", show_prompt(state, count, delay, hide));
}

async fn show_prompt(
    state: Arc<AppState>,
    count: usize,
    delay: Duration,
    hide: Duration,
) -> anyhow::Result<()> {
    tokio::time::sleep(delay).await;
    let ticket = overlay::open_surface(
        &state,
        SurfaceKind::PracticePrompt,
        "Lexi",
        "",
        Anchor::Corner,
        &content::practice_prompt(count),
    )
    .await?;

    tokio::time::sleep(hide).await;
    let still_open = state.page.lock().await.overlay.is_current(ticket);
    if still_open {
        tracing::debug!("Practice prompt timed out");
        overlay::close_surface(&state, SurfaceKind::PracticePrompt).await;
    }
    Ok(())
}

/// "Practice now": the most recent vocabulary words
pub async fn practice_now(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
) -> anyhow::Result<()> {
    overlay::close_surface(&state, SurfaceKind::PracticePrompt).await;

    let max_words = state.core.config.read().await.limits.practice_words;
    let words: Vec<PracticeWord> = state
        .store
        .recent_words(max_words)
        .await
        .iter()
        .map(|w| w.to_practice_word())
        .collect();

    if words.is_empty() {
        host_tx
            .send(HostCommand::Notice("No words to practice yet".to_string()))
            .await?;
        return Ok(());
    }
    state.core.bus.publish(AppEvent::StartPractice(words)).await;
    Ok(())
}

pub async fn start_practice(state: Arc<AppState>, mut words: Vec<PracticeWord>) -> anyhow::Result<()> {
    let max_words = state.core.config.read().await.limits.practice_words;
    words.truncate(max_words);
    let Some(first) = words.first() else {
        tracing::debug!("Practice requested without words");
        return Ok(());
    };

    let ticket = overlay::open_surface(
        &state,
        SurfaceKind::PracticeModal,
        "✍️ Practice",
        first.word.clone(),
        Anchor::Centered,
        &[],
    )
    .await?;

    tracing::info!("Practice started with {} words", words.len());
    let blocks = content::practice_word(first, 0, words.len());
    state.sessions.lock().await.practice = Some(PracticeSession {
        ticket,
        words,
        index: 0,
        feedback: vec![],
    });
    overlay::set_content(&state, ticket, &blocks).await;
    Ok(())
}

async fn current_word(state: &AppState, ticket: Ticket) -> Option<PracticeWord> {
    state
        .sessions
        .lock()
        .await
        .practice(ticket)
        .and_then(|s| s.current().cloned())
}

/// Grammar check of the sentence written for the current word
pub async fn check_sentence(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let Some(word) = current_word(&state, ticket).await else {
        return Ok(());
    };
    let sentence = overlay::field(&state, ticket, PRACTICE_INPUT).await;

    overlay::render(&state, ticket, &PanelState::loading("Checking grammar...")).await;
    let policy = state.policy().await;
    let feedback =
        match proofreader::proofread(&state.caps, &sentence, &word.source_lang, &policy).await {
            Ok(result) => content::practice_feedback(&result),
            Err(e) if e.is_warning() => {
                overlay::render(&state, ticket, &PanelState::from(&e)).await;
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Practice grammar check failed: {e}");
                content::practice_check_failed(&e.to_string())
            }
        };

    let panel = PanelState::Ready(feedback.clone());
    if let Some(session) = state.sessions.lock().await.practice(ticket) {
        session.feedback = feedback;
    }
    overlay::render(&state, ticket, &panel).await;
    Ok(())
}

/// Rewrite of the learner's sentence, shown under the grammar feedback
pub async fn better_phrasing(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let sentence = overlay::field(&state, ticket, PRACTICE_INPUT).await;
    let policy = state.policy().await;
    let extra = match rewriter::rewrite(
        &state.caps,
        &sentence,
        RewriterOptions::with_tone(RewriteTone::MoreFormal),
        &policy,
    )
    .await
    {
        Ok(rewritten) => content::better_phrasing(&rewritten),
        Err(e) => Block::text("lexi-feedback-error", format!("❌ {e}")),
    };

    let blocks = {
        let mut sessions = state.sessions.lock().await;
        let Some(session) = sessions.practice(ticket) else {
            return Ok(());
        };
        let mut blocks = session.feedback.clone();
        // keep the buttons last
        let at = blocks.len().saturating_sub(1);
        blocks.insert(at, extra);
        blocks
    };
    overlay::render(&state, ticket, &PanelState::Ready(blocks)).await;
    Ok(())
}

/// Mark the current word practiced and move on; the last word completes the session
pub async fn next_word(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let step = {
        let mut sessions = state.sessions.lock().await;
        let Some(session) = sessions.practice(ticket) else {
            return Ok(());
        };
        let done = session.current().map(|w| w.word.clone());
        session.index += 1;
        session.feedback.clear();
        let next = session.current().cloned();
        (done, next, session.index, session.words.len())
    };
    let (done, next, index, total) = step;

    if let Some(word) = done {
        if let Err(e) = state.store.mark_practiced(&word).await {
            tracing::error!("Failed to mark '{word}' practiced: {e}");
        }
    }

    overlay::render(&state, ticket, &PanelState::Empty).await;
    match next {
        Some(word) => {
            overlay::set_content(&state, ticket, &content::practice_word(&word, index, total)).await;
        }
        None => complete(&state, ticket, total).await,
    }
    Ok(())
}

async fn complete(state: &AppState, ticket: Ticket, total: usize) {
    overlay::set_content(state, ticket, &content::practice_complete(total)).await;

    if let Err(e) = state.store.increment_practice_sessions(today()).await {
        tracing::error!("Practice session not counted: {e}");
    }
    if let Err(e) = state.store.increment_words_learned(total as u32).await {
        tracing::error!("Learned words not counted: {e}");
    }
    tracing::info!("Practice complete, {total} words");
}
