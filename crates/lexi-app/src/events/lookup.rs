use std::sync::Arc;

use kanal::AsyncSender;
use lexi_capability::translator::{self, TranslationRequest};
use lexi_capability::{CapabilityError, definitions};
use lexi_dom::Rect;
use lexi_store::now_ms;
use lexi_types::{AppEvent, TranslationRecord, WordEntry};
use lexi_ui::content::{self, WordCardView};
use lexi_ui::{Action, Anchor, Block, PanelState, SurfaceKind, Ticket};

use crate::events::{overlay, speech};
use crate::host::HostCommand;
use crate::session::{Lookup, LookupSession};
use crate::state::AppState;

/// Language of the page text, used when detection has no answer
pub async fn page_language(state: &AppState) -> String {
    let page = state.page.lock().await;
    page.highlighter.classifier().language_code().to_string()
}

/// Translate `text` with the user's languages and keep it in the history
pub async fn translate_text(state: &AppState, text: &str) -> Result<Lookup, CapabilityError> {
    let settings = state.settings().await;
    let config = state.config().await;
    let policy = state.policy().await;
    let source = page_language(state).await;

    let outcome = translator::translate(
        &state.caps,
        &config.capability,
        TranslationRequest {
            text,
            source: &source,
            target: &settings.target_language,
            native: &settings.native_language,
        },
        &policy,
    )
    .await?;

    let record = TranslationRecord {
        original: text.to_string(),
        translation: outcome.text.clone(),
        source_lang: outcome.source.clone(),
        target_lang: outcome.target.clone(),
        timestamp: now_ms(),
    };
    if let Err(e) = state.store.add_translation(record).await {
        tracing::warn!("Translation not kept in history: {e}");
    }

    Ok(Lookup {
        word: text.to_string(),
        translation: outcome.text,
        source_lang: outcome.source,
        target_lang: outcome.target,
    })
}

/// Add the word to the vocabulary and to the current page's lookups
pub async fn save_word(state: &AppState, lookup: &Lookup) -> bool {
    let url = state.url().await;
    let entry = WordEntry::new(
        &lookup.word,
        &lookup.translation,
        &lookup.source_lang,
        &lookup.target_lang,
        &url,
        now_ms(),
    );

    if let Err(e) = state.store.add_word(entry).await {
        tracing::error!("Failed to save '{}': {e}", lookup.word);
        return false;
    }
    if let Err(e) = state.store.add_word_to_article(&url, &lookup.word).await {
        tracing::warn!("'{}' not recorded for {url}: {e}", lookup.word);
    }
    tracing::info!("Saved '{}' → '{}'", lookup.word, lookup.translation);
    true
}

pub async fn show_tooltip(state: Arc<AppState>, word: String, rect: Rect) -> anyhow::Result<()> {
    let ticket = overlay::open_surface(
        &state,
        SurfaceKind::Tooltip,
        word.clone(),
        word.clone(),
        Anchor::Target(rect),
        &content::tooltip_word(&word),
    )
    .await?;
    state.sessions.lock().await.tooltip = Some(LookupSession {
        ticket,
        word: word.clone(),
        lookup: None,
    });

    overlay::render(&state, ticket, &PanelState::loading("Translating...")).await;
    match translate_text(&state, &word).await {
        Ok(lookup) => {
            let panel = PanelState::Ready(content::tooltip_translation(&lookup.translation));
            // buttons must find the lookup once they are on screen
            remember(&state, ticket, lookup).await;
            overlay::render(&state, ticket, &panel).await;
        }
        Err(e) => {
            tracing::warn!("Tooltip translation of '{word}' failed: {e}");
            overlay::render(&state, ticket, &PanelState::from(&e)).await;
        }
    }
    Ok(())
}

/// Word card for a clicked highlight: translation, definition and actions
pub async fn open_word_card(
    state: Arc<AppState>,
    word: String,
    rect: Option<Rect>,
) -> anyhow::Result<()> {
    let anchor = rect.map(Anchor::Target).unwrap_or(Anchor::Centered);
    let ticket = overlay::open_surface(
        &state,
        SurfaceKind::WordCard,
        "📖 Word",
        word.clone(),
        anchor,
        &[Block::Heading(word.clone())],
    )
    .await?;
    state.sessions.lock().await.card = Some(LookupSession {
        ticket,
        word: word.clone(),
        lookup: None,
    });

    overlay::render(&state, ticket, &PanelState::loading("Loading...")).await;

    let policy = state.policy().await;
    let source = page_language(&state).await;
    let (translation, definition) = tokio::join!(
        translate_text(&state, &word),
        definitions::define(&state.caps, state.fallback.as_ref(), &word, &source, &policy),
    );

    let lookup = match translation {
        Ok(lookup) => lookup,
        Err(e) => {
            tracing::warn!("Word card translation of '{word}' failed: {e}");
            overlay::render(&state, ticket, &PanelState::from(&e)).await;
            return Ok(());
        }
    };

    let view = WordCardView {
        word: lookup.word.clone(),
        translation: lookup.translation.clone(),
        source_lang: lookup.source_lang.clone(),
        target_lang: lookup.target_lang.clone(),
        definition,
    };
    remember(&state, ticket, lookup).await;
    if overlay::set_content(&state, ticket, &content::word_card(&view)).await {
        overlay::render(&state, ticket, &PanelState::Empty).await;
    }
    Ok(())
}

async fn remember(state: &AppState, ticket: Ticket, lookup: Lookup) {
    if let Some(session) = state.sessions.lock().await.lookup_mut(ticket) {
        session.lookup = Some(lookup);
    }
}

/// Buttons of the tooltip and the word card
pub async fn handle_action(
    state: Arc<AppState>,
    host_tx: AsyncSender<HostCommand>,
    ticket: Ticket,
    action: Action,
) -> anyhow::Result<()> {
    let lookup = state.sessions.lock().await.lookup(ticket).cloned();
    let Some(lookup) = lookup else {
        tracing::debug!("{action} on {} before its translation arrived", ticket.kind);
        return Ok(());
    };

    match action {
        Action::SpeakSource => {
            speech::speak(&state, &host_tx, &lookup.word, &lookup.source_lang).await?;
        }
        Action::SpeakTarget => {
            speech::speak(&state, &host_tx, &lookup.translation, &lookup.target_lang).await?;
        }
        Action::AddToVocabulary => {
            if save_word(&state, &lookup).await {
                host_tx
                    .send(HostCommand::Notice("✓ Added to vocabulary".to_string()))
                    .await?;
            }
        }
        Action::GotIt => {
            save_word(&state, &lookup).await;
            overlay::close_surface(&state, ticket.kind).await;
        }
        Action::Practice => {
            state
                .core
                .bus
                .publish(AppEvent::StartPractice(vec![lookup.to_practice_word()]))
                .await;
            overlay::close_surface(&state, ticket.kind).await;
        }
        other => tracing::warn!("{other} is not a lookup action"),
    }
    Ok(())
}
