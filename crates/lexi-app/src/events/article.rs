use std::sync::Arc;

use lexi_dom::page::{article_title, word_count};
use lexi_store::{now_ms, today};
use lexi_types::{AppEvent, ArticleEntry};

use crate::state::AppState;

/// Track scroll progress; reaching the end of the article completes it once
pub async fn handle_scroll(state: Arc<AppState>, scroll_y: f64) {
    let viewport = {
        let mut page = state.page.lock().await;
        page.doc.viewport.scroll_y = scroll_y;
        page.doc.viewport
    };

    if !state.core.immersive.read().await.enabled {
        return;
    }
    if !state.article.lock().await.observe(&viewport) {
        return;
    }

    let entry = complete_article(&state).await;
    tracing::info!(
        "Finished '{}' with {} lookups",
        entry.title,
        entry.words_looked_up.len()
    );
    state.core.bus.publish(AppEvent::ArticleComplete(entry)).await;
}

async fn complete_article(state: &AppState) -> ArticleEntry {
    let (url, title, words) = {
        let page = state.page.lock().await;
        (
            page.doc.url.clone(),
            article_title(&page.doc),
            word_count(&page.doc),
        )
    };

    let entry = ArticleEntry {
        words_looked_up: state.store.words_for_url(&url).await,
        url,
        title,
        timestamp: now_ms(),
        word_count: words as u32,
    };

    let entry = match state.store.upsert_article(entry.clone()).await {
        Ok(saved) => saved,
        Err(e) => {
            tracing::error!("Article not saved: {e}");
            entry
        }
    };
    if let Err(e) = state.store.increment_articles_read(today()).await {
        tracing::error!("Article not counted: {e}");
    }
    entry
}
