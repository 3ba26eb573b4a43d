use std::sync::Arc;
use std::time::Duration;

use lexi_dom::{NodeId, Rect};
use lexi_ui::SurfaceKind;

use crate::events::{lookup, overlay, spawn_handler};
use crate::state::AppState;

enum Hovered {
    Word { word: String, rect: Rect },
    Tooltip,
    Other,
}

async fn hovered(state: &AppState, target: NodeId) -> Hovered {
    let page = state.page.lock().await;

    if let Some(ticket) = page.overlay.surface_at(&page.doc, target) {
        if ticket.kind == SurfaceKind::Tooltip {
            return Hovered::Tooltip;
        }
        return Hovered::Other;
    }

    let Some(span) = page
        .doc
        .closest_with_class(target, page.highlighter.class_name())
    else {
        return Hovered::Other;
    };
    let word = page
        .doc
        .attr(span, "data-word")
        .map(str::to_string)
        .unwrap_or_else(|| page.doc.text_content(span));

    match page.doc.bounding_rect(span) {
        Some(rect) => Hovered::Word { word, rect },
        None => Hovered::Other,
    }
}

pub async fn handle_hover_start(state: Arc<AppState>, target: NodeId) {
    match hovered(&state, target).await {
        Hovered::Tooltip => {
            state.hover.lock().await.enter_tooltip();
        }
        Hovered::Word { word, rect } => {
            let generation = state.hover.lock().await.enter_word(&word);
            let delay = state.core.config.read().await.overlay.tooltip_show_delay_ms;
            spawn_handler(
                "tooltip",
                show_after(state, generation, word, rect, Duration::from_millis(delay)),
            );
        }
        Hovered::Other => {}
    }
}

pub async fn handle_hover_end(state: Arc<AppState>, target: NodeId) {
    let generation = match hovered(&state, target).await {
        Hovered::Tooltip => state.hover.lock().await.leave_tooltip(),
        Hovered::Word { .. } => state.hover.lock().await.leave_word(),
        Hovered::Other => return,
    };

    let delay = state.core.config.read().await.overlay.tooltip_hide_delay_ms;
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if state.hover.lock().await.should_hide(generation) {
            overlay::close_surface(&state, SurfaceKind::Tooltip).await;
        }
    });
}

async fn show_after(
    state: Arc<AppState>,
    generation: u64,
    word: String,
    rect: Rect,
    delay: Duration,
) -> anyhow::Result<()> {
    tokio::time::sleep(delay).await;
    if !state.hover.lock().await.should_show(generation, &word) {
        return Ok(());
    }

    {
        let page = state.page.lock().await;
        let showing = page
            .overlay
            .ticket(SurfaceKind::Tooltip)
            .and_then(|t| page.overlay.subject(t))
            == Some(word.as_str());
        if showing {
            return Ok(());
        }
    }

    lookup::show_tooltip(state, word, rect).await
}
