use std::sync::Arc;
use std::time::Instant;

use kanal::AsyncSender;
use lexi_dom::{NodeId, Rect};
use lexi_ui::PointerDown;

use crate::events::{actions, lookup, overlay, selection, spawn_handler};
use crate::host::HostCommand;
use crate::state::AppState;

pub async fn handle_pointer_down(
    state: Arc<AppState>,
    target: NodeId,
    point: (f64, f64),
) -> anyhow::Result<()> {
    let outcome = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;
        page.overlay
            .pointer_down(&mut page.doc, target, point, Instant::now())
    };

    match outcome {
        PointerDown::Outside(dismissed) => overlay::finish_later(&state, dismissed).await,
        PointerDown::DragStarted(ticket) => tracing::debug!("Dragging {}", ticket.kind),
        PointerDown::ResizeStarted(ticket) => tracing::debug!("Resizing {}", ticket.kind),
        PointerDown::Inside(_) => {}
    }
    Ok(())
}

pub async fn handle_pointer_move(state: Arc<AppState>, point: (f64, f64)) {
    let mut guard = state.page.lock().await;
    let page = &mut *guard;
    page.overlay.pointer_move(&mut page.doc, point);
}

/// End of a drag or resize, otherwise maybe the end of a text selection
pub async fn handle_pointer_up(state: Arc<AppState>, target: NodeId, point: (f64, f64)) {
    let trigger = {
        let mut page = state.page.lock().await;
        if page.overlay.pointer_up().is_some() {
            return;
        }
        state.tracker.pointer_up(&page.doc, target, point)
    };

    if let Some(trigger) = trigger {
        spawn_handler("selection", selection::show_toolbar(state, trigger));
    }
}

enum ClickTarget {
    Action(lexi_ui::Ticket, lexi_ui::Action),
    Highlight { word: String, rect: Option<Rect> },
    Page,
}

/// Buttons on our surfaces, or a highlighted word on the page
pub async fn handle_click(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    target: NodeId,
) -> anyhow::Result<()> {
    let clicked = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;

        if let Some((ticket, action)) = page.overlay.click(&mut page.doc, target) {
            ClickTarget::Action(ticket, action)
        } else if page.overlay.is_overlay_node(&page.doc, target) {
            ClickTarget::Page
        } else {
            match page
                .doc
                .closest_with_class(target, page.highlighter.class_name())
            {
                Some(span) => ClickTarget::Highlight {
                    word: page
                        .doc
                        .attr(span, "data-word")
                        .map(str::to_string)
                        .unwrap_or_else(|| page.doc.text_content(span)),
                    rect: page.doc.bounding_rect(span),
                },
                None => ClickTarget::Page,
            }
        }
    };

    match clicked {
        ClickTarget::Action(ticket, action) => {
            actions::dispatch(state, host_tx, ticket, action).await?;
        }
        ClickTarget::Highlight { word, rect } => {
            spawn_handler("word-card", lookup::open_word_card(state, word, rect));
        }
        ClickTarget::Page => {}
    }
    Ok(())
}

pub async fn handle_key_down(state: Arc<AppState>, key: &str) {
    if key != "Escape" {
        return;
    }

    let closed = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;
        page.overlay.handle_escape(&mut page.doc)
    };
    if let Some(ticket) = closed {
        overlay::finish_later(&state, vec![ticket]).await;
    }
}

pub async fn handle_key_up(state: Arc<AppState>, target: NodeId, key: &str, shift: bool) {
    let trigger = {
        let page = state.page.lock().await;
        state.tracker.key_up(&page.doc, target, key, shift)
    };

    if let Some(trigger) = trigger {
        spawn_handler("selection", selection::show_toolbar(state, trigger));
    }
}
