use std::sync::Arc;
use std::time::{Duration, Instant};

use lexi_ui::{Anchor, Block, PanelState, SurfaceKind, SurfaceSpec, Ticket};

use crate::state::AppState;

/// Open a surface with `blocks` as its content; it counts as open after the opening animation
pub async fn open_surface(
    state: &Arc<AppState>,
    kind: SurfaceKind,
    title: impl Into<String>,
    subject: impl Into<String>,
    anchor: Anchor,
    blocks: &[Block],
) -> anyhow::Result<Ticket> {
    let (ticket, opening) = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;

        let rect = page.overlay.place(kind, anchor, &page.doc.viewport);
        let spec = SurfaceSpec {
            kind,
            title: title.into(),
            subject: subject.into(),
            rect,
        };
        let ticket = page.overlay.open(&mut page.doc, spec, Instant::now())?;
        page.overlay.set_content(&mut page.doc, ticket, blocks);
        let opening = Duration::from_millis(page.overlay.config().animation_normal_ms);
        (ticket, opening)
    };

    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(opening).await;
        state.page.lock().await.overlay.mark_open(ticket);
    });

    Ok(ticket)
}

/// Start closing the live surface of `kind`
pub async fn close_surface(state: &Arc<AppState>, kind: SurfaceKind) -> Option<Ticket> {
    let ticket = {
        let mut guard = state.page.lock().await;
        let page = &mut *guard;
        page.overlay.close(&mut page.doc, kind)
    }?;
    finish_later(state, vec![ticket]).await;
    Some(ticket)
}

/// Drop the state of surfaces that started closing and remove them after the closing animation
pub async fn finish_later(state: &Arc<AppState>, tickets: Vec<Ticket>) {
    if tickets.is_empty() {
        return;
    }
    forget(state, &tickets).await;

    let delay = {
        let page = state.page.lock().await;
        Duration::from_millis(page.overlay.config().animation_fast_ms)
    };
    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut guard = state.page.lock().await;
        let page = &mut *guard;
        for ticket in tickets {
            page.overlay.finish_close(&mut page.doc, ticket);
        }
    });
}

async fn forget(state: &AppState, tickets: &[Ticket]) {
    if tickets.iter().any(|t| t.kind == SurfaceKind::Tooltip) {
        state.hover.lock().await.reset();
    }

    let mut sessions = state.sessions.lock().await;
    for ticket in tickets {
        match ticket.kind {
            SurfaceKind::Tooltip => {
                if sessions.tooltip.as_ref().is_some_and(|s| s.ticket == *ticket) {
                    sessions.tooltip = None;
                }
            }
            SurfaceKind::WordCard => {
                if sessions.card.as_ref().is_some_and(|s| s.ticket == *ticket) {
                    sessions.card = None;
                }
            }
            SurfaceKind::SelectionToolbar => {
                if sessions.toolbar(*ticket).is_some() {
                    sessions.toolbar = None;
                }
            }
            SurfaceKind::PracticeModal => {
                if sessions.practice(*ticket).is_some() {
                    sessions.practice = None;
                }
            }
            SurfaceKind::SummaryModal => {
                if sessions.summary(*ticket).is_some() {
                    sessions.summary = None;
                }
            }
            SurfaceKind::GrammarModal | SurfaceKind::PracticePrompt => {}
        }
    }
}

/// Show `panel` in the surface behind `ticket`; false when that surface is gone
pub async fn render(state: &AppState, ticket: Ticket, panel: &PanelState) -> bool {
    let mut guard = state.page.lock().await;
    let page = &mut *guard;
    page.overlay.render(&mut page.doc, ticket, panel)
}

pub async fn set_content(state: &AppState, ticket: Ticket, blocks: &[Block]) -> bool {
    let mut guard = state.page.lock().await;
    let page = &mut *guard;
    page.overlay.set_content(&mut page.doc, ticket, blocks)
}

/// Current value of a form field, empty when the surface or field is gone
pub async fn field(state: &AppState, ticket: Ticket, name: &str) -> String {
    let page = state.page.lock().await;
    page.overlay
        .field(&page.doc, ticket, name)
        .unwrap_or_default()
}

/// Typed text from the host
pub async fn handle_input(state: &AppState, kind: SurfaceKind, name: &str, value: &str) {
    let mut guard = state.page.lock().await;
    let page = &mut *guard;
    let Some(ticket) = page.overlay.ticket(kind) else {
        tracing::debug!("Input for closed {kind} ignored");
        return;
    };
    if !page.overlay.set_field(&mut page.doc, ticket, name, value) {
        tracing::debug!("No field {name} on {kind}");
    }
}
