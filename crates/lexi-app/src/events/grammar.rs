use std::sync::Arc;

use lexi_capability::proofreader;
use lexi_ui::content::{self, GRAMMAR_INPUT};
use lexi_ui::{Anchor, PanelState, SurfaceKind, Ticket};

use crate::events::{lookup, overlay};
use crate::state::AppState;

pub async fn open_grammar(state: Arc<AppState>) -> anyhow::Result<()> {
    overlay::open_surface(
        &state,
        SurfaceKind::GrammarModal,
        "✓ Grammar Coach",
        "",
        Anchor::Centered,
        &content::grammar_form(),
    )
    .await?;
    Ok(())
}

pub async fn check_grammar(state: Arc<AppState>, ticket: Ticket) -> anyhow::Result<()> {
    let sentence = overlay::field(&state, ticket, GRAMMAR_INPUT).await;
    let language = lookup::page_language(&state).await;
    let policy = state.policy().await;

    overlay::render(&state, ticket, &PanelState::loading("Checking grammar...")).await;
    let panel = match proofreader::proofread(&state.caps, &sentence, &language, &policy).await {
        Ok(result) => {
            tracing::debug!("{} corrections", result.corrections.len());
            PanelState::Ready(content::grammar_result(&result))
        }
        Err(e) => {
            if !e.is_warning() {
                tracing::warn!("Grammar check failed: {e}");
            }
            PanelState::from(&e)
        }
    };
    overlay::render(&state, ticket, &panel).await;
    Ok(())
}
