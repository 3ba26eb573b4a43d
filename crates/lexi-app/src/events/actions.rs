use std::sync::Arc;

use kanal::AsyncSender;
use lexi_ui::{Action, SurfaceKind, Ticket};

use crate::events::{grammar, lookup, overlay, practice, selection, spawn_handler, summary};
use crate::host::HostCommand;
use crate::state::AppState;

/// Route a button press on one of our surfaces.
///
/// Anything that waits on a capability runs as its own task.
pub async fn dispatch(
    state: Arc<AppState>,
    host_tx: &AsyncSender<HostCommand>,
    ticket: Ticket,
    action: Action,
) -> anyhow::Result<()> {
    use Action::*;
    use SurfaceKind::*;

    tracing::debug!("{action} on {} #{}", ticket.kind, ticket.generation);
    let tx = host_tx.clone();

    match (ticket.kind, action) {
        (_, Close) => overlay::finish_later(&state, vec![ticket]).await,

        (Tooltip | WordCard, SpeakSource | SpeakTarget | AddToVocabulary | Practice | GotIt) => {
            spawn_handler("lookup", lookup::handle_action(state, tx, ticket, action));
        }

        (SelectionToolbar, Translate) => {
            spawn_handler("translate", selection::translate_selection(state, ticket));
        }
        (SelectionToolbar, Speak) => {
            spawn_handler("speak", selection::speak_selection(state, tx, ticket));
        }
        (SelectionToolbar, Rewrite) => {
            spawn_handler("rewrite", selection::rewrite_selection(state, ticket));
        }
        (SelectionToolbar, ApplyRewrite) => selection::apply_rewrite(state, ticket).await?,
        (SelectionToolbar, CopyRewrite) => selection::copy_rewrite(state, host_tx, ticket).await?,

        (PracticePrompt, PracticeNow) => practice::practice_now(state, host_tx).await?,
        (PracticePrompt, PracticeLater) | (PracticeModal, Done) => {
            overlay::close_surface(&state, ticket.kind).await;
        }
        (PracticeModal, CheckGrammar) => {
            spawn_handler("practice-check", practice::check_sentence(state, ticket));
        }
        (PracticeModal, BetterPhrasing) => {
            spawn_handler("practice-rewrite", practice::better_phrasing(state, ticket));
        }
        (PracticeModal, NextWord) => practice::next_word(state, ticket).await?,

        (SummaryModal, GenerateSummary) => {
            spawn_handler("summary", summary::generate_summary(state, ticket));
        }
        (SummaryModal, CopySummary) => summary::copy_summary(state, host_tx, ticket).await?,
        (SummaryModal, SaveSummary) => summary::save_summary(state, host_tx, ticket).await?,

        (GrammarModal, CheckGrammar) => {
            spawn_handler("grammar", grammar::check_grammar(state, ticket));
        }

        (kind, action) => tracing::warn!("No handler for {action} on {kind}"),
    }
    Ok(())
}
