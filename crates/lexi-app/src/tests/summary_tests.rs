use lexi_capability::Capabilities;
use lexi_types::{SummaryLength, SummaryType};
use lexi_ui::content::{SUMMARY_INPUT, SUMMARY_TYPE};
use lexi_ui::{Action, SurfaceKind};

use crate::host::{HostCommand, HostEvent};
use crate::tests::support::{Harness, URL, canned};

const PASTED: &str = "The committee praised the laureate for decades of work on \
    photosynthesis, noting that the research changed how crops are grown worldwide.";

fn summarizing() -> Capabilities {
    Capabilities {
        summarizer: Some(canned("- Crops grow better thanks to the laureate".to_string())),
        ..Capabilities::default()
    }
}

async fn type_into(harness: &Harness, field: &str, value: &str) {
    harness
        .send(HostEvent::Input {
            kind: SurfaceKind::SummaryModal,
            field: field.to_string(),
            value: value.to_string(),
        })
        .await;
}

#[tokio::test]
async fn a_short_page_asks_for_more_text() {
    let harness = Harness::start(summarizing());
    harness.send(HostEvent::OpenSummary).await;

    harness
        .press(SurfaceKind::SummaryModal, Action::GenerateSummary)
        .await;

    harness
        .surface_text(
            SurfaceKind::SummaryModal,
            "Not enough content to summarize. Paste at least 100 characters of text.",
        )
        .await;
    assert!(harness.state.store.summaries().await.is_empty());
}

#[tokio::test]
async fn pasted_text_is_summarized_and_kept() {
    let harness = Harness::start(summarizing());
    harness.send(HostEvent::OpenSummary).await;
    harness.button(SurfaceKind::SummaryModal, Action::GenerateSummary).await;

    type_into(&harness, SUMMARY_INPUT, PASTED).await;
    type_into(&harness, SUMMARY_TYPE, "tl;dr").await;
    harness
        .press(SurfaceKind::SummaryModal, Action::GenerateSummary)
        .await;
    harness
        .surface_text(SurfaceKind::SummaryModal, "Crops grow better")
        .await;

    let store = &harness.state.store;
    let saved = eventually!("summary saved", store.summaries().await.pop());
    assert_eq!(saved.url, URL);
    assert_eq!(saved.summary_type, SummaryType::TlDr);
    assert_eq!(saved.length, SummaryLength::Medium);
    assert!(PASTED.starts_with(&saved.original));

    harness
        .press(SurfaceKind::SummaryModal, Action::CopySummary)
        .await;
    match tokio::time::timeout(std::time::Duration::from_secs(2), harness.commands.recv()).await {
        Ok(Ok(HostCommand::CopyText(text))) => {
            assert_eq!(text, "- Crops grow better thanks to the laureate")
        }
        Ok(Ok(other)) => panic!("Wrong command: {:?}", other),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - nothing copied"),
    }
    assert_eq!(harness.notice().await, "✓ Copied");

    harness
        .press(SurfaceKind::SummaryModal, Action::SaveSummary)
        .await;
    assert_eq!(harness.notice().await, "✓ Saved");
    assert_eq!(store.summaries().await.len(), 1);
}

#[tokio::test]
async fn a_missing_summarizer_is_an_error_in_the_panel() {
    let harness = Harness::start(Capabilities::default());
    harness.send(HostEvent::OpenSummary).await;
    harness.button(SurfaceKind::SummaryModal, Action::GenerateSummary).await;

    type_into(&harness, SUMMARY_INPUT, PASTED).await;
    harness
        .press(SurfaceKind::SummaryModal, Action::GenerateSummary)
        .await;

    harness
        .surface_text(SurfaceKind::SummaryModal, "Summarizer not available")
        .await;
    assert!(harness.state.store.summaries().await.is_empty());
}
