use std::time::Duration;

use lexi_ui::{Action, SurfaceKind};

use crate::host::HostEvent;
use crate::tests::support::{Harness, URL, translating};

async fn immersive(caps: lexi_capability::Capabilities) -> Harness {
    let harness = Harness::start(caps);
    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    harness.highlighted().await;
    harness
}

#[tokio::test]
async fn clicking_a_highlight_opens_the_word_card() {
    let harness = immersive(translating("galardonado")).await;
    let span = harness.highlight_of("laureate").await;

    harness.send(HostEvent::Click { target: span }).await;

    let text = harness
        .surface_text(SurfaceKind::WordCard, "galardonado")
        .await;
    assert!(text.contains("laureate (en) → galardonado (es)"));
    // no definition capability, so the built-in dictionary answers
    assert!(text.contains("Demo mode"));
}

#[tokio::test]
async fn got_it_saves_the_word_and_closes_the_card() {
    let harness = immersive(translating("galardonado")).await;
    let span = harness.highlight_of("laureate").await;
    harness.send(HostEvent::Click { target: span }).await;
    harness.surface_text(SurfaceKind::WordCard, "galardonado").await;

    harness.press(SurfaceKind::WordCard, Action::GotIt).await;

    let store = &harness.state.store;
    let entry = eventually!("word saved", store.find_word("laureate").await);
    assert_eq!(entry.translation, "galardonado");
    assert_eq!(entry.article_url, URL);
    harness
        .until_page("card closed", |page| {
            page.overlay.ticket(SurfaceKind::WordCard).is_none().then_some(())
        })
        .await;
}

#[tokio::test]
async fn add_to_vocabulary_confirms_with_a_notice() {
    let harness = immersive(translating("galardonado")).await;
    let span = harness.highlight_of("laureate").await;
    harness.send(HostEvent::HoverStart { target: span }).await;
    harness.surface_text(SurfaceKind::Tooltip, "galardonado").await;

    harness
        .press(SurfaceKind::Tooltip, Action::AddToVocabulary)
        .await;

    assert_eq!(harness.notice().await, "✓ Added to vocabulary");
    let entry = harness.state.store.find_word("laureate").await.unwrap();
    assert_eq!(entry.review_count, 0);
    assert_eq!(harness.state.store.words_for_url(URL).await, vec!["laureate"]);
}

#[tokio::test]
async fn leaving_the_word_hides_the_tooltip() {
    let harness = immersive(translating("galardonado")).await;
    let span = harness.highlight_of("laureate").await;

    harness.send(HostEvent::HoverStart { target: span }).await;
    harness.surface_text(SurfaceKind::Tooltip, "galardonado").await;
    harness.send(HostEvent::HoverEnd { target: span }).await;

    harness
        .until_page("tooltip hidden", |page| {
            page.overlay.ticket(SurfaceKind::Tooltip).is_none().then_some(())
        })
        .await;
    assert!(harness.state.sessions.lock().await.tooltip.is_none());
}

#[tokio::test]
async fn moving_onto_the_tooltip_keeps_it_open() {
    let harness = immersive(translating("galardonado")).await;
    let span = harness.highlight_of("laureate").await;
    harness.send(HostEvent::HoverStart { target: span }).await;
    let add = harness
        .button(SurfaceKind::Tooltip, Action::AddToVocabulary)
        .await;

    harness.send(HostEvent::HoverEnd { target: span }).await;
    harness.send(HostEvent::HoverStart { target: add }).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let page = harness.state.page.lock().await;
    assert!(page.overlay.ticket(SurfaceKind::Tooltip).is_some());
}

#[tokio::test]
async fn a_brief_pass_over_a_word_shows_nothing() {
    let harness = immersive(translating("galardonado")).await;
    let span = harness.highlight_of("laureate").await;

    harness.send(HostEvent::HoverStart { target: span }).await;
    harness.send(HostEvent::HoverEnd { target: span }).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let page = harness.state.page.lock().await;
    assert!(page.overlay.ticket(SurfaceKind::Tooltip).is_none());
    assert!(harness.state.store.translation_history().await.is_empty());
}

#[tokio::test]
async fn a_second_card_replaces_the_first() {
    let harness = immersive(translating("galardonado")).await;
    let laureate = harness.highlight_of("laureate").await;
    let photosynthesis = harness.highlight_of("photosynthesis").await;

    harness.send(HostEvent::Click { target: laureate }).await;
    harness.surface_text(SurfaceKind::WordCard, "laureate").await;
    harness.send(HostEvent::Click { target: photosynthesis }).await;

    harness
        .until_page("second card", |page| {
            let ticket = page.overlay.ticket(SurfaceKind::WordCard)?;
            (page.overlay.subject(ticket) == Some("photosynthesis")).then_some(())
        })
        .await;
    let page = harness.state.page.lock().await;
    let cards = page
        .doc
        .query_attr(page.doc.body(), lexi_dom::SURFACE_ATTR, Some("word-card"));
    assert_eq!(cards.len(), 1);
}
