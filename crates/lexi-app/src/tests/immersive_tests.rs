use lexi_dom::Rect;
use lexi_types::ReadingLevel;
use lexi_ui::SurfaceKind;

use crate::host::HostEvent;
use crate::tests::support::{Harness, URL, translating};

#[tokio::test]
async fn toggling_immersive_mode_wraps_and_unwraps_rare_words() {
    let harness = Harness::start(Default::default());

    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    let count = harness.highlighted().await;
    assert!(count > 0);
    {
        let page = harness.state.page.lock().await;
        let words = page.highlighter.highlighted_words(&page.doc);
        assert!(words.contains(&"laureate".to_string()));
        assert!(words.contains(&"photosynthesis".to_string()));
        assert!(page.watcher.is_active());
    }

    harness.send(HostEvent::SetImmersive { enabled: false }).await;
    assert_eq!(harness.highlighted().await, 0);

    let page = harness.state.page.lock().await;
    assert!(!page.watcher.is_active());
    assert!(page.doc.text_content(page.doc.body()).contains("The laureate spoke"));
}

#[tokio::test]
async fn same_toggle_twice_is_a_no_op() {
    let harness = Harness::start(Default::default());

    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    let first = harness.highlighted().await;
    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    harness.send(HostEvent::SetImmersive { enabled: false }).await;

    // the repeated "on" produced no second pass
    assert!(first > 0);
    assert_eq!(harness.highlighted().await, 0);
}

#[tokio::test]
async fn level_change_is_saved_and_rehighlights() {
    let harness = Harness::start(Default::default());
    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    let beginner = harness.highlighted().await;

    harness
        .send(HostEvent::SetLevel(ReadingLevel::Advanced))
        .await;
    let advanced = harness.highlighted().await;

    assert!(advanced <= beginner);
    assert_eq!(
        harness.state.store.settings().await.reading_level,
        ReadingLevel::Advanced
    );
    assert_eq!(
        harness.state.core.reading_level().await,
        ReadingLevel::Advanced
    );
}

#[tokio::test]
async fn content_added_later_is_highlighted() {
    let harness = Harness::start(Default::default());
    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    let before = harness.highlighted().await;

    {
        let mut page = harness.state.page.lock().await;
        let doc = &mut page.doc;
        let p = doc.create_element("p");
        let t = doc.create_text("A cryptocurrency exchange collapsed overnight.");
        doc.append_child(p, t).unwrap();
        let article = doc.query_tag(doc.body(), "article")[0];
        doc.append_child(article, p).unwrap();
        doc.set_rect(p, Rect::new(40.0, 400.0, 1200.0, 24.0)).unwrap();
    }

    let after = harness.highlighted().await;
    assert!(after > before);
    harness.highlight_of("cryptocurrency").await;
}

#[tokio::test]
async fn finishing_an_article_records_it_and_offers_practice() {
    let harness = Harness::start(translating("galardonado"));
    harness.send(HostEvent::SetImmersive { enabled: true }).await;
    harness.highlighted().await;

    // a looked-up word makes the article worth practicing
    let span = harness.highlight_of("laureate").await;
    harness.send(HostEvent::Click { target: span }).await;
    harness.surface_text(SurfaceKind::WordCard, "galardonado").await;
    harness
        .press(SurfaceKind::WordCard, lexi_ui::Action::GotIt)
        .await;
    let store = &harness.state.store;
    eventually!("word saved", store.find_word("laureate").await);

    harness.send(HostEvent::Scroll { scroll_y: 10_000.0 }).await;

    let article = eventually!("article saved", store.article(URL).await);
    assert_eq!(article.title, "Nobel prize announced");
    assert_eq!(article.words_looked_up, vec!["laureate".to_string()]);
    assert_eq!(store.stats().await.articles_read, 1);

    let text = harness
        .surface_text(SurfaceKind::PracticePrompt, "You looked up 1 word.")
        .await;
    assert!(text.contains("Practice Now"));

    // completion fires once per page
    harness.send(HostEvent::Scroll { scroll_y: 0.0 }).await;
    harness.send(HostEvent::Scroll { scroll_y: 10_000.0 }).await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(store.stats().await.articles_read, 1);
}
