use std::sync::Mutex;
use std::time::Duration;

use lexi_config::selection::SelectionConfig;
use lexi_dom::{Document, NodeId, SURFACE_ATTR, TextRange};

/// Reads the page's current text selection
pub trait SelectionSource: Send + Sync {
    fn selection(&self, doc: &Document) -> Option<TextRange>;
}

/// Selection last reported by the host
#[derive(Debug, Default)]
pub struct SharedSelection {
    range: Mutex<Option<TextRange>>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, range: Option<TextRange>) {
        if let Ok(mut current) = self.range.lock() {
            *current = range;
        }
    }
}

impl SelectionSource for SharedSelection {
    fn selection(&self, _doc: &Document) -> Option<TextRange> {
        self.range.lock().ok().and_then(|r| *r)
    }
}

/// What ended a possible selection gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionTrigger {
    /// Pointer released at viewport coordinates
    Pointer { x: f64, y: f64 },
    /// Shift-based keyboard selection
    Keyboard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub range: TextRange,
    /// Viewport point the toolbar is anchored to
    pub anchor: (f64, f64),
}

/// Turns pointer and key releases into selections worth showing the toolbar for
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    config: SelectionConfig,
}

impl SelectionTracker {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// Time the native selection needs to settle after the release
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.config.settle_delay_ms)
    }

    pub async fn settle(&self) {
        tokio::time::sleep(self.settle_delay()).await;
    }

    /// Our own surfaces, password fields and editable regions never start a selection
    pub fn is_ignored_target(doc: &Document, target: NodeId) -> bool {
        doc.closest(target, |d, n| {
            d.has_attr(n, SURFACE_ATTR)
                || (d.tag(n) == Some("input") && d.attr(n, "type") == Some("password"))
                || d
                    .attr(n, "contenteditable")
                    .is_some_and(|v| !v.eq_ignore_ascii_case("false"))
        })
        .is_some()
    }

    pub fn pointer_up(
        &self,
        doc: &Document,
        target: NodeId,
        (x, y): (f64, f64),
    ) -> Option<SelectionTrigger> {
        if Self::is_ignored_target(doc, target) {
            return None;
        }
        Some(SelectionTrigger::Pointer { x, y })
    }

    /// Only releases involving shift can extend a selection from the keyboard
    pub fn key_up(
        &self,
        doc: &Document,
        target: NodeId,
        key: &str,
        shift: bool,
    ) -> Option<SelectionTrigger> {
        if !(shift || key == "Shift") || Self::is_ignored_target(doc, target) {
            return None;
        }
        Some(SelectionTrigger::Keyboard)
    }

    /// Read the settled selection; blank or overlong selections yield nothing
    pub fn resolve(
        &self,
        doc: &Document,
        trigger: SelectionTrigger,
        source: &dyn SelectionSource,
    ) -> Option<Selection> {
        let range = source.selection(doc)?;
        if range.is_collapsed() {
            return None;
        }

        let text = match range.text(doc) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::debug!("Selection no longer readable: {e}");
                return None;
            }
        };
        if text.is_empty() || text.chars().count() >= self.config.max_chars {
            return None;
        }

        let anchor = match trigger {
            SelectionTrigger::Pointer { x, y } => (x, y),
            SelectionTrigger::Keyboard => {
                let rect = range.bounding_rect(doc)?;
                (rect.center_x(), rect.top() - 10.0)
            }
        };

        Some(Selection {
            text,
            range,
            anchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use lexi_dom::Rect;

    use super::*;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("https://example.com");
        let p = doc.create_element("p");
        doc.append_child(doc.body(), p).unwrap();
        doc.set_rect(p, Rect::new(100.0, 200.0, 300.0, 40.0)).unwrap();
        let t = doc.create_text("  The laureate spoke.  ");
        doc.append_child(p, t).unwrap();
        (doc, p, t)
    }

    fn tracker() -> SelectionTracker {
        SelectionTracker::new(SelectionConfig::default())
    }

    #[test]
    fn pointer_selection_is_trimmed_and_anchored_at_the_pointer() {
        let (doc, p, t) = page();
        let source = SharedSelection::new();
        source.set(Some(TextRange::within(t, 6, 14)));

        let trigger = tracker().pointer_up(&doc, p, (180.0, 210.0)).unwrap();
        let selection = tracker().resolve(&doc, trigger, &source).unwrap();

        assert_eq!(selection.text, "laureate");
        assert_eq!(selection.anchor, (180.0, 210.0));
    }

    #[test]
    fn keyboard_selection_uses_the_range_box() {
        let (doc, p, t) = page();
        let source = SharedSelection::new();
        source.set(Some(TextRange::within(t, 2, 20)));

        assert_eq!(tracker().key_up(&doc, p, "ArrowLeft", false), None);
        let trigger = tracker().key_up(&doc, p, "ArrowLeft", true).unwrap();
        let selection = tracker().resolve(&doc, trigger, &source).unwrap();

        assert_eq!(selection.anchor, (250.0, 190.0));
    }

    #[test]
    fn sensitive_targets_are_ignored() {
        let mut doc = Document::new("https://example.com");
        let body = doc.body();
        let password = doc.create_element_with("input", &[("type", "password")]);
        let editor = doc.create_element_with("div", &[("contenteditable", "true")]);
        let inner = doc.create_element("span");
        let plain = doc.create_element_with("div", &[("contenteditable", "false")]);
        let surface = doc.create_element_with("div", &[(SURFACE_ATTR, "tooltip")]);
        for n in [password, editor, plain, surface] {
            doc.append_child(body, n).unwrap();
        }
        doc.append_child(editor, inner).unwrap();

        let tracker = tracker();
        for target in [password, inner, surface] {
            assert_eq!(tracker.pointer_up(&doc, target, (0.0, 0.0)), None);
            assert_eq!(tracker.key_up(&doc, target, "Shift", true), None);
        }
        assert!(tracker.pointer_up(&doc, plain, (0.0, 0.0)).is_some());
    }

    #[test]
    fn blank_collapsed_and_long_selections_are_dropped() {
        let (mut doc, p, t) = page();
        let tracker = tracker();
        let trigger = SelectionTrigger::Pointer { x: 0.0, y: 0.0 };
        let source = SharedSelection::new();

        assert_eq!(tracker.resolve(&doc, trigger, &source), None);

        source.set(Some(TextRange::within(t, 0, 2)));
        assert_eq!(tracker.resolve(&doc, trigger, &source), None);

        source.set(Some(TextRange::within(t, 5, 5)));
        assert_eq!(tracker.resolve(&doc, trigger, &source), None);

        let long = doc.create_text("a".repeat(1000));
        doc.append_child(p, long).unwrap();
        source.set(Some(TextRange::within(long, 0, 1000)));
        assert_eq!(tracker.resolve(&doc, trigger, &source), None);

        source.set(Some(TextRange::within(long, 0, 999)));
        assert!(tracker.resolve(&doc, trigger, &source).is_some());
    }
}
