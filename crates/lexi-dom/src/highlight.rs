use std::collections::HashSet;
use std::sync::Arc;

use lexi_config::highlight::HighlightConfig;
use lexi_core::DifficultyClassifier;
use lexi_core::words::{extract_unique_words, is_valid_word, normalize_word};
use lexi_types::ReadingLevel;

use crate::document::{Document, NodeId};
use crate::scan::{TextSpan, content_areas, find_text_nodes};
use crate::wrap::{unwrap_span, wrap_words};

/// One highlight span put into the page by [`Highlighter::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightHandle {
    pub span: NodeId,
    pub word: String,
}

/// Marks words harder than the reader's level inside the page's content areas
pub struct Highlighter {
    classifier: Arc<dyn DifficultyClassifier>,
    class_name: String,
    min_word_len: usize,
}

impl Highlighter {
    pub fn new(classifier: Arc<dyn DifficultyClassifier>, config: &HighlightConfig) -> Self {
        Self {
            classifier,
            class_name: config.class_name.clone(),
            min_word_len: config.min_word_len,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn classifier(&self) -> &dyn DifficultyClassifier {
        self.classifier.as_ref()
    }

    /// Text spans to wrap across every content area, without touching the page
    pub fn scan(&self, doc: &Document, level: ReadingLevel) -> Vec<TextSpan> {
        content_areas(doc)
            .into_iter()
            .flat_map(|area| self.scan_within(doc, area, level))
            .collect()
    }

    /// Like [`scan`](Self::scan) but limited to one subtree
    pub fn scan_within(&self, doc: &Document, root: NodeId, level: ReadingLevel) -> Vec<TextSpan> {
        find_text_nodes(doc, root)
            .into_iter()
            .filter(|node| doc.closest_with_class(*node, &self.class_name).is_none())
            .filter_map(|node| {
                let text = doc.text(node)?;
                let words: Vec<String> = extract_unique_words(text)
                    .into_iter()
                    .filter(|w| is_valid_word(w, self.min_word_len))
                    .filter(|w| self.classifier.should_highlight(w, level))
                    .collect();
                (!words.is_empty()).then_some(TextSpan { node, words })
            })
            .collect()
    }

    /// Wrap the scanned words. Spans whose text node went away since the scan are skipped.
    pub fn apply(&self, doc: &mut Document, spans: &[TextSpan]) -> Vec<HighlightHandle> {
        let mut handles = Vec::new();

        for span in spans {
            if !doc.is_attached(span.node) {
                tracing::debug!("Text node {} detached before wrapping", span.node);
                continue;
            }

            match wrap_words(doc, span.node, &span.words, &self.class_name) {
                Ok(wrapped) => {
                    handles.extend(wrapped.into_iter().map(|s| HighlightHandle {
                        word: doc.attr(s, "data-word").unwrap_or_default().to_string(),
                        span: s,
                    }));
                }
                Err(e) => tracing::warn!("Failed to highlight {}: {e}", span.node),
            }
        }

        handles
    }

    /// Undo specific highlights and re-merge the text around them
    pub fn revert(&self, doc: &mut Document, handles: &[HighlightHandle]) -> usize {
        let mut parents = Vec::new();
        let mut reverted = 0;

        for handle in handles {
            let Some(parent) = doc.parent(handle.span) else {
                continue;
            };
            match unwrap_span(doc, handle.span) {
                Ok(_) => {
                    reverted += 1;
                    if !parents.contains(&parent) {
                        parents.push(parent);
                    }
                }
                Err(e) => tracing::debug!("Skipping highlight {}: {e}", handle.span),
            }
        }

        for parent in parents {
            doc.normalize(parent);
        }
        reverted
    }

    pub fn highlight(&self, doc: &mut Document, level: ReadingLevel) -> Vec<HighlightHandle> {
        let spans = self.scan(doc, level);
        let handles = self.apply(doc, &spans);
        tracing::info!("Highlighted {} words at {level}", handles.len());
        handles
    }

    /// Remove every highlight in the page
    pub fn remove_all(&self, doc: &mut Document) -> usize {
        let body = doc.body();
        let removed = crate::wrap::unwrap_all(doc, body, &self.class_name);
        tracing::debug!("Removed {removed} highlights");
        removed
    }

    /// Distinct highlighted words, in page order
    pub fn highlighted_words(&self, doc: &Document) -> Vec<String> {
        let mut seen = HashSet::new();
        doc.query_class(doc.body(), &self.class_name)
            .into_iter()
            .map(|span| normalize_word(&doc.text_content(span)))
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }

    pub fn count(&self, doc: &Document) -> usize {
        doc.query_class(doc.body(), &self.class_name).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bands;

    impl DifficultyClassifier for Bands {
        fn language_code(&self) -> &str {
            "en"
        }

        fn classify(&self, word: &str) -> ReadingLevel {
            match word {
                "the" | "and" | "was" | "new" => ReadingLevel::Beginner,
                "policy" | "significant" => ReadingLevel::Intermediate,
                _ => ReadingLevel::Advanced,
            }
        }
    }

    fn highlighter() -> Highlighter {
        Highlighter::new(Arc::new(Bands), &HighlightConfig::default())
    }

    fn article(text: &str) -> (Document, NodeId) {
        let mut doc = Document::new("https://example.com/news");
        let article = doc.create_element("article");
        doc.append_child(doc.body(), article).unwrap();
        let p = doc.create_element("p");
        doc.append_child(article, p).unwrap();
        let t = doc.create_text(text);
        doc.append_child(p, t).unwrap();
        (doc, p)
    }

    const TEXT: &str = "The new policy was unprecedented and significant.";

    #[test]
    fn level_controls_what_is_marked() {
        let h = highlighter();

        let (mut doc, _) = article(TEXT);
        h.highlight(&mut doc, ReadingLevel::Beginner);
        assert_eq!(
            h.highlighted_words(&doc),
            vec!["policy", "unprecedented", "significant"]
        );

        let (mut doc, _) = article(TEXT);
        h.highlight(&mut doc, ReadingLevel::Intermediate);
        assert_eq!(h.highlighted_words(&doc), vec!["unprecedented"]);

        let (mut doc, _) = article(TEXT);
        assert!(h.highlight(&mut doc, ReadingLevel::Advanced).is_empty());
    }

    #[test]
    fn scan_does_not_mutate() {
        let h = highlighter();
        let (doc, p) = article(TEXT);
        let before = doc.children(p).to_vec();

        let spans = h.scan(&doc, ReadingLevel::Beginner);

        assert_eq!(spans.len(), 1);
        assert_eq!(doc.children(p), before.as_slice());
    }

    #[test]
    fn revert_restores_original_text() {
        let h = highlighter();
        let (mut doc, p) = article(TEXT);

        let handles = h.highlight(&mut doc, ReadingLevel::Beginner);
        assert_eq!(handles.len(), 3);
        assert_eq!(h.revert(&mut doc, &handles), 3);

        assert_eq!(doc.text_content(p), TEXT);
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(h.count(&doc), 0);
    }

    #[test]
    fn highlighting_twice_does_not_nest() {
        let h = highlighter();
        let (mut doc, _) = article(TEXT);

        h.highlight(&mut doc, ReadingLevel::Beginner);
        let second = h.highlight(&mut doc, ReadingLevel::Beginner);

        assert!(second.is_empty());
        assert_eq!(h.count(&doc), 3);
    }

    #[test]
    fn toggling_many_times_keeps_text() {
        let h = highlighter();
        let (mut doc, p) = article(TEXT);

        for level in [
            ReadingLevel::Beginner,
            ReadingLevel::Intermediate,
            ReadingLevel::Beginner,
        ] {
            h.highlight(&mut doc, level);
            h.remove_all(&mut doc);
        }

        assert_eq!(doc.text_content(p), TEXT);
    }
}
