use lexi_types::ReadingLevel;

use crate::document::{Document, NodeId};
use crate::highlight::{HighlightHandle, Highlighter};
use crate::scan::is_in_excluded_area;

/// Re-applies highlighting to content added while immersive mode is on
#[derive(Debug)]
pub struct MutationWatcher {
    active: bool,
    level: ReadingLevel,
}

impl MutationWatcher {
    pub fn new(level: ReadingLevel) -> Self {
        Self {
            active: false,
            level,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn level(&self) -> ReadingLevel {
        self.level
    }

    pub fn set_level(&mut self, level: ReadingLevel) {
        self.level = level;
    }

    pub fn start(&mut self, doc: &mut Document) {
        if self.active {
            return;
        }
        // records from before activation are not ours to process
        doc.observe(false);
        doc.observe(true);
        self.active = true;
        tracing::debug!("Mutation watcher started at {}", self.level);
    }

    pub fn stop(&mut self, doc: &mut Document) {
        if !self.active {
            return;
        }
        doc.observe(false);
        self.active = false;
        tracing::debug!("Mutation watcher stopped");
    }

    /// Handle one batch of pending records.
    ///
    /// Added nodes are snapshotted and scanned before anything is wrapped, and the
    /// records produced by wrapping are drained, so a batch never feeds itself.
    pub fn process(&mut self, doc: &mut Document, highlighter: &Highlighter) -> Vec<HighlightHandle> {
        if !self.active {
            return vec![];
        }

        let records = doc.take_records();
        if records.is_empty() {
            return vec![];
        }

        let roots = added_roots(doc, records.into_iter().flat_map(|r| r.added), highlighter);
        let spans: Vec<_> = roots
            .iter()
            .flat_map(|root| highlighter.scan_within(doc, *root, self.level))
            .collect();

        let handles = highlighter.apply(doc, &spans);
        let own = doc.take_records();
        tracing::debug!(
            "Highlighted {} words in {} added nodes ({} own records drained)",
            handles.len(),
            roots.len(),
            own.len()
        );
        handles
    }
}

/// Added elements still in the page, outside page chrome and existing highlights,
/// with nested ones folded into their outermost added ancestor
fn added_roots(
    doc: &Document,
    added: impl Iterator<Item = NodeId>,
    highlighter: &Highlighter,
) -> Vec<NodeId> {
    let mut roots: Vec<NodeId> = Vec::new();
    for node in added {
        if roots.contains(&node)
            || !doc.is_element(node)
            || !doc.is_attached(node)
            || is_in_excluded_area(doc, node)
            || doc
                .closest_with_class(node, highlighter.class_name())
                .is_some()
        {
            continue;
        }
        roots.push(node);
    }

    roots
        .iter()
        .copied()
        .filter(|n| !roots.iter().any(|other| other != n && doc.contains(*other, *n)))
        .collect()
}
