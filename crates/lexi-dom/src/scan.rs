use crate::document::{Document, NodeId};

/// Text never matched inside these elements
const SKIP_PARENT_TAGS: &[&str] = &["script", "style", "code", "pre", "noscript"];

/// Page chrome that is never treated as content
const EXCLUDED_TAGS: &[&str] = &["nav", "header", "footer", "aside", "button", "form"];
const EXCLUDED_ROLES: &[&str] = &["navigation", "banner", "contentinfo", "complementary"];

/// Marks the root element of every extension-owned surface
pub const SURFACE_ATTR: &str = "data-lexi-surface";

const CONTENT_TAGS: &[&str] = &["article", "main"];
const CONTENT_CLASSES: &[&str] = &["content", "post", "article"];

/// A text node chosen for highlighting and the words in it to wrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub node: NodeId,
    pub words: Vec<String>,
}

/// Text nodes under `root` that are non-blank and not inside script-like elements
pub fn find_text_nodes(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut candidates = vec![];
    if doc.is_text(root) {
        candidates.push(root);
    }
    candidates.extend(doc.descendants(root));

    candidates
        .into_iter()
        .filter(|n| is_eligible_text(doc, *n))
        .collect()
}

fn is_eligible_text(doc: &Document, node: NodeId) -> bool {
    let Some(text) = doc.text(node) else {
        return false;
    };
    if text.trim().is_empty() {
        return false;
    }

    match doc.parent(node).and_then(|p| doc.tag(p)) {
        Some(tag) => !SKIP_PARENT_TAGS.contains(&tag),
        None => false,
    }
}

/// Inside page chrome (navigation, header, footer, sidebar, button, form) or one of our surfaces
pub fn is_in_excluded_area(doc: &Document, node: NodeId) -> bool {
    doc.ancestors_inclusive(node).any(|n| {
        doc.tag(n).is_some_and(|tag| EXCLUDED_TAGS.contains(&tag))
            || doc.has_attr(n, SURFACE_ATTR)
            || doc
                .attr(n, "role")
                .is_some_and(|role| EXCLUDED_ROLES.contains(&role))
    })
}

/// Main reading areas of the page.
///
/// Semantic containers in selector order, nested duplicates removed; falls back
/// to every paragraph outside page chrome when none exist.
pub fn content_areas(doc: &Document) -> Vec<NodeId> {
    let root = doc.body();
    let mut areas: Vec<NodeId> = Vec::new();

    for tag in CONTENT_TAGS {
        push_unique(&mut areas, doc.query_tag(root, tag));
    }
    push_unique(&mut areas, doc.query_role(root, "main"));
    for class in CONTENT_CLASSES {
        push_unique(&mut areas, doc.query_class(root, class));
    }

    if areas.is_empty() {
        return doc
            .query_tag(root, "p")
            .into_iter()
            .filter(|p| !is_in_excluded_area(doc, *p))
            .collect();
    }

    // an area nested in another would be scanned twice
    let outer: Vec<NodeId> = areas
        .iter()
        .copied()
        .filter(|a| !areas.iter().any(|b| b != a && doc.contains(*b, *a)))
        .collect();

    tracing::debug!("Found {} content areas", outer.len());
    outer
}

fn push_unique(areas: &mut Vec<NodeId>, found: Vec<NodeId>) {
    for n in found {
        if !areas.contains(&n) {
            areas.push(n);
        }
    }
}
