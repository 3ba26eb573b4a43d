use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::{Rect, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),

    #[error("node {0} is not attached to a parent")]
    Detached(NodeId),

    #[error("range end {end} comes before its start {start}")]
    InvalidRange { start: NodeId, end: NodeId },

    #[error("cannot insert {child} into its own descendant {parent}")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Child-list change observed while recording is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: NodeId,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub rect: Option<Rect>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed page model: `<html>` with `<head>` and `<body>`.
///
/// Removed nodes stay in the arena, detached, so stale ids fail lookups
/// through `is_attached` rather than panicking.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    observing: bool,
    records: Vec<MutationRecord>,
    pub url: String,
    pub title: String,
    pub viewport: Viewport,
}

impl Document {
    pub fn new(url: impl Into<String>) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            observing: false,
            records: Vec::new(),
            url: url.into(),
            title: String::new(),
            viewport: Viewport::default(),
        };

        let root = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.link(root, head);
        doc.link(root, body);
        doc.root = root;
        doc.head = head;
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // --- construction

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_lowercase(),
            attributes: BTreeMap::new(),
            rect: None,
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    /// Element with attributes in one call, e.g. `("class", "post")`
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        if let Some(NodeKind::Element(el)) = self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            for (name, value) in attrs {
                el.attributes.insert(name.to_string(), value.to_string());
            }
        }
        id
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    // --- lookup

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::MissingNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::MissingNode(id))
    }

    fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        match &self.node(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn exists(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0).map(|n| &n.kind), Some(NodeKind::Element(_)))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0).map(|n| &n.kind), Some(NodeKind::Text(_)))
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|el| el.tag.as_str())
    }

    /// Own text of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(t) => {
                *t = text.into();
                Ok(())
            }
            NodeKind::Element(_) => Err(DomError::NotText(id)),
        }
    }

    /// Concatenated text of the node and all descendants, in document order
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.nodes.get(id.0) {
            Some(Node {
                kind: NodeKind::Text(t),
                ..
            }) => out.push_str(t),
            Some(node) => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
            None => {}
        }
    }

    // --- attributes

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .ok()
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Returns whether the attribute was present
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        Ok(self.element_mut(id)?.attributes.remove(name).is_some())
    }

    pub fn class_list(&self, id: NodeId) -> Vec<&str> {
        self.attr(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).contains(&class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let el = self.element_mut(id)?;
        let classes = match el.attributes.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        el.attributes.insert("class".to_string(), classes);
        Ok(())
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.element(id).ok().and_then(|el| el.rect)
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<(), DomError> {
        self.element_mut(id)?.rect = Some(rect);
        Ok(())
    }

    /// Own rect, or the nearest ancestor's for text and unlaid-out nodes
    pub fn bounding_rect(&self, id: NodeId) -> Option<Rect> {
        self.ancestors_inclusive(id).find_map(|n| self.rect(n))
    }

    // --- tree relations

    /// `id`, its parent, grandparent, ... up to the root
    pub fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.exists(id).then_some(id), move |n| self.parent(*n))
    }

    /// Nearest element, starting from `id` itself, that satisfies `pred`
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        self.ancestors_inclusive(id)
            .filter(|n| self.is_element(*n))
            .find(|n| pred(self, *n))
    }

    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |doc, n| doc.has_class(n, class))
    }

    /// `ancestor` is `node` or one of its ancestors
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors_inclusive(node).any(|n| n == ancestor)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors_inclusive(id).last() == Some(self.root)
    }

    /// Pre-order descendants, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev());
        }
        out
    }

    pub fn query_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Elements carrying `name`, optionally with an exact value
    pub fn query_attr(&self, root: NodeId, name: &str, value: Option<&str>) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| match (self.attr(*n, name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            })
            .collect()
    }

    pub fn query_role(&self, root: NodeId, role: &str) -> Vec<NodeId> {
        self.query_attr(root, "role", Some(role))
    }

    // --- mutation

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.link(parent, child);
        self.record(parent, vec![child], vec![]);
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        let idx = self
            .children(parent)
            .iter()
            .position(|c| *c == reference)
            .ok_or(DomError::Detached(reference))?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(idx, child);
        self.record(parent, vec![child], vec![]);
        Ok(())
    }

    /// Swap `node` for `replacements`, in order, at the same position
    pub fn replace_with(&mut self, node: NodeId, replacements: &[NodeId]) -> Result<(), DomError> {
        let parent = self.parent(node).ok_or(DomError::Detached(node))?;
        for r in replacements {
            self.check_insert(parent, *r)?;
            self.detach(*r)?;
        }

        let idx = self
            .children(parent)
            .iter()
            .position(|c| *c == node)
            .ok_or(DomError::Detached(node))?;

        let siblings = &mut self.nodes[parent.0].children;
        siblings.remove(idx);
        for (offset, r) in replacements.iter().enumerate() {
            siblings.insert(idx + offset, *r);
        }
        self.nodes[node.0].parent = None;
        for r in replacements {
            self.nodes[r.0].parent = Some(parent);
        }

        self.record(parent, replacements.to_vec(), vec![node]);
        Ok(())
    }

    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        let parent = self.parent(node).ok_or(DomError::Detached(node))?;
        self.detach(node)?;
        self.record(parent, vec![], vec![node]);
        Ok(())
    }

    /// Merge adjacent text nodes and drop empty ones under `id`
    pub fn normalize(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
        let mut removed = Vec::new();

        for child in children {
            match &self.nodes[child.0].kind {
                NodeKind::Text(t) if t.is_empty() => {
                    removed.push(child);
                }
                NodeKind::Text(t) => {
                    let text = t.clone();
                    match kept.last() {
                        Some(prev) if self.is_text(*prev) => {
                            if let NodeKind::Text(prev_text) = &mut self.nodes[prev.0].kind {
                                prev_text.push_str(&text);
                            }
                            removed.push(child);
                        }
                        _ => kept.push(child),
                    }
                }
                NodeKind::Element(_) => {
                    self.normalize(child);
                    kept.push(child);
                }
            }
        }

        if removed.is_empty() {
            return;
        }

        for r in &removed {
            self.nodes[r.0].parent = None;
        }
        self.nodes[id.0].children = kept;
        self.record(id, vec![], removed);
    }

    // --- observation

    /// Turn child-list recording on or off; turning it off discards pending records
    pub fn observe(&mut self, on: bool) {
        self.observing = on;
        if !on {
            self.records.clear();
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Drain pending records
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    fn record(&mut self, target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) {
        if self.observing {
            self.records.push(MutationRecord {
                target,
                added,
                removed,
            });
        }
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.node(id)?.parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.nodes[id.0].parent = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, parts: &[&str]) -> NodeId {
        let p = doc.create_element("p");
        for part in parts {
            let t = doc.create_text(*part);
            doc.append_child(p, t).unwrap();
        }
        doc.append_child(doc.body(), p).unwrap();
        p
    }

    #[test]
    fn text_content_concatenates_in_order() {
        let mut doc = Document::new("https://example.com");
        let p = paragraph(&mut doc, &["Hello ", "world"]);
        let em = doc.create_element("em");
        let t = doc.create_text("!");
        doc.append_child(em, t).unwrap();
        doc.append_child(p, em).unwrap();

        assert_eq!(doc.text_content(doc.body()), "Hello world!");
    }

    #[test]
    fn normalize_merges_and_drops_empty_text() {
        let mut doc = Document::new("https://example.com");
        let p = paragraph(&mut doc, &["a", "", "b", "c"]);

        doc.normalize(p);

        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text(doc.children(p)[0]), Some("abc"));
    }

    #[test]
    fn replace_with_keeps_position() {
        let mut doc = Document::new("https://example.com");
        let p = paragraph(&mut doc, &["one", "two", "three"]);
        let two = doc.children(p)[1];
        let x = doc.create_text("2");
        let y = doc.create_text("!");

        doc.replace_with(two, &[x, y]).unwrap();

        assert_eq!(doc.text_content(p), "one2!three");
        assert!(!doc.is_attached(two));
        assert!(doc.is_attached(x));
    }

    #[test]
    fn records_only_while_observing() {
        let mut doc = Document::new("https://example.com");
        paragraph(&mut doc, &["quiet"]);
        assert!(doc.take_records().is_empty());

        doc.observe(true);
        let p = paragraph(&mut doc, &["loud"]);
        let records = doc.take_records();

        assert_eq!(records.last().unwrap().added, vec![p]);
        assert!(doc.take_records().is_empty());
    }

    #[test]
    fn cannot_append_ancestor_into_descendant() {
        let mut doc = Document::new("https://example.com");
        let p = paragraph(&mut doc, &["x"]);
        let err = doc.append_child(p, doc.body()).unwrap_err();
        assert!(matches!(err, DomError::Cycle { .. }));
    }

    #[test]
    fn closest_walks_up_from_text() {
        let mut doc = Document::new("https://example.com");
        let nav = doc.create_element_with("nav", &[("class", "menu top")]);
        doc.append_child(doc.body(), nav).unwrap();
        let t = doc.create_text("Home");
        doc.append_child(nav, t).unwrap();

        assert_eq!(doc.closest_with_class(t, "menu"), Some(nav));
        assert!(doc.contains(doc.body(), t));
        assert_eq!(doc.query_tag(doc.root(), "nav"), vec![nav]);
    }
}
