use crate::document::{Document, DomError, NodeId};
use crate::geometry::Rect;

/// A selection between two text positions; offsets count chars, not bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: NodeId,
    pub start_offset: usize,
    pub end: NodeId,
    pub end_offset: usize,
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl TextRange {
    pub fn new(start: NodeId, start_offset: usize, end: NodeId, end_offset: usize) -> Self {
        Self {
            start,
            start_offset,
            end,
            end_offset,
        }
    }

    /// Range inside a single text node
    pub fn within(node: NodeId, start_offset: usize, end_offset: usize) -> Self {
        Self::new(node, start_offset, node, end_offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end && self.start_offset == self.end_offset
    }

    /// Text nodes from start to end in document order
    fn text_nodes(&self, doc: &Document) -> Result<Vec<NodeId>, DomError> {
        for node in [self.start, self.end] {
            if !doc.is_text(node) {
                return Err(DomError::NotText(node));
            }
        }
        if self.start == self.end {
            return Ok(vec![self.start]);
        }

        let order: Vec<NodeId> = doc
            .descendants(doc.root())
            .into_iter()
            .filter(|n| doc.is_text(*n))
            .collect();
        let position = |id: NodeId| {
            order
                .iter()
                .position(|n| *n == id)
                .ok_or(DomError::Detached(id))
        };

        let (from, to) = (position(self.start)?, position(self.end)?);
        if to < from {
            return Err(DomError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(order[from..=to].to_vec())
    }

    /// Selected text
    pub fn text(&self, doc: &Document) -> Result<String, DomError> {
        let nodes = self.text_nodes(doc)?;
        let last = nodes.len() - 1;
        let mut out = String::new();

        for (i, node) in nodes.iter().enumerate() {
            let text = doc.text(*node).unwrap_or_default();
            let from = if i == 0 {
                byte_index(text, self.start_offset)
            } else {
                0
            };
            let to = if i == last {
                byte_index(text, self.end_offset)
            } else {
                text.len()
            };
            if from < to {
                out.push_str(&text[from..to]);
            }
        }
        Ok(out)
    }

    /// Layout box used to anchor keyboard selections
    pub fn bounding_rect(&self, doc: &Document) -> Option<Rect> {
        doc.bounding_rect(self.start)
    }
}

/// Delete the range's text and put `replacement` in its place as a new text node
pub fn replace_range(
    doc: &mut Document,
    range: &TextRange,
    replacement: &str,
) -> Result<NodeId, DomError> {
    let nodes = range.text_nodes(doc)?;
    let last = nodes.len() - 1;

    let start_text = doc.text(range.start).unwrap_or_default().to_string();
    let end_text = doc.text(range.end).unwrap_or_default().to_string();
    let prefix = start_text[..byte_index(&start_text, range.start_offset)].to_string();
    let suffix = end_text[byte_index(&end_text, range.end_offset)..].to_string();

    for node in nodes.iter().skip(1).take(last.saturating_sub(1)) {
        doc.set_text(*node, "")?;
    }

    let parent = doc.parent(range.start).ok_or(DomError::Detached(range.start))?;
    let inserted = doc.create_text(replacement);
    let mut pieces = vec![range.start, inserted];

    doc.set_text(range.start, prefix)?;
    if range.start == range.end {
        pieces.push(doc.create_text(suffix));
    } else {
        doc.set_text(range.end, suffix)?;
    }

    // put the new pieces right after the start node
    let siblings = doc.children(parent).to_vec();
    let next = siblings
        .iter()
        .position(|n| *n == range.start)
        .and_then(|i| siblings.get(i + 1).copied());
    for piece in pieces.into_iter().skip(1) {
        match next {
            Some(reference) => doc.insert_before(parent, piece, reference)?,
            None => doc.append_child(parent, piece)?,
        }
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, parts: &[&str]) -> (NodeId, Vec<NodeId>) {
        let p = doc.create_element("p");
        doc.append_child(doc.body(), p).unwrap();
        let mut nodes = vec![];
        for part in parts {
            let holder = if nodes.is_empty() {
                p
            } else {
                let em = doc.create_element("em");
                doc.append_child(p, em).unwrap();
                em
            };
            let t = doc.create_text(*part);
            doc.append_child(holder, t).unwrap();
            nodes.push(t);
        }
        (p, nodes)
    }

    #[test]
    fn text_within_one_node_counts_chars() {
        let mut doc = Document::new("https://example.com");
        let (_, nodes) = paragraph(&mut doc, &["Él está aquí"]);

        let range = TextRange::within(nodes[0], 3, 7);
        assert_eq!(range.text(&doc).unwrap(), "está");
    }

    #[test]
    fn replace_single_node_keeps_surroundings() {
        let mut doc = Document::new("https://example.com");
        let (p, nodes) = paragraph(&mut doc, &["I goes to school."]);

        replace_range(&mut doc, &TextRange::within(nodes[0], 2, 6), "go").unwrap();

        assert_eq!(doc.text_content(p), "I go to school.");
    }

    #[test]
    fn replace_across_nodes() {
        let mut doc = Document::new("https://example.com");
        let (p, nodes) = paragraph(&mut doc, &["She have ", "many", " book here"]);

        let range = TextRange::new(nodes[0], 4, nodes[2], 5);
        assert_eq!(range.text(&doc).unwrap(), "have many book");

        replace_range(&mut doc, &range, "has many books").unwrap();
        assert_eq!(doc.text_content(p), "She has many books here");
    }

    #[test]
    fn backwards_range_is_rejected() {
        let mut doc = Document::new("https://example.com");
        let (_, nodes) = paragraph(&mut doc, &["first ", "second"]);

        let err = TextRange::new(nodes[1], 0, nodes[0], 2).text(&doc).unwrap_err();
        assert!(matches!(err, DomError::InvalidRange { .. }));
    }
}
