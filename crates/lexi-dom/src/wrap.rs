use regex::Regex;

use crate::document::{Document, DomError, NodeId};

/// Case-insensitive whole-word matcher for any of `words`, longest first
fn word_matcher(words: &[String]) -> Option<Regex> {
    let mut escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w))
        .collect();
    if escaped.is_empty() {
        return None;
    }
    escaped.sort_by(|a, b| b.len().cmp(&a.len()));
    escaped.dedup();

    let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Could not build word matcher: {e}");
            None
        }
    }
}

/// Wrap every whole-word occurrence of `word` in `text_node`
pub fn wrap_word(
    doc: &mut Document,
    text_node: NodeId,
    word: &str,
    class_name: &str,
) -> Result<Vec<NodeId>, DomError> {
    wrap_words(doc, text_node, &[word.to_string()], class_name)
}

/// Replace `text_node` with text and `<span class data-word>` pieces for each match.
///
/// The surrounding text is kept byte-for-byte; a node with no match is left untouched.
pub fn wrap_words(
    doc: &mut Document,
    text_node: NodeId,
    words: &[String],
    class_name: &str,
) -> Result<Vec<NodeId>, DomError> {
    let text = doc
        .text(text_node)
        .ok_or(DomError::NotText(text_node))?
        .to_string();
    if doc.parent(text_node).is_none() {
        return Err(DomError::Detached(text_node));
    }

    let Some(matcher) = word_matcher(words) else {
        return Ok(vec![]);
    };

    let mut pieces = Vec::new();
    let mut spans = Vec::new();
    let mut last = 0;

    for m in matcher.find_iter(&text) {
        if m.start() > last {
            pieces.push(doc.create_text(&text[last..m.start()]));
        }

        let normalized = m.as_str().to_lowercase();
        let span = doc.create_element_with(
            "span",
            &[("class", class_name), ("data-word", normalized.as_str())],
        );
        let inner = doc.create_text(m.as_str());
        doc.append_child(span, inner)?;
        pieces.push(span);
        spans.push(span);

        last = m.end();
    }

    if spans.is_empty() {
        return Ok(spans);
    }

    if last < text.len() {
        pieces.push(doc.create_text(&text[last..]));
    }

    doc.replace_with(text_node, &pieces)?;
    Ok(spans)
}

/// Put the text of one highlight span back in its place
pub fn unwrap_span(doc: &mut Document, span: NodeId) -> Result<NodeId, DomError> {
    let text = doc.text_content(span);
    let replacement = doc.create_text(text);
    doc.replace_with(span, &[replacement])?;
    Ok(replacement)
}

/// Remove every `class_name` span under `root` and re-merge the split text.
///
/// Returns how many spans were removed.
pub fn unwrap_all(doc: &mut Document, root: NodeId, class_name: &str) -> usize {
    let spans = doc.query_class(root, class_name);
    let mut removed = 0;

    for span in spans {
        match unwrap_span(doc, span) {
            Ok(_) => removed += 1,
            Err(e) => tracing::debug!("Skipping highlight {span}: {e}"),
        }
    }

    doc.normalize(root);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS: &str = "lexi-highlight";

    fn page(text: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("https://example.com");
        let p = doc.create_element("p");
        doc.append_child(doc.body(), p).unwrap();
        let t = doc.create_text(text);
        doc.append_child(p, t).unwrap();
        (doc, p, t)
    }

    #[test]
    fn substrings_are_not_matched() {
        let (mut doc, p, t) = page("concatenate cats category");

        let spans = wrap_word(&mut doc, t, "cat", CLASS).unwrap();

        assert!(spans.is_empty());
        assert_eq!(doc.children(p), &[t]);
    }

    #[test]
    fn whole_word_is_wrapped_once() {
        let (mut doc, p, t) = page("The cats sat");

        let spans = wrap_word(&mut doc, t, "cats", CLASS).unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(doc.text_content(spans[0]), "cats");
        assert_eq!(doc.attr(spans[0], "data-word"), Some("cats"));
        assert_eq!(doc.children(p).len(), 3);
        assert_eq!(doc.text_content(p), "The cats sat");
    }

    #[test]
    fn matching_ignores_case_but_keeps_original_text() {
        let (mut doc, p, t) = page("Policy, policy and POLICY.");

        let spans = wrap_word(&mut doc, t, "policy", CLASS).unwrap();

        assert_eq!(spans.len(), 3);
        assert_eq!(doc.text_content(spans[2]), "POLICY");
        assert_eq!(doc.attr(spans[2], "data-word"), Some("policy"));
        assert_eq!(doc.text_content(p), "Policy, policy and POLICY.");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let (mut doc, _, t) = page("c++ and cxx");
        let spans = wrap_word(&mut doc, t, "c.x", CLASS).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn unwrap_restores_text_and_merges_nodes() {
        let original = "A laureate met another laureate, then left.";
        let (mut doc, p, t) = page(original);
        wrap_words(&mut doc, t, &["laureate".into(), "left".into()], CLASS).unwrap();

        let body = doc.body();
        let removed = unwrap_all(&mut doc, body, CLASS);

        assert_eq!(removed, 3);
        assert_eq!(doc.text_content(p), original);
        assert_eq!(doc.children(p).len(), 1);
    }

    #[test]
    fn repeated_toggling_is_lossless() {
        let original = "Significant policy changes were unprecedented.";
        let (mut doc, p, _) = page(original);
        let words: Vec<String> = vec!["significant".into(), "unprecedented".into()];

        for _ in 0..5 {
            let t = doc.children(p)[0];
            wrap_words(&mut doc, t, &words, CLASS).unwrap();
            let body = doc.body();
            unwrap_all(&mut doc, body, CLASS);
        }

        assert_eq!(doc.text_content(p), original);
    }
}
