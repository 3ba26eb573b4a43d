use lexi_core::words::count_words;

use crate::document::{Document, NodeId};

/// Shortest paragraph kept when the page has no article or main element
const MIN_PARAGRAPH_CHARS: usize = 50;

/// `og:title` meta, then the first `h1`, then the document title
pub fn article_title(doc: &Document) -> String {
    let og = doc
        .query_attr(doc.root(), "property", Some("og:title"))
        .into_iter()
        .filter(|n| doc.tag(*n) == Some("meta"))
        .find_map(|n| doc.attr(n, "content"))
        .filter(|c| !c.is_empty());
    if let Some(content) = og {
        return content.to_string();
    }

    let h1 = doc
        .query_tag(doc.body(), "h1")
        .first()
        .map(|h| doc.text_content(*h).trim().to_string())
        .filter(|t| !t.is_empty());

    h1.unwrap_or_else(|| doc.title.clone())
}

/// First `article`, else first `main`
fn main_content(doc: &Document) -> Option<NodeId> {
    let body = doc.body();
    doc.query_tag(body, "article")
        .first()
        .or(doc.query_tag(body, "main").first())
        .copied()
}

/// Whitespace-separated words in the article, main element or body
pub fn word_count(doc: &Document) -> usize {
    let root = main_content(doc).unwrap_or(doc.body());
    count_words(&doc.text_content(root))
}

/// Readable text for summarising: article or main text, else longer paragraphs joined by blank lines
pub fn extract_article_text(doc: &Document) -> String {
    if let Some(root) = main_content(doc) {
        return doc.text_content(root).trim().to_string();
    }

    doc.query_tag(doc.body(), "p")
        .into_iter()
        .map(|p| doc.text_content(p).trim().to_string())
        .filter(|t| t.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}
