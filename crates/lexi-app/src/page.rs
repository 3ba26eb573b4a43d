use lexi_dom::{Document, DomError, Rect};

const LINE_HEIGHT: f64 = 24.0;
const MARGIN: f64 = 40.0;

/// Lay a plain-text file out as an article.
///
/// The first non-empty line becomes the `h1`, every blank-line separated block
/// after it a paragraph. Paragraphs are stacked top to bottom so placement and
/// scroll progress behave like a rendered page.
pub fn text_page(url: &str, text: &str) -> Result<Document, DomError> {
    let mut doc = Document::new(url);
    let width = doc.viewport.width - 2.0 * MARGIN;
    let article = doc.create_element("article");
    let body = doc.body();
    doc.append_child(body, article)?;

    let mut blocks = text
        .split("\n\n")
        .map(|b| b.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|b| !b.is_empty());

    let mut y = MARGIN;
    if let Some(title) = blocks.next() {
        doc.title = title.clone();
        y = push_block(&mut doc, article, "h1", &title, y, width)?;
    }
    for paragraph in blocks {
        y = push_block(&mut doc, article, "p", &paragraph, y, width)?;
    }

    doc.set_rect(article, Rect::new(MARGIN, MARGIN, width, y - MARGIN))?;
    doc.viewport.document_height = (y + MARGIN).max(doc.viewport.height);
    Ok(doc)
}

fn push_block(
    doc: &mut Document,
    parent: lexi_dom::NodeId,
    tag: &str,
    text: &str,
    y: f64,
    width: f64,
) -> Result<f64, DomError> {
    // roughly 8px per char
    let chars_per_line = (width / 8.0).max(1.0) as usize;
    let lines = text.chars().count().div_ceil(chars_per_line).max(1);
    let height = lines as f64 * LINE_HEIGHT;

    let node = doc.create_element(tag);
    let t = doc.create_text(text);
    doc.append_child(node, t)?;
    doc.append_child(parent, node)?;
    doc.set_rect(node, Rect::new(MARGIN, y, width, height))?;
    Ok(y + height + LINE_HEIGHT)
}
