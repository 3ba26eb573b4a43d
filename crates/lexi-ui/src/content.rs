use std::fmt;
use std::str::FromStr;

use lexi_capability::definitions::Definition;
use lexi_capability::proofreader::ProofreadResult;
use lexi_dom::{Document, DomError, NodeId};
use lexi_types::{PracticeWord, SummaryLength, SummaryType};

/// Attribute carrying the [`Action`] of a surface button
pub const ACTION_ATTR: &str = "data-action";
/// Attribute naming an input or choice field inside a surface
pub const FIELD_ATTR: &str = "data-field";

pub const PRACTICE_INPUT: &str = "practice-input";
pub const SUMMARY_INPUT: &str = "summary-input";
pub const SUMMARY_TYPE: &str = "summary-type";
pub const SUMMARY_LENGTH: &str = "summary-length";
pub const GRAMMAR_INPUT: &str = "grammar-input";

/// Everything a surface button can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Close,
    SpeakSource,
    SpeakTarget,
    AddToVocabulary,
    Practice,
    GotIt,
    Translate,
    Speak,
    Rewrite,
    ApplyRewrite,
    CopyRewrite,
    CheckGrammar,
    BetterPhrasing,
    NextWord,
    Done,
    GenerateSummary,
    CopySummary,
    SaveSummary,
    PracticeNow,
    PracticeLater,
}

impl Action {
    const ALL: [Action; 20] = [
        Action::Close,
        Action::SpeakSource,
        Action::SpeakTarget,
        Action::AddToVocabulary,
        Action::Practice,
        Action::GotIt,
        Action::Translate,
        Action::Speak,
        Action::Rewrite,
        Action::ApplyRewrite,
        Action::CopyRewrite,
        Action::CheckGrammar,
        Action::BetterPhrasing,
        Action::NextWord,
        Action::Done,
        Action::GenerateSummary,
        Action::CopySummary,
        Action::SaveSummary,
        Action::PracticeNow,
        Action::PracticeLater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Close => "close",
            Action::SpeakSource => "speak-source",
            Action::SpeakTarget => "speak-target",
            Action::AddToVocabulary => "add-vocabulary",
            Action::Practice => "practice",
            Action::GotIt => "got-it",
            Action::Translate => "translate",
            Action::Speak => "speak",
            Action::Rewrite => "rewrite",
            Action::ApplyRewrite => "apply-rewrite",
            Action::CopyRewrite => "copy-rewrite",
            Action::CheckGrammar => "check-grammar",
            Action::BetterPhrasing => "better-phrasing",
            Action::NextWord => "next-word",
            Action::Done => "done",
            Action::GenerateSummary => "generate-summary",
            Action::CopySummary => "copy-summary",
            Action::SaveSummary => "save-summary",
            Action::PracticeNow => "practice-now",
            Action::PracticeLater => "practice-later",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub action: Action,
    pub label: String,
}

impl Button {
    pub fn new(action: Action, label: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
        }
    }
}

/// One piece of surface content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Text {
        class: &'static str,
        text: String,
    },
    List {
        class: &'static str,
        items: Vec<String>,
    },
    /// Free text input, the value is read back through [`FIELD_ATTR`]
    Input {
        field: &'static str,
        placeholder: &'static str,
        value: String,
    },
    /// `(value, label)` options
    Choice {
        field: &'static str,
        options: Vec<(&'static str, &'static str)>,
        selected: &'static str,
    },
    Actions(Vec<Button>),
}

impl Block {
    pub fn text(class: &'static str, text: impl Into<String>) -> Self {
        Block::Text {
            class,
            text: text.into(),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Build `blocks` as children of `parent`
pub fn render_blocks(doc: &mut Document, parent: NodeId, blocks: &[Block]) -> Result<(), DomError> {
    for block in blocks {
        let node = match block {
            Block::Heading(text) => text_element(doc, "h3", &[], text)?,
            Block::Text { class, text } => text_element(doc, "div", &[("class", *class)], text)?,
            Block::List { class, items } => {
                let list = doc.create_element_with("ul", &[("class", *class)]);
                for item in items {
                    let li = text_element(doc, "li", &[], item)?;
                    doc.append_child(list, li)?;
                }
                list
            }
            Block::Input {
                field,
                placeholder,
                value,
            } => text_element(
                doc,
                "textarea",
                &[(FIELD_ATTR, *field), ("placeholder", *placeholder)],
                value,
            )?,
            Block::Choice {
                field,
                options,
                selected,
            } => {
                let select = doc.create_element_with("select", &[(FIELD_ATTR, *field)]);
                for (value, label) in options {
                    let option = text_element(doc, "option", &[("value", *value)], label)?;
                    if value == selected {
                        doc.set_attr(option, "selected", "")?;
                    }
                    doc.append_child(select, option)?;
                }
                select
            }
            Block::Actions(buttons) => {
                let row = doc.create_element_with("div", &[("class", "lexi-actions")]);
                for button in buttons {
                    let b = text_element(
                        doc,
                        "button",
                        &[(ACTION_ATTR, button.action.as_str())],
                        &button.label,
                    )?;
                    doc.append_child(row, b)?;
                }
                row
            }
        };
        doc.append_child(parent, node)?;
    }
    Ok(())
}

fn text_element(
    doc: &mut Document,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<NodeId, DomError> {
    let element = doc.create_element_with(tag, attrs);
    if !text.is_empty() {
        let t = doc.create_text(text);
        doc.append_child(element, t)?;
    }
    Ok(element)
}

pub(crate) fn clear_children(doc: &mut Document, node: NodeId) -> Result<(), DomError> {
    for child in doc.children(node).to_vec() {
        doc.remove(child)?;
    }
    Ok(())
}

fn field_node(doc: &Document, root: NodeId, field: &str) -> Option<NodeId> {
    doc.query_attr(root, FIELD_ATTR, Some(field)).into_iter().next()
}

/// Current value of a field under `root`: input text, or the selected option's value
pub fn field_value(doc: &Document, root: NodeId, field: &str) -> Option<String> {
    let node = field_node(doc, root, field)?;
    if doc.tag(node) == Some("select") {
        return doc
            .children(node)
            .iter()
            .find(|o| doc.has_attr(**o, "selected"))
            .and_then(|o| doc.attr(*o, "value"))
            .map(str::to_string);
    }
    Some(doc.text_content(node))
}

/// Replace the value of a field under `root`.
///
/// Returns false when there is no such field, or the choice has no such option.
pub fn set_field_value(
    doc: &mut Document,
    root: NodeId,
    field: &str,
    value: &str,
) -> Result<bool, DomError> {
    let Some(node) = field_node(doc, root, field) else {
        return Ok(false);
    };
    let children = doc.children(node).to_vec();

    if doc.tag(node) == Some("select") {
        if !children.iter().any(|o| doc.attr(*o, "value") == Some(value)) {
            return Ok(false);
        }
        for option in children {
            if doc.attr(option, "value") == Some(value) {
                doc.set_attr(option, "selected", "")?;
            } else {
                doc.remove_attr(option, "selected")?;
            }
        }
        return Ok(true);
    }

    clear_children(doc, node)?;
    if !value.is_empty() {
        let t = doc.create_text(value);
        doc.append_child(node, t)?;
    }
    Ok(true)
}

pub fn tooltip_word(word: &str) -> Vec<Block> {
    vec![Block::text("lexi-tooltip-word", word)]
}

pub fn tooltip_translation(translation: &str) -> Vec<Block> {
    vec![
        Block::text("lexi-tooltip-translation", translation),
        Block::Actions(vec![
            Button::new(Action::SpeakSource, "🔊 Original"),
            Button::new(Action::SpeakTarget, "🔊 Translation"),
            Button::new(Action::AddToVocabulary, "+ Add to vocabulary"),
        ]),
    ]
}

/// Everything the word card shows once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct WordCardView {
    pub word: String,
    pub translation: String,
    pub source_lang: String,
    pub target_lang: String,
    pub definition: Definition,
}

pub fn word_card(view: &WordCardView) -> Vec<Block> {
    let mut blocks = vec![Block::Heading(view.word.clone())];
    if let Some(ipa) = &view.definition.pronunciation {
        blocks.push(Block::text("lexi-card-pronunciation", ipa.clone()));
    }
    blocks.push(Block::text(
        "lexi-card-translation",
        format!(
            "{} ({}) → {} ({})",
            view.word, view.source_lang, view.translation, view.target_lang
        ),
    ));
    blocks.push(Block::Actions(vec![
        Button::new(Action::SpeakSource, "🔊 Original"),
        Button::new(Action::SpeakTarget, "🔊 Translation"),
    ]));
    blocks.push(Block::text(
        "lexi-card-definition",
        view.definition.definition.clone(),
    ));
    blocks.push(Block::text(
        "lexi-card-example",
        view.definition.example.clone(),
    ));
    if view.definition.demo_mode {
        blocks.push(Block::text(
            "lexi-card-demo",
            "Demo mode: AI definitions are not available in this browser.",
        ));
    }
    blocks.push(Block::Actions(vec![
        Button::new(Action::Practice, "✍️ Practice"),
        Button::new(Action::AddToVocabulary, "+ Add to vocabulary"),
        Button::new(Action::GotIt, "✓ Got it"),
    ]));
    blocks
}

pub fn toolbar_actions() -> Vec<Block> {
    vec![Block::Actions(vec![
        Button::new(Action::Translate, "🌐 Translate"),
        Button::new(Action::Speak, "🔊 Speak"),
        Button::new(Action::Rewrite, "✨ Rewrite"),
    ])]
}

pub fn translation_result(translation: &str) -> Vec<Block> {
    vec![Block::text("lexi-translation-result", translation)]
}

pub fn rewrite_result(rewritten: &str) -> Vec<Block> {
    vec![
        Block::text("lexi-rewrite-result", rewritten),
        Block::Actions(vec![
            Button::new(Action::ApplyRewrite, "✓ Apply"),
            Button::new(Action::CopyRewrite, "📋 Copy"),
        ]),
    ]
}

pub fn practice_prompt(word_count: usize) -> Vec<Block> {
    vec![
        Block::Heading("🎉 Great job reading!".to_string()),
        Block::text(
            "lexi-prompt-text",
            format!(
                "You looked up {word_count} word{}. Want to practice them?",
                plural(word_count)
            ),
        ),
        Block::Actions(vec![
            Button::new(Action::PracticeNow, "✍️ Practice Now"),
            Button::new(Action::PracticeLater, "Maybe Later"),
        ]),
    ]
}

/// Exercise for the word at `index` (zero based) out of `total`
pub fn practice_word(word: &PracticeWord, index: usize, total: usize) -> Vec<Block> {
    vec![
        Block::text("lexi-practice-progress", format!("{} / {total}", index + 1)),
        Block::Heading("Write a sentence using:".to_string()),
        Block::text("lexi-practice-target-word", format!("\"{}\"", word.word)),
        Block::text(
            "lexi-practice-translation",
            format!("({})", word.translation),
        ),
        Block::Input {
            field: PRACTICE_INPUT,
            placeholder: "Type your sentence here...",
            value: String::new(),
        },
        Block::Actions(vec![Button::new(Action::CheckGrammar, "✓ Check Grammar")]),
    ]
}

/// Grammar feedback on a practice sentence, with the follow-up buttons
pub fn practice_feedback(result: &ProofreadResult) -> Vec<Block> {
    let mut blocks = if result.is_clean() {
        vec![Block::text(
            "lexi-feedback-success",
            "✅ Perfect! No grammar issues found.",
        )]
    } else {
        correction_blocks(result)
    };
    blocks.push(Block::Actions(vec![
        Button::new(Action::BetterPhrasing, "✨ See Better Phrasing"),
        Button::new(Action::NextWord, "Next Word →"),
    ]));
    blocks
}

/// Shown when the grammar check failed; the learner can still move on
pub fn practice_check_failed(message: &str) -> Vec<Block> {
    vec![
        Block::text(
            "lexi-feedback-error",
            format!("❌ Grammar check unavailable. Click Next to continue. ({message})"),
        ),
        Block::Actions(vec![Button::new(Action::NextWord, "Next Word →")]),
    ]
}

pub fn better_phrasing(rewritten: &str) -> Block {
    Block::text("lexi-feedback-rewrite", format!("✨ Better phrasing: {rewritten}"))
}

pub fn practice_complete(word_count: usize) -> Vec<Block> {
    vec![
        Block::Heading("🎉 Great Practice!".to_string()),
        Block::text(
            "lexi-practice-complete",
            format!("You practiced {word_count} word{}!", plural(word_count)),
        ),
        Block::text(
            "lexi-practice-stats",
            format!("+{word_count} words learned 📚"),
        ),
        Block::Actions(vec![Button::new(Action::Done, "✓ Done")]),
    ]
}

pub fn summary_form(summary_type: SummaryType, length: SummaryLength) -> Vec<Block> {
    vec![
        Block::Choice {
            field: SUMMARY_TYPE,
            options: SummaryType::ALL
                .iter()
                .map(|t| (t.as_str(), t.label()))
                .collect(),
            selected: summary_type.as_str(),
        },
        Block::Choice {
            field: SUMMARY_LENGTH,
            options: SummaryLength::ALL
                .iter()
                .map(|l| (l.as_str(), l.as_str()))
                .collect(),
            selected: length.as_str(),
        },
        Block::Input {
            field: SUMMARY_INPUT,
            placeholder: "Paste text to summarize, or leave empty to use this page",
            value: String::new(),
        },
        Block::Actions(vec![Button::new(Action::GenerateSummary, "✨ Generate Summary")]),
    ]
}

pub fn summary_result(summary: &str, summary_type: SummaryType) -> Vec<Block> {
    vec![
        Block::Heading(summary_type.label().to_string()),
        Block::text("lexi-summary-text", summary),
        Block::Actions(vec![
            Button::new(Action::CopySummary, "📋 Copy"),
            Button::new(Action::SaveSummary, "💾 Save"),
        ]),
    ]
}

pub fn grammar_form() -> Vec<Block> {
    vec![
        Block::Input {
            field: GRAMMAR_INPUT,
            placeholder: "Write a sentence to check...",
            value: String::new(),
        },
        Block::Actions(vec![Button::new(Action::CheckGrammar, "✓ Check Grammar")]),
    ]
}

pub fn grammar_result(result: &ProofreadResult) -> Vec<Block> {
    if result.is_clean() {
        return vec![Block::text(
            "lexi-feedback-success",
            "✅ Perfect! No grammar issues found.",
        )];
    }
    let mut blocks = correction_blocks(result);
    blocks.push(Block::text(
        "lexi-corrected-text",
        format!("Corrected: {}", result.corrected_text),
    ));
    blocks
}

fn correction_blocks(result: &ProofreadResult) -> Vec<Block> {
    let n = result.corrections.len();
    vec![
        Block::text(
            "lexi-feedback-partial",
            format!("📝 {n} suggestion{} found:", plural(n)),
        ),
        Block::List {
            class: "lexi-corrections-list",
            items: result.corrections.iter().map(|c| c.message()).collect(),
        },
    ]
}

/// Buttons rendered in `blocks`, in order
pub fn actions_in(blocks: &[Block]) -> Vec<Action> {
    blocks
        .iter()
        .filter_map(|b| match b {
            Block::Actions(buttons) => Some(buttons.iter().map(|b| b.action)),
            _ => None,
        })
        .flatten()
        .collect()
}
