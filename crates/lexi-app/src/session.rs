use lexi_dom::TextRange;
use lexi_types::{PracticeWord, SummaryType};
use lexi_ui::{Block, Ticket};

/// A translated word shown in the tooltip or the word card
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub word: String,
    pub translation: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl Lookup {
    pub fn to_practice_word(&self) -> PracticeWord {
        PracticeWord {
            word: self.word.clone(),
            translation: self.translation.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupSession {
    pub ticket: Ticket,
    pub word: String,
    /// Filled in once the translation arrived
    pub lookup: Option<Lookup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarSession {
    pub ticket: Ticket,
    pub text: String,
    pub range: TextRange,
    pub rewritten: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSession {
    pub ticket: Ticket,
    pub words: Vec<PracticeWord>,
    pub index: usize,
    /// Feedback on the current sentence, kept so a rewrite can be appended
    pub feedback: Vec<Block>,
}

impl PracticeSession {
    pub fn current(&self) -> Option<&PracticeWord> {
        self.words.get(self.index)
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.words.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySession {
    pub ticket: Ticket,
    pub last: Option<(String, SummaryType)>,
}

/// Per-surface state that outlives a single handler
#[derive(Debug, Default)]
pub struct Sessions {
    pub tooltip: Option<LookupSession>,
    pub card: Option<LookupSession>,
    pub toolbar: Option<ToolbarSession>,
    pub practice: Option<PracticeSession>,
    pub summary: Option<SummarySession>,
}

impl Sessions {
    /// Lookup session of the tooltip or card instance behind `ticket`
    pub fn lookup_mut(&mut self, ticket: Ticket) -> Option<&mut LookupSession> {
        [self.tooltip.as_mut(), self.card.as_mut()]
            .into_iter()
            .flatten()
            .find(|s| s.ticket == ticket)
    }

    pub fn lookup(&self, ticket: Ticket) -> Option<&Lookup> {
        [self.tooltip.as_ref(), self.card.as_ref()]
            .into_iter()
            .flatten()
            .find(|s| s.ticket == ticket)
            .and_then(|s| s.lookup.as_ref())
    }

    pub fn toolbar(&mut self, ticket: Ticket) -> Option<&mut ToolbarSession> {
        self.toolbar.as_mut().filter(|s| s.ticket == ticket)
    }

    pub fn practice(&mut self, ticket: Ticket) -> Option<&mut PracticeSession> {
        self.practice.as_mut().filter(|s| s.ticket == ticket)
    }

    pub fn summary(&mut self, ticket: Ticket) -> Option<&mut SummarySession> {
        self.summary.as_mut().filter(|s| s.ticket == ticket)
    }
}
