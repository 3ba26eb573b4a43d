use std::fmt;

/// Every kind of transient surface; at most one of each exists at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Tooltip,
    SelectionToolbar,
    WordCard,
    PracticeModal,
    SummaryModal,
    GrammarModal,
    PracticePrompt,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 7] = [
        SurfaceKind::Tooltip,
        SurfaceKind::SelectionToolbar,
        SurfaceKind::WordCard,
        SurfaceKind::PracticeModal,
        SurfaceKind::SummaryModal,
        SurfaceKind::GrammarModal,
        SurfaceKind::PracticePrompt,
    ];

    /// Value of the surface marker attribute
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceKind::Tooltip => "tooltip",
            SurfaceKind::SelectionToolbar => "selection-toolbar",
            SurfaceKind::WordCard => "word-card",
            SurfaceKind::PracticeModal => "practice-modal",
            SurfaceKind::SummaryModal => "summary-modal",
            SurfaceKind::GrammarModal => "grammar-modal",
            SurfaceKind::PracticePrompt => "practice-prompt",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            SurfaceKind::Tooltip => "lexi-tooltip",
            SurfaceKind::SelectionToolbar => "lexi-selection-widget",
            SurfaceKind::WordCard => "lexi-word-card",
            SurfaceKind::PracticeModal => "lexi-practice-modal",
            SurfaceKind::SummaryModal => "lexi-summary-modal",
            SurfaceKind::GrammarModal => "lexi-grammar-modal",
            SurfaceKind::PracticePrompt => "lexi-practice-prompt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            SurfaceKind::PracticeModal | SurfaceKind::SummaryModal | SurfaceKind::GrammarModal
        )
    }

    pub fn is_draggable(&self) -> bool {
        self.is_modal() || *self == SurfaceKind::WordCard
    }

    pub fn is_resizable(&self) -> bool {
        self.is_modal()
    }

    /// The practice prompt only goes away through its buttons or its timer
    pub fn closes_on_click_outside(&self) -> bool {
        *self != SurfaceKind::PracticePrompt
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of one surface instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    /// Visible and accepting renders
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Opening | Phase::Open)
    }
}

/// Identifies one surface instance.
///
/// Async work captures the ticket of the surface it started from and renders
/// only while that same instance is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub kind: SurfaceKind,
    pub generation: u64,
}
