use lexi_dom::{NodeId, TextRange};
use lexi_types::ReadingLevel;
use lexi_ui::SurfaceKind;

/// Signals observed on the host page
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PointerDown { target: NodeId, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { target: NodeId, x: f64, y: f64 },
    Click { target: NodeId },
    KeyDown { key: String },
    KeyUp { target: NodeId, key: String, shift: bool },
    /// Pointer entered `target`
    HoverStart { target: NodeId },
    HoverEnd { target: NodeId },
    Scroll { scroll_y: f64 },
    /// The page's text selection changed
    Selection(Option<TextRange>),
    /// User typed into a field of one of our surfaces
    Input {
        kind: SurfaceKind,
        field: String,
        value: String,
    },
    /// Popup toggle for immersive mode
    SetImmersive { enabled: bool },
    SetLevel(ReadingLevel),
    OpenSummary,
    OpenGrammar,
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::PointerDown { .. } => "pointer-down",
            HostEvent::PointerMove { .. } => "pointer-move",
            HostEvent::PointerUp { .. } => "pointer-up",
            HostEvent::Click { .. } => "click",
            HostEvent::KeyDown { .. } => "key-down",
            HostEvent::KeyUp { .. } => "key-up",
            HostEvent::HoverStart { .. } => "hover-start",
            HostEvent::HoverEnd { .. } => "hover-end",
            HostEvent::Scroll { .. } => "scroll",
            HostEvent::Selection(_) => "selection",
            HostEvent::Input { .. } => "input",
            HostEvent::SetImmersive { .. } => "set-immersive",
            HostEvent::SetLevel(_) => "set-level",
            HostEvent::OpenSummary => "open-summary",
            HostEvent::OpenGrammar => "open-grammar",
        }
    }
}

/// Requests from the engine back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    CopyText(String),
    /// Short toast for the user
    Notice(String),
    /// Highlighting pass finished with `count` spans on the page
    Highlighted { count: usize },
}
