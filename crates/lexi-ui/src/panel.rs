use lexi_capability::CapabilityError;
use lexi_dom::{Document, DomError, NodeId};

use crate::content::{Block, clear_children, render_blocks};

/// What the result area of a surface shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Empty,
    Loading(String),
    Ready(Vec<Block>),
    Warning(String),
    Error(String),
}

impl PanelState {
    pub fn loading(message: impl Into<String>) -> Self {
        PanelState::Loading(message.into())
    }

    fn class_name(&self) -> &'static str {
        match self {
            PanelState::Empty => "lexi-panel-empty",
            PanelState::Loading(_) => "lexi-loading",
            PanelState::Ready(_) => "lexi-panel-ready",
            PanelState::Warning(_) => "lexi-warning",
            PanelState::Error(_) => "lexi-error",
        }
    }

    /// Replace the children of `panel` with this state
    pub(crate) fn render(&self, doc: &mut Document, panel: NodeId) -> Result<(), DomError> {
        clear_children(doc, panel)?;
        doc.set_attr(panel, "data-state", self.class_name())?;

        match self {
            PanelState::Empty => Ok(()),
            PanelState::Ready(blocks) => render_blocks(doc, panel, blocks),
            PanelState::Loading(message) => {
                render_blocks(doc, panel, &[Block::text("lexi-loading", format!("⏳ {message}"))])
            }
            PanelState::Warning(message) => {
                render_blocks(doc, panel, &[Block::text("lexi-warning", format!("⚠️ {message}"))])
            }
            PanelState::Error(message) => {
                render_blocks(doc, panel, &[Block::text("lexi-error", format!("❌ {message}"))])
            }
        }
    }
}

impl From<&CapabilityError> for PanelState {
    fn from(err: &CapabilityError) -> Self {
        match err {
            CapabilityError::Validation(message) => PanelState::Warning(message.clone()),
            CapabilityError::NotReady {
                progress: Some(p), ..
            } => PanelState::Error(format!("{err} ({:.0}%)", p * 100.0)),
            _ => PanelState::Error(err.to_string()),
        }
    }
}
