pub mod document;
pub mod geometry;
pub mod highlight;
pub mod page;
pub mod range;
pub mod scan;
pub mod watch;
pub mod wrap;

pub use document::{Document, DomError, MutationRecord, NodeId};
pub use geometry::{Rect, Viewport};
pub use highlight::{HighlightHandle, Highlighter};
pub use range::TextRange;
pub use scan::{SURFACE_ATTR, TextSpan};
pub use watch::MutationWatcher;
