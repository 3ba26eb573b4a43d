pub mod busy;
pub mod content;
pub mod coordinator;
pub mod panel;
pub mod placement;
pub mod selection;
pub mod surface;

pub use busy::{BusyFlag, BusyGuard};
pub use content::{Action, Block, Button};
pub use coordinator::{Anchor, OverlayCoordinator, PointerDown, SurfaceSpec};
pub use panel::PanelState;
pub use selection::{Selection, SelectionSource, SelectionTracker, SelectionTrigger, SharedSelection};
pub use surface::{Phase, SurfaceKind, Ticket};
