use std::collections::HashMap;
use std::time::{Duration, Instant};

use lexi_config::overlay::OverlayConfig;
use lexi_dom::{Document, DomError, NodeId, Rect, SURFACE_ATTR, Viewport};

use crate::content::{
    ACTION_ATTR, Action, Block, clear_children, field_value, render_blocks, set_field_value,
};
use crate::panel::PanelState;
use crate::placement::{modal_position, toolbar_position, tooltip_position};
use crate::surface::{Phase, SurfaceKind, Ticket};

const HEADER_CLASS: &str = "lexi-surface-header";
const RESIZE_CLASS: &str = "lexi-resize-handle";
const PROMPT_SIZE: (f64, f64) = (350.0, 140.0);

/// Where a surface should appear
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Next to an element on the page
    Target(Rect),
    /// Near a point in viewport coordinates
    Point { x: f64, y: f64 },
    Centered,
    /// Bottom right corner of the viewport
    Corner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    pub kind: SurfaceKind,
    pub title: String,
    /// What the surface is about, e.g. the word of a card
    pub subject: String,
    pub rect: Rect,
}

/// Result of a pointer press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerDown {
    /// Outside every surface; lists the ones it dismissed
    Outside(Vec<Ticket>),
    Inside(Ticket),
    DragStarted(Ticket),
    ResizeStarted(Ticket),
}

#[derive(Debug)]
struct Surface {
    ticket: Ticket,
    phase: Phase,
    root: NodeId,
    header: NodeId,
    content: NodeId,
    panel: NodeId,
    resize_handle: Option<NodeId>,
    opened_at: Instant,
    subject: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureKind {
    Drag,
    Resize,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    ticket: Ticket,
    kind: GestureKind,
    start: (f64, f64),
    initial: Rect,
}

/// Owns every transient surface on the page.
///
/// Each surface has a header (title, close button), a content area and a
/// result panel. Work that finishes after an await renders through the
/// [`Ticket`] it started with and is dropped when that instance is gone.
pub struct OverlayCoordinator {
    config: OverlayConfig,
    surfaces: HashMap<SurfaceKind, Surface>,
    /// Live surfaces, most recently opened last
    order: Vec<SurfaceKind>,
    generation: u64,
    gesture: Option<Gesture>,
}

impl OverlayCoordinator {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            surfaces: HashMap::new(),
            order: Vec::new(),
            generation: 0,
            gesture: None,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn size_of(&self, kind: SurfaceKind) -> (f64, f64) {
        match kind {
            SurfaceKind::Tooltip => self.config.tooltip_size,
            SurfaceKind::SelectionToolbar => self.config.toolbar_size,
            SurfaceKind::WordCard => self.config.card_size,
            SurfaceKind::PracticePrompt => PROMPT_SIZE,
            _ => self.config.modal_size,
        }
    }

    /// Box for a new surface of `kind` at `anchor`, kept inside the viewport
    pub fn place(&self, kind: SurfaceKind, anchor: Anchor, viewport: &Viewport) -> Rect {
        let size = self.size_of(kind);
        let (width, height) = size;

        let (x, y) = match anchor {
            Anchor::Target(target) => {
                let pos = tooltip_position(target, size, viewport, self.config.padding);
                (pos.x, pos.y)
            }
            Anchor::Point { x, y } => toolbar_position(x, y, size, viewport),
            Anchor::Centered => modal_position(size, viewport),
            Anchor::Corner => (
                (viewport.width - width - 20.0).max(0.0),
                (viewport.height - height - 80.0).max(0.0),
            ),
        };
        Rect::new(x, y, width, height)
    }

    /// Create a surface, disposing any existing one of the same kind first
    pub fn open(
        &mut self,
        doc: &mut Document,
        spec: SurfaceSpec,
        now: Instant,
    ) -> Result<Ticket, DomError> {
        let kind = spec.kind;
        if self.dispose(doc, kind) {
            tracing::debug!("Replaced existing {kind}");
        }

        self.generation += 1;
        let ticket = Ticket {
            kind,
            generation: self.generation,
        };
        let generation = self.generation.to_string();

        let class = format!("lexi-surface {}", kind.class_name());
        let root = doc.create_element_with(
            "div",
            &[
                ("class", class.as_str()),
                (SURFACE_ATTR, kind.name()),
                ("data-generation", generation.as_str()),
                ("data-subject", spec.subject.as_str()),
            ],
        );
        doc.set_rect(root, spec.rect)?;

        let header = doc.create_element_with("div", &[("class", HEADER_CLASS)]);
        let title = doc.create_element_with("span", &[("class", "lexi-surface-title")]);
        let title_text = doc.create_text(spec.title);
        doc.append_child(title, title_text)?;
        doc.append_child(header, title)?;
        let close = doc.create_element_with(
            "button",
            &[(ACTION_ATTR, Action::Close.as_str()), ("aria-label", "Close")],
        );
        let close_text = doc.create_text("×");
        doc.append_child(close, close_text)?;
        doc.append_child(header, close)?;

        let content = doc.create_element_with("div", &[("class", "lexi-surface-content")]);
        let panel = doc.create_element_with("div", &[("class", "lexi-surface-panel")]);
        for part in [header, content, panel] {
            doc.append_child(root, part)?;
        }

        let resize_handle = if kind.is_resizable() {
            let handle = doc.create_element_with("div", &[("class", RESIZE_CLASS)]);
            doc.append_child(root, handle)?;
            Some(handle)
        } else {
            None
        };

        let body = doc.body();
        doc.append_child(body, root)?;

        self.surfaces.insert(
            kind,
            Surface {
                ticket,
                phase: Phase::Opening,
                root,
                header,
                content,
                panel,
                resize_handle,
                opened_at: now,
                subject: spec.subject,
            },
        );
        self.order.push(kind);

        tracing::debug!("Opened {kind} #{}", ticket.generation);
        Ok(ticket)
    }

    /// Opening animation finished
    pub fn mark_open(&mut self, ticket: Ticket) -> bool {
        match self.live_mut(ticket) {
            Some(surface) if surface.phase == Phase::Opening => {
                surface.phase = Phase::Open;
                true
            }
            _ => false,
        }
    }

    /// Start closing the live surface of `kind`; [`finish_close`](Self::finish_close) removes it
    pub fn close(&mut self, doc: &mut Document, kind: SurfaceKind) -> Option<Ticket> {
        let surface = self.surfaces.get_mut(&kind)?;
        if !surface.phase.is_live() {
            return None;
        }

        surface.phase = Phase::Closing;
        let (ticket, root) = (surface.ticket, surface.root);
        self.order.retain(|k| *k != kind);
        if self.gesture.is_some_and(|g| g.ticket == ticket) {
            self.gesture = None;
        }

        if let Err(e) = doc.add_class(root, "lexi-closing") {
            tracing::debug!("{kind} root already gone: {e}");
        }
        tracing::debug!("Closing {kind} #{}", ticket.generation);
        Some(ticket)
    }

    /// Closing animation finished; a stale ticket leaves a newer instance alone
    pub fn finish_close(&mut self, doc: &mut Document, ticket: Ticket) -> bool {
        let closing = self
            .surfaces
            .get(&ticket.kind)
            .is_some_and(|s| s.ticket == ticket && s.phase == Phase::Closing);
        if !closing {
            return false;
        }
        self.dispose(doc, ticket.kind)
    }

    /// Remove the surface of `kind` right away, whatever its phase
    pub fn dispose(&mut self, doc: &mut Document, kind: SurfaceKind) -> bool {
        let Some(surface) = self.surfaces.remove(&kind) else {
            return false;
        };
        self.order.retain(|k| *k != kind);
        if self.gesture.is_some_and(|g| g.ticket == surface.ticket) {
            self.gesture = None;
        }

        if doc.exists(surface.root) && doc.parent(surface.root).is_some() {
            if let Err(e) = doc.remove(surface.root) {
                tracing::warn!("Failed to remove {kind}: {e}");
            }
        }
        true
    }

    pub fn dispose_all(&mut self, doc: &mut Document) {
        for kind in SurfaceKind::ALL {
            self.dispose(doc, kind);
        }
    }

    pub fn phase(&self, kind: SurfaceKind) -> Phase {
        self.surfaces
            .get(&kind)
            .map(|s| s.phase)
            .unwrap_or_default()
    }

    /// Ticket of the live surface of `kind`
    pub fn ticket(&self, kind: SurfaceKind) -> Option<Ticket> {
        self.surfaces
            .get(&kind)
            .filter(|s| s.phase.is_live())
            .map(|s| s.ticket)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.live(ticket).is_some()
    }

    pub fn subject(&self, ticket: Ticket) -> Option<&str> {
        self.live(ticket).map(|s| s.subject.as_str())
    }

    pub fn root(&self, ticket: Ticket) -> Option<NodeId> {
        self.live(ticket).map(|s| s.root)
    }

    pub fn rect(&self, doc: &Document, kind: SurfaceKind) -> Option<Rect> {
        self.surfaces.get(&kind).and_then(|s| doc.rect(s.root))
    }

    /// Live surfaces, oldest first
    pub fn open_kinds(&self) -> &[SurfaceKind] {
        &self.order
    }

    fn live(&self, ticket: Ticket) -> Option<&Surface> {
        self.surfaces
            .get(&ticket.kind)
            .filter(|s| s.ticket == ticket && s.phase.is_live())
    }

    fn live_mut(&mut self, ticket: Ticket) -> Option<&mut Surface> {
        self.surfaces
            .get_mut(&ticket.kind)
            .filter(|s| s.ticket == ticket && s.phase.is_live())
    }

    /// Live surface for `ticket` whose nodes are still in the document
    fn writable(&self, doc: &Document, ticket: Ticket) -> Option<&Surface> {
        let surface = self.live(ticket)?;
        if !doc.is_attached(surface.root) {
            tracing::debug!("{} removed from the page, skipping write", ticket.kind);
            return None;
        }
        Some(surface)
    }

    /// Replace the content area. Returns false when the instance is gone.
    pub fn set_content(&self, doc: &mut Document, ticket: Ticket, blocks: &[Block]) -> bool {
        let Some(content) = self.writable(doc, ticket).map(|s| s.content) else {
            return false;
        };
        let result = clear_children(doc, content).and_then(|()| render_blocks(doc, content, blocks));
        log_write(ticket, result)
    }

    /// Show `state` in the result panel. Returns false when the instance is gone.
    pub fn render(&self, doc: &mut Document, ticket: Ticket, state: &PanelState) -> bool {
        let Some(panel) = self.writable(doc, ticket).map(|s| s.panel) else {
            return false;
        };
        log_write(ticket, state.render(doc, panel))
    }

    pub fn field(&self, doc: &Document, ticket: Ticket, field: &str) -> Option<String> {
        let surface = self.live(ticket)?;
        field_value(doc, surface.root, field)
    }

    /// Host input into a surface field
    pub fn set_field(&self, doc: &mut Document, ticket: Ticket, field: &str, value: &str) -> bool {
        let Some(root) = self.writable(doc, ticket).map(|s| s.root) else {
            return false;
        };
        match set_field_value(doc, root, field, value) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Failed to set {field} on {}: {e}", ticket.kind);
                false
            }
        }
    }

    /// Escape closes the most recently opened surface.
    ///
    /// Runs before page handlers see the key, so a `Some` means the key was consumed.
    pub fn handle_escape(&mut self, doc: &mut Document) -> Option<Ticket> {
        let kind = *self.order.last()?;
        self.close(doc, kind)
    }

    /// Live surface containing `node`
    pub fn surface_at(&self, doc: &Document, node: NodeId) -> Option<Ticket> {
        let root = doc.closest(node, |d, n| d.has_attr(n, SURFACE_ATTR))?;
        let kind = SurfaceKind::from_name(doc.attr(root, SURFACE_ATTR)?)?;
        self.surfaces
            .get(&kind)
            .filter(|s| s.root == root && s.phase.is_live())
            .map(|s| s.ticket)
    }

    /// Inside any element we created, live or not
    pub fn is_overlay_node(&self, doc: &Document, node: NodeId) -> bool {
        doc.closest(node, |d, n| d.has_attr(n, SURFACE_ATTR))
            .is_some()
    }

    /// Pointer press at `(x, y)` on `target`.
    ///
    /// Presses outside dismiss the surfaces that allow it, but only once their
    /// arm delay has passed so the click that opened one does not close it.
    pub fn pointer_down(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        (x, y): (f64, f64),
        now: Instant,
    ) -> PointerDown {
        if let Some(ticket) = self.surface_at(doc, target) {
            return self.press_inside(doc, ticket, target, (x, y));
        }

        let delay = Duration::from_millis(self.config.click_outside_delay_ms);
        let outside: Vec<SurfaceKind> = self
            .order
            .iter()
            .copied()
            .filter(|kind| {
                let Some(surface) = self.surfaces.get(kind) else {
                    return false;
                };
                kind.closes_on_click_outside()
                    && now.saturating_duration_since(surface.opened_at) >= delay
                    && !doc.rect(surface.root).is_some_and(|r| r.contains(x, y))
            })
            .collect();

        let dismissed = outside
            .into_iter()
            .filter_map(|kind| self.close(doc, kind))
            .collect();
        PointerDown::Outside(dismissed)
    }

    fn press_inside(
        &mut self,
        doc: &Document,
        ticket: Ticket,
        target: NodeId,
        start: (f64, f64),
    ) -> PointerDown {
        let Some(surface) = self.live(ticket) else {
            return PointerDown::Inside(ticket);
        };
        let Some(initial) = doc.rect(surface.root) else {
            return PointerDown::Inside(ticket);
        };

        let on_resize = surface
            .resize_handle
            .is_some_and(|h| doc.contains(h, target));
        let on_header = doc.contains(surface.header, target);
        let on_button = doc
            .closest(target, |d, n| d.tag(n) == Some("button"))
            .is_some_and(|b| doc.contains(surface.root, b));

        let kind = if on_resize {
            GestureKind::Resize
        } else if on_header && !on_button && ticket.kind.is_draggable() {
            GestureKind::Drag
        } else {
            return PointerDown::Inside(ticket);
        };

        self.gesture = Some(Gesture {
            ticket,
            kind,
            start,
            initial,
        });
        match kind {
            GestureKind::Drag => PointerDown::DragStarted(ticket),
            GestureKind::Resize => PointerDown::ResizeStarted(ticket),
        }
    }

    /// Follow an active drag or resize. Returns false when nothing is tracked.
    pub fn pointer_move(&mut self, doc: &mut Document, (x, y): (f64, f64)) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        let Some(root) = self.live(gesture.ticket).map(|s| s.root) else {
            self.gesture = None;
            return false;
        };

        let (dx, dy) = (x - gesture.start.0, y - gesture.start.1);
        let initial = gesture.initial;
        let rect = match gesture.kind {
            GestureKind::Drag => Rect::new(initial.x + dx, initial.y + dy, initial.width, initial.height),
            GestureKind::Resize => {
                let (min_width, min_height) = self.config.min_size;
                Rect::new(
                    initial.x,
                    initial.y,
                    (initial.width + dx).max(min_width),
                    (initial.height + dy).max(min_height),
                )
            }
        };

        doc.set_rect(root, rect).is_ok()
    }

    /// End any drag or resize
    pub fn pointer_up(&mut self) -> Option<Ticket> {
        self.gesture.take().map(|g| g.ticket)
    }

    /// Click on `target`: the action of the button hit, if any.
    ///
    /// The close button is handled here and also reported.
    pub fn click(&mut self, doc: &mut Document, target: NodeId) -> Option<(Ticket, Action)> {
        let ticket = self.surface_at(doc, target)?;
        let button = doc.closest(target, |d, n| d.has_attr(n, ACTION_ATTR))?;
        let action = match doc.attr(button, ACTION_ATTR)?.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("Ignoring click on {}: {e}", ticket.kind);
                return None;
            }
        };

        if action == Action::Close {
            self.close(doc, ticket.kind);
        }
        Some((ticket, action))
    }
}

fn log_write(ticket: Ticket, result: Result<(), DomError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to update {}: {e}", ticket.kind);
            false
        }
    }
}
