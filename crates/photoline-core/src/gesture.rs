//! Per-element gesture state.
//!
//! Every element on screen has one [`ElementState`] in a [`GestureArena`]
//! keyed by its id. Only the gesture currently running on an element may
//! write to it, and drag, resize and text editing exclude each other. The
//! drag and resize transitions live in [`crate::drag`] and [`crate::resize`].

use std::collections::HashMap;

use crate::bucket::TimeBucket;
use crate::element::{ElementId, ElementKind, Placement, PlacementRecord, PositionedElement};
use crate::geometry::{ClampConfig, Layout, Point};
use crate::store::StoreError;

/// What an element is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Dragging,
    Resizing,
    /// Inline text editing. Suppresses drag and resize.
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GestureKind {
    Drag,
    Resize,
}

/// State of one pointer-down → pointer-up interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientGesture {
    pub(crate) kind: GestureKind,
    pub start_pointer: Point,
    /// Placement when the pointer went down; restored on cancel.
    pub start: Placement,
    /// Most recent successful measurement during this gesture.
    pub(crate) last_layout: Option<Layout>,
}

#[derive(Debug, Clone)]
pub struct ElementState {
    /// Resting placement, last confirmed by the store.
    element: PositionedElement,
    /// What the renderer draws this frame.
    live: Placement,
    gesture: Option<TransientGesture>,
    editing: bool,
    revision: u64,
    /// Revision the resting placement was confirmed at.
    confirmed: u64,
}

impl ElementState {
    fn new(element: PositionedElement, revision: u64) -> Self {
        Self {
            live: element.placement,
            element,
            gesture: None,
            editing: false,
            revision,
            confirmed: revision,
        }
    }

    pub fn element(&self) -> &PositionedElement {
        &self.element
    }

    pub fn committed(&self) -> Placement {
        self.element.placement
    }

    pub fn live(&self) -> Placement {
        self.live
    }

    pub fn gesture(&self) -> Option<&TransientGesture> {
        self.gesture.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> GestureMode {
        match (self.editing, self.gesture.map(|g| g.kind)) {
            (true, _) => GestureMode::Editing,
            (false, Some(GestureKind::Drag)) => GestureMode::Dragging,
            (false, Some(GestureKind::Resize)) => GestureMode::Resizing,
            (false, None) => GestureMode::Idle,
        }
    }

    pub(crate) fn kind(&self) -> ElementKind {
        self.element.kind
    }

    pub(crate) fn set_live(&mut self, live: Placement) {
        self.live = live;
    }

    pub(crate) fn gesture_mut(&mut self, kind: GestureKind) -> Option<&mut TransientGesture> {
        self.gesture.as_mut().filter(|g| g.kind == kind)
    }

    /// Open a gesture if the element is idle. Each gesture gets a fresh
    /// revision so results of earlier saves can be recognised as stale.
    pub(crate) fn start(&mut self, kind: GestureKind, pointer: Point) -> bool {
        if self.mode() != GestureMode::Idle {
            return false;
        }
        self.revision += 1;
        self.gesture = Some(TransientGesture {
            kind,
            start_pointer: pointer,
            start: self.live,
            last_layout: None,
        });
        true
    }

    pub(crate) fn take_gesture(&mut self, kind: GestureKind) -> Option<TransientGesture> {
        if self.gesture.is_some_and(|g| g.kind == kind) {
            self.gesture.take()
        } else {
            None
        }
    }

    pub(crate) fn ticket(&self, previous: Placement) -> CommitTicket {
        CommitTicket {
            element_id: self.element.id.clone(),
            bucket: self.element.bucket,
            kind: self.element.kind,
            placement: self.live,
            previous,
            revision: self.revision,
        }
    }
}

/// A finished gesture waiting to be written to the store.
///
/// Issued once per completed gesture; hand it back to
/// [`GestureArena::resolve`] with the outcome of the save.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitTicket {
    pub element_id: ElementId,
    pub bucket: TimeBucket,
    pub kind: ElementKind,
    /// Clamped placement to persist.
    pub placement: Placement,
    /// Placement before the gesture began.
    pub previous: Placement,
    pub revision: u64,
}

impl CommitTicket {
    pub fn record(&self) -> PlacementRecord {
        self.placement.to_record(self.kind, self.revision)
    }
}

/// Effect of a save result on the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The placement is now the resting placement.
    Committed,
    /// The save failed and the element snapped back.
    Reverted,
    /// A newer gesture started, or the element is gone. The live placement
    /// is untouched; a late success still becomes the resting placement.
    Stale,
}

#[derive(Debug, Default)]
pub struct GestureArena {
    pub(crate) elements: HashMap<ElementId, ElementState>,
    pub(crate) config: ClampConfig,
}

impl GestureArena {
    pub fn new(config: ClampConfig) -> Self {
        Self {
            elements: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> ClampConfig {
        self.config
    }

    /// Register an element, or refresh its resting placement.
    ///
    /// An element with a gesture or edit in progress keeps its state; the
    /// refreshed data is dropped and `false` is returned.
    pub fn insert(&mut self, element: PositionedElement, revision: u64) -> bool {
        match self.elements.get_mut(&element.id) {
            Some(state) if state.mode() != GestureMode::Idle => false,
            Some(state) => {
                state.live = element.placement;
                state.element = element;
                state.revision = state.revision.max(revision);
                state.confirmed = revision;
                true
            }
            None => {
                self.elements
                    .insert(element.id.clone(), ElementState::new(element, revision));
                true
            }
        }
    }

    /// Forget an element (unmount). Any gesture on it is dropped and results
    /// of its in-flight saves become stale.
    pub fn remove(&mut self, id: &ElementId) -> Option<ElementState> {
        self.elements.remove(id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn live(&self, id: &ElementId) -> Option<Placement> {
        self.elements.get(id).map(ElementState::live)
    }

    pub fn mode(&self, id: &ElementId) -> GestureMode {
        self.elements
            .get(id)
            .map_or(GestureMode::Idle, ElementState::mode)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Abandon the running gesture and restore the pre-gesture placement.
    pub fn cancel(&mut self, id: &ElementId) -> bool {
        let Some(state) = self.elements.get_mut(id) else {
            return false;
        };
        let Some(gesture) = state.gesture.take() else {
            return false;
        };
        state.live = gesture.start;
        tracing::debug!(element = %id, "gesture cancelled");
        true
    }

    /// Enter inline editing (text only, idle only).
    pub fn begin_edit(&mut self, id: &ElementId) -> bool {
        let Some(state) = self.elements.get_mut(id) else {
            return false;
        };
        if !state.kind().is_editable() || state.mode() != GestureMode::Idle {
            return false;
        }
        state.editing = true;
        tracing::debug!(element = %id, "editing started");
        true
    }

    /// Leave inline editing (blur or Escape).
    pub fn end_edit(&mut self, id: &ElementId) -> bool {
        let Some(state) = self.elements.get_mut(id) else {
            return false;
        };
        let was_editing = std::mem::replace(&mut state.editing, false);
        if was_editing {
            tracing::debug!(element = %id, "editing finished");
        }
        was_editing
    }

    /// Apply the outcome of saving `ticket`.
    ///
    /// A failed save snaps the element back to its resting placement, the
    /// last one the store confirmed. That can be older than
    /// `ticket.previous` when the gesture before this one was never saved.
    pub fn resolve(&mut self, ticket: &CommitTicket, result: Result<(), StoreError>) -> Resolution {
        let Some(state) = self.elements.get_mut(&ticket.element_id) else {
            tracing::debug!(element = %ticket.element_id, "save resolved after unmount, ignored");
            return Resolution::Stale;
        };
        if result.is_ok() && ticket.revision > state.confirmed {
            state.element.placement = ticket.placement;
            state.confirmed = ticket.revision;
        }
        if state.revision != ticket.revision || state.gesture.is_some() {
            tracing::debug!(
                element = %ticket.element_id,
                revision = ticket.revision,
                current = state.revision,
                "stale save result, live placement kept"
            );
            return Resolution::Stale;
        }
        match result {
            Ok(()) => Resolution::Committed,
            Err(err) => {
                tracing::warn!(
                    element = %ticket.element_id,
                    bucket = %ticket.bucket,
                    error = %err,
                    "placement save failed, reverting"
                );
                state.live = state.element.placement;
                Resolution::Reverted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};

    fn arena_with(kind: ElementKind) -> (GestureArena, ElementId) {
        let mut arena = GestureArena::default();
        let id = ElementId::from("el-1");
        let bucket = TimeBucket::new(9).unwrap();
        let placement = Placement::new(Point::new(100.0, 100.0), kind.default_size());
        arena.insert(PositionedElement::new(id.clone(), bucket, kind, placement), 0);
        (arena, id)
    }

    #[test]
    fn test_edit_is_text_only() {
        let (mut photos, photo) = arena_with(ElementKind::Photo);
        assert!(!photos.begin_edit(&photo));
        assert_eq!(photos.mode(&photo), GestureMode::Idle);

        let (mut texts, text) = arena_with(ElementKind::Text);
        assert!(texts.begin_edit(&text));
        assert_eq!(texts.mode(&text), GestureMode::Editing);
        assert!(texts.end_edit(&text));
        assert!(!texts.end_edit(&text));
        assert_eq!(texts.mode(&text), GestureMode::Idle);
    }

    #[test]
    fn test_editing_suppresses_gestures() {
        let (mut arena, id) = arena_with(ElementKind::Text);
        arena.begin_edit(&id);
        assert!(!arena.begin_drag(&id, Point::ORIGIN));
        assert!(!arena.begin_resize(&id, Point::ORIGIN));
        assert_eq!(arena.mode(&id), GestureMode::Editing);
    }

    #[test]
    fn test_no_edit_while_dragging() {
        let (mut arena, id) = arena_with(ElementKind::Text);
        assert!(arena.begin_drag(&id, Point::ORIGIN));
        assert!(!arena.begin_edit(&id));
        assert_eq!(arena.mode(&id), GestureMode::Dragging);
    }

    #[test]
    fn test_cancel_restores_start() {
        let (mut arena, id) = arena_with(ElementKind::Photo);
        arena.begin_drag(&id, Point::new(0.0, 0.0));
        arena.update_drag(&id, Point::new(30.0, 30.0), None);
        assert!(arena.cancel(&id));
        assert_eq!(arena.live(&id).unwrap().position, Point::new(100.0, 100.0));
        assert_eq!(arena.mode(&id), GestureMode::Idle);
        assert!(!arena.cancel(&id));
    }

    #[test]
    fn test_insert_keeps_state_mid_gesture() {
        let (mut arena, id) = arena_with(ElementKind::Photo);
        arena.begin_drag(&id, Point::ORIGIN);
        let refreshed = PositionedElement::new(
            id.clone(),
            TimeBucket::new(9).unwrap(),
            ElementKind::Photo,
            Placement::new(Point::new(5.0, 5.0), 120.0),
        );
        assert!(!arena.insert(refreshed, 7));
        assert_eq!(arena.live(&id).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_resolve_after_remove_is_stale() {
        let (mut arena, id) = arena_with(ElementKind::Photo);
        let layout = Layout::new(Size::new(50.0, 50.0), Rect::new(0.0, 0.0, 400.0, 300.0));
        arena.begin_drag(&id, Point::ORIGIN);
        let ticket = arena.end_drag(&id, Some(layout)).unwrap();
        arena.remove(&id);
        assert_eq!(arena.resolve(&ticket, Ok(())), Resolution::Stale);
        assert!(arena.is_empty());
    }
}
