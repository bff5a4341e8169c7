//! Drag gestures: move an element by the pointer's delta, kept inside its
//! section.

use crate::element::ElementId;
use crate::geometry::{Layout, Point, clamp_position};
use crate::gesture::{CommitTicket, GestureArena, GestureKind};

impl GestureArena {
    /// Start dragging `id` from `pointer`.
    ///
    /// Ignored (returns `false`) when the element is unknown or already busy
    /// with another drag, a resize or an edit.
    pub fn begin_drag(&mut self, id: &ElementId, pointer: Point) -> bool {
        let Some(state) = self.elements.get_mut(id) else {
            return false;
        };
        let started = state.start(GestureKind::Drag, pointer);
        if started {
            tracing::debug!(element = %id, x = pointer.x, y = pointer.y, "drag started");
        }
        started
    }

    /// Follow the pointer and return the new live position.
    ///
    /// With `layout == None` the element could not be measured this tick and
    /// the raw position is shown unclamped.
    pub fn update_drag(
        &mut self,
        id: &ElementId,
        pointer: Point,
        layout: Option<Layout>,
    ) -> Option<Point> {
        let margin = self.config.edge_margin;
        let state = self.elements.get_mut(id)?;
        let gesture = state.gesture_mut(GestureKind::Drag)?;
        if layout.is_some() {
            gesture.last_layout = layout;
        }
        let proposed = gesture.start.position + (pointer - gesture.start_pointer);
        let position = match layout {
            Some(layout) => clamp_position(proposed, layout.element, layout.section, margin),
            None => proposed,
        };
        let mut live = state.live();
        live.position = position;
        state.set_live(live);
        Some(position)
    }

    /// Finish the drag and hand back the ticket to persist.
    ///
    /// The last live position is clamped once more with `layout`, or with the
    /// last measurement taken during the gesture when the element cannot be
    /// measured now. A drag that was never measured cannot be clamped; it is
    /// abandoned like a cancel and no ticket is issued.
    pub fn end_drag(&mut self, id: &ElementId, layout: Option<Layout>) -> Option<CommitTicket> {
        let margin = self.config.edge_margin;
        let state = self.elements.get_mut(id)?;
        let gesture = state.take_gesture(GestureKind::Drag)?;
        let Some(layout) = layout.or(gesture.last_layout) else {
            state.set_live(gesture.start);
            tracing::debug!(element = %id, "drag never measured, abandoned");
            return None;
        };
        let mut live = state.live();
        live.position = clamp_position(live.position, layout.element, layout.section, margin);
        state.set_live(live);
        tracing::debug!(element = %id, x = live.position.x, y = live.position.y, "drag finished");
        Some(state.ticket(gesture.start))
    }
}
