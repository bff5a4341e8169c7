//! Resize gestures: change a photo's width or a note's font size.
//!
//! Size is clamped to the kind's fixed range rather than to the section.
//! Text also re-clamps its position every tick, since a bigger font can push
//! the box past the section edge. Photo height follows the width in the
//! renderer and is not tracked here.

use crate::element::{ElementId, ElementKind, Placement};
use crate::geometry::{Layout, Point, clamp_position};
use crate::gesture::{CommitTicket, GestureArena, GestureKind};

impl GestureArena {
    /// Start resizing `id` from a handle press at `pointer`.
    ///
    /// Ignored while the element is dragged or edited.
    pub fn begin_resize(&mut self, id: &ElementId, pointer: Point) -> bool {
        let Some(state) = self.elements.get_mut(id) else {
            return false;
        };
        let started = state.start(GestureKind::Resize, pointer);
        if started {
            tracing::debug!(element = %id, size = state.live().size, "resize started");
        }
        started
    }

    /// Follow the handle and return the new live placement.
    pub fn update_resize(
        &mut self,
        id: &ElementId,
        pointer: Point,
        layout: Option<Layout>,
    ) -> Option<Placement> {
        let margin = self.config.edge_margin;
        let state = self.elements.get_mut(id)?;
        let kind = state.kind();
        let gesture = state.gesture_mut(GestureKind::Resize)?;
        if layout.is_some() {
            gesture.last_layout = layout;
        }
        let start = gesture.start;
        let delta = kind.resize_delta(pointer - gesture.start_pointer);
        let mut live = state.live();
        live.size = kind.normalize_size(start.size + delta);
        if kind == ElementKind::Text
            && let Some(layout) = layout
        {
            live.position = clamp_position(start.position, layout.element, layout.section, margin);
        }
        state.set_live(live);
        Some(live)
    }

    /// Finish the resize and hand back the ticket to persist.
    ///
    /// Text needs a measurement to keep the grown box inside its section; a
    /// text resize that was never measured is abandoned without a ticket.
    pub fn end_resize(&mut self, id: &ElementId, layout: Option<Layout>) -> Option<CommitTicket> {
        let margin = self.config.edge_margin;
        let state = self.elements.get_mut(id)?;
        let kind = state.kind();
        let gesture = state.take_gesture(GestureKind::Resize)?;
        let mut live = state.live();
        live.size = kind.normalize_size(live.size);
        if kind == ElementKind::Text {
            let Some(layout) = layout.or(gesture.last_layout) else {
                state.set_live(gesture.start);
                tracing::debug!(element = %id, "text resize never measured, abandoned");
                return None;
            };
            live.position = clamp_position(live.position, layout.element, layout.section, margin);
        }
        state.set_live(live);
        tracing::debug!(element = %id, size = live.size, "resize finished");
        Some(state.ticket(gesture.start))
    }
}
