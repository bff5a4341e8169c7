//! Drag and resize for one element of an hour section.
//!
//! Pointer-down on the element (or its resize handle) opens a gesture in the
//! shared [`GestureArena`](photoline_core::GestureArena); document listeners
//! follow the pointer until release, measuring element and section on every
//! tick. Release commits the clamped placement and persists it in the
//! background. A failed save snaps the element back.

use photoline_core::{
    ElementId, ElementKind, GestureMode, Layout, Placement, PlacementRecord, Point, PositionStore,
    PositionedElement, Rect, Resolution, Size, TimeBucket, persist,
};
use web_sys::{HtmlElement, PointerEvent};
use yew::prelude::*;

use super::use_document_pointer;
use crate::context::use_timeline_context;

#[derive(Clone, PartialEq)]
pub struct PositionedOptions {
    pub id: ElementId,
    pub bucket: TimeBucket,
    pub kind: ElementKind,
    /// Placement from the day listing, if one was stored.
    pub seed: Option<PlacementRecord>,
    /// Order among siblings of the same kind, for the default layout.
    pub index: usize,
    pub section_ref: NodeRef,
}

pub struct PositionedHandle {
    pub node_ref: NodeRef,
    pub placement: Placement,
    pub mode: GestureMode,
    pub on_pointer_down: Callback<PointerEvent>,
    pub on_resize_pointer_down: Callback<PointerEvent>,
}

impl PositionedHandle {
    /// Inline style placing the element inside its section.
    pub fn style(&self, kind: ElementKind) -> String {
        let Placement { position, size } = self.placement;
        match kind {
            ElementKind::Photo => format!(
                "left: {}px; top: {}px; width: {}px;",
                position.x, position.y, size
            ),
            ElementKind::Text => format!(
                "left: {}px; top: {}px; font-size: {}px;",
                position.x, position.y, size
            ),
        }
    }
}

fn pointer(event: &PointerEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn initial_placement(kind: ElementKind, seed: Option<&PlacementRecord>, index: usize) -> Placement {
    seed.map_or_else(
        || Placement::default_for(kind, index),
        |record| Placement::from_record(kind, record),
    )
}

/// Element size and section bounds in section coordinates.
///
/// `None` when either node is not attached; the caller then skips clamping
/// for this tick.
fn measure(node_ref: &NodeRef, section_ref: &NodeRef) -> Option<Layout> {
    let element = node_ref.cast::<HtmlElement>()?;
    let section = section_ref.cast::<HtmlElement>()?;
    if !element.is_connected() || !section.is_connected() {
        return None;
    }
    let rect = element.get_bounding_client_rect();
    let bounds = Rect::new(
        0.0,
        0.0,
        f64::from(section.client_width()),
        f64::from(section.client_height()),
    );
    Some(Layout::new(Size::new(rect.width(), rect.height()), bounds))
}

#[hook]
pub fn use_positioned_element(options: PositionedOptions) -> PositionedHandle {
    let ctx = use_timeline_context();
    let node_ref = use_node_ref();
    let force_update = use_force_update();
    let active = use_state_eq(|| false);

    // Register with the arena while mounted. Elements the listing had no
    // placement for ask the store once.
    {
        let arena = ctx.arena.clone();
        let store = ctx.store.clone();
        let force_update = force_update.clone();
        use_effect_with(
            (
                options.id.clone(),
                options.bucket,
                options.kind,
                options.seed,
                options.index,
            ),
            move |(id, bucket, kind, seed, index)| {
                let (id, bucket, kind) = (id.clone(), *bucket, *kind);
                let element = PositionedElement::new(
                    id.clone(),
                    bucket,
                    kind,
                    initial_placement(kind, seed.as_ref(), *index),
                );
                arena
                    .borrow_mut()
                    .insert(element, seed.as_ref().map_or(0, |record| record.revision));

                if seed.is_none() {
                    let arena = arena.clone();
                    let id = id.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match store.load(&id, bucket).await {
                            Ok(Some(record)) => {
                                let element = PositionedElement::new(
                                    id.clone(),
                                    bucket,
                                    kind,
                                    Placement::from_record(kind, &record),
                                );
                                // Only while mounted and untouched since mount.
                                let applied = {
                                    let mut arena = arena.borrow_mut();
                                    arena.get(&id).is_some_and(|state| state.revision() == 0)
                                        && arena.insert(element, record.revision)
                                };
                                if applied {
                                    force_update.force_update();
                                }
                            }
                            Ok(None) => {}
                            Err(err) => {
                                tracing::warn!(element = %id, error = %err, "placement load failed, using default layout");
                            }
                        }
                    });
                }

                move || {
                    arena.borrow_mut().remove(&id);
                }
            },
        );
    }

    let on_pointer_down = {
        let arena = ctx.arena.clone();
        let active = active.clone();
        let id = options.id.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            if arena.borrow_mut().begin_drag(&id, pointer(&event)) {
                event.prevent_default();
                active.set(true);
            }
        })
    };

    let on_resize_pointer_down = {
        let arena = ctx.arena.clone();
        let active = active.clone();
        let id = options.id.clone();
        Callback::from(move |event: PointerEvent| {
            event.stop_propagation();
            if event.button() != 0 {
                return;
            }
            if arena.borrow_mut().begin_resize(&id, pointer(&event)) {
                event.prevent_default();
                active.set(true);
            }
        })
    };

    let on_move = {
        let arena = ctx.arena.clone();
        let id = options.id.clone();
        let node_ref = node_ref.clone();
        let section_ref = options.section_ref.clone();
        let force_update = force_update.clone();
        Callback::from(move |event: PointerEvent| {
            let layout = measure(&node_ref, &section_ref);
            let point = pointer(&event);
            let moved = {
                let mut arena = arena.borrow_mut();
                match arena.mode(&id) {
                    GestureMode::Dragging => arena.update_drag(&id, point, layout).is_some(),
                    GestureMode::Resizing => arena.update_resize(&id, point, layout).is_some(),
                    GestureMode::Idle | GestureMode::Editing => false,
                }
            };
            if moved {
                force_update.force_update();
            }
        })
    };

    let on_release = {
        let arena = ctx.arena.clone();
        let store = ctx.store.clone();
        let active = active.clone();
        let id = options.id.clone();
        let node_ref = node_ref.clone();
        let section_ref = options.section_ref.clone();
        let force_update = force_update.clone();
        Callback::from(move |event: PointerEvent| {
            let ticket = if event.type_() == "pointercancel" {
                arena.borrow_mut().cancel(&id);
                None
            } else {
                let layout = measure(&node_ref, &section_ref);
                let mut arena = arena.borrow_mut();
                match arena.mode(&id) {
                    GestureMode::Dragging => arena.end_drag(&id, layout),
                    GestureMode::Resizing => arena.end_resize(&id, layout),
                    GestureMode::Idle | GestureMode::Editing => None,
                }
            };
            active.set(false);
            force_update.force_update();

            let Some(ticket) = ticket else {
                return;
            };
            let arena = arena.clone();
            let store = store.clone();
            let force_update = force_update.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = persist(&*store, &ticket).await;
                let resolution = arena.borrow_mut().resolve(&ticket, result);
                if resolution == Resolution::Reverted {
                    force_update.force_update();
                }
            });
        })
    };

    use_document_pointer(*active, on_move, on_release);

    let (placement, mode) = {
        let arena = ctx.arena.borrow();
        (
            arena.live(&options.id).unwrap_or_else(|| {
                initial_placement(options.kind, options.seed.as_ref(), options.index)
            }),
            arena.mode(&options.id),
        )
    };

    PositionedHandle {
        node_ref,
        placement,
        mode,
        on_pointer_down,
        on_resize_pointer_down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn handle(placement: Placement) -> PositionedHandle {
        PositionedHandle {
            node_ref: NodeRef::default(),
            placement,
            mode: GestureMode::Idle,
            on_pointer_down: Callback::noop(),
            on_resize_pointer_down: Callback::noop(),
        }
    }

    #[wasm_bindgen_test]
    fn test_style_by_kind() {
        let placement = Placement::new(Point::new(150.0, 120.0), 200.0);
        assert_eq!(
            handle(placement).style(ElementKind::Photo),
            "left: 150px; top: 120px; width: 200px;"
        );
        let placement = Placement::new(Point::new(16.0, 48.0), 18.0);
        assert_eq!(
            handle(placement).style(ElementKind::Text),
            "left: 16px; top: 48px; font-size: 18px;"
        );
    }

    #[wasm_bindgen_test]
    fn test_initial_placement_prefers_seed() {
        let seed = PlacementRecord {
            x: 40.0,
            y: 10.0,
            width: None,
            font_size: Some(90),
            revision: 2,
        };
        let seeded = initial_placement(ElementKind::Text, Some(&seed), 3);
        assert_eq!(seeded.position, Point::new(40.0, 10.0));
        assert_eq!(seeded.size, 60.0);

        let fresh = initial_placement(ElementKind::Photo, None, 1);
        assert_eq!(fresh, Placement::default_for(ElementKind::Photo, 1));
    }

    #[wasm_bindgen_test]
    fn test_measure_detached_nodes() {
        assert!(measure(&NodeRef::default(), &NodeRef::default()).is_none());
    }
}
