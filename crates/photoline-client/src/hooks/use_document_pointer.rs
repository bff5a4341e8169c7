//! Document-level pointer tracking for the duration of a gesture.
//!
//! Once a drag or resize starts, the pointer can leave the element (or the
//! section) entirely. Listening on the document keeps the gesture alive until
//! release. Listeners exist only while `active` is set and are dropped when it
//! clears or the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::PointerEvent;
use yew::prelude::*;

type PointerCallbacks = Rc<RefCell<(Callback<PointerEvent>, Callback<PointerEvent>)>>;

fn listen(callbacks: &PointerCallbacks, event_type: &'static str, release: bool) -> EventListener {
    let callbacks = callbacks.clone();
    EventListener::new(&gloo::utils::document(), event_type, move |event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        // Clone out so the callback may re-render without holding the borrow.
        let callback = {
            let callbacks = callbacks.borrow();
            if release {
                callbacks.1.clone()
            } else {
                callbacks.0.clone()
            }
        };
        callback.emit(event.clone());
    })
}

/// Route document `pointermove` to `on_move` and `pointerup` /
/// `pointercancel` to `on_release` while `active`.
///
/// The latest callbacks are always used, even if they changed after the
/// listeners were attached.
#[hook]
pub fn use_document_pointer(
    active: bool,
    on_move: Callback<PointerEvent>,
    on_release: Callback<PointerEvent>,
) {
    let callbacks = use_mut_ref(|| (on_move.clone(), on_release.clone()));
    *callbacks.borrow_mut() = (on_move, on_release);

    use_effect_with(active, move |active| {
        let listeners = active.then(|| {
            [
                listen(&callbacks, "pointermove", false),
                listen(&callbacks, "pointerup", true),
                listen(&callbacks, "pointercancel", true),
            ]
        });
        move || drop(listeners)
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::PointerEvent;
    use yew::platform::time::sleep;
    use yew::prelude::*;

    use super::use_document_pointer;

    #[derive(Properties, PartialEq, Clone)]
    struct TrackerProps {
        active: bool,
        moves: Rc<Cell<u32>>,
        releases: Rc<Cell<u32>>,
    }

    #[function_component(Tracker)]
    fn tracker(props: &TrackerProps) -> Html {
        let count = |counter: &Rc<Cell<u32>>| {
            let counter = counter.clone();
            Callback::from(move |_: PointerEvent| counter.set(counter.get() + 1))
        };
        use_document_pointer(props.active, count(&props.moves), count(&props.releases));
        html! {}
    }

    fn dispatch(event_type: &str) {
        let event = PointerEvent::new(event_type).unwrap();
        gloo::utils::document().dispatch_event(&event).unwrap();
    }

    async fn settle() {
        sleep(Duration::from_millis(10)).await;
    }

    #[wasm_bindgen_test]
    async fn test_listeners_follow_active_and_unmount() {
        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        let props = TrackerProps {
            active: true,
            moves: Rc::default(),
            releases: Rc::default(),
        };
        let mut app =
            yew::Renderer::<Tracker>::with_root_and_props(root.clone(), props.clone()).render();
        settle().await;

        dispatch("pointermove");
        dispatch("pointerup");
        dispatch("pointercancel");
        assert_eq!(props.moves.get(), 1);
        assert_eq!(props.releases.get(), 2);

        app.update(TrackerProps {
            active: false,
            ..props.clone()
        });
        settle().await;
        dispatch("pointermove");
        dispatch("pointerup");
        assert_eq!(props.moves.get(), 1);
        assert_eq!(props.releases.get(), 2);

        app.update(props.clone());
        settle().await;
        dispatch("pointermove");
        assert_eq!(props.moves.get(), 2);

        // Unmounted mid-gesture.
        app.destroy();
        settle().await;
        dispatch("pointermove");
        dispatch("pointerup");
        assert_eq!(props.moves.get(), 2);
        assert_eq!(props.releases.get(), 2);
        root.remove();
    }
}
