//! UI components for the photoline client.

mod add_note_form;
mod add_photo_form;
mod compact_view;
mod day_header;
mod hour_section;
mod photo_card;
mod text_note;
mod view_toggle;

pub use add_note_form::AddNoteForm;
pub use add_photo_form::AddPhotoForm;
pub use compact_view::CompactView;
pub use day_header::DayHeader;
pub use hour_section::HourSection;
pub use photo_card::PhotoCard;
pub use text_note::TextNote;
pub use view_toggle::ViewToggle;

use photoline_core::GestureMode;

fn gesture_class(mode: GestureMode) -> Option<&'static str> {
    match mode {
        GestureMode::Idle => None,
        GestureMode::Dragging => Some("dragging"),
        GestureMode::Resizing => Some("resizing"),
        GestureMode::Editing => Some("editing"),
    }
}

/// Keeps a press on a control from starting a drag of its element.
fn stop_pointer_down(event: web_sys::PointerEvent) {
    event.stop_propagation();
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::HtmlElement;

    fn element(tag: &str, class: &str) -> HtmlElement {
        let element = gloo::utils::document().create_element(tag).unwrap();
        element.set_class_name(class);
        element.unchecked_into()
    }

    /// The clamp works on `left`/`top`; the drawn box must start exactly there.
    #[wasm_bindgen_test]
    fn test_positioned_elements_draw_at_their_offset() {
        let document = gloo::utils::document();
        let style = document.create_element("style").unwrap();
        style.set_text_content(Some(include_str!("../../style.css")));
        document.head().unwrap().append_child(&style).unwrap();

        let canvas = element("div", "section-canvas");
        gloo::utils::body().append_child(&canvas).unwrap();
        for (tag, class) in [("figure", "positioned photo-card"), ("div", "positioned text-note")] {
            let node = element(tag, class);
            node.set_attribute("style", "left: 24px; top: 12px; width: 80px;").unwrap();
            canvas.append_child(&node).unwrap();

            let outer = canvas.get_bounding_client_rect();
            let inner = node.get_bounding_client_rect();
            let origin_x = outer.left() + f64::from(canvas.client_left());
            let origin_y = outer.top() + f64::from(canvas.client_top());
            assert_eq!(inner.left() - origin_x, 24.0, "{class}");
            assert_eq!(inner.top() - origin_y, 12.0, "{class}");
        }

        canvas.remove();
        style.remove();
    }
}
