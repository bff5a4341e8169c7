//! Register a photo by URL and capture time.
//!
//! Uploading the file itself happens elsewhere; this only records where the
//! image lives and when it was taken.

use photoline_proto::timeline::AddPhotoRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

use crate::context::use_timeline_context;
use crate::services::convert::format_day;

#[derive(Clone, PartialEq, Default)]
struct PhotoDraft {
    url: String,
    /// `HH:MM` from the time input.
    time: String,
    caption: String,
}

fn text_input(draft: &UseStateHandle<PhotoDraft>, apply: fn(&mut PhotoDraft, String)) -> Callback<InputEvent> {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*draft).clone();
        apply(&mut next, input.value());
        draft.set(next);
    })
}

#[function_component(AddPhotoForm)]
pub fn add_photo_form() -> Html {
    let ctx = use_timeline_context();
    let draft = use_state(PhotoDraft::default);
    let error = use_state(|| None::<String>);
    let pending = use_state(|| false);

    let on_url = text_input(&draft, |d, v| d.url = v);
    let on_time = text_input(&draft, |d, v| d.time = v);
    let on_caption = text_input(&draft, |d, v| d.caption = v);

    let on_submit = {
        let client = ctx.client.clone();
        let reload = ctx.reload.clone();
        let day = ctx.day;
        let draft = draft.clone();
        let error = error.clone();
        let pending = pending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *pending {
                return;
            }
            let url = draft.url.trim().to_string();
            let time = draft.time.trim().to_string();
            if url.is_empty() || time.is_empty() {
                error.set(Some("Photo URL and time are required".to_string()));
                return;
            }
            let caption = Some(draft.caption.trim().to_string()).filter(|c| !c.is_empty());
            error.set(None);
            pending.set(true);

            let mut client = client.clone();
            let reload = reload.clone();
            let draft = draft.clone();
            let error = error.clone();
            let pending = pending.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let day = format_day(day);
                let request = AddPhotoRequest {
                    taken_at: format!("{day}T{time}"),
                    day: Some(day),
                    url,
                    caption,
                };
                match client.add_photo(request).await {
                    Ok(_) => {
                        draft.set(PhotoDraft::default());
                        reload.emit(());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e.message(), "failed to add photo");
                        error.set(Some(e.message().to_string()));
                    }
                }
                pending.set(false);
            });
        })
    };

    html! {
        <form class="inline-form add-photo-form" onsubmit={on_submit}>
            <input type="url" placeholder="Photo URL" value={draft.url.clone()} oninput={on_url} />
            <input type="time" value={draft.time.clone()} oninput={on_time} />
            <input type="text" placeholder="Caption" value={draft.caption.clone()} oninput={on_caption} />
            <button type="submit" disabled={*pending}>
                <Icon data={IconData::LUCIDE_IMAGE} width="14px" height="14px" />
                { "Add photo" }
            </button>
            if let Some(message) = &*error {
                <span class="form-error">{ message.clone() }</span>
            }
        </form>
    }
}
