use photoline_core::{TimeBucket, validate_note_content};
use photoline_proto::timeline::AddNoteRequest;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_icons::{Icon, IconData};

use crate::context::use_timeline_context;
use crate::services::convert::format_day;

#[derive(Properties, PartialEq)]
pub struct AddNoteFormProps {
    /// Section the note goes into. Without one the form offers an hour picker.
    #[prop_or_default]
    pub bucket: Option<TimeBucket>,
}

#[function_component(AddNoteForm)]
pub fn add_note_form(props: &AddNoteFormProps) -> Html {
    let ctx = use_timeline_context();
    let content = use_state(String::new);
    let picked = use_state(|| {
        props
            .bucket
            .unwrap_or_else(|| TimeBucket::of(&chrono::Local::now()))
    });
    let error = use_state(|| None::<String>);
    let pending = use_state(|| false);

    let on_input = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            content.set(input.value());
        })
    };

    let on_pick = {
        let picked = picked.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(bucket) = select.value().parse::<TimeBucket>() {
                picked.set(bucket);
            }
        })
    };

    let on_submit = {
        let client = ctx.client.clone();
        let reload = ctx.reload.clone();
        let day = ctx.day;
        let bucket = props.bucket.unwrap_or(*picked);
        let content = content.clone();
        let error = error.clone();
        let pending = pending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *pending {
                return;
            }
            let text = match validate_note_content(&content) {
                Ok(text) => text,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            error.set(None);
            pending.set(true);

            let mut client = client.clone();
            let reload = reload.clone();
            let content = content.clone();
            let error = error.clone();
            let pending = pending.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let request = AddNoteRequest {
                    day: format_day(day),
                    bucket: bucket.to_string(),
                    content: text,
                };
                match client.add_note(request).await {
                    Ok(_) => {
                        tracing::debug!(%bucket, "note added");
                        content.set(String::new());
                        reload.emit(());
                    }
                    Err(e) => {
                        tracing::warn!(%bucket, error = %e.message(), "failed to add note");
                        error.set(Some(e.message().to_string()));
                    }
                }
                pending.set(false);
            });
        })
    };

    html! {
        <form class="inline-form add-note-form" onsubmit={on_submit}>
            if props.bucket.is_none() {
                <select onchange={on_pick}>
                    { for TimeBucket::all().map(|bucket| html! {
                        <option value={bucket.to_string()} selected={bucket == *picked}>
                            { bucket.to_string() }
                        </option>
                    }) }
                </select>
            }
            <input
                type="text"
                placeholder="Add a note"
                value={(*content).clone()}
                oninput={on_input}
            />
            <button type="submit" disabled={*pending}>
                <Icon data={IconData::LUCIDE_PLUS} width="14px" height="14px" />
                { "Note" }
            </button>
            if let Some(message) = &*error {
                <span class="form-error">{ message.clone() }</span>
            }
        </form>
    }
}
