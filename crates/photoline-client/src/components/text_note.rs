use photoline_core::{ElementKind, GestureMode, NoteEntry, PlacementRecord, validate_note_content};
use photoline_proto::timeline::{DeleteNoteRequest, UpdateNoteRequest};
use web_sys::{HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;
use yew_icons::{Icon, IconData};

use super::{gesture_class, stop_pointer_down};
use crate::context::use_timeline_context;
use crate::hooks::{PositionedOptions, use_positioned_element};

#[derive(Properties, PartialEq)]
pub struct TextNoteProps {
    pub note: NoteEntry,
    pub index: usize,
    pub seed: Option<PlacementRecord>,
    pub section_ref: NodeRef,
}

/// Note positioned in its hour section. Double-click edits the text; blur
/// saves it and Escape discards the change. The handle scales the font.
#[function_component(TextNote)]
pub fn text_note(props: &TextNoteProps) -> Html {
    let ctx = use_timeline_context();
    let handle = use_positioned_element(PositionedOptions {
        id: props.note.id.clone(),
        bucket: props.note.bucket,
        kind: ElementKind::Text,
        seed: props.seed,
        index: props.index,
        section_ref: props.section_ref.clone(),
    });
    let draft = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let editor_ref = use_node_ref();

    {
        let editor_ref = editor_ref.clone();
        use_effect_with(draft.is_some(), move |editing| {
            if *editing
                && let Some(textarea) = editor_ref.cast::<HtmlTextAreaElement>()
            {
                let _ = textarea.focus();
                textarea.select();
            }
            || ()
        });
    }

    let on_double_click = {
        let arena = ctx.arena.clone();
        let draft = draft.clone();
        let error = error.clone();
        let id = props.note.id.clone();
        let content = props.note.content.clone();
        Callback::from(move |_: MouseEvent| {
            if arena.borrow_mut().begin_edit(&id) {
                error.set(None);
                draft.set(Some(content.clone()));
            }
        })
    };

    // `true` saves the draft, `false` discards it.
    let finish_edit = {
        let arena = ctx.arena.clone();
        let client = ctx.client.clone();
        let reload = ctx.reload.clone();
        let draft = draft.clone();
        let error = error.clone();
        let id = props.note.id.clone();
        let original = props.note.content.clone();
        Callback::from(move |save: bool| {
            // Blur can follow Escape; only the first exit counts.
            if !arena.borrow_mut().end_edit(&id) {
                return;
            }
            let text = (*draft).clone().unwrap_or_default();
            draft.set(None);
            if !save || text.trim() == original.trim() {
                return;
            }

            let content = match validate_note_content(&text) {
                Ok(content) => content,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let mut client = client.clone();
            let reload = reload.clone();
            let error = error.clone();
            let note_id = id.to_string();
            wasm_bindgen_futures::spawn_local(async move {
                match client
                    .update_note(UpdateNoteRequest {
                        note_id: note_id.clone(),
                        content,
                    })
                    .await
                {
                    Ok(_) => reload.emit(()),
                    Err(e) => {
                        tracing::warn!(note = %note_id, error = %e.message(), "failed to update note");
                        error.set(Some(e.message().to_string()));
                    }
                }
            });
        })
    };

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(Some(textarea.value()));
        })
    };

    let on_blur = {
        let finish_edit = finish_edit.clone();
        Callback::from(move |_: FocusEvent| finish_edit.emit(true))
    };

    let on_keydown = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            e.prevent_default();
            finish_edit.emit(false);
        }
    });

    let on_delete = {
        let client = ctx.client.clone();
        let reload = ctx.reload.clone();
        let note_id = props.note.id.to_string();
        Callback::from(move |_: MouseEvent| {
            let mut client = client.clone();
            let reload = reload.clone();
            let note_id = note_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client
                    .delete_note(DeleteNoteRequest {
                        note_id: note_id.clone(),
                    })
                    .await
                {
                    Ok(_) => reload.emit(()),
                    Err(e) => {
                        tracing::warn!(note = %note_id, error = %e.message(), "failed to delete note");
                    }
                }
            });
        })
    };

    let editing = handle.mode == GestureMode::Editing;

    html! {
        <div
            ref={handle.node_ref.clone()}
            class={classes!("positioned", "text-note", gesture_class(handle.mode))}
            style={handle.style(ElementKind::Text)}
            onpointerdown={handle.on_pointer_down.clone()}
            ondblclick={on_double_click}
        >
            if let (true, Some(text)) = (editing, &*draft) {
                <textarea
                    ref={editor_ref}
                    value={text.clone()}
                    oninput={on_input}
                    onblur={on_blur}
                    onkeydown={on_keydown}
                />
            } else {
                { props.note.content.clone() }
                <button
                    class="element-delete"
                    title="Delete note"
                    onpointerdown={Callback::from(stop_pointer_down)}
                    onclick={on_delete}
                >
                    <Icon data={IconData::LUCIDE_X} width="12px" height="12px" />
                </button>
                <div class="resize-handle" onpointerdown={handle.on_resize_pointer_down.clone()} />
            }
            if let Some(message) = &*error {
                <p class="form-error">{ message.clone() }</p>
            }
        </div>
    }
}
