use photoline_core::{ElementKind, PhotoEntry, PlacementRecord};
use photoline_proto::timeline::DeletePhotoRequest;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

use super::{gesture_class, stop_pointer_down};
use crate::context::use_timeline_context;
use crate::hooks::{PositionedOptions, use_positioned_element};

#[derive(Properties, PartialEq)]
pub struct PhotoCardProps {
    pub photo: PhotoEntry,
    pub index: usize,
    pub seed: Option<PlacementRecord>,
    pub section_ref: NodeRef,
}

/// Photo positioned in its hour section. Drag to move, pull the corner handle
/// to change the width.
#[function_component(PhotoCard)]
pub fn photo_card(props: &PhotoCardProps) -> Html {
    let ctx = use_timeline_context();
    let handle = use_positioned_element(PositionedOptions {
        id: props.photo.id.clone(),
        bucket: props.photo.bucket(),
        kind: ElementKind::Photo,
        seed: props.seed,
        index: props.index,
        section_ref: props.section_ref.clone(),
    });

    let on_delete = {
        let client = ctx.client.clone();
        let reload = ctx.reload.clone();
        let photo_id = props.photo.id.to_string();
        Callback::from(move |_: MouseEvent| {
            let mut client = client.clone();
            let reload = reload.clone();
            let photo_id = photo_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client
                    .delete_photo(DeletePhotoRequest {
                        photo_id: photo_id.clone(),
                    })
                    .await
                {
                    Ok(_) => reload.emit(()),
                    Err(e) => {
                        tracing::warn!(photo = %photo_id, error = %e.message(), "failed to delete photo");
                    }
                }
            });
        })
    };

    let alt = props.photo.caption.clone().unwrap_or_default();

    html! {
        <figure
            ref={handle.node_ref.clone()}
            class={classes!("positioned", "photo-card", gesture_class(handle.mode))}
            style={handle.style(ElementKind::Photo)}
            onpointerdown={handle.on_pointer_down.clone()}
        >
            <img src={props.photo.display_url().to_string()} {alt} draggable="false" />
            if let Some(caption) = &props.photo.caption {
                <figcaption>{ caption.clone() }</figcaption>
            }
            <button
                class="element-delete"
                title="Delete photo"
                onpointerdown={Callback::from(stop_pointer_down)}
                onclick={on_delete}
            >
                <Icon data={IconData::LUCIDE_X} width="12px" height="12px" />
            </button>
            <div class="resize-handle" onpointerdown={handle.on_resize_pointer_down.clone()} />
        </figure>
    }
}
