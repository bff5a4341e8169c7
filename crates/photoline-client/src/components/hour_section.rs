use std::collections::HashMap;
use std::rc::Rc;

use photoline_core::{ElementId, PlacementRecord, TimelineSection};
use yew::prelude::*;

use super::{AddNoteForm, PhotoCard, TextNote};

#[derive(Properties, PartialEq)]
pub struct HourSectionProps {
    pub section: TimelineSection,
    pub placements: Rc<HashMap<ElementId, PlacementRecord>>,
}

/// One hour of the day. Its canvas bounds every drag and resize inside it.
#[function_component(HourSection)]
pub fn hour_section(props: &HourSectionProps) -> Html {
    let section_ref = use_node_ref();
    let section = &props.section;

    let photos = section.photos.iter().enumerate().map(|(index, photo)| {
        html! {
            <PhotoCard
                key={photo.id.to_string()}
                photo={photo.clone()}
                {index}
                seed={props.placements.get(&photo.id).copied()}
                section_ref={section_ref.clone()}
            />
        }
    });
    let notes = section.notes.iter().enumerate().map(|(index, note)| {
        html! {
            <TextNote
                key={note.id.to_string()}
                note={note.clone()}
                {index}
                seed={props.placements.get(&note.id).copied()}
                section_ref={section_ref.clone()}
            />
        }
    });

    html! {
        <section class="hour-section">
            <header>
                <span class="hour-label">{ section.bucket.to_string() }</span>
            </header>
            <div class="section-canvas" ref={section_ref.clone()}>
                { for photos }
                { for notes }
            </div>
            <AddNoteForm bucket={section.bucket} />
        </section>
    }
}
