//! One day of the timeline.

use chrono::NaiveDate;
use photoline_core::GestureArena;
use yew::prelude::*;

use crate::components::{
    AddNoteForm, AddPhotoForm, CompactView, DayHeader, HourSection, ViewToggle,
};
use crate::context::TimelineContext;
use crate::hooks::{
    DayTimelineHandle, ViewMode, use_clamp_config, use_day_timeline, use_last_day,
    use_timeline_service, use_view_mode,
};
use crate::pages::NotFoundPage;
use crate::services::GrpcPositionStore;
use crate::services::convert::{format_day, parse_day};

#[derive(Properties, PartialEq)]
pub struct DayPageProps {
    /// `YYYY-MM-DD` from the route.
    pub day: String,
}

#[function_component(DayPage)]
pub fn day_page(props: &DayPageProps) -> Html {
    match parse_day(&props.day) {
        Some(day) => html! { <DayView key={format_day(day)} {day} /> },
        None => html! { <NotFoundPage /> },
    }
}

#[derive(Properties, PartialEq)]
struct DayViewProps {
    day: NaiveDate,
}

#[function_component(DayView)]
fn day_view(props: &DayViewProps) -> Html {
    let day = props.day;
    let client = use_timeline_service();
    let clamp = use_clamp_config();
    let last_day = use_last_day();
    let view_mode = use_view_mode();
    let arena = use_mut_ref(|| GestureArena::new(clamp));
    let store = {
        let client = client.clone();
        use_memo((), move |_| GrpcPositionStore::new(client))
    };
    let DayTimelineHandle { state, reload } = use_day_timeline(day);

    use_effect_with(day, move |day| {
        last_day.set(Some(format_day(*day)));
        || ()
    });

    let context = TimelineContext {
        day,
        arena,
        store,
        client,
        reload,
    };

    let on_toggle_view = {
        let view_mode = view_mode.clone();
        Callback::from(move |()| view_mode.set(view_mode.toggled()))
    };

    let body = match (&state.timeline, &state.error) {
        (Some(timeline), _) if !timeline.is_empty() && *view_mode == ViewMode::Compact => html! {
            <CompactView sections={timeline.sections.clone()} />
        },
        (Some(timeline), _) if !timeline.is_empty() => html! {
            <>
                { for timeline.sections.iter().map(|section| html! {
                    <HourSection
                        key={section.bucket.to_string()}
                        section={section.clone()}
                        placements={state.placements.clone()}
                    />
                }) }
            </>
        },
        (Some(_), _) => html! {
            <>
                <p class="status">{ "Nothing on this day yet." }</p>
                <AddNoteForm />
            </>
        },
        (None, Some(error)) => html! {
            <p class="status error">{ format!("Could not load this day: {error}") }</p>
        },
        (None, None) => html! {
            <p class="status">{ "Loading…" }</p>
        },
    };

    html! {
        <ContextProvider<TimelineContext> {context}>
            <main class="page day-page">
                <DayHeader {day} />
                <div class="day-toolbar">
                    <AddPhotoForm />
                    <ViewToggle mode={*view_mode} on_toggle={on_toggle_view} />
                </div>
                { body }
            </main>
        </ContextProvider<TimelineContext>>
    }
}
