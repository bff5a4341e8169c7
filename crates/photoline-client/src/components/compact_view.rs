use photoline_core::{SectionSummary, TimelineSection};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CompactViewProps {
    pub sections: Vec<TimelineSection>,
}

/// The day with one read-only row per hour.
#[function_component(CompactView)]
pub fn compact_view(props: &CompactViewProps) -> Html {
    html! {
        <div class="compact-view">
            { for props.sections.iter().map(|section| {
                let summary = section.summary();
                html! { <CompactRow key={summary.bucket.to_string()} {summary} /> }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CompactRowProps {
    summary: SectionSummary,
}

#[function_component(CompactRow)]
fn compact_row(props: &CompactRowProps) -> Html {
    let summary = &props.summary;

    html! {
        <div class="compact-row">
            <span class="hour-label">{ summary.bucket.to_string() }</span>
            <div class="compact-thumbnails">
                { for summary.thumbnails.iter().map(|photo| html! {
                    <img
                        key={photo.id.to_string()}
                        src={photo.display_url().to_string()}
                        alt={photo.caption.clone().unwrap_or_default()}
                    />
                }) }
                if summary.more > 0 {
                    <span class="compact-more">{ format!("+{}", summary.more) }</span>
                }
            </div>
            <span class="compact-label">{ summary.label.clone() }</span>
        </div>
    }
}
