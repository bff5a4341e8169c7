//! Hook for fetching one day of the timeline via gRPC.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDate;
use photoline_core::{DayTimeline, ElementId, PlacementRecord};
use photoline_proto::timeline::ListDayRequest;
use yew::prelude::*;

use super::use_timeline_service;
use crate::services::convert::{day_from_proto, format_day};

#[derive(Clone, PartialEq, Default)]
pub struct DayTimelineState {
    pub timeline: Option<Rc<DayTimeline>>,
    /// Stored placements from the listing, used to seed elements.
    pub placements: Rc<HashMap<ElementId, PlacementRecord>>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct DayTimelineHandle {
    pub state: UseStateHandle<DayTimelineState>,
    pub reload: Callback<()>,
}

/// Fetch `day` on mount, whenever `day` changes, and on `reload`.
///
/// A reload keeps showing the previous listing until the new one arrives.
#[hook]
pub fn use_day_timeline(day: NaiveDate) -> DayTimelineHandle {
    let client = use_timeline_service();
    let state = use_state(|| DayTimelineState {
        loading: true,
        ..Default::default()
    });
    let generation = use_state(|| 0_u32);

    {
        let state = state.clone();
        use_effect_with((day, *generation), move |(day, _)| {
            let day = *day;
            let mut client = client.clone();

            // Keep the current listing on screen while refetching the same day.
            let previous = if state.timeline.as_ref().is_some_and(|t| t.day == day) {
                (*state).clone()
            } else {
                DayTimelineState::default()
            };

            wasm_bindgen_futures::spawn_local(async move {
                state.set(DayTimelineState {
                    loading: true,
                    error: None,
                    ..previous.clone()
                });

                let request = ListDayRequest {
                    day: format_day(day),
                };

                match client.list_day(request).await {
                    Ok(response) => {
                        let (timeline, placements) = day_from_proto(day, response.into_inner());
                        tracing::debug!(%day, sections = timeline.sections.len(), "day loaded");
                        state.set(DayTimelineState {
                            timeline: Some(Rc::new(timeline)),
                            placements: Rc::new(placements),
                            loading: false,
                            error: None,
                        });
                    }
                    Err(e) => {
                        tracing::warn!(%day, error = %e.message(), "failed to load day");
                        state.set(DayTimelineState {
                            loading: false,
                            error: Some(e.message().to_string()),
                            ..previous
                        });
                    }
                }
            });

            || ()
        });
    }

    let reload = {
        let generation = generation.clone();
        Callback::from(move |()| generation.set(generation.wrapping_add(1)))
    };

    DayTimelineHandle { state, reload }
}
