use chrono::NaiveDate;
use yew::prelude::*;
use yew_icons::{Icon, IconData};
use yew_router::prelude::*;

use crate::routes::Route;
use crate::services::convert::format_day;

#[derive(Properties, PartialEq)]
pub struct DayHeaderProps {
    pub day: NaiveDate,
}

fn day_route(day: Option<NaiveDate>, fallback: NaiveDate) -> Route {
    Route::Day {
        day: format_day(day.unwrap_or(fallback)),
    }
}

/// Date title with links to the previous and next day.
#[function_component(DayHeader)]
pub fn day_header(props: &DayHeaderProps) -> Html {
    let day = props.day;

    html! {
        <header class="day-header">
            <Link<Route> to={day_route(day.pred_opt(), day)}>
                <Icon data={IconData::LUCIDE_CHEVRON_LEFT} width="16px" height="16px" />
                { "Previous" }
            </Link<Route>>
            <h1>{ day.format("%A, %B %-d, %Y").to_string() }</h1>
            <Link<Route> to={day_route(day.succ_opt(), day)}>
                { "Next" }
                <Icon data={IconData::LUCIDE_CHEVRON_RIGHT} width="16px" height="16px" />
            </Link<Route>>
        </header>
    }
}
