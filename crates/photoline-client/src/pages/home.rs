//! Entry page: jump to the last viewed day, or today.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_last_day;
use crate::routes::Route;
use crate::services::convert::{format_day, parse_day};

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let last_day = use_last_day();
    let day = last_day
        .as_deref()
        .and_then(parse_day)
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    html! {
        <Redirect<Route> to={Route::Day { day: format_day(day) }} />
    }
}
