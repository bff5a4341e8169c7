//! Main application component.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{DayPage, HomePage, NotFoundPage};
use crate::routes::Route;

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Day { day } => html! { <DayPage {day} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
