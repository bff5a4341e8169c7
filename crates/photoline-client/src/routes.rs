//! Application routes.

use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    /// Redirects to the last viewed day, or today.
    #[at("/")]
    Home,
    /// One day of the timeline, `YYYY-MM-DD`.
    #[at("/day/:day")]
    Day { day: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}
